use std::io::{self, Write};
use std::path::PathBuf;

use clap::Parser;
use yt_comment_export::{
    DEFAULT_API_BASE, DateWindow, FetchConfig, SearchRequest, YouTubeClient, collect_rows,
    date::local_to_rfc3339_utc, write_csv,
};
use yt_oauth::Authenticator;

/// YouTube Comment Export - fetches channel video comments and replies into a CSV file
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Search keyword (prompted for when omitted)
    #[arg(long)]
    keyword: Option<String>,

    /// Channel ID to search (prompted for when omitted)
    #[arg(long)]
    channel_id: Option<String>,

    /// Start of the publication window, dd-Mon-yyyy hh:mm:ss in local time
    /// (prompted for when omitted; leave blank for no filter)
    #[arg(long)]
    from: Option<String>,

    /// End of the publication window, dd-Mon-yyyy hh:mm:ss in local time
    /// (prompted for when omitted; leave blank for no filter)
    #[arg(long)]
    to: Option<String>,

    /// Path of the CSV file to write (overwritten on every run)
    #[arg(long, default_value = "comments.csv")]
    output: PathBuf,

    /// Path to the OAuth token file written by yt-oauth-helper
    #[arg(long, default_value = "token.json")]
    token_path: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    // Refresh the stored credentials once, up front; the pipeline reuses the
    // resulting bearer token for its entire run.
    let mut auth = Authenticator::from_file(&args.token_path)?;
    let access_token = auth.access_token().await?;

    let keyword = match args.keyword {
        Some(keyword) => keyword,
        None => prompt("Enter a keyword: ")?,
    };
    let channel_id = match args.channel_id {
        Some(channel_id) if !channel_id.trim().is_empty() => channel_id,
        _ => prompt_channel_id()?,
    };

    let config = FetchConfig {
        progress: true,
        ..FetchConfig::default()
    };
    eprintln!("Page size set to: {}", config.page_size);
    eprintln!(
        "A date range wider than about 7 days may hit the {}-video search cap",
        config.max_videos()
    );

    let window = resolve_window(args.from, args.to)?;

    let base_url =
        std::env::var("YT_API_BASE_URL").unwrap_or_else(|_| DEFAULT_API_BASE.to_string());
    let client = YouTubeClient::new(base_url, access_token, config);
    let request = SearchRequest {
        channel_id,
        keyword,
        window,
    };

    let run = collect_rows(&client, &request).await;

    // Flush whatever was collected, even after a mid-run failure: a partial
    // CSV beats losing the quota already spent on it.
    write_csv(&args.output, &run.rows)?;
    eprintln!("Wrote {} rows to {}", run.rows.len(), args.output.display());

    if let Some(failure) = run.failure {
        eprintln!("Error during {}: {}", failure.stage, failure.error);
        eprintln!("Partial results were kept in {}", args.output.display());
        std::process::exit(1);
    }

    Ok(())
}

/// Resolves the operator's from/to input into a search window. Both bounds
/// present: parse and filter. One or none: run unfiltered, since the
/// endpoint's behavior with a single bound is not something this tool
/// relies on.
fn resolve_window(
    from: Option<String>,
    to: Option<String>,
) -> Result<DateWindow, Box<dyn std::error::Error>> {
    let from = match from {
        Some(value) => value,
        None => prompt("Enter a fromTime (dd-Mon-yyyy hh:mm:ss, blank for none): ")?,
    };
    let to = match to {
        Some(value) => value,
        None => prompt("Enter a toTime (dd-Mon-yyyy hh:mm:ss, blank for none): ")?,
    };

    if !from.is_empty() && !to.is_empty() {
        return Ok(DateWindow {
            published_after: Some(local_to_rfc3339_utc(&from)?),
            published_before: Some(local_to_rfc3339_utc(&to)?),
        });
    }
    if from.is_empty() != to.is_empty() {
        eprintln!("Only one of fromTime/toTime was provided; searching without a date range.");
    } else {
        eprintln!("No date range provided; searching without one.");
    }
    Ok(DateWindow::default())
}

fn prompt(label: &str) -> io::Result<String> {
    eprint!("{}", label);
    io::stderr().flush()?;
    let mut line = String::new();
    io::stdin().read_line(&mut line)?;
    Ok(line.trim().to_string())
}

fn prompt_channel_id() -> io::Result<String> {
    loop {
        let value = prompt("Enter a channelId: ")?;
        if value.is_empty() {
            eprintln!("channelId is a required input");
            continue;
        }
        return Ok(value);
    }
}
