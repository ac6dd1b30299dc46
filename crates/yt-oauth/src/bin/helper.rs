use clap::Parser;
use yt_oauth::run_auth_flow;

/// One-shot OAuth 2.0 authorizer: creates the token file used by yt-comment-export
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// OAuth client ID
    #[arg(long, required = true)]
    client_id: String,

    /// OAuth client secret
    #[arg(long, required = true)]
    client_secret: String,

    /// Path to save the OAuth token file
    #[arg(long, default_value = "token.json")]
    token_path: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();

    let token = run_auth_flow(&args.client_id, &args.client_secret).await?;
    token.save(&args.token_path)?;

    eprintln!("\nOAuth token saved to: {}", args.token_path);
    eprintln!("You can now run yt-comment-export");

    Ok(())
}
