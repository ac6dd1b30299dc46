//! CSV exporter: the output contract for one pipeline run.

use std::path::Path;

use crate::error::ExportError;
use crate::types::Row;

/// Column order of the export file; must stay in sync with the field order
/// of [`Row`].
pub const HEADER: [&str; 11] = [
    "Video ID",
    "Video Date",
    "Title",
    "Comment Text",
    "Comment Id",
    "Comment Date",
    "Comment Likes",
    "Comment Replies",
    "Reply Text",
    "Reply Date",
    "Reply Likes",
];

/// Writes `rows` to `path`, truncating any previous run's output. The header
/// row is always written, even for an empty result set. Fields are quoted
/// only when they need to be; `None` reply columns come out blank.
pub fn write_csv(path: &Path, rows: &[Row]) -> Result<(), ExportError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;
    writer.write_record(HEADER)?;
    for row in rows {
        writer.serialize(row)?;
    }
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{CommentThread, Reply, Video};
    use std::fs;

    fn video() -> Video {
        Video {
            id: "vid1".to_string(),
            title: "Q&A, part two".to_string(),
            published_at: "2024-02-01T10:00:00Z".to_string(),
        }
    }

    fn thread(text: &str, replies: u64) -> CommentThread {
        CommentThread {
            id: "c1".to_string(),
            text: text.to_string(),
            published_at: "2024-02-01T11:00:00Z".to_string(),
            like_count: 2,
            total_reply_count: replies,
        }
    }

    #[test]
    fn empty_result_set_still_gets_a_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("comments.csv");
        write_csv(&path, &[]).unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(
            contents.trim_end(),
            "Video ID,Video Date,Title,Comment Text,Comment Id,Comment Date,\
             Comment Likes,Comment Replies,Reply Text,Reply Date,Reply Likes"
        );
    }

    #[test]
    fn reply_columns_are_blank_for_comment_only_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("comments.csv");
        let rows = vec![Row::comment_only(&video(), &thread("plain comment", 3))];
        write_csv(&path, &rows).unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        let data_line = contents.lines().nth(1).unwrap();
        assert!(data_line.ends_with(",3,,,"), "line was: {}", data_line);
    }

    #[test]
    fn fields_are_quoted_only_when_needed() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("comments.csv");
        let rows = vec![Row::comment_only(&video(), &thread("so true, agreed", 0))];
        write_csv(&path, &rows).unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        let data_line = contents.lines().nth(1).unwrap();
        // The comma-bearing title and comment text get quoted, the ids do not.
        assert!(data_line.starts_with("vid1,"));
        assert!(data_line.contains("\"Q&A, part two\""));
        assert!(data_line.contains("\"so true, agreed\""));
    }

    #[test]
    fn unicode_comment_text_survives_the_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("comments.csv");
        let text = "すごい! great vid 🎉";
        let rows = vec![Row::comment_only(&video(), &thread(text, 1))];
        write_csv(&path, &rows).unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains(text));
    }

    #[test]
    fn rerun_overwrites_instead_of_appending() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("comments.csv");
        let reply = Reply {
            text: "first".to_string(),
            published_at: "2024-02-01T12:00:00Z".to_string(),
            like_count: 0,
        };
        let two_rows = vec![
            Row::with_reply(&video(), &thread("t", 6), &reply),
            Row::with_reply(&video(), &thread("t", 6), &reply),
        ];
        write_csv(&path, &two_rows).unwrap();
        let one_row = vec![Row::comment_only(&video(), &thread("t", 1))];
        write_csv(&path, &one_row).unwrap();
        let contents = fs::read_to_string(&path).unwrap();
        assert_eq!(contents.lines().count(), 2, "header plus one data row");
    }
}
