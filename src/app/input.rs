//! Query input from files and stdin.

use std::path::Path;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, BufReader};

/// Reads queries from `path`, or from stdin when `path` is `-`.
///
/// Each line is one submission. Lines starting with `#` are comments and
/// skipped; blank lines are kept, since submitting an empty box is a
/// legitimate (failing) submission.
pub async fn read_queries(path: &Path) -> Result<Vec<String>> {
    if path.as_os_str() == "-" {
        log::info!("Reading queries from stdin");
        read_lines(BufReader::new(tokio::io::stdin())).await
    } else {
        let file = tokio::fs::File::open(path)
            .await
            .with_context(|| format!("Failed to open query file {}", path.display()))?;
        read_lines(BufReader::new(file)).await
    }
}

async fn read_lines<R: AsyncBufRead + Unpin>(reader: R) -> Result<Vec<String>> {
    let mut queries = Vec::new();
    let mut lines = reader.lines();
    while let Some(line) = lines
        .next_line()
        .await
        .context("Failed to read query line")?
    {
        if line.trim_start().starts_with('#') {
            continue;
        }
        queries.push(line);
    }
    Ok(queries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[tokio::test]
    async fn test_comments_skipped_blank_lines_kept() {
        let input = "# header\n8.8.8.8\n\n  # indented comment\nexample.com\n";
        let queries = read_lines(input.as_bytes()).await.unwrap();
        assert_eq!(queries, vec!["8.8.8.8", "", "example.com"]);
    }

    #[tokio::test]
    async fn test_read_queries_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "1.1.1.1").unwrap();
        writeln!(file, "# skip me").unwrap();
        writeln!(file, "rust-lang.org").unwrap();

        let queries = read_queries(file.path()).await.unwrap();
        assert_eq!(queries, vec!["1.1.1.1", "rust-lang.org"]);
    }

    #[tokio::test]
    async fn test_missing_file_reports_path() {
        let err = read_queries(Path::new("/nonexistent/queries.txt"))
            .await
            .unwrap_err();
        assert!(format!("{err:#}").contains("/nonexistent/queries.txt"));
    }
}
