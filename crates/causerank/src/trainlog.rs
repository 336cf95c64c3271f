//! Append-only training log
//!
//! One line per logged response, tab-separated and positional with no
//! escaping: `tagged_query \t query \t 0 \t (rank \t feature...)*`.
//! Consumers must treat the format as fragile and schema-fixed.

use async_trait::async_trait;
use causerank_core::Answer;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tokio::fs::OpenOptions;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

/// Training log errors
#[derive(Error, Debug)]
pub enum TrainLogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, TrainLogError>;

/// Sink for training records.
///
/// Appends must never fail or delay the response they describe; the
/// caller runs them off the response path and reports failures
/// through tracing only.
#[async_trait]
pub trait TrainLog: Send + Sync {
    /// Append one record covering every answer in rank order.
    async fn append(&self, tagged_query: &str, query: &str, answers: &[Answer]) -> Result<()>;
}

/// Render one log line. Ranks are 1-indexed over all answers.
pub fn format_line(tagged_query: &str, query: &str, answers: &[Answer]) -> String {
    let mut line = format!("{tagged_query}\t{query}\t0");
    for (rank, answer) in answers.iter().enumerate() {
        line.push('\t');
        line.push_str(&(rank + 1).to_string());
        for feature in &answer.features {
            line.push('\t');
            line.push_str(&feature.to_string());
        }
    }
    line.push('\n');
    line
}

/// File-backed training log.
///
/// The file is opened in append mode per write; a write lock
/// serializes appends so concurrent responses never interleave within
/// a line.
pub struct FileTrainLog {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl FileTrainLog {
    /// Create a log writing to the given path
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
            write_lock: Mutex::new(()),
        }
    }

    /// Path the log appends to
    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl TrainLog for FileTrainLog {
    async fn append(&self, tagged_query: &str, query: &str, answers: &[Answer]) -> Result<()> {
        let line = format_line(tagged_query, query, answers);

        let _guard = self.write_lock.lock().await;
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }
}

/// In-memory training log for tests
#[derive(Default)]
pub struct MemoryTrainLog {
    lines: Mutex<Vec<String>>,
}

impl MemoryTrainLog {
    /// Create an empty in-memory log
    pub fn new() -> Self {
        Self::default()
    }

    /// Lines appended so far
    pub async fn lines(&self) -> Vec<String> {
        self.lines.lock().await.clone()
    }
}

#[async_trait]
impl TrainLog for MemoryTrainLog {
    async fn append(&self, tagged_query: &str, query: &str, answers: &[Answer]) -> Result<()> {
        let line = format_line(tagged_query, query, answers);
        self.lines.lock().await.push(line);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_answers() -> Vec<Answer> {
        vec![
            Answer {
                display: "first".to_string(),
                features: vec![3.0, 0.5],
            },
            Answer {
                display: "second".to_string(),
                features: vec![1.0, 0.25],
            },
        ]
    }

    #[test]
    fn test_format_line_schema() {
        let line = format_line("why/WRB birds/NN", "why birds", &sample_answers());
        assert_eq!(line, "why/WRB birds/NN\twhy birds\t0\t1\t3\t0.5\t2\t1\t0.25\n");
    }

    #[test]
    fn test_format_line_without_answers() {
        let line = format_line("tag", "q", &[]);
        assert_eq!(line, "tag\tq\t0\n");
    }

    #[tokio::test]
    async fn test_file_log_appends_one_line_per_call() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log_training.txt");
        let log = FileTrainLog::new(&path);

        log.append("t1", "q1", &sample_answers()).await.unwrap();
        log.append("t2", "q2", &[]).await.unwrap();

        let content = tokio::fs::read_to_string(&path).await.unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].starts_with("t1\tq1\t0"));
        assert_eq!(lines[1], "t2\tq2\t0");
    }

    #[tokio::test]
    async fn test_memory_log_records_lines() {
        let log = MemoryTrainLog::new();
        log.append("t", "q", &[]).await.unwrap();
        let lines = log.lines().await;
        assert_eq!(lines, vec!["t\tq\t0\n".to_string()]);
    }
}
