use shared_types::{FeedMessage, MessageStatus};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("Feed I/O failed for {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Feed file {path} is not valid JSON: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Newest-first message history persisted as a JSON array
#[derive(Debug, Clone)]
pub struct FeedStore {
    path: PathBuf,
    max_entries: usize,
}

impl FeedStore {
    pub fn new(path: impl Into<PathBuf>, max_entries: usize) -> Self {
        Self {
            path: path.into(),
            max_entries: max_entries.max(1),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the feed. A missing file is an empty feed. Entries stored with a
    /// legacy status are rewritten to `IGNORED` and the file is saved back.
    pub fn load(&self) -> Result<Vec<FeedMessage>, FeedError> {
        let raw = match std::fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(FeedError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        if raw.trim().is_empty() {
            return Ok(Vec::new());
        }

        let values: Vec<serde_json::Value> =
            serde_json::from_str(&raw).map_err(|source| self.json_error(source))?;
        let migrated = values
            .iter()
            .filter(|value| {
                value
                    .get("status")
                    .and_then(|status| status.as_str())
                    .is_some_and(MessageStatus::is_legacy)
            })
            .count();

        let messages: Vec<FeedMessage> = values
            .into_iter()
            .map(serde_json::from_value)
            .collect::<Result<_, _>>()
            .map_err(|source| self.json_error(source))?;

        if migrated > 0 {
            tracing::info!(
                "Migrated {} legacy feed entries in {}",
                migrated,
                self.path.display()
            );
            self.save(&messages)?;
        }

        Ok(messages)
    }

    /// Adds a message at the head of the feed, dropping the oldest past the cap
    pub fn prepend(&self, message: FeedMessage) -> Result<Vec<FeedMessage>, FeedError> {
        let mut messages = self.load()?;
        messages.insert(0, message);
        messages.truncate(self.max_entries);
        self.save(&messages)?;
        Ok(messages)
    }

    pub fn save(&self, messages: &[FeedMessage]) -> Result<(), FeedError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(|source| self.io_error(source))?;
            }
        }

        let json =
            serde_json::to_string_pretty(messages).map_err(|source| self.json_error(source))?;

        // Write then rename so a crash never leaves a half-written feed
        let tmp_path = self.path.with_extension("json.tmp");
        std::fs::write(&tmp_path, json).map_err(|source| self.io_error(source))?;
        std::fs::rename(&tmp_path, &self.path).map_err(|source| self.io_error(source))?;

        Ok(())
    }

    pub fn clear(&self) -> Result<(), FeedError> {
        self.save(&[])
    }

    fn io_error(&self, source: std::io::Error) -> FeedError {
        FeedError::Io {
            path: self.path.clone(),
            source,
        }
    }

    fn json_error(&self, source: serde_json::Error) -> FeedError {
        FeedError::Json {
            path: self.path.clone(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store(dir: &tempfile::TempDir, max_entries: usize) -> FeedStore {
        FeedStore::new(dir.path().join("feed.json"), max_entries)
    }

    #[test]
    fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        assert!(store(&dir, 10).load().unwrap().is_empty());
    }

    #[test]
    fn test_prepend_keeps_newest_first() {
        let dir = tempfile::tempdir().unwrap();
        let feed = store(&dir, 10);

        feed.prepend(FeedMessage::new("A", "first", MessageStatus::Ignored, 1))
            .unwrap();
        feed.prepend(FeedMessage::new("B", "second", MessageStatus::Submitted, 2))
            .unwrap();

        let messages = feed.load().unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].content, "second");
        assert_eq!(messages[1].content, "first");
    }

    #[test]
    fn test_prepend_caps_length() {
        let dir = tempfile::tempdir().unwrap();
        let feed = store(&dir, 2);

        for i in 0..5 {
            feed.prepend(FeedMessage::new("A", format!("m{i}"), MessageStatus::Ignored, i))
                .unwrap();
        }

        let messages = feed.load().unwrap();
        assert_eq!(messages.len(), 2);
        assert_eq!(messages[0].content, "m4");
        assert_eq!(messages[1].content, "m3");
    }

    #[test]
    fn test_legacy_statuses_are_rewritten() {
        let dir = tempfile::tempdir().unwrap();
        let feed = store(&dir, 10);
        std::fs::write(
            feed.path(),
            r#"[
                {"sender":"AD-SBIUPI","content":"otp 1234","status":"INVALID","date":"10"},
                {"sender":"VM-KOTAKB","body":"hello","status":"INVALID_FORMAT","timestamp":"9"},
                {"sender":"VM-KOTAKB","body":"paid","status":"SUBMITTED","timestamp":"8"}
            ]"#,
        )
        .unwrap();

        let messages = feed.load().unwrap();
        assert_eq!(messages[0].status, MessageStatus::Ignored);
        assert_eq!(messages[1].status, MessageStatus::Ignored);
        assert_eq!(messages[2].status, MessageStatus::Submitted);

        let stored = std::fs::read_to_string(feed.path()).unwrap();
        assert!(!stored.contains("INVALID"));
        assert!(stored.contains("\"body\": \"otp 1234\""));
    }

    #[test]
    fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let feed = store(&dir, 10);
        std::fs::write(feed.path(), "{not json").unwrap();

        assert!(matches!(feed.load(), Err(FeedError::Json { .. })));
    }

    #[test]
    fn test_clear() {
        let dir = tempfile::tempdir().unwrap();
        let feed = store(&dir, 10);
        feed.prepend(FeedMessage::new("A", "x", MessageStatus::Ignored, 1))
            .unwrap();

        feed.clear().unwrap();
        assert!(feed.load().unwrap().is_empty());
    }
}
