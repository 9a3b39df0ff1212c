//! JSONL file writer for transcript events.
//!
//! Each [`TranscriptEvent`] becomes one JSON line carrying `type` and
//! `timestamp` fields next to its payload. The file is opened in append
//! mode so consecutive runs share one transcript.

use compass_application::ports::transcript::{TranscriptEvent, TranscriptLogger};
use serde_json::{Map, Value};
use std::fs::{File, OpenOptions};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::warn;

/// Transcript logger writing one JSON object per line.
///
/// Thread-safe via `Mutex<BufWriter<File>>`; every line is flushed as it is
/// written.
pub struct JsonlTranscriptLogger {
    writer: Mutex<BufWriter<File>>,
    path: PathBuf,
}

impl JsonlTranscriptLogger {
    /// Open (or create) the transcript at `path`, creating parent directories.
    pub fn open(path: impl AsRef<Path>) -> io::Result<Self> {
        let path = path.as_ref();
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            std::fs::create_dir_all(parent)?;
        }

        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            writer: Mutex::new(BufWriter::new(file)),
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn record(event: TranscriptEvent) -> Value {
        let timestamp = chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true);

        let mut record = match event.payload {
            Value::Object(map) => map,
            other => {
                let mut map = Map::new();
                map.insert("data".to_string(), other);
                map
            }
        };
        record.insert("type".to_string(), Value::String(event.event_type.to_string()));
        record.insert("timestamp".to_string(), Value::String(timestamp));
        Value::Object(record)
    }
}

impl TranscriptLogger for JsonlTranscriptLogger {
    fn log(&self, event: TranscriptEvent) {
        let Ok(line) = serde_json::to_string(&Self::record(event)) else {
            return;
        };

        let Ok(mut writer) = self.writer.lock() else {
            return;
        };
        if let Err(e) = writeln!(writer, "{}", line).and_then(|_| writer.flush()) {
            warn!("Could not write transcript {}: {}", self.path.display(), e);
        }
    }
}

impl Drop for JsonlTranscriptLogger {
    fn drop(&mut self) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writer.flush();
        }
    }
}
