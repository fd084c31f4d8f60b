use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use log::{debug, info};

use crate::data_capture::types::EventRecord;
use crate::error_handling::types::SinkError;

use super::sink_trait::EventSink;

/// Appends each event as one JSON object per line.
pub struct FileSink {
    path: PathBuf,
    file: Mutex<File>,
}

impl FileSink {
    /// Opens (or creates) `path` in append mode. Existing content is kept.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self, SinkError> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        info!("FileSink appending to {}", path.display());
        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EventSink for FileSink {
    fn name(&self) -> &str {
        "file"
    }

    fn record(&self, event: &EventRecord) -> Result<(), SinkError> {
        let mut line = serde_json::to_vec(event)?;
        line.push(b'\n');

        let mut file = self
            .file
            .lock()
            .map_err(|_| SinkError::Unavailable(format!("{} handle poisoned", self.path.display())))?;
        // single write per line so concurrent sessions never interleave within a record
        file.write_all(&line)?;
        file.flush()?;
        debug!("Appended {} byte(s) to {}", line.len(), self.path.display());
        Ok(())
    }
}
