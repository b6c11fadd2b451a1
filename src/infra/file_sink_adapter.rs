use async_trait::async_trait;
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use tracing::info;

use crate::app::ports::InvestigationSinkPort;
use crate::domain::Investigation;
use crate::error::{ImportError, Result};

/// File-based implementation of InvestigationSinkPort used for dry runs.
/// Writes one investigation per line (NDJSON); the table name is ignored.
pub struct FileSink {
    file_writer: Mutex<BufWriter<std::fs::File>>,
    file_path: PathBuf,
}

impl FileSink {
    pub fn new(file_path: &Path) -> Result<Self> {
        let dir = file_path.parent().unwrap_or(Path::new("."));
        std::fs::create_dir_all(dir)?;

        info!("Creating dry-run output file: {}", file_path.display());

        let file_writer = BufWriter::new(
            OpenOptions::new()
                .create(true)
                .write(true)
                .truncate(true)
                .open(file_path)?,
        );

        Ok(Self {
            file_writer: Mutex::new(file_writer),
            file_path: file_path.to_path_buf(),
        })
    }

    pub fn file_path(&self) -> &Path {
        &self.file_path
    }
}

#[async_trait]
impl InvestigationSinkPort for FileSink {
    async fn insert(&self, _table: &str, rows: &[Investigation]) -> Result<()> {
        let mut writer = self
            .file_writer
            .lock()
            .map_err(|_| ImportError::Io(std::io::Error::other("dry-run writer lock poisoned")))?;
        for row in rows {
            let json_line = serde_json::to_string(row)?;
            writeln!(writer, "{}", json_line)?;
        }
        writer.flush()?;
        Ok(())
    }
}
