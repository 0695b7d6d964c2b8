use std::{
    io::{ErrorKind, SeekFrom},
    path::{Path, PathBuf},
};

use anyhow::{bail, Context, Result};
use async_trait::async_trait;
use fs4::tokio::AsyncFileExt;
use tokio::{
    fs::File,
    io::{AsyncBufRead, AsyncBufReadExt, AsyncSeekExt, AsyncWriteExt, BufReader},
};
use tracing::{debug, info, warn};

use crate::fs::operations::{ends_with_newline, read_last_line};

use super::entities::MovementRecord;

const LOG_FILE_NAME: &str = "movements.jsonl";

/// Interface for the durable copy of the movement log.
///
/// Both operations hand back the log newest first. Implementations must keep insertion order
/// and never drop a record.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait MovementStore: Send + Sync {
    /// Returns the full log, or an empty one when nothing has been stored yet.
    async fn load_all(&self) -> Result<Vec<MovementRecord>>;

    /// Persists `record` and returns the updated log. The record is durable once this returns.
    async fn append(&self, record: MovementRecord) -> Result<Vec<MovementRecord>>;
}

/// The main realization of [MovementStore]. Records are kept one JSON object per line, oldest
/// first, in a single file.
pub struct JsonLinesStore {
    path: PathBuf,
}

impl JsonLinesStore {
    pub fn new(dir: &Path) -> Result<Self, std::io::Error> {
        std::fs::create_dir_all(dir)?;

        Ok(Self {
            path: dir.join(LOG_FILE_NAME),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn read_all(path: &Path) -> std::result::Result<Vec<MovementRecord>, std::io::Error> {
        debug!("Reading movements from {path:?}");
        let file = File::open(path).await?;
        file.lock_shared()?;
        let mut reader = BufReader::new(file);
        let records = Self::parse_lines(&mut reader, path).await;
        let unlocked = reader.into_inner().unlock_async().await;
        let records = records?;
        unlocked?;

        Ok(records)
    }

    /// Parses every line of `reader`. Lines that aren't valid UTF-8 JSON records are skipped, read
    /// failures are returned.
    async fn parse_lines(
        reader: &mut (impl AsyncBufRead + Unpin),
        path: &Path,
    ) -> std::result::Result<Vec<MovementRecord>, std::io::Error> {
        let mut lines = reader.split(b'\n');
        let mut records = vec![];
        while let Some(line) = lines.next_segment().await? {
            if line.trim_ascii().is_empty() {
                continue;
            }
            match serde_json::from_slice::<MovementRecord>(&line) {
                Ok(v) => records.push(v),
                Err(e) => {
                    // An interrupted write can leave a partial line behind.
                    warn!(
                        "Skipping illegal json string in {path:?} {}: {e}",
                        String::from_utf8_lossy(&line)
                    )
                }
            }
        }
        Ok(records)
    }

    /// Refuses `record` unless its id is greater than the newest stored one. The last line is
    /// checked first; when it can't be parsed the whole file is scanned for the newest valid id.
    async fn check_id_grows(file: &mut File, path: &Path, record: &MovementRecord) -> Result<()> {
        let last_line = read_last_line(file, &mut vec![0; 1024]).await?;
        let newest = match last_line.map(|v| serde_json::from_str::<MovementRecord>(&v)) {
            None => None,
            Some(Ok(last)) => Some(last.id),
            Some(Err(e)) => {
                warn!("Last stored movement in {path:?} was corrupted {e}, scanning the whole log");
                file.seek(SeekFrom::Start(0)).await?;
                let records = Self::parse_lines(&mut BufReader::new(&mut *file), path).await?;
                file.seek(SeekFrom::End(0)).await?;
                records.iter().map(|v| v.id).max()
            }
        };

        if let Some(newest) = newest.filter(|v| *v >= record.id) {
            bail!(
                "Movement {} can't be stored after movement {}, ids must grow",
                record.id,
                newest
            )
        }
        Ok(())
    }

    async fn append_with_file(file: &mut File, path: &Path, record: &MovementRecord) -> Result<()> {
        Self::check_id_grows(file, path, record).await?;

        let mut buffer = Vec::<u8>::new();
        if !ends_with_newline(file).await? {
            buffer.push(b'\n');
        }
        serde_json::to_writer(&mut buffer, record)?;
        buffer.push(b'\n');

        file.write_all(&buffer).await?;
        file.flush().await?;
        file.sync_data().await?;
        Ok(())
    }
}

#[async_trait]
impl MovementStore for JsonLinesStore {
    async fn load_all(&self) -> Result<Vec<MovementRecord>> {
        let mut records = match Self::read_all(&self.path).await {
            Ok(records) => records,
            Err(e) if e.kind() == ErrorKind::NotFound => vec![],
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read {:?}", self.path));
            }
        };
        records.reverse();
        Ok(records)
    }

    async fn append(&self, record: MovementRecord) -> Result<Vec<MovementRecord>> {
        let mut file = File::options()
            .write(true)
            .create(true)
            .read(true)
            .truncate(false)
            .open(&self.path)
            .await
            .with_context(|| format!("Failed to open {:?}", self.path))?;

        file.lock_exclusive()?;
        let result = Self::append_with_file(&mut file, &self.path, &record).await;
        let unlocked = file.unlock_async().await;
        result?;
        unlocked.with_context(|| format!("Failed to unlock {:?}", self.path))?;
        drop(file);

        info!("Stored movement {} ({})", record.id, record.activity);
        self.load_all().await
    }
}
