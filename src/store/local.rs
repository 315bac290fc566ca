use crate::store::error::StoreError;
use crate::store::{DataSink, OutputFormat};
use crate::types::DataKind;
use async_trait::async_trait;
use chrono::Utc;
use log::info;
use polars::prelude::*;
use std::path::{Path, PathBuf};
use tokio::{fs, task};

/// Writes normalized tables to a directory on the local filesystem.
///
/// Files are named `{prefix}_{YYYYMMDD_HHMMSS}.{ext}` so repeated runs for
/// the same location never overwrite each other.
pub struct LocalSink {
    output_dir: PathBuf,
}

impl LocalSink {
    pub fn new(output_dir: &Path) -> LocalSink {
        LocalSink {
            output_dir: output_dir.to_path_buf(),
        }
    }

    /// Writes a DataFrame to disk using spawn_blocking; polars writers are
    /// synchronous and `ParquetWriter` needs `&mut df`.
    async fn write_file(
        mut frame: DataFrame,
        path: &Path,
        format: OutputFormat,
    ) -> Result<(), StoreError> {
        let path_buf = path.to_path_buf();
        task::spawn_blocking(move || {
            let file = std::fs::File::create(&path_buf)
                .map_err(|e| StoreError::FileCreationIo(path_buf.clone(), e))?;
            match format {
                OutputFormat::Csv => {
                    CsvWriter::new(file)
                        .include_header(true)
                        .finish(&mut frame)
                        .map_err(|e| StoreError::FileWritePolars(path_buf, e))?;
                }
                OutputFormat::Parquet => {
                    ParquetWriter::new(file)
                        .with_compression(ParquetCompression::Snappy)
                        .finish(&mut frame)
                        .map_err(|e| StoreError::FileWritePolars(path_buf, e))?;
                }
            }
            Ok::<(), StoreError>(())
        })
        .await??;
        Ok(())
    }
}

#[async_trait]
impl DataSink for LocalSink {
    async fn store(
        &self,
        frame: DataFrame,
        kind: DataKind,
        prefix: &str,
        format: OutputFormat,
    ) -> Result<String, StoreError> {
        fs::create_dir_all(&self.output_dir)
            .await
            .map_err(|e| StoreError::DirCreation(self.output_dir.clone(), e))?;

        let filename = format!(
            "{}_{}.{}",
            prefix,
            Utc::now().format("%Y%m%d_%H%M%S"),
            format.extension()
        );
        let path = self.output_dir.join(&filename);

        let rows = frame.height();
        Self::write_file(frame, &path, format).await?;
        info!("Saved {} rows of {} data to {:?}", rows, kind, path);

        Ok(path.display().to_string())
    }

    async fn exists(&self, name: &str) -> Result<bool, StoreError> {
        let path = self.output_dir.join(name);
        match fs::metadata(&path).await {
            Ok(_) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(StoreError::MetadataRead(path, e)),
        }
    }
}
