use crate::store::error::StoreError;
use crate::store::{DataSink, OutputFormat};
use crate::types::DataKind;
use async_trait::async_trait;
use aws_config::BehaviorVersion;
use aws_sdk_s3::config::Region;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use chrono::Utc;
use log::info;
use polars::prelude::*;
use tokio::task;

/// Uploads normalized tables to an S3 bucket.
///
/// Objects are keyed `{kind}/{prefix}_{YYYYMMDD_HHMMSS}.{ext}`, so historical
/// and forecast pulls land in separate folders of the same bucket.
pub struct S3Sink {
    client: Client,
    bucket: String,
}

impl S3Sink {
    /// Builds a sink against AWS using the ambient credential chain.
    pub async fn new(bucket: impl Into<String>, region: impl Into<String>) -> S3Sink {
        let config = aws_config::defaults(BehaviorVersion::latest())
            .region(Region::new(region.into()))
            .load()
            .await;
        S3Sink {
            client: Client::new(&config),
            bucket: bucket.into(),
        }
    }

    /// Builds a sink from a preconfigured client, for custom endpoints.
    pub fn with_client(bucket: impl Into<String>, client: Client) -> S3Sink {
        S3Sink {
            client,
            bucket: bucket.into(),
        }
    }

    /// Serializes a DataFrame into an in-memory buffer using spawn_blocking;
    /// polars writers are synchronous.
    async fn encode(mut frame: DataFrame, format: OutputFormat) -> Result<Vec<u8>, StoreError> {
        task::spawn_blocking(move || {
            let mut buffer = Vec::new();
            match format {
                OutputFormat::Csv => {
                    CsvWriter::new(&mut buffer)
                        .include_header(true)
                        .finish(&mut frame)
                        .map_err(StoreError::UploadEncode)?;
                }
                OutputFormat::Parquet => {
                    ParquetWriter::new(&mut buffer)
                        .with_compression(ParquetCompression::Snappy)
                        .finish(&mut frame)
                        .map_err(StoreError::UploadEncode)?;
                }
            }
            Ok::<Vec<u8>, StoreError>(buffer)
        })
        .await?
    }

    /// Lists object keys under `prefix`, one page's worth.
    pub async fn list_keys(&self, prefix: &str) -> Result<Vec<String>, StoreError> {
        let output = self
            .client
            .list_objects_v2()
            .bucket(&self.bucket)
            .prefix(prefix)
            .send()
            .await
            .map_err(|e| StoreError::S3List {
                bucket: self.bucket.clone(),
                prefix: prefix.to_string(),
                source: e,
            })?;
        Ok(output
            .contents()
            .iter()
            .filter_map(|object| object.key().map(String::from))
            .collect())
    }
}

#[async_trait]
impl DataSink for S3Sink {
    async fn store(
        &self,
        frame: DataFrame,
        kind: DataKind,
        prefix: &str,
        format: OutputFormat,
    ) -> Result<String, StoreError> {
        let rows = frame.height();
        let body = Self::encode(frame, format).await?;

        let filename = format!(
            "{}_{}.{}",
            prefix,
            Utc::now().format("%Y%m%d_%H%M%S"),
            format.extension()
        );
        let key = format!("{}/{}", kind.label(), filename);

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| StoreError::S3Put {
                bucket: self.bucket.clone(),
                key: key.clone(),
                source: e,
            })?;

        info!(
            "Uploaded {} rows of {} data to s3://{}/{}",
            rows, kind, self.bucket, key
        );
        Ok(format!("s3://{}/{}", self.bucket, key))
    }

    async fn exists(&self, name: &str) -> Result<bool, StoreError> {
        match self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(name)
            .send()
            .await
        {
            Ok(_) => Ok(true),
            Err(e) if e.as_service_error().map(|err| err.is_not_found()).unwrap_or(false) => {
                Ok(false)
            }
            Err(e) => Err(StoreError::S3Head {
                bucket: self.bucket.clone(),
                key: name.to_string(),
                source: e,
            }),
        }
    }
}
