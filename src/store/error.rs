use std::path::PathBuf;

use aws_sdk_s3::error::SdkError;
use aws_sdk_s3::operation::head_object::HeadObjectError;
use aws_sdk_s3::operation::list_objects_v2::ListObjectsV2Error;
use aws_sdk_s3::operation::put_object::PutObjectError;
use polars::error::PolarsError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Unsupported file format: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to create output directory '{0}'")]
    DirCreation(PathBuf, #[source] std::io::Error),

    #[error("I/O error creating output file '{0}'")]
    FileCreationIo(PathBuf, #[source] std::io::Error),

    #[error("Encoding error writing output file '{0}'")]
    FileWritePolars(PathBuf, #[source] PolarsError),

    #[error("Failed to read metadata for output file '{0}'")]
    MetadataRead(PathBuf, #[source] std::io::Error),

    #[error("Encoding error serializing table for upload")]
    UploadEncode(#[source] PolarsError),

    #[error("S3 upload failed for s3://{bucket}/{key}")]
    S3Put {
        bucket: String,
        key: String,
        #[source]
        source: SdkError<PutObjectError>,
    },

    #[error("S3 head request failed for s3://{bucket}/{key}")]
    S3Head {
        bucket: String,
        key: String,
        #[source]
        source: SdkError<HeadObjectError>,
    },

    #[error("S3 listing failed for s3://{bucket}/{prefix}")]
    S3List {
        bucket: String,
        prefix: String,
        #[source]
        source: SdkError<ListObjectsV2Error>,
    },

    #[error("Background task failed to complete")]
    TaskJoin(#[from] tokio::task::JoinError),
}
