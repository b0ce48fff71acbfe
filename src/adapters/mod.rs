// Adapters layer: concrete collection loaders (record service over HTTP, local JSON snapshots).

pub mod http;
pub mod local;

pub use http::HttpCollectionLoader;
pub use local::LocalCollectionLoader;

use crate::config::{SourceKind, TomlConfig};
use crate::domain::model::{Collection, Course, Enrollment, Instructor, Participant, Record, Room};
use crate::domain::ports::CollectionLoader;
use crate::utils::error::{KpiError, Result};
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Decodes a collection payload.
///
/// Accepts either a JSON array of `{record_id, fields}` objects or an object
/// keyed by record id (the record service's native shape). Source order is
/// kept in both cases.
pub fn decode_records<F>(collection: Collection, body: Value) -> Result<Vec<Record<F>>>
where
    F: DeserializeOwned + Default,
{
    match body {
        Value::Array(items) => {
            let total = items.len();
            let records: Vec<Record<F>> = items.into_iter().filter_map(decode_record).collect();
            if records.len() < total {
                tracing::warn!(
                    "Skipped {} malformed {} records",
                    total - records.len(),
                    collection
                );
            }
            Ok(records)
        }
        Value::Object(map) => Ok(map
            .into_iter()
            .map(|(key, item)| {
                let mut record = decode_record(item).unwrap_or_default();
                if record.record_id.is_empty() {
                    record.record_id = key;
                }
                record
            })
            .collect()),
        Value::Null => Ok(Vec::new()),
        other => Err(KpiError::PayloadError {
            collection,
            message: format!("expected an array or object of records, got {}", other),
        }),
    }
}

/// A record is a JSON object; anything else has no fields to read.
fn decode_record<F>(item: Value) -> Option<Record<F>>
where
    F: DeserializeOwned + Default,
{
    match item {
        Value::Object(_) => serde_json::from_value(item).ok(),
        _ => None,
    }
}

/// Loader selected by `source.type`.
pub enum ConfiguredLoader {
    Http(HttpCollectionLoader),
    Local(LocalCollectionLoader),
}

impl ConfiguredLoader {
    pub fn from_config(config: &TomlConfig) -> Result<Self> {
        match config.source_kind()? {
            SourceKind::Http => Ok(Self::Http(HttpCollectionLoader::from_config(config)?)),
            SourceKind::Local => Ok(Self::Local(LocalCollectionLoader::from_config(config)?)),
        }
    }
}

#[async_trait]
impl CollectionLoader for ConfiguredLoader {
    async fn instructors(&self) -> Result<Vec<Instructor>> {
        match self {
            Self::Http(loader) => loader.instructors().await,
            Self::Local(loader) => loader.instructors().await,
        }
    }

    async fn rooms(&self) -> Result<Vec<Room>> {
        match self {
            Self::Http(loader) => loader.rooms().await,
            Self::Local(loader) => loader.rooms().await,
        }
    }

    async fn participants(&self) -> Result<Vec<Participant>> {
        match self {
            Self::Http(loader) => loader.participants().await,
            Self::Local(loader) => loader.participants().await,
        }
    }

    async fn courses(&self) -> Result<Vec<Course>> {
        match self {
            Self::Http(loader) => loader.courses().await,
            Self::Local(loader) => loader.courses().await,
        }
    }

    async fn enrollments(&self) -> Result<Vec<Enrollment>> {
        match self {
            Self::Http(loader) => loader.enrollments().await,
            Self::Local(loader) => loader.enrollments().await,
        }
    }
}
