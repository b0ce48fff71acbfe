use crate::adapters::decode_records;
use crate::config::{CollectionPaths, TomlConfig};
use crate::domain::model::{Collection, Course, Enrollment, Instructor, Participant, Record, Room};
use crate::domain::ports::CollectionLoader;
use crate::utils::error::Result;
use crate::utils::validation::validate_required_field;
use async_trait::async_trait;
use serde::de::DeserializeOwned;
use std::path::PathBuf;

/// Reads `<directory>/<path>.json` for each collection.
#[derive(Debug, Clone)]
pub struct LocalCollectionLoader {
    directory: PathBuf,
    paths: CollectionPaths,
}

impl LocalCollectionLoader {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
            paths: CollectionPaths::default(),
        }
    }

    pub fn from_config(config: &TomlConfig) -> Result<Self> {
        let directory = validate_required_field("source.directory", &config.source.directory)?;
        Ok(Self {
            directory: PathBuf::from(directory),
            paths: config.collections.clone(),
        })
    }

    pub fn file_path(&self, collection: Collection) -> PathBuf {
        self.directory
            .join(format!("{}.json", self.paths.path(collection)))
    }

    async fn read<F>(&self, collection: Collection) -> Result<Vec<Record<F>>>
    where
        F: DeserializeOwned + Default,
    {
        let path = self.file_path(collection);
        tracing::debug!("Reading {} from {}", collection, path.display());

        let data = tokio::fs::read(&path).await?;
        let body: serde_json::Value = serde_json::from_slice(&data)?;
        decode_records(collection, body)
    }
}

#[async_trait]
impl CollectionLoader for LocalCollectionLoader {
    async fn instructors(&self) -> Result<Vec<Instructor>> {
        self.read(Collection::Instructors).await
    }

    async fn rooms(&self) -> Result<Vec<Room>> {
        self.read(Collection::Rooms).await
    }

    async fn participants(&self) -> Result<Vec<Participant>> {
        self.read(Collection::Participants).await
    }

    async fn courses(&self) -> Result<Vec<Course>> {
        self.read(Collection::Courses).await
    }

    async fn enrollments(&self) -> Result<Vec<Enrollment>> {
        self.read(Collection::Enrollments).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::error::KpiError;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_reads_snapshot_file() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("kurse.json"),
            r#"[{"record_id": "c1", "fields": {"status": "abgesagt", "preis": 30}}]"#,
        )
        .unwrap();

        let loader = LocalCollectionLoader::new(dir.path());
        let courses = loader.courses().await.unwrap();

        assert_eq!(courses.len(), 1);
        assert_eq!(courses[0].fields.status.as_deref(), Some("abgesagt"));
    }

    #[tokio::test]
    async fn test_missing_file_is_io_error() {
        let dir = TempDir::new().unwrap();
        let loader = LocalCollectionLoader::new(dir.path());

        let err = loader.rooms().await.unwrap_err();

        assert!(matches!(err, KpiError::IoError(_)));
    }

    #[tokio::test]
    async fn test_invalid_json_is_serialization_error() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("dozenten.json"), "{not json").unwrap();
        let loader = LocalCollectionLoader::new(dir.path());

        let err = loader.instructors().await.unwrap_err();

        assert!(matches!(err, KpiError::SerializationError(_)));
    }
}
