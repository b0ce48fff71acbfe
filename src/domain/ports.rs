use crate::domain::model::{Course, Enrollment, Instructor, Participant, Room};
use crate::utils::error::Result;
use async_trait::async_trait;

/// Source of the five record collections.
///
/// Each retrieval may fail on its own; callers treat any failure as a failed
/// load. Implementations return records in the order the source lists them.
#[async_trait]
pub trait CollectionLoader: Send + Sync {
    async fn instructors(&self) -> Result<Vec<Instructor>>;
    async fn rooms(&self) -> Result<Vec<Room>>;
    async fn participants(&self) -> Result<Vec<Participant>>;
    async fn courses(&self) -> Result<Vec<Course>>;
    async fn enrollments(&self) -> Result<Vec<Enrollment>>;
}
