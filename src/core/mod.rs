pub mod chart;
pub mod dashboard;
pub mod preview;
pub mod report;
pub mod stats;

pub use crate::domain::model::{Collection, Course, Enrollment, Instructor, Participant, Room};
pub use crate::domain::ports::CollectionLoader;
pub use crate::utils::error::Result;
