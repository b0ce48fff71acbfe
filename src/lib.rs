pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use adapters::{ConfiguredLoader, HttpCollectionLoader, LocalCollectionLoader};
pub use config::TomlConfig;
pub use crate::core::chart::{status_chart, ChartEntry};
pub use crate::core::dashboard::{Collections, Dashboard, DashboardView, LoadOutcome};
pub use crate::core::report::{render_text, Report, TextReport};
pub use crate::core::stats::{aggregate, PaymentBreakdown, Stats, StatusBreakdown};
pub use domain::model::{Collection, Course, CourseStatus, Enrollment};
pub use domain::ports::CollectionLoader;
pub use utils::error::{KpiError, Result};
