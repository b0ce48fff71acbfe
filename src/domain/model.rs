use crate::domain::lenient;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The five record collections a dashboard is computed from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Collection {
    Instructors,
    Rooms,
    Participants,
    Courses,
    Enrollments,
}

impl Collection {
    pub const ALL: [Collection; 5] = [
        Collection::Instructors,
        Collection::Rooms,
        Collection::Participants,
        Collection::Courses,
        Collection::Enrollments,
    ];

    /// Name used by the record service and in config files.
    pub fn name(&self) -> &'static str {
        match self {
            Collection::Instructors => "dozenten",
            Collection::Rooms => "raeume",
            Collection::Participants => "teilnehmer",
            Collection::Courses => "kurse",
            Collection::Enrollments => "anmeldungen",
        }
    }
}

impl fmt::Display for Collection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(bound(deserialize = "F: DeserializeOwned + Default"))]
pub struct Record<F> {
    #[serde(default, deserialize_with = "lenient::identifier")]
    pub record_id: String,
    #[serde(default, deserialize_with = "lenient::fields")]
    pub fields: F,
}

impl<F> Record<F> {
    pub fn new(record_id: impl Into<String>, fields: F) -> Self {
        Self {
            record_id: record_id.into(),
            fields,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CourseFields {
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub titel: Option<String>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient::number", skip_serializing_if = "Option::is_none")]
    pub preis: Option<f64>,
    #[serde(default, deserialize_with = "lenient::string", skip_serializing_if = "Option::is_none")]
    pub startdatum: Option<String>,
    #[serde(default, deserialize_with = "lenient::count", skip_serializing_if = "Option::is_none")]
    pub max_teilnehmer: Option<u32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EnrollmentFields {
    #[serde(default, deserialize_with = "lenient::strict_bool", skip_serializing_if = "Option::is_none")]
    pub bezahlt: Option<bool>,
    #[serde(default, deserialize_with = "lenient::references")]
    pub kurs: Vec<String>,
}

pub type Course = Record<CourseFields>;
pub type Enrollment = Record<EnrollmentFields>;
/// Instructors, rooms and participants are only ever counted.
pub type Instructor = Record<serde_json::Value>;
pub type Room = Record<serde_json::Value>;
pub type Participant = Record<serde_json::Value>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CourseStatus {
    Planned,
    Active,
    Completed,
    Cancelled,
}

impl CourseStatus {
    pub const ALL: [CourseStatus; 4] = [
        CourseStatus::Planned,
        CourseStatus::Active,
        CourseStatus::Completed,
        CourseStatus::Cancelled,
    ];

    /// Exact, case-sensitive match on the stored value.
    pub fn from_field(value: &str) -> Option<Self> {
        match value {
            "geplant" => Some(CourseStatus::Planned),
            "aktiv" => Some(CourseStatus::Active),
            "abgeschlossen" => Some(CourseStatus::Completed),
            "abgesagt" => Some(CourseStatus::Cancelled),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            CourseStatus::Planned => "geplant",
            CourseStatus::Active => "aktiv",
            CourseStatus::Completed => "abgeschlossen",
            CourseStatus::Cancelled => "abgesagt",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            CourseStatus::Planned => "Geplant",
            CourseStatus::Active => "Aktiv",
            CourseStatus::Completed => "Abgeschlossen",
            CourseStatus::Cancelled => "Abgesagt",
        }
    }
}

impl Course {
    pub fn status(&self) -> Option<CourseStatus> {
        self.fields.status.as_deref().and_then(CourseStatus::from_field)
    }

    /// Price used for revenue; absent counts as zero.
    pub fn price(&self) -> f64 {
        self.fields.preis.unwrap_or(0.0)
    }

    /// Accepts plain dates and datetimes (`2024-03-01T09:00`).
    pub fn start_date(&self) -> Option<NaiveDate> {
        let raw = self.fields.startdatum.as_deref()?;
        NaiveDate::parse_from_str(raw.get(..10)?, "%Y-%m-%d").ok()
    }
}

impl Enrollment {
    pub fn is_paid(&self) -> bool {
        self.fields.bezahlt == Some(true)
    }

    pub fn references(&self, course_id: &str) -> bool {
        self.fields.kurs.iter().any(|id| id == course_id)
    }
}
