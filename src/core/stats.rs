use crate::core::preview::preview;
use crate::domain::model::{Course, CourseStatus, Enrollment, Instructor, Participant, Room};
use serde::Serialize;
use std::collections::HashMap;

/// Course counts per lifecycle status. Courses with a missing or unknown
/// status appear in none of the buckets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct StatusBreakdown {
    #[serde(rename = "geplantKurse")]
    pub planned: usize,
    #[serde(rename = "aktiveKurse")]
    pub active: usize,
    #[serde(rename = "abgeschlossen")]
    pub completed: usize,
    #[serde(rename = "abgesagt")]
    pub cancelled: usize,
}

impl StatusBreakdown {
    pub fn get(&self, status: CourseStatus) -> usize {
        match status {
            CourseStatus::Planned => self.planned,
            CourseStatus::Active => self.active,
            CourseStatus::Completed => self.completed,
            CourseStatus::Cancelled => self.cancelled,
        }
    }

    pub fn categorized(&self) -> usize {
        self.planned + self.active + self.completed + self.cancelled
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct PaymentBreakdown {
    #[serde(rename = "bezahlt")]
    pub paid: usize,
    #[serde(rename = "unbezahlt")]
    pub unpaid: usize,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Stats {
    #[serde(rename = "dozenten")]
    pub instructors: usize,
    #[serde(rename = "raeume")]
    pub rooms: usize,
    #[serde(rename = "teilnehmer")]
    pub participants: usize,
    #[serde(rename = "kurse")]
    pub courses: usize,
    #[serde(rename = "anmeldungen")]
    pub enrollments: usize,
    #[serde(flatten)]
    pub payments: PaymentBreakdown,
    #[serde(flatten)]
    pub status: StatusBreakdown,
    #[serde(rename = "umsatz")]
    pub revenue: f64,
    #[serde(rename = "kurseList")]
    pub recent_courses: Vec<Course>,
    #[serde(rename = "anmeldungenList")]
    pub recent_enrollments: Vec<Enrollment>,
}

impl Stats {
    /// Share of enrollments marked paid, `0.0` when there are none.
    pub fn payment_ratio(&self) -> f64 {
        if self.enrollments == 0 {
            0.0
        } else {
            self.payments.paid as f64 / self.enrollments as f64
        }
    }

    pub fn paid_percent(&self) -> u32 {
        (self.payment_ratio() * 100.0).round() as u32
    }
}

pub fn count_by_status(courses: &[Course]) -> StatusBreakdown {
    let mut breakdown = StatusBreakdown::default();
    for status in courses.iter().filter_map(Course::status) {
        match status {
            CourseStatus::Planned => breakdown.planned += 1,
            CourseStatus::Active => breakdown.active += 1,
            CourseStatus::Completed => breakdown.completed += 1,
            CourseStatus::Cancelled => breakdown.cancelled += 1,
        }
    }
    breakdown
}

pub fn count_payments(enrollments: &[Enrollment]) -> PaymentBreakdown {
    let paid = enrollments.iter().filter(|e| e.is_paid()).count();
    PaymentBreakdown {
        paid,
        unpaid: enrollments.len() - paid,
    }
}

/// Enrollment count per referenced course id. An enrollment that lists the
/// same course twice is counted once for it.
pub fn enrollments_per_course(enrollments: &[Enrollment]) -> HashMap<&str, usize> {
    let mut index: HashMap<&str, usize> = HashMap::new();
    let mut seen: Vec<&str> = Vec::new();
    for enrollment in enrollments {
        seen.clear();
        for id in &enrollment.fields.kurs {
            if !seen.contains(&id.as_str()) {
                seen.push(id);
                *index.entry(id).or_insert(0) += 1;
            }
        }
    }
    index
}

/// Σ price × referencing enrollments, regardless of payment state.
pub fn revenue(courses: &[Course], enrollments: &[Enrollment]) -> f64 {
    let index = enrollments_per_course(enrollments);
    courses
        .iter()
        .map(|course| {
            let count = index.get(course.record_id.as_str()).copied().unwrap_or(0);
            course.price() * count as f64
        })
        .fold(0.0, |total, amount| total + amount)
}

pub fn aggregate(
    courses: &[Course],
    enrollments: &[Enrollment],
    instructors: &[Instructor],
    rooms: &[Room],
    participants: &[Participant],
) -> Stats {
    Stats {
        instructors: instructors.len(),
        rooms: rooms.len(),
        participants: participants.len(),
        courses: courses.len(),
        enrollments: enrollments.len(),
        payments: count_payments(enrollments),
        status: count_by_status(courses),
        revenue: revenue(courses, enrollments),
        recent_courses: preview(courses),
        recent_enrollments: preview(enrollments),
    }
}
