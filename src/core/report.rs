use crate::core::chart::{status_chart, ChartEntry};
use crate::core::stats::Stats;
use serde::Serialize;
use std::fmt;

/// JSON document handed to presentation consumers.
#[derive(Debug, Serialize)]
pub struct Report<'a> {
    pub stats: &'a Stats,
    pub chart: [ChartEntry; 4],
    #[serde(rename = "bezahltProzent")]
    pub paid_percent: u32,
}

impl<'a> Report<'a> {
    pub fn new(stats: &'a Stats) -> Self {
        Self {
            stats,
            chart: status_chart(&stats.status),
            paid_percent: stats.paid_percent(),
        }
    }
}

/// Plain-text rendering of the dashboard for the terminal.
pub struct TextReport<'a>(pub &'a Stats);

impl fmt::Display for TextReport<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stats = self.0;

        writeln!(
            f,
            "Kurse gesamt: {} ({} aktiv)",
            stats.courses, stats.status.active
        )?;
        writeln!(
            f,
            "Anmeldungen: {} ({} bezahlt, {} offen, {}% bezahlt)",
            stats.enrollments,
            stats.payments.paid,
            stats.payments.unpaid,
            stats.paid_percent()
        )?;
        writeln!(f, "Umsatz: {:.2}", stats.revenue)?;
        writeln!(
            f,
            "Dozenten: {} | Räume: {} | Teilnehmer: {}",
            stats.instructors, stats.rooms, stats.participants
        )?;

        writeln!(f, "\nKursstatus:")?;
        for entry in status_chart(&stats.status) {
            writeln!(f, "  {:<10} {}", entry.name, entry.value)?;
        }

        if stats.recent_courses.is_empty() {
            return Ok(());
        }

        writeln!(f, "\nNeueste Kurse:")?;
        for course in &stats.recent_courses {
            let title = course.fields.titel.as_deref().unwrap_or("—");
            let date = course
                .start_date()
                .map(|d| d.format("%d.%m.%Y").to_string())
                .unwrap_or_else(|| "Kein Datum".to_string());
            let status = match (course.status(), course.fields.status.as_deref()) {
                (Some(known), _) => known.label(),
                (None, Some(raw)) => raw,
                (None, None) => "",
            };
            write!(f, "  {} · {} · {}", title, date, status)?;
            if let Some(max) = course.fields.max_teilnehmer {
                write!(f, " · max. {} TN", max)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}

pub fn render_text(stats: &Stats) -> String {
    TextReport(stats).to_string()
}
