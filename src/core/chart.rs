use crate::core::stats::StatusBreakdown;
use crate::domain::model::CourseStatus;
use serde::Serialize;

/// One bar of the course-status chart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ChartEntry {
    pub name: &'static str,
    pub value: usize,
    pub color: &'static str,
}

fn chart_label(status: CourseStatus) -> &'static str {
    match status {
        CourseStatus::Planned => "Geplant",
        CourseStatus::Active => "Aktiv",
        CourseStatus::Completed => "Abgeschl.",
        CourseStatus::Cancelled => "Abgesagt",
    }
}

fn chart_color(status: CourseStatus) -> &'static str {
    match status {
        CourseStatus::Planned => "oklch(0.55 0.18 258)",
        CourseStatus::Active => "oklch(0.52 0.15 162)",
        CourseStatus::Completed => "oklch(0.52 0.02 260)",
        CourseStatus::Cancelled => "oklch(0.58 0.18 25)",
    }
}

/// Always four entries: Geplant, Aktiv, Abgeschlossen, Abgesagt.
pub fn status_chart(breakdown: &StatusBreakdown) -> [ChartEntry; 4] {
    CourseStatus::ALL.map(|status| ChartEntry {
        name: chart_label(status),
        value: breakdown.get(status),
        color: chart_color(status),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chart_order_and_values() {
        let breakdown = StatusBreakdown {
            planned: 3,
            active: 2,
            completed: 1,
            cancelled: 0,
        };

        let chart = status_chart(&breakdown);

        let names: Vec<&str> = chart.iter().map(|e| e.name).collect();
        assert_eq!(names, vec!["Geplant", "Aktiv", "Abgeschl.", "Abgesagt"]);
        let values: Vec<usize> = chart.iter().map(|e| e.value).collect();
        assert_eq!(values, vec![3, 2, 1, 0]);
    }

    #[test]
    fn test_chart_for_empty_breakdown_still_has_four_entries() {
        let chart = status_chart(&StatusBreakdown::default());
        assert_eq!(chart.len(), 4);
        assert!(chart.iter().all(|e| e.value == 0));
        assert_eq!(chart[0].color, "oklch(0.55 0.18 258)");
    }
}
