use crate::models::{LogBook, ReadinessDay, ReadinessSummary, WeekSummary, Weekday};

pub fn week_summary(book: &LogBook, week: u8) -> WeekSummary {
    let mut logged_days = 0;
    let mut total_minutes = 0.0;
    for (_, log) in book.week(week) {
        logged_days += 1;
        total_minutes += log.duration;
    }

    WeekSummary {
        week,
        logged_days,
        total_days: Weekday::ALL.len(),
        total_minutes,
    }
}

/// Latest entry in proxy order plus the rounded mean readiness score.
///
/// Days without a score count as zero, so gaps pull the average down.
pub fn readiness_summary(days: &[ReadinessDay]) -> ReadinessSummary {
    let average = if days.is_empty() {
        None
    } else {
        let sum: f64 = days.iter().map(|day| day.readiness.unwrap_or(0.0)).sum();
        Some((sum / days.len() as f64).round() as i64)
    };

    ReadinessSummary {
        latest: days.last().cloned(),
        average,
    }
}

/// Renders an optional metric, using `n/a` for values the API did not report.
pub fn display_metric(value: Option<f64>) -> String {
    match value {
        Some(value) => display_number(value),
        None => "n/a".to_string(),
    }
}

pub fn display_number(value: f64) -> String {
    if value.fract() == 0.0 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DayLog, LogKey};

    fn readiness(day: &str, score: Option<f64>) -> ReadinessDay {
        ReadinessDay {
            day: day.to_string(),
            readiness: score,
            rhr: None,
            hrv: None,
        }
    }

    #[test]
    fn week_summary_counts_only_selected_week() {
        let mut book = LogBook::default();
        for (week, day, duration) in [
            (2, Weekday::Monday, 60.0),
            (2, Weekday::Saturday, 125.0),
            (3, Weekday::Monday, 45.0),
        ] {
            book.upsert(
                LogKey::new(week, day),
                DayLog {
                    duration,
                    rpe: 5,
                    comment: String::new(),
                },
            );
        }

        let summary = week_summary(&book, 2);
        assert_eq!(summary.logged_days, 2);
        assert_eq!(summary.total_days, 7);
        assert_eq!(summary.total_minutes, 185.0);

        assert_eq!(week_summary(&book, 5).logged_days, 0);
    }

    #[test]
    fn missing_scores_count_as_zero_in_average() {
        let days = vec![
            readiness("2024-01-01", Some(70.0)),
            readiness("2024-01-02", None),
            readiness("2024-01-03", Some(80.0)),
        ];

        let summary = readiness_summary(&days);
        assert_eq!(summary.average, Some(50));
        assert_eq!(
            summary.latest.map(|day| day.day),
            Some("2024-01-03".to_string())
        );
    }

    #[test]
    fn latest_follows_list_order_not_dates() {
        let days = vec![
            readiness("2024-01-05", Some(60.0)),
            readiness("2024-01-01", Some(90.0)),
        ];
        let summary = readiness_summary(&days);
        assert_eq!(summary.latest.unwrap().day, "2024-01-01");
        assert_eq!(summary.average, Some(75));
    }

    #[test]
    fn empty_list_has_no_summary() {
        let summary = readiness_summary(&[]);
        assert!(summary.latest.is_none());
        assert!(summary.average.is_none());
    }

    #[test]
    fn metrics_render_unavailable_marker() {
        assert_eq!(display_metric(None), "n/a");
        assert_eq!(display_metric(Some(0.0)), "0");
        assert_eq!(display_metric(Some(52.0)), "52");
        assert_eq!(display_metric(Some(41.5)), "41.5");
    }
}
