use crate::models::Weekday;
use crate::plan::WeekPlan;
use crate::stats::{display_metric, display_number};
use crate::tracker::TrackerSnapshot;
use html_escape::{encode_double_quoted_attribute as attr, encode_text as text};

pub fn render_index(snapshot: &TrackerSnapshot, weeks: &[WeekPlan]) -> String {
    fill(INDEX_HTML, |name| {
        let value = match name {
            "WEEK_TITLE" => week_title(snapshot),
            "WEEK_BUTTONS" => week_buttons(snapshot, weeks),
            "LOGGED" => snapshot.week_summary.logged_days.to_string(),
            "TOTAL_DAYS" => snapshot.week_summary.total_days.to_string(),
            "MINUTES" => display_number(snapshot.week_summary.total_minutes),
            "RECOVERY" => recovery(snapshot),
            "DAY_BUTTONS" => day_buttons(snapshot),
            "DAY" => snapshot.selected_day.name().to_string(),
            "PLAN_TITLE" => text(snapshot.day_plan.title).into_owned(),
            "PLAN_DETAILS" => text(snapshot.day_plan.details).into_owned(),
            "CURRENT_LOG" => current_log(snapshot),
            "FORM_DURATION" => attr(&snapshot.form.duration).into_owned(),
            "FORM_RPE" => attr(&snapshot.form.rpe).into_owned(),
            "FORM_COMMENT" => text(&snapshot.form.comment).into_owned(),
            _ => return None,
        };
        Some(value)
    })
}

/// Substitutes every `{{NAME}}` in `template` in a single pass, so inserted
/// values are never scanned for placeholders. Unknown names are kept as is.
fn fill(template: &str, value: impl Fn(&str) -> Option<String>) -> String {
    let mut html = String::with_capacity(template.len());
    let mut rest = template;
    while let Some(open) = rest.find("{{") {
        let Some(close) = rest[open + 2..].find("}}") else {
            break;
        };
        let name = &rest[open + 2..open + 2 + close];
        let end = open + 2 + close + 2;
        html.push_str(&rest[..open]);
        match value(name) {
            Some(rendered) => html.push_str(&rendered),
            None => html.push_str(&rest[open..end]),
        }
        rest = &rest[end..];
    }
    html.push_str(rest);
    html
}

fn week_title(snapshot: &TrackerSnapshot) -> String {
    format!(
        "Week {} &middot; {} &middot; {}",
        snapshot.selected_week,
        text(snapshot.phase),
        text(snapshot.focus)
    )
}

fn week_buttons(snapshot: &TrackerSnapshot, weeks: &[WeekPlan]) -> String {
    weeks
        .iter()
        .map(|week| {
            let class = if week.number == snapshot.selected_week {
                "week-btn selected"
            } else {
                "week-btn"
            };
            format!(
                r#"<form method="post" action="/select/week"><input type="hidden" name="week" value="{n}" /><button class="{class}" type="submit">Week {n}</button></form>"#,
                n = week.number
            )
        })
        .collect()
}

fn day_buttons(snapshot: &TrackerSnapshot) -> String {
    Weekday::ALL
        .iter()
        .map(|day| {
            let logged = snapshot.logged_days.contains(day);
            let mut class = String::from("day-btn");
            if *day == snapshot.selected_day {
                class.push_str(" selected");
            }
            if logged {
                class.push_str(" logged");
            }
            let marker = if logged { " <span>&#10004;</span>" } else { "" };
            format!(
                r#"<form method="post" action="/select/day"><input type="hidden" name="day" value="{day}" /><button class="{class}" type="submit">{day}{marker}</button></form>"#
            )
        })
        .collect()
}

fn recovery(snapshot: &TrackerSnapshot) -> String {
    let readiness = &snapshot.readiness;
    if readiness.loading {
        return "<p>Loading&hellip;</p>".to_string();
    }
    if let Some(error) = &readiness.error {
        return format!("<p class=\"error\">Error: {}</p>", text(error));
    }

    let Some(latest) = &snapshot.readiness_summary.latest else {
        return "<p>No readiness data.</p>".to_string();
    };
    let mut html = format!(
        "<p>Latest ({}) readiness: <strong>{}</strong></p>\
         <p>RHR: <strong>{} bpm</strong></p>\
         <p>HRV: <strong>{}</strong></p>",
        text(&latest.day),
        display_metric(latest.readiness),
        display_metric(latest.rhr),
        display_metric(latest.hrv),
    );
    if let Some(average) = snapshot.readiness_summary.average {
        html.push_str(&format!(
            "<p>{}-day avg: <strong>{average}</strong></p>",
            readiness.days.len()
        ));
    }
    html
}

fn current_log(snapshot: &TrackerSnapshot) -> String {
    match &snapshot.current_log {
        Some(log) => format!(
            "<p class=\"logged-line\">Logged: {}min &ndash; RPE {}</p>",
            display_number(log.duration),
            log.rpe
        ),
        None => String::new(),
    }
}

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Training Plan &ndash; 12 Weeks</title>
  <style>
    :root {
      --ink: #23262b;
      --accent: #ff6b4a;
      --accent-2: #2f4858;
      --ok: #2d7a4b;
      --card: #ffffff;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      background: #f4f1ea;
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      padding: 24px 16px 48px;
    }

    main {
      width: min(900px, 100%);
      margin: 0 auto;
      display: grid;
      gap: 18px;
    }

    .card {
      background: var(--card);
      border-radius: 18px;
      padding: 20px;
      box-shadow: 0 12px 30px rgba(47, 72, 88, 0.12);
    }

    .grid {
      display: flex;
      flex-wrap: wrap;
      gap: 8px;
    }

    .grid form {
      margin: 0;
    }

    button {
      border: none;
      border-radius: 999px;
      padding: 8px 14px;
      font-weight: 600;
      cursor: pointer;
      background: rgba(47, 72, 88, 0.08);
      color: var(--accent-2);
    }

    button.selected {
      background: var(--accent-2);
      color: white;
    }

    button.logged span {
      color: var(--ok);
    }

    .summary {
      display: flex;
      gap: 24px;
      margin-top: 12px;
    }

    .error {
      color: #c63b2b;
    }

    label {
      display: grid;
      gap: 4px;
      margin-bottom: 12px;
    }

    .save-btn {
      background: var(--accent);
      color: white;
    }
  </style>
</head>
<body>
  <main>
    <header>
      <h1>Training Plan &ndash; 12 Weeks</h1>
    </header>

    <section class="card">
      <h2>{{WEEK_TITLE}}</h2>
      <div class="grid">{{WEEK_BUTTONS}}</div>
      <div class="summary">
        <span>Logged: <strong>{{LOGGED}}</strong> / {{TOTAL_DAYS}}</span>
        <span>Minutes: <strong>{{MINUTES}}</strong></span>
      </div>
    </section>

    <section class="card">
      <h2>Recovery (Oura)</h2>
      {{RECOVERY}}
    </section>

    <section class="card">
      <div class="grid">{{DAY_BUTTONS}}</div>
    </section>

    <section class="card">
      <h3>{{DAY}}</h3>
      <p><strong>Planned:</strong> {{PLAN_TITLE}} &ndash; {{PLAN_DETAILS}}</p>
      {{CURRENT_LOG}}
      <form method="post" action="/log">
        <label>
          Duration (min)
          <input type="number" name="duration" min="0" step="any" value="{{FORM_DURATION}}" required />
        </label>
        <label>
          RPE
          <input type="number" name="rpe" min="1" max="10" value="{{FORM_RPE}}" required />
        </label>
        <label>
          Comment
          <textarea name="comment">{{FORM_COMMENT}}</textarea>
        </label>
        <button class="save-btn" type="submit">Save Log</button>
      </form>
    </section>
  </main>
</body>
</html>
"#;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DayLog, LogBook, LogForm, ReadinessDay, ReadinessSummary, WeekSummary};
    use crate::plan::{self, first_week};
    use crate::tracker::ReadinessState;

    fn snapshot() -> TrackerSnapshot {
        let week = first_week();
        TrackerSnapshot {
            selected_week: 1,
            selected_day: Weekday::Monday,
            phase: week.phase,
            focus: week.focus,
            day_plan: *week.day(Weekday::Monday),
            current_log: None,
            logged_days: Vec::new(),
            form: LogForm::default(),
            week_summary: crate::stats::week_summary(&LogBook::default(), 1),
            readiness: ReadinessState::default(),
            readiness_summary: ReadinessSummary {
                latest: None,
                average: None,
            },
        }
    }

    #[test]
    fn renders_all_weeks_and_days() {
        let html = render_index(&snapshot(), plan::weeks());
        assert!(html.contains("Week 12</button>"));
        assert!(html.contains(">Sunday</button>"));
        assert!(!html.contains("{{"));
    }

    #[test]
    fn escapes_user_comment() {
        let mut snapshot = snapshot();
        snapshot.form.comment = "<script>alert(1)</script>".into();
        let html = render_index(&snapshot, plan::weeks());
        assert!(!html.contains("<script>alert"));
        assert!(html.contains("&lt;script&gt;"));
    }

    #[test]
    fn typed_placeholders_are_not_expanded() {
        let mut snapshot = snapshot();
        snapshot.form.duration = "{{FORM_COMMENT}}".into();
        snapshot.form.comment = "\" autofocus onfocus=\"alert(1)".into();

        let html = render_index(&snapshot, plan::weeks());
        assert!(!html.contains("onfocus=\"alert(1)\""));
        assert!(html.contains(r#"step="any" value="{{FORM_COMMENT}}" required"#));
        assert!(html.contains(
            "<textarea name=\"comment\">\" autofocus onfocus=\"alert(1)</textarea>"
        ));
    }

    #[test]
    fn form_values_cannot_leave_their_attribute() {
        let mut snapshot = snapshot();
        snapshot.form.rpe = "7\" onmouseover=\"x".into();

        let html = render_index(&snapshot, plan::weeks());
        assert!(html.contains(r#"value="7&quot; onmouseover=&quot;x""#));
    }

    #[test]
    fn fill_keeps_unknown_placeholders() {
        let html = fill("a {{X}} b {{Y}} c {{", |name| {
            (name == "X").then(|| "{{Y}}".to_string())
        });
        assert_eq!(html, "a {{Y}} b {{Y}} c {{");
    }

    #[test]
    fn missing_metrics_show_marker() {
        let mut snapshot = snapshot();
        let day = ReadinessDay {
            day: "2024-01-03".into(),
            readiness: Some(80.0),
            rhr: None,
            hrv: None,
        };
        snapshot.readiness.days = vec![day.clone()];
        snapshot.readiness_summary = ReadinessSummary {
            latest: Some(day),
            average: Some(80),
        };

        let html = render_index(&snapshot, plan::weeks());
        assert!(html.contains("RHR: <strong>n/a bpm</strong>"));
        assert!(html.contains("1-day avg: <strong>80</strong>"));
    }

    #[test]
    fn logged_day_is_marked() {
        let mut snapshot = snapshot();
        snapshot.logged_days = vec![Weekday::Monday];
        snapshot.current_log = Some(DayLog {
            duration: 45.0,
            rpe: 7,
            comment: String::new(),
        });
        snapshot.week_summary = WeekSummary {
            week: 1,
            logged_days: 1,
            total_days: 7,
            total_minutes: 45.0,
        };

        let html = render_index(&snapshot, plan::weeks());
        assert!(html.contains("day-btn selected logged"));
        assert!(html.contains("Logged: 45min &ndash; RPE 7"));
    }
}
