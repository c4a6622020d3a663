//! The plan/log view-model.
//!
//! `TrainingTracker` is the single state container behind the page: the
//! selected week/day cursor, the log book, the readiness list and the log
//! form. Readers take a [`TrackerSnapshot`]; every change goes through one of
//! the transition methods, which also run the follow-up reactions (form
//! resync on selection change, full persistence after a log write).

use crate::errors::TrackerError;
use crate::models::{
    DayLog, LogBook, LogForm, LogKey, ReadinessDay, ReadinessSummary, WeekSummary, Weekday,
};
use crate::plan::{self, DayPlan, WeekPlan};
use crate::stats::{display_number, readiness_summary, week_summary};
use crate::storage::LogStorage;
use serde::Serialize;
use tracing::{debug, error, info, warn};

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ReadinessState {
    pub loading: bool,
    pub error: Option<String>,
    pub days: Vec<ReadinessDay>,
}

/// Identifies one readiness load; results carrying an older ticket are dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket(u64);

#[derive(Debug, Clone, Serialize)]
pub struct TrackerSnapshot {
    pub selected_week: u8,
    pub selected_day: Weekday,
    pub phase: &'static str,
    pub focus: &'static str,
    pub day_plan: DayPlan,
    pub current_log: Option<DayLog>,
    pub logged_days: Vec<Weekday>,
    pub form: LogForm,
    pub week_summary: WeekSummary,
    pub readiness: ReadinessState,
    pub readiness_summary: ReadinessSummary,
}

pub struct TrainingTracker<S> {
    storage: S,
    selected_week: u8,
    selected_day: Weekday,
    logs: LogBook,
    form: LogForm,
    readiness: ReadinessState,
    load_generation: u64,
    disposed: bool,
}

impl<S: LogStorage> TrainingTracker<S> {
    /// Builds the tracker with the default cursor and whatever logs the
    /// storage can produce. A failed load starts from an empty book.
    pub async fn mount(storage: S) -> Self {
        let logs = match storage.load().await {
            Ok(book) => {
                info!(entries = book.len(), "loaded training logs");
                book
            }
            Err(err) => {
                warn!("starting with an empty log book: {err}");
                LogBook::default()
            }
        };

        let mut tracker = Self {
            storage,
            selected_week: plan::first_week().number,
            selected_day: Weekday::Monday,
            logs,
            form: LogForm::default(),
            readiness: ReadinessState::default(),
            load_generation: 0,
            disposed: false,
        };
        tracker.sync_form();
        tracker
    }

    pub fn select_week(&mut self, week: u8) -> Result<(), TrackerError> {
        if plan::find_week(week).is_none() {
            return Err(TrackerError::UnknownWeek(week));
        }
        self.selected_week = week;
        self.sync_form();
        Ok(())
    }

    pub fn select_day(&mut self, day: Weekday) {
        self.selected_day = day;
        self.sync_form();
    }

    pub fn update_form(&mut self, form: LogForm) {
        self.form = form;
    }

    /// Validates the form and replaces the log for the current day.
    ///
    /// The whole book is written to storage afterwards; a storage failure is
    /// logged and does not undo the in-memory write.
    pub async fn submit_log(&mut self) -> Result<DayLog, TrackerError> {
        let log = parse_form(&self.form)?;
        let key = self.current_key();
        let replaced = self.logs.upsert(key, log.clone());
        debug!(%key, overwrite = replaced.is_some(), "recorded day log");

        if let Err(err) = self.storage.save(&self.logs).await {
            error!("failed to persist training logs: {err}");
        }

        self.sync_form();
        Ok(log)
    }

    pub fn begin_readiness_load(&mut self) -> LoadTicket {
        self.load_generation += 1;
        self.readiness.loading = true;
        self.readiness.error = None;
        LoadTicket(self.load_generation)
    }

    /// Applies a readiness result. Returns `false` when the result was
    /// discarded because the tracker was disposed or a newer load started.
    pub fn finish_readiness_load(
        &mut self,
        ticket: LoadTicket,
        result: Result<Vec<ReadinessDay>, String>,
    ) -> bool {
        if self.disposed || ticket.0 != self.load_generation {
            debug!("discarding stale readiness result");
            return false;
        }

        self.readiness.loading = false;
        match result {
            Ok(days) => {
                info!(days = days.len(), "readiness loaded");
                self.readiness.days = days;
                self.readiness.error = None;
            }
            Err(message) => {
                warn!("readiness load failed: {message}");
                self.readiness.days.clear();
                self.readiness.error = Some(message);
            }
        }
        true
    }

    pub fn dispose(&mut self) {
        self.disposed = true;
    }
}

impl<S> TrainingTracker<S> {
    pub fn selected_week(&self) -> u8 {
        self.selected_week
    }

    pub fn selected_day(&self) -> Weekday {
        self.selected_day
    }

    pub fn logs(&self) -> &LogBook {
        &self.logs
    }

    pub fn form(&self) -> &LogForm {
        &self.form
    }

    pub fn readiness(&self) -> &ReadinessState {
        &self.readiness
    }

    pub fn current_key(&self) -> LogKey {
        LogKey::new(self.selected_week, self.selected_day)
    }

    pub fn current_week(&self) -> &'static WeekPlan {
        plan::find_week(self.selected_week).unwrap_or_else(plan::first_week)
    }

    pub fn current_plan(&self) -> &'static DayPlan {
        self.current_week().day(self.selected_day)
    }

    pub fn current_log(&self) -> Option<&DayLog> {
        self.logs.get(&self.current_key())
    }

    pub fn week_summary(&self) -> WeekSummary {
        week_summary(&self.logs, self.selected_week)
    }

    pub fn readiness_summary(&self) -> ReadinessSummary {
        readiness_summary(&self.readiness.days)
    }

    pub fn snapshot(&self) -> TrackerSnapshot {
        let week = self.current_week();
        TrackerSnapshot {
            selected_week: self.selected_week,
            selected_day: self.selected_day,
            phase: week.phase,
            focus: week.focus,
            day_plan: *self.current_plan(),
            current_log: self.current_log().cloned(),
            logged_days: self.logs.week(self.selected_week).map(|(day, _)| day).collect(),
            form: self.form.clone(),
            week_summary: self.week_summary(),
            readiness: self.readiness.clone(),
            readiness_summary: self.readiness_summary(),
        }
    }

    fn sync_form(&mut self) {
        self.form = match self.current_log() {
            Some(log) => LogForm {
                duration: display_number(log.duration),
                rpe: log.rpe.to_string(),
                comment: log.comment.clone(),
            },
            None => LogForm::default(),
        };
    }
}

fn parse_form(form: &LogForm) -> Result<DayLog, TrackerError> {
    let duration = parse_required(&form.duration).ok_or(TrackerError::InvalidLog)?;
    let rpe = parse_required(&form.rpe).ok_or(TrackerError::InvalidLog)?;
    if duration < 0.0 {
        return Err(TrackerError::InvalidLog);
    }
    if rpe.fract() != 0.0 || !(1.0..=10.0).contains(&rpe) {
        return Err(TrackerError::RpeOutOfRange);
    }

    Ok(DayLog {
        duration,
        rpe: rpe as u8,
        comment: form.comment.trim().to_string(),
    })
}

/// Empty, non-numeric and zero inputs all count as missing.
fn parse_required(text: &str) -> Option<f64> {
    let value = text.trim().parse::<f64>().ok()?;
    (value.is_finite() && value != 0.0).then_some(value)
}
