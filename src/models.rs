use serde::{Deserialize, Serialize};
use std::{collections::BTreeMap, fmt, str::FromStr};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Weekday {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Monday,
        Weekday::Tuesday,
        Weekday::Wednesday,
        Weekday::Thursday,
        Weekday::Friday,
        Weekday::Saturday,
        Weekday::Sunday,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Weekday::Monday => "Monday",
            Weekday::Tuesday => "Tuesday",
            Weekday::Wednesday => "Wednesday",
            Weekday::Thursday => "Thursday",
            Weekday::Friday => "Friday",
            Weekday::Saturday => "Saturday",
            Weekday::Sunday => "Sunday",
        }
    }

    /// Position in the training week, Monday = 0.
    pub fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Weekday {
    type Err = KeyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Weekday::ALL
            .into_iter()
            .find(|day| day.name() == value)
            .ok_or_else(|| KeyError::UnknownWeekday(value.to_string()))
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum KeyError {
    #[error("unknown weekday `{0}`")]
    UnknownWeekday(String),

    #[error("log key `{0}` is not of the form <week>-<Weekday>")]
    Malformed(String),
}

/// Identifies one logged day: `"<week>-<Weekday>"` on disk.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct LogKey {
    pub week: u8,
    pub day: Weekday,
}

impl LogKey {
    pub fn new(week: u8, day: Weekday) -> Self {
        Self { week, day }
    }
}

impl fmt::Display for LogKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.week, self.day)
    }
}

impl FromStr for LogKey {
    type Err = KeyError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let malformed = || KeyError::Malformed(value.to_string());
        let (week, day) = value.split_once('-').ok_or_else(malformed)?;
        let week = week.parse::<u8>().map_err(|_| malformed())?;
        Ok(Self {
            week,
            day: day.parse()?,
        })
    }
}

impl TryFrom<String> for LogKey {
    type Error = KeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<LogKey> for String {
    fn from(key: LogKey) -> Self {
        key.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayLog {
    pub duration: f64,
    pub rpe: u8,
    #[serde(default)]
    pub comment: String,
}

/// Every logged day, keyed by week and weekday.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LogBook {
    entries: BTreeMap<LogKey, DayLog>,
}

impl LogBook {
    pub fn get(&self, key: &LogKey) -> Option<&DayLog> {
        self.entries.get(key)
    }

    /// Replaces the whole record for `key`, returning the previous one.
    pub fn upsert(&mut self, key: LogKey, log: DayLog) -> Option<DayLog> {
        self.entries.insert(key, log)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn week(&self, week: u8) -> impl Iterator<Item = (Weekday, &DayLog)> {
        self.entries
            .iter()
            .filter(move |(key, _)| key.week == week)
            .map(|(key, log)| (key.day, log))
    }
}

/// Raw text of the log form, as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LogForm {
    pub duration: String,
    pub rpe: String,
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReadinessDay {
    pub day: String,
    pub readiness: Option<f64>,
    pub rhr: Option<f64>,
    pub hrv: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReadinessEnvelope {
    #[serde(default)]
    pub data: Vec<ReadinessDay>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SelectRequest {
    pub week: Option<u8>,
    pub day: Option<Weekday>,
}

#[derive(Debug, Deserialize)]
pub struct WeekSelection {
    pub week: u8,
}

#[derive(Debug, Deserialize)]
pub struct DaySelection {
    pub day: Weekday,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeekSummary {
    pub week: u8,
    pub logged_days: usize,
    pub total_days: usize,
    pub total_minutes: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReadinessSummary {
    pub latest: Option<ReadinessDay>,
    pub average: Option<i64>,
}
