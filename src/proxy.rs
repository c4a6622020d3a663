//! Pass-through endpoint for Oura daily readiness.
//!
//! One incoming request produces at most one upstream request. The response
//! is reduced to `{day, readiness, rhr, hrv}` records unless debug mode asks
//! for the raw upstream body.

use crate::config::ProxyConfig;
use crate::errors::ProxyError;
use crate::models::{ReadinessDay, ReadinessEnvelope};
use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{Duration, NaiveDate, Utc};
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

/// Days covered by the default window, today included.
const DEFAULT_WINDOW_DAYS: i64 = 7;

#[derive(Debug, Clone, Copy)]
pub enum Clock {
    System,
    Fixed(NaiveDate),
}

impl Clock {
    pub fn today(&self) -> NaiveDate {
        match self {
            Clock::System => Utc::now().date_naive(),
            Clock::Fixed(date) => *date,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ReadinessQuery {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
    pub debug: Option<String>,
}

impl ReadinessQuery {
    pub fn debug_enabled(&self) -> bool {
        self.debug.as_deref() == Some("1")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// Missing bounds default independently: `end` to today, `start` to six
/// days before today.
pub fn resolve_range(query: &ReadinessQuery, today: NaiveDate) -> DateRange {
    DateRange {
        start: query
            .start
            .unwrap_or(today - Duration::days(DEFAULT_WINDOW_DAYS - 1)),
        end: query.end.unwrap_or(today),
    }
}

pub enum ProxyReply {
    Simplified(Vec<ReadinessDay>),
    Raw(String),
}

impl IntoResponse for ProxyReply {
    fn into_response(self) -> Response {
        match self {
            ProxyReply::Simplified(data) => Json(ReadinessEnvelope { data }).into_response(),
            ProxyReply::Raw(body) => (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                body,
            )
                .into_response(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ReadinessProxy {
    config: ProxyConfig,
    http: Client,
    clock: Clock,
}

impl ReadinessProxy {
    pub fn new(config: ProxyConfig, clock: Clock) -> Self {
        Self {
            config,
            http: Client::new(),
            clock,
        }
    }

    pub async fn handle(&self, query: &ReadinessQuery) -> Result<ProxyReply, ProxyError> {
        let token = self
            .config
            .token
            .as_deref()
            .ok_or(ProxyError::MissingCredential)?;
        let range = resolve_range(query, self.clock.today());

        let body = self.fetch(token, range).await?;
        let value: Value =
            serde_json::from_str(&body).map_err(|err| ProxyError::Fetch(err.to_string()))?;

        if query.debug_enabled() {
            return Ok(ProxyReply::Raw(body));
        }
        Ok(ProxyReply::Simplified(simplify(&value)))
    }

    async fn fetch(&self, token: &str, range: DateRange) -> Result<String, ProxyError> {
        let url = format!(
            "{}/daily_readiness",
            self.config.api_base.trim_end_matches('/')
        );
        info!(start = %range.start, end = %range.end, "requesting Oura daily readiness");

        let response = self
            .http
            .get(&url)
            .bearer_auth(token)
            .query(&[
                ("start_date", range.start.to_string()),
                ("end_date", range.end.to_string()),
            ])
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            warn!(status = status.as_u16(), "Oura API returned an error");
            return Err(ProxyError::Upstream {
                status: status.as_u16(),
                detail: text,
            });
        }
        Ok(text)
    }
}

/// Maps the upstream `data` array to readiness records. A missing or
/// non-array `data` yields no records.
pub fn simplify(body: &Value) -> Vec<ReadinessDay> {
    body.get("data")
        .and_then(Value::as_array)
        .map(|entries| entries.iter().map(simplify_entry).collect())
        .unwrap_or_default()
}

fn simplify_entry(entry: &Value) -> ReadinessDay {
    ReadinessDay {
        day: entry
            .get("day")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        readiness: metric(entry, &["score"]),
        rhr: metric(entry, &["resting_heart_rate"]),
        hrv: metric(entry, &["hrv_balance", "hrv_rmssd"]),
    }
}

// first numeric field wins
fn metric(entry: &Value, names: &[&str]) -> Option<f64> {
    names
        .iter()
        .find_map(|name| entry.get(*name).and_then(Value::as_f64))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn default_range_is_trailing_week() {
        let range = resolve_range(&ReadinessQuery::default(), date(2024, 1, 15));
        assert_eq!(range.start, date(2024, 1, 9));
        assert_eq!(range.end, date(2024, 1, 15));
    }

    #[test]
    fn explicit_bounds_are_kept() {
        let query = ReadinessQuery {
            start: Some(date(2023, 12, 1)),
            end: None,
            debug: None,
        };
        let range = resolve_range(&query, date(2024, 1, 15));
        assert_eq!(range.start, date(2023, 12, 1));
        assert_eq!(range.end, date(2024, 1, 15));
    }

    #[test]
    fn default_range_crosses_month_boundary() {
        let range = resolve_range(&ReadinessQuery::default(), date(2024, 3, 2));
        assert_eq!(range.start, date(2024, 2, 25));
    }

    #[test]
    fn debug_flag_requires_one() {
        let mut query = ReadinessQuery::default();
        assert!(!query.debug_enabled());
        query.debug = Some("true".into());
        assert!(!query.debug_enabled());
        query.debug = Some("1".into());
        assert!(query.debug_enabled());
    }

    #[test]
    fn simplify_maps_fields_and_hrv_alternatives() {
        let body = json!({
            "data": [
                { "day": "2024-01-01", "score": 81, "resting_heart_rate": 47, "hrv_balance": 62 },
                { "day": "2024-01-02", "score": 74, "hrv_rmssd": 55.5 },
                { "day": "2024-01-03", "hrv_balance": null, "hrv_rmssd": 40 },
                { "day": "2024-01-04" }
            ],
            "next_token": null
        });

        let days = simplify(&body);
        assert_eq!(days.len(), 4);
        assert_eq!(days[0].readiness, Some(81.0));
        assert_eq!(days[0].rhr, Some(47.0));
        assert_eq!(days[0].hrv, Some(62.0));
        assert_eq!(days[1].rhr, None);
        assert_eq!(days[1].hrv, Some(55.5));
        assert_eq!(days[2].hrv, Some(40.0));
        assert_eq!(days[3].readiness, None);
        assert_eq!(days[3].hrv, None);
    }

    #[test]
    fn simplify_tolerates_missing_data() {
        assert!(simplify(&json!({})).is_empty());
        assert!(simplify(&json!({ "data": "oops" })).is_empty());
        assert!(simplify(&json!([1, 2, 3])).is_empty());
    }

    #[tokio::test]
    async fn missing_token_fails_before_any_request() {
        let proxy = ReadinessProxy::new(
            ProxyConfig::new(None, "http://127.0.0.1:9"),
            Clock::Fixed(date(2024, 1, 15)),
        );
        let result = proxy.handle(&ReadinessQuery::default()).await;
        assert!(matches!(result, Err(ProxyError::MissingCredential)));
    }
}
