use chrono::{DateTime, NaiveDate, NaiveDateTime};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::models::event::CalendarEvent;

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M",
];

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ActiveSchedule {
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ActiveLocation {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ActiveUser {
    pub username: String,
    pub color: String,
    #[serde(default)]
    pub schedule: Option<ActiveSchedule>,
    #[serde(default)]
    pub location: Option<ActiveLocation>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct TimeOffEntry {
    pub username: String,
    pub start_date: String,
    pub end_date: String,
    pub duration: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub is_today: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct ScheduleEntry {
    pub id: i64,
    #[serde(default)]
    pub technician_id: Option<i64>,
    #[serde(default, alias = "username")]
    pub technician_name: Option<String>,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub time_off: bool,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub location_id: Option<i64>,
}

impl ScheduleEntry {
    pub fn to_event(&self, tz: Tz) -> Option<CalendarEvent> {
        let start = parse_timestamp(&self.start_time, tz)?;
        let end = parse_timestamp(&self.end_time, tz)?;
        Some(CalendarEvent {
            id: Some(self.id),
            start,
            end,
            description: self.description.clone().unwrap_or_default(),
            technician_id: self.technician_id,
            technician_name: self.technician_name.clone(),
            color: self.color.clone(),
            time_off: self.time_off,
            location_id: self.location_id,
        })
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CalendarData {
    #[serde(default)]
    pub date_range: String,
    #[serde(default)]
    pub days: Vec<CalendarDay>,
    #[serde(default)]
    pub schedules: Vec<ScheduleEntry>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct CalendarQuery {
    pub week_start: Option<NaiveDate>,
    pub location_id: Option<i64>,
    pub personal_view: bool,
}

impl CalendarQuery {
    pub fn to_params(&self) -> Vec<(&'static str, String)> {
        let mut params = Vec::new();
        if let Some(week_start) = self.week_start {
            params.push(("week_start", week_start.format("%Y-%m-%d").to_string()));
        }
        if let Some(location_id) = self.location_id {
            params.push(("location_id", location_id.to_string()));
        }
        if self.personal_view {
            params.push(("personal_view", "true".to_string()));
        }
        params
    }
}

/// Offset-carrying timestamps are shifted into `tz`; naive ones are taken as
/// already being local wall-clock time.
pub fn parse_timestamp(raw: &str, tz: Tz) -> Option<NaiveDateTime> {
    let raw = raw.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(raw) {
        return Some(parsed.with_timezone(&tz).naive_local());
    }
    NAIVE_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(raw, format).ok())
}
