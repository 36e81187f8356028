use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};

pub const END_OF_DAY_HOUR: f64 = 24.0;

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct CalendarEvent {
    pub id: Option<i64>,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub technician_id: Option<i64>,
    #[serde(default)]
    pub technician_name: Option<String>,
    #[serde(default)]
    pub color: Option<String>,
    #[serde(default)]
    pub time_off: bool,
    #[serde(default)]
    pub location_id: Option<i64>,
}

impl CalendarEvent {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            id: None,
            start,
            end,
            description: String::new(),
            technician_id: None,
            technician_name: None,
            color: None,
            time_off: false,
            location_id: None,
        }
    }

    pub fn start_hour(&self) -> f64 {
        hour_fraction(&self.start)
    }

    /// End hour within the start's day column. Midnight is hour 24, and an
    /// end that spills into a later day is clamped to 24.
    pub fn normalized_end_hour(&self) -> f64 {
        if self.end.hour() == 0 && self.end.minute() == 0 {
            return END_OF_DAY_HOUR;
        }
        if self.end.date() > self.start.date() {
            return END_OF_DAY_HOUR;
        }
        hour_fraction(&self.end)
    }

    pub fn duration_hours(&self) -> f64 {
        self.normalized_end_hour() - self.start_hour()
    }

    pub fn overlaps(&self, other: &CalendarEvent) -> bool {
        overlaps(
            (self.start_hour(), self.normalized_end_hour()),
            (other.start_hour(), other.normalized_end_hour()),
        )
    }

    /// Last calendar day the event covers. A midnight end belongs to the
    /// previous day.
    pub fn last_date(&self) -> NaiveDate {
        let last = if self.end.time() == NaiveTime::MIN {
            self.end.date().pred_opt().unwrap_or(self.end.date())
        } else {
            self.end.date()
        };
        last.max(self.start.date())
    }

    /// Part of an earlier-starting event that falls on `date`, running from
    /// 00:00 to the event's end or the following midnight.
    pub fn continuation_on(&self, date: NaiveDate) -> Option<CalendarEvent> {
        if self.start.date() >= date {
            return None;
        }
        let day_start = date.and_time(NaiveTime::MIN);
        if self.end <= day_start {
            return None;
        }
        let next_day = date.succ_opt()?.and_time(NaiveTime::MIN);
        Some(CalendarEvent {
            start: day_start,
            end: self.end.min(next_day),
            ..self.clone()
        })
    }

    pub fn label(&self) -> String {
        let time = format!(
            "{} - {}",
            self.start.format("%H:%M"),
            self.end.format("%H:%M")
        );
        match &self.technician_name {
            Some(name) if !name.is_empty() => format!("{} {}", name, time),
            _ => time,
        }
    }
}

pub fn hour_fraction(time: &NaiveDateTime) -> f64 {
    time.hour() as f64 + time.minute() as f64 / 60.0
}

/// Half-open interval test: ranges that only touch do not overlap.
pub fn overlaps(a: (f64, f64), b: (f64, f64)) -> bool {
    a.0 < b.1 && a.1 > b.0
}
