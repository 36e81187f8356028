use chrono::{NaiveDate, Timelike};
use serde::Serialize;

use crate::models::event::CalendarEvent;
use crate::service::date_picker::DatePicker;

pub const SCHEDULE_SUBMIT_PATH: &str = "/schedule/new";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ModalMode {
    Add,
    Edit,
    Copy,
}

impl ModalMode {
    pub fn title(&self) -> &'static str {
        match self {
            ModalMode::Add => "Add New Schedule",
            ModalMode::Edit => "Edit Schedule",
            ModalMode::Copy => "Copy Schedule",
        }
    }

    pub fn submit_label(&self) -> &'static str {
        match self {
            ModalMode::Add => "Add Schedule",
            ModalMode::Edit => "Update Schedule",
            ModalMode::Copy => "Add Copy",
        }
    }

    pub fn shows_edit_actions(&self) -> bool {
        matches!(self, ModalMode::Edit)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HourOption {
    pub value: String,
    pub label: String,
}

/// `00:00` through `23:00`, then a trailing `00:00` for midnight at the end
/// of the day.
pub fn end_hour_options() -> Vec<HourOption> {
    (0..24)
        .chain(std::iter::once(0))
        .map(|hour| HourOption {
            value: format!("{:02}", hour),
            label: format!("{:02}:00", hour),
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepeatDay {
    pub value: String,
    pub checked: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ScheduleFormState {
    pub mode: ModalMode,
    pub schedule_id: Option<i64>,
    pub date: NaiveDate,
    pub start_hour: u32,
    pub end_hour: u32,
    pub description: String,
    pub technician_id: Option<i64>,
    pub time_off: bool,
    pub location_id: Option<i64>,
    pub repeat_enabled: bool,
    pub repeat_days: Vec<RepeatDay>,
}

impl ScheduleFormState {
    pub fn for_slot(date: NaiveDate, hour: u32) -> Self {
        Self {
            mode: ModalMode::Add,
            schedule_id: None,
            date,
            start_hour: hour.min(23),
            end_hour: (hour.min(23) + 1) % 24,
            description: String::new(),
            technician_id: None,
            time_off: false,
            location_id: None,
            repeat_enabled: false,
            repeat_days: Vec::new(),
        }
    }

    pub fn for_event(event: &CalendarEvent) -> Self {
        Self {
            mode: ModalMode::Edit,
            schedule_id: event.id,
            date: event.start.date(),
            start_hour: event.start.hour(),
            end_hour: event.end.hour(),
            description: event.description.clone(),
            technician_id: event.technician_id,
            time_off: event.time_off,
            location_id: event.location_id,
            repeat_enabled: false,
            repeat_days: Vec::new(),
        }
    }

    pub fn into_copy(mut self) -> Self {
        self.schedule_id = None;
        self.mode = ModalMode::Copy;
        self
    }

    pub fn with_repeat_days<I: IntoIterator<Item = String>>(mut self, values: I) -> Self {
        self.repeat_days = values
            .into_iter()
            .map(|value| RepeatDay {
                value,
                checked: false,
            })
            .collect();
        self
    }

    pub fn toggle_repeat_day(&mut self, value: &str) {
        if let Some(day) = self.repeat_days.iter_mut().find(|day| day.value == value) {
            day.checked = !day.checked;
        }
    }

    /// Turning repeat off unchecks every repeat day except the first.
    pub fn set_repeat_enabled(&mut self, enabled: bool) {
        self.repeat_enabled = enabled;
        if !enabled {
            for day in self.repeat_days.iter_mut().skip(1) {
                day.checked = false;
            }
        }
    }

    pub fn start_time_value(&self) -> String {
        format!("{} {:02}:00", self.date.format("%Y-%m-%d"), self.start_hour)
    }

    pub fn end_time_value(&self) -> String {
        format!("{} {:02}:00", self.date.format("%Y-%m-%d"), self.end_hour)
    }

    pub fn repeat_days_value(&self) -> String {
        if !self.repeat_enabled {
            return String::new();
        }
        self.repeat_days
            .iter()
            .filter(|day| day.checked)
            .map(|day| day.value.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }

    pub fn submission(&self, picker: Option<&DatePicker>, csrf_token: &str) -> Vec<(String, String)> {
        let optional = |value: Option<i64>| value.map(|id| id.to_string()).unwrap_or_default();
        let mut fields = vec![
            ("csrf_token", csrf_token.to_string()),
            ("schedule_id", optional(self.schedule_id)),
            ("technician", optional(self.technician_id)),
            ("start_time", self.start_time_value()),
            ("end_time", self.end_time_value()),
            ("description", self.description.clone()),
            ("location_id", optional(self.location_id)),
            ("repeat_days", self.repeat_days_value()),
        ];
        if self.time_off {
            fields.push(("time_off", "y".to_string()));
        }
        if let Some(picker) = picker {
            fields.push(("direct_repeat_days_list", picker.form_value()));
        }
        fields
            .into_iter()
            .map(|(key, value)| (key.to_string(), value))
            .collect()
    }
}

pub fn delete_path(schedule_id: i64) -> String {
    format!("/schedule/delete/{}", schedule_id)
}
