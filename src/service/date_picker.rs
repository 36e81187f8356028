use std::collections::BTreeSet;

use chrono::{Datelike, Months, NaiveDate};

pub const GRID_CELLS: usize = 42;
pub const EMPTY_SELECTION: &str = "None selected";

const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DayCell {
    pub date: NaiveDate,
    pub outside_month: bool,
    pub is_today: bool,
    pub is_primary: bool,
    pub is_selected: bool,
}

impl DayCell {
    pub fn disabled(&self) -> bool {
        self.is_primary
    }

    pub fn class_name(&self) -> String {
        let mut classes = vec!["day-item"];
        if self.outside_month {
            classes.push("outside-month");
        }
        if self.is_today {
            classes.push("today");
        }
        if self.is_primary {
            classes.push("primary-date");
            classes.push("disabled");
        } else if self.is_selected {
            classes.push("selected");
        }
        classes.join(" ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatePicker {
    year: i32,
    month: u32,
    primary: Option<NaiveDate>,
    selected: BTreeSet<NaiveDate>,
}

impl DatePicker {
    /// Always opens on `today`'s month, even when the primary date is elsewhere.
    pub fn new(today: NaiveDate, primary: Option<NaiveDate>) -> Self {
        Self {
            year: today.year(),
            month: today.month(),
            primary,
            selected: BTreeSet::new(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn primary(&self) -> Option<NaiveDate> {
        self.primary
    }

    pub fn show_month(&mut self, year: i32, month: u32) {
        self.year = year;
        self.month = month.clamp(1, 12);
    }

    pub fn prev_month(&mut self) {
        if self.month == 1 {
            self.month = 12;
            self.year -= 1;
        } else {
            self.month -= 1;
        }
    }

    pub fn next_month(&mut self) {
        if self.month == 12 {
            self.month = 1;
            self.year += 1;
        } else {
            self.month += 1;
        }
    }

    pub fn header(&self) -> String {
        format!("{} {}", MONTH_NAMES[(self.month - 1) as usize], self.year)
    }

    pub fn grid(&self, today: NaiveDate) -> Vec<DayCell> {
        let Some(first) = NaiveDate::from_ymd_opt(self.year, self.month, 1) else {
            return Vec::new();
        };
        let leading = first.weekday().num_days_from_sunday() as u64;
        let Some(grid_start) = first.checked_sub_days(chrono::Days::new(leading)) else {
            return Vec::new();
        };

        grid_start
            .iter_days()
            .take(GRID_CELLS)
            .map(|date| DayCell {
                date,
                outside_month: date.month() != self.month || date.year() != self.year,
                is_today: date == today,
                is_primary: Some(date) == self.primary,
                is_selected: self.selected.contains(&date),
            })
            .collect()
    }

    /// Flips `date` in the selection. The primary date is never selectable.
    /// Returns whether the date is selected afterwards.
    pub fn toggle(&mut self, date: NaiveDate) -> bool {
        if Some(date) == self.primary {
            return false;
        }
        if !self.selected.remove(&date) {
            self.selected.insert(date);
            return true;
        }
        false
    }

    pub fn remove(&mut self, date: NaiveDate) -> bool {
        self.selected.remove(&date)
    }

    pub fn clear(&mut self) {
        self.selected.clear();
    }

    pub fn selected(&self) -> Vec<NaiveDate> {
        self.selected.iter().copied().collect()
    }

    pub fn form_value(&self) -> String {
        self.selected
            .iter()
            .map(|date| format_date(date.year(), date.month(), date.day()))
            .collect::<Vec<_>>()
            .join(",")
    }

    pub fn selected_tags(&self) -> Vec<String> {
        self.selected
            .iter()
            .map(|date| date.format("%b %-d").to_string())
            .collect()
    }

    pub fn display(&self) -> String {
        if self.selected.is_empty() {
            return EMPTY_SELECTION.to_string();
        }
        self.selected_tags().join(", ")
    }
}

pub fn days_in_month(year: i32, month: u32) -> u32 {
    NaiveDate::from_ymd_opt(year, month, 1)
        .and_then(|first| first.checked_add_months(Months::new(1)))
        .and_then(|next| next.pred_opt())
        .map(|last| last.day())
        .unwrap_or(0)
}

pub fn format_date(year: i32, month: u32, day: u32) -> String {
    format!("{}-{:02}-{:02}", year, month, day)
}
