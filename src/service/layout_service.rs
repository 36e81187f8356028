use std::collections::BTreeSet;
use std::str::FromStr;

use chrono::NaiveDate;
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::overlap::{group_overlapping, sort_by_start, OverlapGroup};
use crate::models::event::CalendarEvent;
use crate::models::schedule::{CalendarData, CalendarDay};

pub const DEFAULT_ROW_HEIGHT: f64 = 60.0;
const GUTTER_PX: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutMode {
    #[default]
    Even,
    Staggered,
}

impl FromStr for LayoutMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "even" => Ok(LayoutMode::Even),
            "staggered" => Ok(LayoutMode::Staggered),
            other => Err(format!("Unknown layout mode {}", other)),
        }
    }
}

pub trait LabelMeasure {
    fn measure(&self, label: &str) -> f64;
}

#[derive(Debug, Clone, Copy)]
pub struct FixedAdvance {
    pub char_width: f64,
    pub padding: f64,
}

impl Default for FixedAdvance {
    fn default() -> Self {
        Self {
            char_width: 7.0,
            padding: 8.0,
        }
    }
}

impl LabelMeasure for FixedAdvance {
    fn measure(&self, label: &str) -> f64 {
        label.chars().count() as f64 * self.char_width + self.padding
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutSettings {
    pub row_height: f64,
    pub column_width: f64,
    pub mode: LayoutMode,
    pub cascade_step: f64,
    pub min_width: f64,
    pub max_width: f64,
}

impl Default for LayoutSettings {
    fn default() -> Self {
        Self {
            row_height: DEFAULT_ROW_HEIGHT,
            column_width: 160.0,
            mode: LayoutMode::Even,
            cascade_step: 0.15,
            min_width: 0.35,
            max_width: 0.85,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Placement {
    pub group: usize,
    pub slot: usize,
    pub top: f64,
    pub height: f64,
    pub left: f64,
    pub width: f64,
}

impl Placement {
    pub fn style(&self) -> String {
        format!(
            "top: {}px; height: {}px; left: calc({}% + {}px); width: calc({}% - {}px); box-sizing: border-box;",
            format_number(self.top),
            format_number(self.height),
            format_number(self.left * 100.0),
            format_number(GUTTER_PX),
            format_number(self.width * 100.0),
            format_number(GUTTER_PX * 2.0),
        )
    }
}

#[derive(Debug, Clone, Default)]
pub struct DayLayout {
    /// Events sorted by start; `placements[i]` belongs to `events[i]`.
    pub events: Vec<CalendarEvent>,
    pub groups: Vec<OverlapGroup>,
    pub placements: Vec<Placement>,
}

impl DayLayout {
    pub fn placement_for(&self, id: i64) -> Option<&Placement> {
        self.events
            .iter()
            .position(|event| event.id == Some(id))
            .map(|index| &self.placements[index])
    }
}

#[derive(Debug, Clone)]
pub struct DayColumn {
    pub date: NaiveDate,
    pub label: Option<String>,
    pub is_today: bool,
    pub layout: DayLayout,
}

pub struct LayoutService;

impl LayoutService {
    pub fn layout_day<M: LabelMeasure + ?Sized>(
        events: &[CalendarEvent],
        settings: &LayoutSettings,
        measure: &M,
    ) -> DayLayout {
        let events = sort_by_start(events);
        let groups = group_overlapping(&events);

        let mut placements: Vec<Option<Placement>> = vec![None; events.len()];
        for (group_index, group) in groups.iter().enumerate() {
            let columns = horizontal_slots(group, &events, settings, measure);
            for (slot, (&member, (left, width))) in
                group.members.iter().zip(columns).enumerate()
            {
                let (top, height) = vertical_span(&events[member], settings.row_height);
                placements[member] = Some(Placement {
                    group: group_index,
                    slot,
                    top,
                    height,
                    left,
                    width,
                });
            }
        }

        DayLayout {
            events,
            groups,
            placements: placements.into_iter().flatten().collect(),
        }
    }

    /// One column per listed day. When the response lists no days, every
    /// date an event covers gets a column.
    pub fn layout_week<M: LabelMeasure + ?Sized>(
        data: &CalendarData,
        tz: Tz,
        settings: &LayoutSettings,
        measure: &M,
    ) -> Vec<DayColumn> {
        let events: Vec<CalendarEvent> = data
            .schedules
            .iter()
            .filter_map(|entry| {
                let event = entry.to_event(tz);
                if event.is_none() {
                    warn!(schedule_id = entry.id, "Skipping schedule with unreadable time");
                }
                event
            })
            .collect();

        let days: Vec<CalendarDay> = if data.days.is_empty() {
            events
                .iter()
                .flat_map(|event| {
                    let last = event.last_date();
                    event.start.date().iter_days().take_while(move |date| *date <= last)
                })
                .collect::<BTreeSet<_>>()
                .into_iter()
                .map(|date| CalendarDay {
                    date,
                    label: None,
                    is_today: false,
                })
                .collect()
        } else {
            data.days.clone()
        };

        days.into_iter()
            .map(|day| {
                let day_events: Vec<CalendarEvent> = events
                    .iter()
                    .filter_map(|event| {
                        if event.start.date() == day.date {
                            Some(event.clone())
                        } else {
                            event.continuation_on(day.date)
                        }
                    })
                    .collect();
                debug!(date = %day.date, events = day_events.len(), "Laying out day column");
                DayColumn {
                    date: day.date,
                    label: day.label,
                    is_today: day.is_today,
                    layout: Self::layout_day(&day_events, settings, measure),
                }
            })
            .collect()
    }
}

fn vertical_span(event: &CalendarEvent, row_height: f64) -> (f64, f64) {
    let start = event.start_hour();
    let top = start * row_height;
    let height = (event.normalized_end_hour() - start) * row_height;
    (top, height)
}

fn horizontal_slots<M: LabelMeasure + ?Sized>(
    group: &OverlapGroup,
    events: &[CalendarEvent],
    settings: &LayoutSettings,
    measure: &M,
) -> Vec<(f64, f64)> {
    let count = group.len();
    if count <= 1 {
        return vec![(0.0, 1.0); count];
    }

    let shared_start = group
        .members
        .windows(2)
        .all(|pair| events[pair[0]].start == events[pair[1]].start);

    if settings.mode == LayoutMode::Even || shared_start {
        let width = 1.0 / count as f64;
        return (0..count).map(|slot| (slot as f64 * width, width)).collect();
    }

    let widths: Vec<f64> = group
        .members
        .iter()
        .map(|&member| {
            let measured = measure.measure(&events[member].label()) / settings.column_width;
            measured.clamp(settings.min_width, settings.max_width)
        })
        .collect();

    // Largest step that keeps every box inside the column.
    let step = widths
        .iter()
        .enumerate()
        .skip(1)
        .map(|(slot, width)| (1.0 - width).max(0.0) / slot as f64)
        .fold(settings.cascade_step, f64::min);

    widths
        .into_iter()
        .enumerate()
        .map(|(slot, width)| (slot as f64 * step, width))
        .collect()
}

fn format_number(value: f64) -> String {
    let text = format!("{:.3}", value);
    let text = text.trim_end_matches('0').trim_end_matches('.');
    if text.is_empty() || text == "-0" {
        "0".to_string()
    } else {
        text.to_string()
    }
}
