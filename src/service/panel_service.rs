use serde::Serialize;
use tracing::error;

use crate::error::ApiError;
use crate::models::schedule::{ActiveUser, TimeOffEntry};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Panel {
    ActiveUsers,
    UpcomingTimeOff,
}

impl Panel {
    pub const ALL: [Panel; 2] = [Panel::ActiveUsers, Panel::UpcomingTimeOff];

    pub fn element_id(&self) -> &'static str {
        match self {
            Panel::ActiveUsers => "active-users",
            Panel::UpcomingTimeOff => "upcoming-time-off",
        }
    }

    pub fn empty_message(&self) -> &'static str {
        match self {
            Panel::ActiveUsers => "No active technicians",
            Panel::UpcomingTimeOff => "No upcoming time off scheduled",
        }
    }

    pub fn error_message(&self) -> &'static str {
        match self {
            Panel::ActiveUsers => "Error loading active users",
            Panel::UpcomingTimeOff => "Error loading time off entries",
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum PanelData {
    ActiveUsers(Vec<ActiveUser>),
    UpcomingTimeOff(Vec<TimeOffEntry>),
}

impl PanelData {
    pub fn is_empty(&self) -> bool {
        match self {
            PanelData::ActiveUsers(users) => users.is_empty(),
            PanelData::UpcomingTimeOff(entries) => entries.is_empty(),
        }
    }
}

#[derive(Serialize)]
struct ActiveUsersContext<'a> {
    users: &'a [ActiveUser],
}

#[derive(Serialize)]
struct TimeOffRow<'a> {
    username: &'a str,
    start_date: &'a str,
    end_date: &'a str,
    duration: &'a str,
    has_description: bool,
    description: &'a str,
}

#[derive(Serialize)]
struct TimeOffContext<'a> {
    entries: Vec<TimeOffRow<'a>>,
}

pub struct PanelService;

impl PanelService {
    pub fn render(panel: Panel, result: &Result<PanelData, ApiError>) -> String {
        match result {
            Ok(data) if data.is_empty() => muted(panel.empty_message()),
            Ok(data) => Self::render_entries(data).unwrap_or_else(|err| {
                error!(panel = panel.element_id(), "Failed to render panel: {}", err);
                danger(panel.error_message())
            }),
            Err(err) => {
                error!(panel = panel.element_id(), "Error fetching panel data: {}", err);
                danger(panel.error_message())
            }
        }
    }

    pub fn render_entries(data: &PanelData) -> Result<String, mustache::Error> {
        match data {
            PanelData::ActiveUsers(users) => {
                let template =
                    mustache::compile_str(include_str!("../templates/active_users.html.mustache"))?;
                template.render_to_string(&ActiveUsersContext { users })
            }
            PanelData::UpcomingTimeOff(entries) => {
                let rows = entries
                    .iter()
                    .map(|entry| {
                        let description = entry.description.as_deref().unwrap_or("");
                        TimeOffRow {
                            username: &entry.username,
                            start_date: &entry.start_date,
                            end_date: &entry.end_date,
                            duration: &entry.duration,
                            has_description: !description.is_empty(),
                            description,
                        }
                    })
                    .collect();
                let template = mustache::compile_str(include_str!(
                    "../templates/upcoming_time_off.html.mustache"
                ))?;
                template.render_to_string(&TimeOffContext { entries: rows })
            }
        }
    }
}

fn muted(message: &str) -> String {
    format!("<p class=\"text-muted\">{}</p>", message)
}

fn danger(message: &str) -> String {
    format!("<p class=\"text-danger\">{}</p>", message)
}
