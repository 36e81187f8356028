use std::collections::HashMap;
use std::env;
use std::fs;
use std::time::Duration;

use chrono_tz::Tz;

use crate::service::layout_service::{LayoutMode, LayoutSettings};
use crate::tasks::panel_loop::DEFAULT_POLL_INTERVAL;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:5000";
pub const DEFAULT_TIMEZONE: &str = "America/Los_Angeles";
pub const DEFAULT_RUN_MODE: &str = "cli";

#[derive(Debug, Default, Clone)]
pub struct AppConfig {
    values: HashMap<String, String>,
}

impl AppConfig {
    pub fn from_file(path: &str) -> Result<Self, String> {
        let content = fs::read_to_string(path).map_err(|e| e.to_string())?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> Result<Self, String> {
        let mut values = HashMap::new();
        for (idx, line) in content.lines().enumerate() {
            let trimmed = line.trim();
            if trimmed.is_empty() || trimmed.starts_with('#') {
                continue;
            }
            let trimmed = trimmed.strip_prefix("export ").unwrap_or(trimmed);
            let Some((key, value)) = trimmed.split_once('=') else {
                return Err(format!("Invalid config line {}: {}", idx + 1, line));
            };
            let key = key.trim();
            let mut value = value.trim().to_string();
            if value.len() >= 2
                && ((value.starts_with('"') && value.ends_with('"'))
                    || (value.starts_with('\'') && value.ends_with('\'')))
            {
                value = value[1..value.len() - 1].to_string();
            }
            values.insert(key.to_string(), value);
        }
        Ok(Self { values })
    }

    pub fn get(&self, key: &str) -> Option<String> {
        self.values.get(key).cloned()
    }

    pub fn lookup(&self, key: &str) -> Option<String> {
        self.get(key).or_else(|| env::var(key).ok())
    }
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub base_url: String,
    pub csrf_token: String,
    pub poll_interval: Duration,
    pub timezone: Tz,
    pub layout: LayoutSettings,
    pub run_mode: String,
}

impl Settings {
    pub fn from_config(config: &AppConfig) -> Result<Self, String> {
        Self::from_source(|key| config.lookup(key))
    }

    pub fn from_source<F: Fn(&str) -> Option<String>>(get_prop: F) -> Result<Self, String> {
        let poll_interval = match get_prop("POLL_INTERVAL_SECS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|secs| *secs > 0)
                .map(Duration::from_secs)
                .ok_or(format!("Invalid POLL_INTERVAL_SECS {}", raw))?,
            None => DEFAULT_POLL_INTERVAL,
        };

        let timezone_name = get_prop("TIMEZONE").unwrap_or(DEFAULT_TIMEZONE.to_string());
        let timezone = timezone_name
            .trim()
            .parse::<Tz>()
            .map_err(|_| format!("Unknown TIMEZONE {}", timezone_name))?;

        let mut layout = LayoutSettings::default();
        if let Some(raw) = get_prop("ROW_HEIGHT") {
            layout.row_height = raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|height| *height > 0.0)
                .ok_or(format!("Invalid ROW_HEIGHT {}", raw))?;
        }
        if let Some(raw) = get_prop("COLUMN_WIDTH") {
            layout.column_width = raw
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|width| *width > 0.0)
                .ok_or(format!("Invalid COLUMN_WIDTH {}", raw))?;
        }
        if let Some(raw) = get_prop("LAYOUT_MODE") {
            layout.mode = raw.parse::<LayoutMode>()?;
        }

        Ok(Self {
            base_url: get_prop("SCHEDULER_BASE_URL").unwrap_or(DEFAULT_BASE_URL.to_string()),
            csrf_token: get_prop("CSRF_TOKEN").unwrap_or_default(),
            poll_interval,
            timezone,
            layout,
            run_mode: get_prop("RUN_MODE").unwrap_or(DEFAULT_RUN_MODE.to_string()),
        })
    }
}
