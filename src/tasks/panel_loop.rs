use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, error, info, warn};

use crate::clients::scheduler_client::SchedulerApi;
use crate::error::ApiError;
use crate::service::panel_service::{Panel, PanelData, PanelService};

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(60);

/// Where rendered panel markup goes. A panel that is not mounted is skipped.
#[async_trait]
pub trait PanelSink: Send + Sync {
    fn is_mounted(&self, panel: Panel) -> bool;
    async fn replace(&self, panel: Panel, html: String) -> Result<(), String>;
}

pub struct StdoutSink;

#[async_trait]
impl PanelSink for StdoutSink {
    fn is_mounted(&self, _panel: Panel) -> bool {
        true
    }

    async fn replace(&self, panel: Panel, html: String) -> Result<(), String> {
        println!("#{}\n{}", panel.element_id(), html.trim());
        Ok(())
    }
}

pub async fn fetch_panel<A: SchedulerApi + ?Sized>(
    api: &A,
    panel: Panel,
) -> Result<PanelData, ApiError> {
    match panel {
        Panel::ActiveUsers => api.active_users().await.map(PanelData::ActiveUsers),
        Panel::UpcomingTimeOff => api
            .upcoming_time_off()
            .await
            .map(PanelData::UpcomingTimeOff),
    }
}

pub async fn panel_tick<A: SchedulerApi + ?Sized, S: PanelSink + ?Sized>(
    api: &A,
    sink: &S,
    panel: Panel,
) -> Result<bool, String> {
    if !sink.is_mounted(panel) {
        debug!(panel = panel.element_id(), "Panel not mounted, skipping refresh");
        return Ok(false);
    }

    let result = fetch_panel(api, panel).await;
    if let Err(ApiError::Unauthorized { login_url }) = &result {
        warn!(%login_url, "Not logged in, open the login page to continue");
    }
    let html = PanelService::render(panel, &result);
    sink.replace(panel, html).await?;
    Ok(true)
}

/// Refreshes immediately, then every `every`. Failures wait for the next tick.
pub async fn run_panel_loop(
    api: Arc<dyn SchedulerApi>,
    sink: Arc<dyn PanelSink>,
    panel: Panel,
    every: Duration,
) {
    info!(panel = panel.element_id(), seconds = every.as_secs(), "Starting panel refresh");
    let mut ticker = interval(every);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    loop {
        ticker.tick().await;
        if let Err(err) = panel_tick(api.as_ref(), sink.as_ref(), panel).await {
            error!(panel = panel.element_id(), "Failed to update panel: {}", err);
        }
    }
}
