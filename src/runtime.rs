use std::sync::Arc;

use tracing::{error, info};

use crate::clients::scheduler_client::{SchedulerApi, SchedulerClient};
use crate::config::Settings;
use crate::service::panel_service::Panel;
use crate::tasks::panel_loop::{run_panel_loop, PanelSink, StdoutSink};
use crate::tasks::task_runner::TaskRunner;

pub fn panel_tasks(
    api: Arc<dyn SchedulerApi>,
    sink: Arc<dyn PanelSink>,
    settings: &Settings,
) -> TaskRunner {
    let mut task_runner = TaskRunner::new();
    for panel in Panel::ALL {
        let api = api.clone();
        let sink = sink.clone();
        let every = settings.poll_interval;
        task_runner.add_task(move || {
            tokio::spawn(async move {
                run_panel_loop(api, sink, panel, every).await;
            })
        });
    }
    task_runner
}

pub async fn run_watch(settings: Settings) {
    let api: Arc<dyn SchedulerApi> = Arc::new(SchedulerClient::new(
        settings.base_url.clone(),
        settings.csrf_token.clone(),
    ));
    let sink: Arc<dyn PanelSink> = Arc::new(StdoutSink);

    let handles = panel_tasks(api, sink, &settings).start_all();
    info!(base_url = %settings.base_url, loops = handles.len(), "Watching panels");

    if let Err(why) = tokio::signal::ctrl_c().await {
        error!("Failed to listen for shutdown: {:?}", why);
    }
    for handle in handles {
        handle.abort();
    }
    info!("Stopped watching panels");
}
