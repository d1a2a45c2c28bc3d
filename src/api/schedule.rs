use axum::{extract::State, response::Json};
use chrono::Local;
use std::sync::Arc;

use crate::services::{plan_sleep, ConfigStore, SleepPlan};

/// When the panel should wake up next
///
/// Next multiple of the wakeup interval, moved to the end of the sleep
/// window when it falls inside it.
#[utoipa::path(
    get,
    path = "/sleep",
    responses(
        (status = 200, description = "Sleep plan", body = SleepPlan),
    ),
    tag = "Schedule"
)]
pub async fn handle_sleep(State(config): State<Arc<ConfigStore>>) -> Json<SleepPlan> {
    let config = config.snapshot().await;
    let settings = &config.immich;
    let window = settings.sleep_window();
    let plan = plan_sleep(
        Local::now().naive_local(),
        settings.wakeup_interval,
        Some(&window),
    );
    tracing::info!(
        next_wakeup = %plan.next_wakeup,
        sleep_ms = plan.sleep_duration,
        "Sleep plan"
    );
    Json(plan)
}
