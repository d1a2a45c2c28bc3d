//! Last battery voltage reported by the panel.

use chrono::{DateTime, Utc};
use tokio::sync::RwLock;

use crate::models::BatteryReading;

#[derive(Default)]
pub struct BatteryMonitor {
    last: RwLock<Option<BatteryReading>>,
}

impl BatteryMonitor {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the raw `batteryCap` header value. Unparseable values are ignored.
    pub async fn record(&self, header: &str, now: DateTime<Utc>) {
        match BatteryReading::from_header(header, now) {
            Some(reading) => {
                tracing::debug!(millivolts = reading.millivolts, "Battery reading");
                *self.last.write().await = Some(reading);
            }
            None => tracing::warn!(value = %header, "Ignoring invalid battery header"),
        }
    }

    /// The last reading if it has not expired.
    pub async fn current(&self, now: DateTime<Utc>) -> Option<BatteryReading> {
        let last = *self.last.read().await;
        last.filter(|r| r.is_fresh(now))
    }
}
