use serde::Serialize;
use std::fmt;
use std::str::FromStr;
use utoipa::ToSchema;

/// Whether the prepared frame has been fetched by the panel yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum DeliveryStatus {
    New,
    Delivered,
}

impl DeliveryStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            DeliveryStatus::New => "new",
            DeliveryStatus::Delivered => "delivered",
        }
    }
}

impl fmt::Display for DeliveryStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DeliveryStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "new" => Ok(DeliveryStatus::New),
            "delivered" => Ok(DeliveryStatus::Delivered),
            other => Err(format!("unknown delivery status: {other:?}")),
        }
    }
}

/// Where the photo pipeline currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineStage {
    Idle,
    Selecting,
    Downloading,
    Processing,
    Ready(DeliveryStatus),
}

impl PipelineStage {
    pub fn name(self) -> &'static str {
        match self {
            PipelineStage::Idle => "idle",
            PipelineStage::Selecting => "selecting",
            PipelineStage::Downloading => "downloading",
            PipelineStage::Processing => "processing",
            PipelineStage::Ready(_) => "ready",
        }
    }

    pub fn is_busy(self) -> bool {
        matches!(
            self,
            PipelineStage::Selecting | PipelineStage::Downloading | PipelineStage::Processing
        )
    }
}
