//! Lithium cell charge estimate from the voltage the panel reports.

use chrono::{DateTime, Duration, Utc};

/// Discharge curve, millivolts to percent, highest first.
const DISCHARGE_CURVE: [(f32, f32); 21] = [
    (4200.0, 100.0),
    (4150.0, 95.0),
    (4110.0, 90.0),
    (4080.0, 85.0),
    (4020.0, 80.0),
    (3980.0, 75.0),
    (3950.0, 70.0),
    (3910.0, 65.0),
    (3870.0, 60.0),
    (3850.0, 55.0),
    (3840.0, 50.0),
    (3820.0, 45.0),
    (3800.0, 40.0),
    (3790.0, 35.0),
    (3770.0, 30.0),
    (3750.0, 25.0),
    (3730.0, 20.0),
    (3710.0, 15.0),
    (3690.0, 10.0),
    (3610.0, 5.0),
    (3400.0, 0.0),
];

/// Readings older than this are not reported.
pub const READING_TTL_SECS: i64 = 3600;

/// Charge percentage for a cell voltage, rounded to one decimal.
pub fn battery_percentage(millivolts: f32) -> f32 {
    let (top, top_pct) = DISCHARGE_CURVE[0];
    let (bottom, bottom_pct) = DISCHARGE_CURVE[DISCHARGE_CURVE.len() - 1];
    if millivolts >= top {
        return top_pct;
    }
    if millivolts <= bottom || millivolts.is_nan() {
        return bottom_pct;
    }
    for pair in DISCHARGE_CURVE.windows(2) {
        let (v1, p1) = pair[0];
        let (v2, p2) = pair[1];
        if millivolts <= v1 && millivolts >= v2 {
            let pct = p2 + (millivolts - v2) * (p1 - p2) / (v1 - v2);
            return (pct * 10.0).round() / 10.0;
        }
    }
    bottom_pct
}

/// Last voltage reported by the panel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BatteryReading {
    pub millivolts: f32,
    pub received_at: DateTime<Utc>,
}

impl BatteryReading {
    /// Parse the `batteryCap` header value; non-positive values are ignored.
    pub fn from_header(value: &str, now: DateTime<Utc>) -> Option<Self> {
        let millivolts: f32 = value.trim().parse().ok()?;
        (millivolts.is_finite() && millivolts > 0.0).then_some(Self {
            millivolts,
            received_at: now,
        })
    }

    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now - self.received_at < Duration::seconds(READING_TTL_SECS)
    }

    pub fn percentage(&self) -> f32 {
        battery_percentage(self.millivolts)
    }
}
