use crate::models::{Device, UsageSeries};
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
}

impl Trend {
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Up => "📈",
            Self::Down => "📉",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsageSummary {
    pub total: f64,
    pub prior_total: f64,
    pub total_text: String,
    pub prior_total_text: String,
    /// Absent when the prior total is zero.
    pub change_percent: Option<f64>,
    pub trend: Trend,
    pub glyph: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RankedDevice {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub consumption_kwh: f64,
    pub percentage: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeviceStatus {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub on: bool,
    pub status: &'static str,
}

pub fn summarize(series: &UsageSeries) -> UsageSummary {
    let total = series.total();
    let prior_total = series.prior_total();
    let change_percent = percent_change(total, prior_total);
    let trend = match change_percent {
        Some(change) if change < 0.0 => Trend::Down,
        _ => Trend::Up,
    };

    UsageSummary {
        total,
        prior_total,
        total_text: format_one_decimal(total),
        prior_total_text: format_one_decimal(prior_total),
        change_percent,
        trend,
        glyph: trend.glyph(),
    }
}

/// Change against the prior total in percent, rounded to one decimal.
pub fn percent_change(total: f64, prior_total: f64) -> Option<f64> {
    if prior_total == 0.0 || !prior_total.is_finite() {
        return None;
    }
    Some(round_one_decimal((total - prior_total) / prior_total * 100.0))
}

/// Switched-on devices, heaviest first, each scaled against the heaviest.
pub fn rank_devices(devices: &[Device]) -> Vec<RankedDevice> {
    let mut active: Vec<&Device> = devices.iter().filter(|device| device.on).collect();
    // sort_by is stable, equal consumption keeps registry order
    active.sort_by(|a, b| b.consumption_kwh.total_cmp(&a.consumption_kwh));

    let Some(max) = active.first().map(|device| device.consumption_kwh) else {
        return Vec::new();
    };

    active
        .into_iter()
        .map(|device| {
            let percentage = if max > 0.0 {
                (device.consumption_kwh / max * 100.0).round().clamp(0.0, 100.0) as u8
            } else {
                0
            };
            RankedDevice {
                id: device.id.clone(),
                name: device.name.clone(),
                icon: device.icon.clone(),
                consumption_kwh: device.consumption_kwh,
                percentage,
            }
        })
        .collect()
}

pub fn device_status(device: &Device) -> DeviceStatus {
    DeviceStatus {
        id: device.id.clone(),
        name: device.name.clone(),
        icon: device.icon.clone(),
        on: device.on,
        status: if device.on { "On" } else { "Off" },
    }
}

pub fn format_one_decimal(value: f64) -> String {
    format!("{:.1}", round_one_decimal(value))
}

fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
