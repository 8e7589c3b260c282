use crate::chart::ChartView;
use crate::controller::DashboardView;
use serde::{Deserialize, Serialize};

/// Device that stays on no matter what the user asks.
pub const PROTECTED_DEVICE_ID: &str = "fridge";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Period {
    #[default]
    Week,
    Month,
}

impl Period {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "week" => Some(Self::Week),
            "month" => Some(Self::Month),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Week => "week",
            Self::Month => "month",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "dark" => Some(Self::Dark),
            "light" => Some(Self::Light),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Dark => "dark",
            Self::Light => "light",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        }
    }

    /// Glyph on the toggle button; it shows the theme you would switch to.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Dark => "☀️",
            Self::Light => "🌙",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Default)]
pub struct DisplayMode {
    pub period: Period,
    pub theme: Theme,
}

/// Category-labelled usage numbers for one period, plus the previous period's total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UsageSeries {
    labels: Vec<String>,
    values: Vec<f64>,
    total: f64,
    prior_total: f64,
}

impl UsageSeries {
    /// Returns `None` when labels and values are not index-aligned.
    pub fn new(labels: Vec<String>, values: Vec<f64>, prior_total: f64) -> Option<Self> {
        if labels.len() != values.len() {
            return None;
        }
        Some(Self::seeded(labels, values, prior_total))
    }

    fn seeded(labels: Vec<String>, values: Vec<f64>, prior_total: f64) -> Self {
        let total = values.iter().sum();
        Self {
            labels,
            values,
            total,
            prior_total,
        }
    }

    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    pub fn values(&self) -> &[f64] {
        &self.values
    }

    pub fn total(&self) -> f64 {
        self.total
    }

    pub fn prior_total(&self) -> f64 {
        self.prior_total
    }

    /// Applies `f` to the most recent data point and re-derives the total.
    /// Returns false for an empty series.
    pub fn update_last(&mut self, f: impl FnOnce(f64) -> f64) -> bool {
        let Some(last) = self.values.last_mut() else {
            return false;
        };
        *last = f(*last);
        self.total = self.values.iter().sum();
        true
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlySeries([f64; 24]);

impl HourlySeries {
    pub fn new(values: [f64; 24]) -> Self {
        Self(values.map(|value| value.max(0.0)))
    }

    pub fn values(&self) -> &[f64] {
        &self.0
    }

    pub fn categories() -> Vec<String> {
        (0..24).map(|hour| format!("{hour}:00")).collect()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Device {
    pub id: String,
    pub name: String,
    pub icon: String,
    pub on: bool,
    pub consumption_kwh: f64,
}

impl Device {
    pub fn new(id: &str, name: &str, icon: &str, on: bool, consumption_kwh: f64) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            icon: icon.to_string(),
            on,
            consumption_kwh: consumption_kwh.max(0.0),
        }
    }

    pub fn is_protected(&self) -> bool {
        self.id == PROTECTED_DEVICE_ID
    }
}

/// Everything the dashboard displays. Devices keep their registry order.
#[derive(Debug, Clone, PartialEq)]
pub struct Dataset {
    pub week: UsageSeries,
    pub month: UsageSeries,
    pub hourly: HourlySeries,
    pub devices: Vec<Device>,
}

impl Dataset {
    pub fn series(&self, period: Period) -> &UsageSeries {
        match period {
            Period::Week => &self.week,
            Period::Month => &self.month,
        }
    }

    pub fn series_mut(&mut self, period: Period) -> &mut UsageSeries {
        match period {
            Period::Week => &mut self.week,
            Period::Month => &mut self.month,
        }
    }

    pub fn device(&self, id: &str) -> Option<&Device> {
        self.devices.iter().find(|device| device.id == id)
    }

    pub fn device_mut(&mut self, id: &str) -> Option<&mut Device> {
        self.devices.iter_mut().find(|device| device.id == id)
    }
}

impl Default for Dataset {
    fn default() -> Self {
        let labels = |items: &[&str]| -> Vec<String> {
            items.iter().map(|item| item.to_string()).collect()
        };
        Self {
            week: UsageSeries::seeded(
                labels(&["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"]),
                vec![28.5, 32.1, 25.8, 29.7, 31.2, 35.6, 27.3],
                195.8,
            ),
            month: UsageSeries::seeded(
                labels(&["Week 1", "Week 2", "Week 3", "Week 4"]),
                vec![210.2, 195.8, 218.4, 223.1],
                789.3,
            ),
            hourly: HourlySeries::new([
                0.8, 0.6, 0.5, 0.4, 0.5, 0.7, 1.2, 1.8, 2.1, 2.3, 2.5, 2.7, 2.9, 3.2, 3.0, 2.8,
                2.9, 3.1, 2.7, 2.3, 2.0, 1.7, 1.3, 1.0,
            ]),
            devices: vec![
                Device::new("aircon", "Air conditioner", "❄️", true, 12.4),
                Device::new("light", "Lighting", "💡", true, 3.2),
                Device::new("tv", "TV", "📺", false, 1.8),
                Device::new(PROTECTED_DEVICE_ID, "Fridge", "🧊", true, 6.8),
            ],
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct PeriodRequest {
    pub period: String,
}

#[derive(Debug, Serialize)]
pub struct ChartsSnapshot {
    pub usage: ChartView,
    pub hourly: ChartView,
}

#[derive(Debug, Serialize)]
pub struct DashboardSnapshot {
    #[serde(flatten)]
    pub view: DashboardView,
    pub charts: ChartsSnapshot,
    pub simulation_running: bool,
    pub generated_at: String,
}
