use crate::chart::{ChartConfig, ChartKind, ChartRenderer};
use crate::models::{Dataset, DisplayMode, HourlySeries, Period, Theme};
use crate::palette::palette_for;
use crate::storage::{PreferenceStore, THEME_KEY};
use crate::views::{
    device_status, rank_devices, summarize, DeviceStatus, RankedDevice, UsageSummary,
};
use rand::Rng;
use serde::Serialize;
use tracing::{debug, info, warn};

const DEVICE_DRIFT_KWH: f64 = 0.1;
const MIN_DEVICE_CONSUMPTION_KWH: f64 = 0.1;
const SERIES_DRIFT_PROBABILITY: f64 = 0.3;
const SERIES_DRIFT_KWH: f64 = 1.0;

/// What the page shows outside the charts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub theme: Theme,
    pub theme_icon: &'static str,
    pub period: Period,
    pub summary: Option<UsageSummary>,
    pub devices: Vec<DeviceStatus>,
    pub ranking: Vec<RankedDevice>,
}

pub struct ChartRenderers {
    pub usage: Box<dyn ChartRenderer>,
    pub hourly: Box<dyn ChartRenderer>,
}

struct ChartHandle {
    renderer: Box<dyn ChartRenderer>,
    mounted: bool,
}

impl ChartHandle {
    fn new(renderer: Box<dyn ChartRenderer>) -> Self {
        Self {
            renderer,
            mounted: false,
        }
    }

    fn mount(&mut self, config: &ChartConfig) {
        self.renderer.render(config);
        self.mounted = true;
    }

    fn unmount(&mut self) {
        if self.mounted {
            self.renderer.destroy();
            self.mounted = false;
        }
    }
}

pub struct DashboardController {
    data: Dataset,
    mode: DisplayMode,
    usage_chart: ChartHandle,
    hourly_chart: ChartHandle,
    prefs: Box<dyn PreferenceStore>,
    view: DashboardView,
}

impl DashboardController {
    pub fn new(data: Dataset, prefs: Box<dyn PreferenceStore>, charts: ChartRenderers) -> Self {
        let mode = DisplayMode::default();
        Self {
            data,
            mode,
            usage_chart: ChartHandle::new(charts.usage),
            hourly_chart: ChartHandle::new(charts.hourly),
            prefs,
            view: DashboardView {
                theme: mode.theme,
                theme_icon: mode.theme.icon(),
                period: mode.period,
                summary: None,
                devices: Vec::new(),
                ranking: Vec::new(),
            },
        }
    }

    pub fn view(&self) -> &DashboardView {
        &self.view
    }

    pub fn mode(&self) -> DisplayMode {
        self.mode
    }

    pub fn dataset(&self) -> &Dataset {
        &self.data
    }

    pub fn initialize(&mut self) {
        let theme = self
            .prefs
            .get(THEME_KEY)
            .and_then(|value| Theme::parse(&value))
            .unwrap_or_default();
        self.apply_theme(theme);

        self.render_charts();
        self.refresh_summary();
        self.refresh_devices();
        info!(
            theme = theme.as_str(),
            period = self.mode.period.as_str(),
            "dashboard initialized"
        );
    }

    /// Unknown period names leave everything untouched.
    pub fn switch_period(&mut self, period: &str) {
        let Some(period) = Period::parse(period) else {
            debug!(period, "ignoring unknown period");
            return;
        };
        self.mode.period = period;
        self.view.period = period;

        if self.usage_chart.mounted {
            let series = self.data.series(period);
            self.usage_chart.renderer.set_categories(series.labels());
            self.usage_chart.renderer.set_data(series.values());
        }
        self.refresh_summary();
    }

    pub fn toggle_theme(&mut self) {
        self.apply_theme(self.mode.theme.toggled());
    }

    /// Unknown ids and the protected device are ignored.
    pub fn toggle_device(&mut self, device_id: &str) {
        let Some(device) = self.data.device_mut(device_id) else {
            debug!(device_id, "ignoring unknown device");
            return;
        };
        if device.is_protected() {
            debug!(device_id, "device cannot be switched off");
            return;
        }
        device.on = !device.on;
        debug!(device_id, on = device.on, "device toggled");
        self.refresh_devices();
    }

    /// One step of simulated live data.
    pub fn simulated_tick<R: Rng>(&mut self, rng: &mut R) {
        for device in self.data.devices.iter_mut().filter(|device| device.on) {
            let drift = rng.gen_range(-DEVICE_DRIFT_KWH..DEVICE_DRIFT_KWH);
            device.consumption_kwh =
                (device.consumption_kwh + drift).max(MIN_DEVICE_CONSUMPTION_KWH);
        }
        self.refresh_devices();

        if !rng.gen_bool(SERIES_DRIFT_PROBABILITY) {
            return;
        }
        let drift = rng.gen_range(-SERIES_DRIFT_KWH..SERIES_DRIFT_KWH);
        let series = self.data.series_mut(self.mode.period);
        if !series.update_last(|value| (value + drift).max(0.0)) {
            return;
        }
        if self.usage_chart.mounted {
            self.usage_chart.renderer.set_data(series.values());
        }
        debug!(period = self.mode.period.as_str(), total = series.total(), "usage drifted");
        self.refresh_summary();
    }

    fn apply_theme(&mut self, theme: Theme) {
        self.mode.theme = theme;
        self.view.theme = theme;
        self.view.theme_icon = theme.icon();

        if let Err(err) = self.prefs.set(THEME_KEY, theme.as_str()) {
            warn!("failed to persist theme: {err}");
        }

        if self.usage_chart.mounted || self.hourly_chart.mounted {
            self.usage_chart.unmount();
            self.hourly_chart.unmount();
            self.render_charts();
        }
    }

    fn render_charts(&mut self) {
        let usage = self.usage_chart_config();
        let hourly = self.hourly_chart_config();
        self.usage_chart.mount(&usage);
        self.hourly_chart.mount(&hourly);
    }

    fn refresh_summary(&mut self) {
        self.view.summary = Some(summarize(self.data.series(self.mode.period)));
    }

    fn refresh_devices(&mut self) {
        self.view.devices = self.data.devices.iter().map(device_status).collect();
        self.view.ranking = rank_devices(&self.data.devices);
    }

    fn usage_chart_config(&self) -> ChartConfig {
        let series = self.data.series(self.mode.period);
        ChartConfig {
            kind: ChartKind::Column,
            series_name: "Usage".to_string(),
            categories: series.labels().to_vec(),
            values: series.values().to_vec(),
            y_axis_title: Some("Usage (kWh)".to_string()),
            label_step: 1,
            height: None,
            palette: palette_for(self.mode.theme),
            tooltip_format: None,
        }
    }

    fn hourly_chart_config(&self) -> ChartConfig {
        ChartConfig {
            kind: ChartKind::AreaSpline,
            series_name: "Usage".to_string(),
            categories: HourlySeries::categories(),
            values: self.data.hourly.values().to_vec(),
            y_axis_title: None,
            label_step: 4,
            height: Some(200),
            palette: palette_for(self.mode.theme),
            tooltip_format: Some("<b>{x}</b><br/>Usage: {y} kW".to_string()),
        }
    }
}
