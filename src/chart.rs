use crate::palette::Palette;
use serde::Serialize;
use tokio::sync::watch;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Column,
    AreaSpline,
}

/// Declarative description of one chart; the page hands it to the charting library.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartConfig {
    pub kind: ChartKind,
    pub series_name: String,
    pub categories: Vec<String>,
    pub values: Vec<f64>,
    pub y_axis_title: Option<String>,
    pub label_step: u8,
    pub height: Option<u32>,
    pub palette: Palette,
    /// `{x}` and `{y}` are replaced with the hovered point.
    pub tooltip_format: Option<String>,
}

pub trait ChartRenderer: Send {
    fn render(&mut self, config: &ChartConfig);
    fn set_categories(&mut self, labels: &[String]);
    fn set_data(&mut self, values: &[f64]);
    fn destroy(&mut self);
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartView {
    /// Bumped on every full render; equal revisions can be patched in place.
    pub revision: u64,
    pub config: Option<ChartConfig>,
}

/// Renderer that publishes the current chart state to any number of readers.
pub struct PublishedChart {
    sender: watch::Sender<ChartView>,
}

impl PublishedChart {
    pub fn channel() -> (Self, watch::Receiver<ChartView>) {
        let (sender, receiver) = watch::channel(ChartView::default());
        (Self { sender }, receiver)
    }
}

impl ChartRenderer for PublishedChart {
    fn render(&mut self, config: &ChartConfig) {
        self.sender.send_modify(|view| {
            view.revision = view.revision.wrapping_add(1);
            view.config = Some(config.clone());
        });
    }

    fn set_categories(&mut self, labels: &[String]) {
        self.sender.send_if_modified(|view| match view.config.as_mut() {
            Some(config) => {
                config.categories = labels.to_vec();
                true
            }
            None => false,
        });
    }

    fn set_data(&mut self, values: &[f64]) {
        self.sender.send_if_modified(|view| match view.config.as_mut() {
            Some(config) => {
                config.values = values.to_vec();
                true
            }
            None => false,
        });
    }

    fn destroy(&mut self) {
        self.sender.send_if_modified(|view| view.config.take().is_some());
    }
}
