use serde::{Deserialize, Serialize};

/// Chart type understood by the rendering sink
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    #[default]
    Line,
}

/// Stroke pattern of a dataset line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DashStyle {
    #[default]
    Solid,
    Dashed,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    pub color: String,
    pub dash: DashStyle,
    pub width: f64,
    /// Curve smoothing, 0.0 draws straight segments
    pub tension: f64,
}

impl LineStyle {
    pub fn solid(color: &str, tension: f64) -> Self {
        Self {
            color: color.to_string(),
            dash: DashStyle::Solid,
            width: 2.0,
            tension,
        }
    }

    pub fn dashed(color: &str, tension: f64) -> Self {
        Self {
            dash: DashStyle::Dashed,
            ..Self::solid(color, tension)
        }
    }
}

/// One named line of a chart. `values` is positional against the chart labels;
/// `None` means the dataset has no point at that label.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    pub name: String,
    pub values: Vec<Option<f64>>,
    pub style: LineStyle,
}

impl Dataset {
    /// Number of labels this dataset actually has a value for
    pub fn point_count(&self) -> usize {
        self.values.iter().filter(|value| value.is_some()).count()
    }
}

/// Rendering-library-agnostic description of one chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSpec {
    pub kind: ChartKind,
    pub title: String,
    pub labels: Vec<String>,
    pub datasets: Vec<Dataset>,
    pub y_begin_at_zero: bool,
    pub max_x_ticks: Option<usize>,
}
