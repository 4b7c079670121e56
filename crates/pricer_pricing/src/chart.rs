//! Early-exercise boundary chart.
//!
//! Builds a Chart.js compatible line chart of `S*(t)` from a
//! [`PriceResult`]. Nothing is drawn or written here; callers serialise the
//! chart to JSON for a browser front-end or render it as a text table.
//!
//! With `reverse_time` the x values are time to maturity `T - t_i` and the
//! axis is flagged reversed, so the curve still runs from inception on the
//! left to expiry on the right.

use std::fmt::Write as _;

use tracing::info;

use crate::lattice::PriceResult;

/// X-axis label with time running forward.
pub const TIME_AXIS_LABEL: &str = "Time (years)";
/// X-axis label with reversed time.
pub const TIME_TO_MATURITY_AXIS_LABEL: &str = "Time to Maturity (years)";
/// Y-axis label.
pub const BOUNDARY_AXIS_LABEL: &str = "S* (early-ex threshold)";

/// Caller choices for [`BoundaryChart::from_result`].
#[derive(Clone, Debug, PartialEq)]
pub struct ChartOptions {
    /// Overrides the default `"Early-Exercise Boundary ({style} {kind})"`.
    pub title: Option<String>,
    /// Plot against time to maturity on a reversed axis.
    pub reverse_time: bool,
}

impl Default for ChartOptions {
    fn default() -> Self {
        Self {
            title: None,
            reverse_time: true,
        }
    }
}

impl ChartOptions {
    /// Options with a custom title.
    pub fn with_title(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Self::default()
        }
    }

    /// Sets `reverse_time`.
    pub fn reverse_time(mut self, reverse_time: bool) -> Self {
        self.reverse_time = reverse_time;
        self
    }
}

/// Single `(x, y)` point.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChartPoint {
    /// Time coordinate in years.
    pub x: f64,
    /// Critical spot.
    pub y: f64,
}

/// Chart.js dataset.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "camelCase"))]
pub struct ChartDataset {
    /// Legend label.
    pub label: String,
    /// Points in increasing step order.
    pub data: Vec<ChartPoint>,
    /// Marker radius; non-zero so each step is visible.
    pub point_radius: u32,
    /// Draw straight segments between points.
    pub show_line: bool,
}

/// Chart.js `data` block.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChartData {
    /// Datasets; the boundary chart has exactly one.
    pub datasets: Vec<ChartDataset>,
}

/// Text element with a visibility flag.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChartTitle {
    /// Show the text.
    pub display: bool,
    /// Text.
    pub text: String,
}

/// Chart.js axis.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChartAxis {
    /// Scale type, always `"linear"`.
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub scale_type: String,
    /// Values decrease left to right.
    pub reverse: bool,
    /// Axis title.
    pub title: ChartTitle,
}

/// Chart.js `options.scales` block.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChartScales {
    /// Time axis.
    pub x: ChartAxis,
    /// Boundary axis.
    pub y: ChartAxis,
}

/// Chart.js `options.plugins` block.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChartPlugins {
    /// Chart title.
    pub title: ChartTitle,
}

/// Chart.js `options` block.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ChartLayout {
    /// Axes.
    pub scales: ChartScales,
    /// Title plugin.
    pub plugins: ChartPlugins,
}

/// Early-exercise boundary as a Chart.js line chart.
///
/// # Examples
///
/// ```rust
/// use pricer_pricing::chart::{BoundaryChart, ChartOptions};
/// use pricer_pricing::lattice::crr_price;
/// use pricer_models::instruments::{ExerciseStyle, PayoffType};
///
/// let result = crr_price(
///     100.0, 100.0, 0.03, 0.0, 0.2, 1.0, 100,
///     PayoffType::Put, ExerciseStyle::American,
/// ).unwrap();
///
/// let chart = BoundaryChart::from_result(&result, &ChartOptions::default()).unwrap();
/// assert_eq!(chart.title(), "Early-Exercise Boundary (american put)");
/// assert!(chart.options.scales.x.reverse);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoundaryChart {
    /// Chart type, always `"line"`.
    #[cfg_attr(feature = "serde", serde(rename = "type"))]
    pub chart_type: String,
    /// Data block.
    pub data: ChartData,
    /// Options block.
    pub options: ChartLayout,
}

impl BoundaryChart {
    /// Builds the chart, or returns `None` when the result has no early
    /// exercise boundary.
    pub fn from_result(result: &PriceResult, options: &ChartOptions) -> Option<Self> {
        let boundary = result.boundary();
        if boundary.is_empty() {
            info!("No early exercise boundary.");
            return None;
        }

        let params = result.params();
        let maturity = params.maturity();
        let data = boundary
            .points(result.factors().dt)
            .into_iter()
            .map(|(t, s)| ChartPoint {
                x: if options.reverse_time { maturity - t } else { t },
                y: s,
            })
            .collect();

        let title = options.title.clone().unwrap_or_else(|| {
            format!(
                "Early-Exercise Boundary ({} {})",
                params.exercise(),
                params.payoff()
            )
        });
        let x_label = if options.reverse_time {
            TIME_TO_MATURITY_AXIS_LABEL
        } else {
            TIME_AXIS_LABEL
        };

        Some(Self {
            chart_type: "line".to_string(),
            data: ChartData {
                datasets: vec![ChartDataset {
                    label: "S*".to_string(),
                    data,
                    point_radius: 3,
                    show_line: true,
                }],
            },
            options: ChartLayout {
                scales: ChartScales {
                    x: linear_axis(x_label, options.reverse_time),
                    y: linear_axis(BOUNDARY_AXIS_LABEL, false),
                },
                plugins: ChartPlugins {
                    title: ChartTitle {
                        display: true,
                        text: title,
                    },
                },
            },
        })
    }

    /// Chart title.
    pub fn title(&self) -> &str {
        &self.options.plugins.title.text
    }

    /// Plotted points in step order.
    pub fn points(&self) -> &[ChartPoint] {
        self.data
            .datasets
            .first()
            .map(|d| d.data.as_slice())
            .unwrap_or(&[])
    }

    /// Plain-text table of the boundary for terminal output.
    pub fn render_table(&self) -> String {
        let x_label = &self.options.scales.x.title.text;
        let y_label = &self.options.scales.y.title.text;
        let width = x_label.len().max(12);

        let mut out = String::new();
        let _ = writeln!(out, "{}", self.title());
        let _ = writeln!(out, "{:>width$}  {}", x_label, y_label);
        let _ = writeln!(out, "{}", "-".repeat(width + 2 + y_label.len()));
        for p in self.points() {
            let _ = writeln!(out, "{:>width$.4}  {:.4}", p.x, p.y);
        }
        out
    }

    /// Pretty-printed Chart.js JSON.
    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }
}

fn linear_axis(label: &str, reverse: bool) -> ChartAxis {
    ChartAxis {
        scale_type: "linear".to_string(),
        reverse,
        title: ChartTitle {
            display: true,
            text: label.to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::crr_price;
    use approx::assert_relative_eq;
    use pricer_models::instruments::{ExerciseStyle, PayoffType};

    fn result(payoff: PayoffType, exercise: ExerciseStyle) -> PriceResult {
        crr_price(100.0, 100.0, 0.03, 0.0, 0.2, 1.0, 100, payoff, exercise).unwrap()
    }

    // =========================================================================
    // Construction
    // =========================================================================

    #[test]
    fn test_empty_boundary_gives_none() {
        let european = result(PayoffType::Put, ExerciseStyle::European);
        assert!(BoundaryChart::from_result(&european, &ChartOptions::default()).is_none());

        let call = result(PayoffType::Call, ExerciseStyle::American);
        assert!(BoundaryChart::from_result(&call, &ChartOptions::default()).is_none());
    }

    #[test]
    fn test_forward_time_points_follow_boundary() {
        let res = result(PayoffType::Put, ExerciseStyle::American);
        let chart =
            BoundaryChart::from_result(&res, &ChartOptions::default().reverse_time(false)).unwrap();

        let expected = res.boundary().points(res.factors().dt);
        assert_eq!(chart.points().len(), expected.len());
        for (p, (t, s)) in chart.points().iter().zip(expected) {
            assert_relative_eq!(p.x, t, epsilon = 1e-15);
            assert_eq!(p.y, s);
        }
        assert!(!chart.options.scales.x.reverse);
        assert_eq!(chart.options.scales.x.title.text, TIME_AXIS_LABEL);
    }

    #[test]
    fn test_reverse_time_uses_time_to_maturity() {
        let res = result(PayoffType::Put, ExerciseStyle::American);
        let forward =
            BoundaryChart::from_result(&res, &ChartOptions::default().reverse_time(false)).unwrap();
        let reversed = BoundaryChart::from_result(&res, &ChartOptions::default()).unwrap();

        assert!(reversed.options.scales.x.reverse);
        assert_eq!(
            reversed.options.scales.x.title.text,
            TIME_TO_MATURITY_AXIS_LABEL
        );
        for (f, r) in forward.points().iter().zip(reversed.points()) {
            assert_relative_eq!(f.x + r.x, 1.0, epsilon = 1e-12);
            assert_eq!(f.y, r.y);
        }
    }

    #[test]
    fn test_custom_title() {
        let res = result(PayoffType::Put, ExerciseStyle::American);
        let chart = BoundaryChart::from_result(
            &res,
            &ChartOptions::with_title("American Put Early-Exercise Threshold"),
        )
        .unwrap();
        assert_eq!(chart.title(), "American Put Early-Exercise Threshold");
        assert_eq!(chart.options.scales.y.title.text, BOUNDARY_AXIS_LABEL);
    }

    // =========================================================================
    // Output
    // =========================================================================

    #[test]
    fn test_render_table_has_row_per_point() {
        let res = result(PayoffType::Put, ExerciseStyle::American);
        let chart = BoundaryChart::from_result(&res, &ChartOptions::default()).unwrap();
        let table = chart.render_table();

        assert!(table.starts_with("Early-Exercise Boundary (american put)"));
        assert!(table.contains(BOUNDARY_AXIS_LABEL));
        assert_eq!(table.lines().count(), 3 + chart.points().len());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_chartjs_json_layout() {
        let res = result(PayoffType::Put, ExerciseStyle::American);
        let chart = BoundaryChart::from_result(&res, &ChartOptions::default()).unwrap();
        let json: serde_json::Value = serde_json::from_str(&chart.to_json().unwrap()).unwrap();

        assert_eq!(json["type"], "line");
        assert_eq!(json["options"]["scales"]["x"]["type"], "linear");
        assert_eq!(json["options"]["scales"]["x"]["reverse"], true);
        assert_eq!(json["data"]["datasets"][0]["showLine"], true);
        assert!(json["data"]["datasets"][0]["data"][0]["x"].is_number());
    }
}
