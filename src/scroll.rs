/// Scroll offset past which the back-to-top control is shown.
pub const BACK_TO_TOP_THRESHOLD_PX: f64 = 500.0;

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollMetrics {
    pub scroll_top: f64,
    pub scroll_height: f64,
    pub client_height: f64,
}

#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ScrollState {
    pub progress_percent: f64,
    pub past_threshold: bool,
}

impl ScrollState {
    pub fn from_metrics(metrics: ScrollMetrics) -> Self {
        Self {
            progress_percent: progress_percent(metrics),
            past_threshold: metrics.scroll_top > BACK_TO_TOP_THRESHOLD_PX,
        }
    }

    /// Inline style for the fixed progress bar, scaled from the left edge.
    pub fn progress_style(&self) -> String {
        format!("transform: scaleX({:.4});", self.progress_percent / 100.0)
    }
}

/// A page no taller than the viewport has nothing to scroll through and
/// reports zero.
fn progress_percent(metrics: ScrollMetrics) -> f64 {
    let scrollable = metrics.scroll_height - metrics.client_height;
    if !scrollable.is_finite() || scrollable <= 0.0 || !metrics.scroll_top.is_finite() {
        return 0.0;
    }

    (metrics.scroll_top / scrollable * 100.0).clamp(0.0, 100.0)
}
