//! Named waits between pipeline steps.
//!
//! The delays give the platform a moment to lay out fresh markup and load
//! fonts before capture. Tests run with [`SettlePolicy::immediate`].

/// Device-pixel scale used when rasterizing page fragments.
pub const CAPTURE_SCALE: f32 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettlePolicy {
    /// Before verifying a freshly composed scratch region.
    pub initial_ms: u64,
    /// Extra wait for chart-heavy single-canvas reports.
    pub chart_ms: u64,
    /// Between captures of consecutive fragments.
    pub between_pages_ms: u64,
    /// Success message stays visible this long before the modal closes.
    pub close_ms: u64,
    /// Simulated assistant typing time.
    pub chat_reply_ms: u64,
    /// Before scrolling a revealed panel into view.
    pub scroll_ms: u64,
}

impl SettlePolicy {
    pub const fn standard() -> Self {
        Self {
            initial_ms: 1000,
            chart_ms: 2000,
            between_pages_ms: 300,
            close_ms: 500,
            chat_reply_ms: 1500,
            scroll_ms: 200,
        }
    }

    pub const fn immediate() -> Self {
        Self {
            initial_ms: 0,
            chart_ms: 0,
            between_pages_ms: 0,
            close_ms: 0,
            chat_reply_ms: 0,
            scroll_ms: 0,
        }
    }
}

impl Default for SettlePolicy {
    fn default() -> Self {
        Self::standard()
    }
}
