//! Webview helpers shared by web and desktop: alerts and scrolling.

use dioxus::prelude::*;

/// Blocking browser-style alert. Works on web and inside the desktop webview.
pub fn alert(message: &str) {
    let payload = serde_json::to_string(message).unwrap_or_else(|_| "\"\"".into());
    let _ = document::eval(&format!("alert({payload});"));
}

/// Smoothly bring a mounted element into view.
pub async fn scroll_into_view(node: &MountedData) {
    if let Err(err) = node.scroll_to(ScrollBehavior::Smooth).await {
        tracing::debug!("scroll_into_view failed: {err:?}");
    }
}
