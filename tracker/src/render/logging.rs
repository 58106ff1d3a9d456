//! Renders the map view into the log, on the `app::render` target.

use super::{MapView, Notification, RenderError, Renderer};
use async_trait::async_trait;

/// Logs every frame. Used when no render output is configured.
#[derive(Debug, Default, Copy, Clone)]
pub struct LogRenderer {}

#[async_trait]
impl Renderer for LogRenderer {
    fn name(&self) -> &str {
        "log"
    }

    async fn render(&self, view: &MapView<'_>) -> Result<(), RenderError> {
        render_info!(
            "(render) marker at {}, region {:.5} / {:.5}.",
            view.marker,
            view.region.latitude_delta,
            view.region.longitude_delta
        );

        if view.shows_path() {
            render_debug!("(render) path with {} points.", view.path.len());
        }

        Ok(())
    }

    async fn notify(&self, notification: &Notification) -> Result<(), RenderError> {
        render_warn!("(notify) {}", notification);
        Ok(())
    }
}
