//! test utilities. Provides log macros and a renderer recording frames.

use crate::render::{MapView, Notification, RenderError, Renderer};
use crate::types::{MapRegion, PositionFix};
use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

/// Writes a debug! message to the test::ut logger
#[allow(unused_macros)]
macro_rules! ut_debug {
    ($($arg:tt)+) => {
        log::debug!(target: "test::ut", $($arg)+)
    };
}

/// Writes an info! message to the test::ut logger
#[allow(unused_macros)]
macro_rules! ut_info {
    ($($arg:tt)+) => {
        log::info!(target: "test::ut", $($arg)+)
    };
}

/// Writes an error! message to the test::ut logger
#[allow(unused_macros)]
macro_rules! ut_error {
    ($($arg:tt)+) => {
        log::error!(target: "test::ut", $($arg)+)
    };
}

/// A frame as seen by [`RecordingRenderer`].
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    pub region: MapRegion,
    pub marker: PositionFix,
    pub path: Vec<PositionFix>,
}

/// Keeps every frame and notification in memory.
#[derive(Debug, Clone, Default)]
pub struct RecordingRenderer {
    frames: Arc<Mutex<Vec<Frame>>>,
    notifications: Arc<Mutex<Vec<Notification>>>,
    failing: Arc<AtomicBool>,
}

impl RecordingRenderer {
    /// Makes every following render call fail.
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub async fn frames(&self) -> Vec<Frame> {
        self.frames.lock().await.clone()
    }

    pub async fn notifications(&self) -> Vec<Notification> {
        self.notifications.lock().await.clone()
    }
}

#[async_trait]
impl Renderer for RecordingRenderer {
    fn name(&self) -> &str {
        "recording"
    }

    async fn render(&self, view: &MapView<'_>) -> Result<(), RenderError> {
        if self.failing.load(Ordering::SeqCst) {
            ut_debug!("(render) failing on purpose.");
            return Err(RenderError::WriteFailed);
        }

        self.frames.lock().await.push(Frame {
            region: view.region,
            marker: view.marker,
            path: view.path.iter().map(|point| point.fix).collect(),
        });
        Ok(())
    }

    async fn notify(&self, notification: &Notification) -> Result<(), RenderError> {
        self.notifications.lock().await.push(*notification);
        Ok(())
    }
}
