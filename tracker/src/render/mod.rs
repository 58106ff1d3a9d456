//! Renderers
//!
//! A renderer draws the map around the most recent fix, the marker on
//! that fix and the promoted route as a connected path. It is also the
//! channel through which non-fatal problems reach the user.

#[macro_use]
pub mod macros;
pub mod geojson;
pub mod logging;

pub use geojson::GeoJsonRenderer;
pub use logging::LogRenderer;

use crate::sink::SinkError;
use crate::types::{MapRegion, PositionFix, RoutePoint};
use async_trait::async_trait;
use std::fmt::{Display, Formatter, Result as FmtResult};

/// Everything a renderer needs to draw one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapView<'a> {
    /// Visible area, centered on the marker.
    pub region: MapRegion,

    /// Most recent accepted fix, promoted or not.
    pub marker: PositionFix,

    /// Promoted fixes, oldest first.
    pub path: &'a [RoutePoint],
}

impl<'a> MapView<'a> {
    /// Builds the view for the latest fix.
    pub fn new(marker: PositionFix, path: &'a [RoutePoint]) -> Self {
        MapView {
            region: MapRegion::around(&marker),
            marker,
            path,
        }
    }

    /// A path overlay needs at least two points.
    pub fn shows_path(&self) -> bool {
        self.path.len() > 1
    }
}

/// A non-fatal problem to report to the user.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Notification {
    /// A fix could not be stored. The path is not affected.
    PersistenceFailed {
        /// The fix that was not stored.
        fix: PositionFix,

        /// Why the sink refused it.
        error: SinkError,
    },
}

impl Display for Notification {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            Notification::PersistenceFailed { fix, error } => {
                write!(f, "Could not store the location {}: {}", fix, error)
            }
        }
    }
}

/// Errors that can occur while rendering.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum RenderError {
    /// The output could not be encoded.
    Serialization,

    /// The output could not be written.
    WriteFailed,
}

impl Display for RenderError {
    fn fmt(&self, f: &mut Formatter) -> FmtResult {
        match self {
            RenderError::Serialization => write!(f, "Could not serialize map view."),
            RenderError::WriteFailed => write!(f, "Could not write map view."),
        }
    }
}

impl std::error::Error for RenderError {}

/// Output side of the tracker.
#[async_trait]
pub trait Renderer: Send + Sync {
    /// Name of the renderer, for logging.
    fn name(&self) -> &str;

    /// Draws a frame.
    async fn render(&self, view: &MapView<'_>) -> Result<(), RenderError>;

    /// Shows a notification to the user.
    async fn notify(&self, notification: &Notification) -> Result<(), RenderError>;
}
