//! Tracker adapter
//!
//! Glues the [`MovementSampler`] to its collaborators. For every fix the
//! sampler decides first, then the raw fix is stored and the map view
//! is rendered. Storage and rendering fail independently of each other
//! and never change the sampler decision.

use crate::config::Config;
use crate::render::{GeoJsonRenderer, LogRenderer, MapView, Notification, RenderError, Renderer};
use crate::sampler::{InvalidThresholdError, MovementSampler};
use crate::sink::{FileSink, LocationRecord, MemorySink, PersistenceSink, SinkError};
use crate::types::{InvalidFixError, PositionFix, RoutePoint};

/// What happened to a single fix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FixOutcome {
    /// The fix was malformed. Nothing was stored or rendered.
    Rejected(InvalidFixError),

    /// The fix went through the sampler.
    Accepted {
        /// Set if the fix was promoted into the path.
        route_point: Option<RoutePoint>,

        /// Result of storing the raw fix.
        persisted: Result<(), SinkError>,

        /// Result of drawing the map view.
        rendered: Result<(), RenderError>,
    },
}

/// Owns the sampler state of one fix stream.
pub struct Tracker {
    sampler: MovementSampler,
    sink: Box<dyn PersistenceSink>,
    renderer: Box<dyn Renderer>,
    table: String,
}

impl std::fmt::Debug for Tracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tracker")
            .field("sampler", &self.sampler)
            .field("sink", &self.sink.name())
            .field("renderer", &self.renderer.name())
            .field("table", &self.table)
            .finish()
    }
}

impl Tracker {
    /// Creates a tracker storing raw fixes into `table`.
    pub fn new(
        sampler: MovementSampler,
        sink: Box<dyn PersistenceSink>,
        renderer: Box<dyn Renderer>,
        table: &str,
    ) -> Self {
        Tracker {
            sampler,
            sink,
            renderer,
            table: table.to_string(),
        }
    }

    /// Creates a tracker with the sink and renderer selected by `config`.
    pub fn from_config(config: &Config) -> Result<Self, InvalidThresholdError> {
        let sampler = MovementSampler::new(config.threshold_meters)?;

        let sink: Box<dyn PersistenceSink> = if config.storage_path.is_empty() {
            tasks_warn!(
                "(from_config) no storage_path configured, raw fixes are kept in memory only and not persisted."
            );
            Box::new(MemorySink::new())
        } else {
            Box::new(FileSink::new(&config.storage_path))
        };

        let renderer: Box<dyn Renderer> = if config.render_path.is_empty() {
            Box::new(LogRenderer::default())
        } else {
            Box::new(GeoJsonRenderer::new(&config.render_path))
        };

        tasks_info!(
            "(from_config) threshold {}m, sink [{}], renderer [{}], table [{}].",
            sampler.threshold_meters(),
            sink.name(),
            renderer.name(),
            config.table_name
        );

        Ok(Tracker::new(sampler, sink, renderer, &config.table_name))
    }

    /// The sampler of this stream.
    pub fn sampler(&self) -> &MovementSampler {
        &self.sampler
    }

    /// Promoted fixes so far.
    pub fn route(&self) -> &[RoutePoint] {
        self.sampler.route()
    }

    /// Handles the next fix of the stream.
    pub async fn handle_fix(&mut self, fix: PositionFix) -> FixOutcome {
        let route_point = match self.sampler.observe(fix) {
            Ok(route_point) => route_point,
            Err(e) => {
                tasks_warn!("(handle_fix) rejected fix: {}", e);
                return FixOutcome::Rejected(e);
            }
        };

        let persisted = self.sink.insert(LocationRecord::new(&self.table, &fix)).await;
        if let Err(error) = persisted {
            tasks_warn!(
                "(handle_fix) could not store {} in [{}]: {}",
                fix,
                self.table,
                error
            );

            let notification = Notification::PersistenceFailed { fix, error };
            if let Err(e) = self.renderer.notify(&notification).await {
                tasks_error!("(handle_fix) could not notify the user: {}", e);
            }
        }

        let view = MapView::new(fix, self.sampler.route());
        let rendered = self.renderer.render(&view).await;
        if let Err(e) = rendered {
            tasks_error!("(handle_fix) could not render {}: {}", fix, e);
        }

        FixOutcome::Accepted {
            route_point,
            persisted,
            rendered,
        }
    }

    /// Consumes the tracker and returns the route.
    pub fn into_route(self) -> Vec<RoutePoint> {
        self.sampler.into_route()
    }
}
