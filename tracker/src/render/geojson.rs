//! Renders the map view as a GeoJSON `FeatureCollection` file.
//!
//! The file is rewritten on every frame and holds a `Point` feature for
//! the marker and, once the route has two points, a `LineString` for the
//! path. GeoJSON positions are `[longitude, latitude]`.

use super::{MapView, Notification, RenderError, Renderer};
use async_trait::async_trait;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};

/// Writes frames to a GeoJSON file.
#[derive(Debug, Clone)]
pub struct GeoJsonRenderer {
    path: PathBuf,
}

impl GeoJsonRenderer {
    /// Creates a renderer writing to `path`.
    pub fn new(path: impl AsRef<Path>) -> Self {
        GeoJsonRenderer {
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Path of the output file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sibling file a frame is written to before replacing the output.
    fn staging_path(&self) -> PathBuf {
        let mut staging = self.path.clone().into_os_string();
        staging.push(".tmp");
        PathBuf::from(staging)
    }

    /// Builds the `FeatureCollection` for a frame.
    pub fn feature_collection(view: &MapView<'_>) -> Value {
        let mut features = vec![json!({
            "type": "Feature",
            "geometry": {
                "type": "Point",
                "coordinates": [
                    view.marker.longitude.into_inner(),
                    view.marker.latitude.into_inner()
                ],
            },
            "properties": {
                "kind": "marker",
                "latitude_delta": view.region.latitude_delta,
                "longitude_delta": view.region.longitude_delta,
            },
        })];

        if view.shows_path() {
            let coordinates: Vec<[f64; 2]> = view
                .path
                .iter()
                .map(|point| {
                    [
                        point.fix.longitude.into_inner(),
                        point.fix.latitude.into_inner(),
                    ]
                })
                .collect();

            features.push(json!({
                "type": "Feature",
                "geometry": {
                    "type": "LineString",
                    "coordinates": coordinates,
                },
                "properties": {
                    "kind": "path",
                },
            }));
        }

        json!({
            "type": "FeatureCollection",
            "features": features,
        })
    }
}

#[async_trait]
impl Renderer for GeoJsonRenderer {
    fn name(&self) -> &str {
        "geojson"
    }

    async fn render(&self, view: &MapView<'_>) -> Result<(), RenderError> {
        let content =
            serde_json::to_string_pretty(&Self::feature_collection(view)).map_err(|e| {
                render_error!("(render) could not serialize frame: {}", e);
                RenderError::Serialization
            })?;

        // readers must never see a partially written frame
        let staging = self.staging_path();
        tokio::fs::write(&staging, content).await.map_err(|e| {
            render_error!("(render) could not write {:?}: {}", staging, e);
            RenderError::WriteFailed
        })?;

        if let Err(e) = tokio::fs::rename(&staging, &self.path).await {
            render_error!(
                "(render) could not move {:?} to {:?}: {}",
                staging,
                self.path,
                e
            );
            let _ = tokio::fs::remove_file(&staging).await;
            return Err(RenderError::WriteFailed);
        }

        render_debug!(
            "(render) wrote marker {} and {} path points to {:?}.",
            view.marker,
            view.path.len(),
            self.path
        );
        Ok(())
    }

    async fn notify(&self, notification: &Notification) -> Result<(), RenderError> {
        render_warn!("(notify) {}", notification);
        Ok(())
    }
}
