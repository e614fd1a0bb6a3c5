//! Adding views from the modelling kernel.
//!
//! Shape ids go stale when the model is rebuilt, so a failed request is
//! retried once with the id from the caller's remap table. The drawing is
//! only touched after a projection has been produced.

use std::collections::HashMap;

use async_trait::async_trait;
use sheetkit_core::{DrawingView, Projection, ProjectionError, ProjectionType, ShapeId, ViewId};
use sheetkit_settings::LayoutSettings;

use crate::layout::place_new_view;
use crate::store::{DrawingStore, DrawingUpdate};

/// Source of 2D projections
#[async_trait]
pub trait ProjectionGenerator: Send + Sync {
    /// Project `shape_id` for `projection_type`.
    ///
    /// `scale` is the factor from model metres to paper millimetres, so the
    /// returned lines are already in paper units.
    async fn generate_projection(
        &self,
        shape_id: &str,
        projection_type: ProjectionType,
        scale: f64,
    ) -> anyhow::Result<Projection>;
}

/// Generate a projection and add it to the drawing as a new view.
///
/// # Arguments
///
/// * `generator` - The modelling kernel
/// * `store` - Drawing state receiving the new view
/// * `shape_id` - Shape to project
/// * `projection_type` - Which view to produce
/// * `shape_id_map` - Stale id to current id, consulted once on failure
/// * `layout` - Gap used when lining views up past the quadrant slots
///
/// # Errors
///
/// [`ProjectionError::GenerationFailed`] when the first attempt fails and no
/// remap exists, [`ProjectionError::RetryFailed`] when the retry fails too.
/// The store is not modified in either case.
pub async fn add_view<G, S>(
    generator: &G,
    store: &mut S,
    shape_id: &str,
    projection_type: ProjectionType,
    shape_id_map: &HashMap<ShapeId, ShapeId>,
    layout: &LayoutSettings,
) -> Result<ViewId, ProjectionError>
where
    G: ProjectionGenerator + ?Sized,
    S: DrawingStore + ?Sized,
{
    let scale = store.drawing().sheet.projection_factor();

    let (projection, remapped) = match generator
        .generate_projection(shape_id, projection_type, scale)
        .await
    {
        Ok(p) => (p, None),
        Err(first) => {
            let Some(remapped_id) = shape_id_map.get(shape_id) else {
                tracing::error!(shape_id, "projection failed: {:#}", first);
                return Err(ProjectionError::GenerationFailed {
                    shape_id: shape_id.to_string(),
                    reason: first.to_string(),
                });
            };
            tracing::warn!(
                shape_id,
                remapped_id = remapped_id.as_str(),
                "projection failed, retrying with remapped id: {}",
                first
            );
            match generator
                .generate_projection(remapped_id, projection_type, scale)
                .await
            {
                Ok(p) => (p, Some(remapped_id.clone())),
                Err(second) => {
                    tracing::error!(shape_id, "projection retry failed: {:#}", second);
                    return Err(ProjectionError::RetryFailed {
                        shape_id: shape_id.to_string(),
                        remapped_id: remapped_id.clone(),
                        reason: second.to_string(),
                    });
                }
            }
        }
    };

    if let Some(new_id) = remapped {
        let ids = store
            .drawing()
            .source_shape_ids
            .iter()
            .map(|id| if id == shape_id { new_id.clone() } else { id.clone() })
            .collect();
        store.update_drawing(DrawingUpdate {
            source_shape_ids: Some(ids),
            ..DrawingUpdate::default()
        });
    }

    let drawing = store.drawing();
    let (paper_w, paper_h) = drawing.sheet.paper_dimensions();
    let position = place_new_view(
        &drawing.views,
        &projection.bounding_box,
        paper_w,
        paper_h,
        layout.gap_mm,
    );

    let view = DrawingView::new(projection_type, projection, position);
    let id = view.id;
    store.add_view(view);
    Ok(id)
}
