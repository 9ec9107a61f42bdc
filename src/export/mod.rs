//! Raster and document export.
//!
//! Every entry point reads an immutable scene and derives its own print
//! copy, so the live scene is never touched and calls may run in parallel.

mod document;
mod overlay;
mod page;
mod raster;
mod strip;

pub use document::ComposeDocument;
pub use overlay::{compose_overlay, RenderView, Stylizer};
pub use page::{Orientation, PageLayout, PageParams, PageSize};
pub use raster::{rasterize_svg, RasterImage, RasterParams, Rasterize, MAX_PIXELS};
pub use strip::strip_for_export;

use tracing::debug;

use crate::error::{Result, SceneError};
use crate::model::FloorPlan;
use crate::scene::Scene;

/// Wireframe PNG of the whole scene, furniture included.
///
/// # Errors
///
/// Returns `RasterError` if rendering or encoding fails.
pub fn export_png(scene: &Scene, scale: u32) -> Result<Vec<u8>> {
    let image = Rasterize::new(
        scene,
        RasterParams {
            scale,
            include_furniture: true,
        },
    )
    .execute()?;
    let png = image.to_png()?;
    debug!(
        width = image.width(),
        height = image.height(),
        bytes = png.len(),
        "png exported"
    );
    Ok(png)
}

/// Single-page PDF with the wireframe fitted to a page oriented like `plan`.
///
/// # Errors
///
/// Returns `RasterError` if rendering fails and `DocumentError` if the
/// page layout or document cannot be built.
pub fn export_pdf(
    scene: &Scene,
    plan: &FloorPlan,
    raster: RasterParams,
    page: &PageParams,
) -> Result<Vec<u8>> {
    let layout = PageLayout::for_plan(plan, page)?;
    let image = Rasterize::new(scene, raster).execute()?;
    let pdf = ComposeDocument::new(&image, layout).execute()?;
    debug!(
        page_width = layout.page.width,
        page_height = layout.page.height,
        image_width = layout.width,
        image_height = layout.height,
        bytes = pdf.len(),
        "pdf exported"
    );
    Ok(pdf)
}

/// PNG of the most recent stylized overlay.
///
/// # Errors
///
/// Returns `SceneError::OverlayUnavailable` when there is no overlay and
/// `RasterError` if encoding fails.
pub fn export_overlay_png(overlay: Option<&RasterImage>) -> Result<Vec<u8>> {
    let image = overlay.ok_or(SceneError::OverlayUnavailable)?;
    image.to_png()
}
