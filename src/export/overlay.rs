use tracing::{debug, warn};

use crate::error::{RasterError, Result};
use crate::model::FloorPlan;
use crate::scene::Scene;

use super::raster::{RasterImage, RasterParams, Rasterize};

/// Turns a wireframe PNG into a stylized rendering of the same plan.
///
/// Implementations are free to be slow or remote. The returned PNG must
/// have the same pixel dimensions as the wireframe it was given.
pub trait Stylizer {
    /// # Errors
    ///
    /// Any failure; it is reported as `RasterError::Stylizer`.
    fn stylize(
        &self,
        wireframe_png: &[u8],
        plan: &FloorPlan,
    ) -> std::result::Result<Vec<u8>, Box<dyn std::error::Error + Send + Sync>>;
}

/// Produces a stylized rendering of a scene.
///
/// The wireframe handed to the stylizer is the print form without
/// furniture, so the stylizer furnishes the rooms itself.
pub struct RenderView<'a, S: Stylizer + ?Sized> {
    scene: &'a Scene,
    plan: &'a FloorPlan,
    stylizer: &'a S,
    scale: u32,
}

impl<'a, S: Stylizer + ?Sized> RenderView<'a, S> {
    #[must_use]
    pub fn new(scene: &'a Scene, plan: &'a FloorPlan, stylizer: &'a S) -> Self {
        Self {
            scene,
            plan,
            stylizer,
            scale: RasterParams::default().scale,
        }
    }

    #[must_use]
    pub fn with_scale(mut self, scale: u32) -> Self {
        self.scale = scale;
        self
    }

    /// Runs the stylizer and returns its image.
    ///
    /// # Errors
    ///
    /// Returns `RasterError::Stylizer` if the stylizer fails,
    /// `RasterError::Decode` if its output is not a PNG and
    /// `RasterError::DimensionMismatch` if the output size differs from
    /// the wireframe.
    pub fn execute(&self) -> Result<RasterImage> {
        let wireframe = Rasterize::new(
            self.scene,
            RasterParams {
                scale: self.scale,
                include_furniture: false,
            },
        )
        .execute()?;
        let png = wireframe.to_png()?;
        let styled = self.stylizer.stylize(&png, self.plan).map_err(|e| {
            warn!(error = %e, "stylizer failed");
            RasterError::Stylizer(e.to_string())
        })?;
        let styled = RasterImage::from_png(&styled)?;
        check_dimensions(&wireframe, &styled)?;
        debug!(
            width = styled.width(),
            height = styled.height(),
            "rendered view ready"
        );
        Ok(styled)
    }
}

/// Draws `overlay` over `base`, source-over.
///
/// # Errors
///
/// Returns `RasterError::DimensionMismatch` unless both images have the
/// same pixel size.
pub fn compose_overlay(base: &RasterImage, overlay: &RasterImage) -> Result<RasterImage> {
    check_dimensions(base, overlay)?;
    let mut out = base.clone();
    out.draw_over(overlay);
    Ok(out)
}

fn check_dimensions(expected: &RasterImage, actual: &RasterImage) -> Result<()> {
    if expected.width() == actual.width() && expected.height() == actual.height() {
        Ok(())
    } else {
        Err(RasterError::DimensionMismatch {
            expected_width: expected.width(),
            expected_height: expected.height(),
            actual_width: actual.width(),
            actual_height: actual.height(),
        }
        .into())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::FloorplanError;
    use crate::export::raster::rasterize_svg;
    use crate::scene::{compose_scene, ViewState};

    /// Inverts every pixel of the wireframe.
    struct Negative;

    impl Stylizer for Negative {
        fn stylize(
            &self,
            wireframe_png: &[u8],
            _plan: &FloorPlan,
        ) -> std::result::Result<Vec<u8>, Box<dyn std::error::Error + Send + Sync>> {
            let image = RasterImage::from_png(wireframe_png)?;
            let rgba: Vec<u8> = image
                .rgba()
                .chunks_exact(4)
                .flat_map(|p| [255 - p[0], 255 - p[1], 255 - p[2], p[3]])
                .collect();
            let mut buf = Vec::new();
            let mut encoder = png::Encoder::new(&mut buf, image.width(), image.height());
            encoder.set_color(png::ColorType::Rgba);
            encoder.set_depth(png::BitDepth::Eight);
            let mut writer = encoder.write_header()?;
            writer.write_image_data(&rgba)?;
            writer.finish()?;
            Ok(buf)
        }
    }

    /// Returns a fixed tiny image regardless of input.
    struct Postage;

    impl Stylizer for Postage {
        fn stylize(
            &self,
            _wireframe_png: &[u8],
            _plan: &FloorPlan,
        ) -> std::result::Result<Vec<u8>, Box<dyn std::error::Error + Send + Sync>> {
            Ok(rasterize_svg(
                r#"<svg xmlns="http://www.w3.org/2000/svg" width="2" height="2"/>"#,
                1,
            )?
            .to_png()?)
        }
    }

    struct Offline;

    impl Stylizer for Offline {
        fn stylize(
            &self,
            _wireframe_png: &[u8],
            _plan: &FloorPlan,
        ) -> std::result::Result<Vec<u8>, Box<dyn std::error::Error + Send + Sync>> {
            Err("service unreachable".into())
        }
    }

    fn setup() -> (FloorPlan, Scene) {
        let plan = FloorPlan::sample();
        let scene = compose_scene(&plan, &ViewState::default());
        (plan, scene)
    }

    #[test]
    fn stylized_view_matches_wireframe_size() {
        let (plan, scene) = setup();
        let view = RenderView::new(&scene, &plan, &Negative)
            .with_scale(1)
            .execute()
            .unwrap();
        assert_eq!((view.width(), view.height()), (100, 162));
        // White paper inverted.
        assert_eq!(view.pixel(0, 0), Some([0, 0, 0, 255]));
    }

    #[test]
    fn size_mismatch_is_rejected() {
        let (plan, scene) = setup();
        let err = RenderView::new(&scene, &plan, &Postage)
            .with_scale(1)
            .execute()
            .unwrap_err();
        assert!(matches!(
            err,
            FloorplanError::Raster(RasterError::DimensionMismatch {
                actual_width: 2,
                ..
            })
        ));
    }

    #[test]
    fn stylizer_failure_is_reported() {
        let (plan, scene) = setup();
        let err = RenderView::new(&scene, &plan, &Offline)
            .with_scale(1)
            .execute()
            .unwrap_err();
        assert!(matches!(err, FloorplanError::Raster(RasterError::Stylizer(m)) if m == "service unreachable"));
    }

    #[test]
    fn opaque_overlay_replaces_base() {
        let base = rasterize_svg(r#"<svg xmlns="http://www.w3.org/2000/svg" width="2" height="2"/>"#, 1).unwrap();
        let top = rasterize_svg(
            r##"<svg xmlns="http://www.w3.org/2000/svg" width="2" height="2"><rect width="2" height="2" fill="#ff0000"/></svg>"##,
            1,
        )
        .unwrap();
        let out = compose_overlay(&base, &top).unwrap();
        assert_eq!(out.pixel(1, 1), Some([255, 0, 0, 255]));
        let small = rasterize_svg(r#"<svg xmlns="http://www.w3.org/2000/svg" width="1" height="1"/>"#, 1).unwrap();
        assert!(compose_overlay(&base, &small).is_err());
    }
}
