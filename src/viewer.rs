//! The live view: the current plan snapshot, interaction state, the last
//! composed scene and the last stylized overlay.

use std::sync::Arc;

use tracing::debug;

use crate::error::{Result, SceneError};
use crate::export::{
    compose_overlay, export_overlay_png, export_pdf, export_png, PageParams, RasterImage,
    RasterParams, Rasterize, RenderView, Stylizer,
};
use crate::math::Point2;
use crate::model::{report_plan_issues, FloorPlan};
use crate::scene::{compose_scene, pick_room, Scene, ViewState};

/// Holds what is on screen.
///
/// Plans are swapped wholesale; every state change recomposes the scene
/// from scratch. Exports clone the `Arc<Scene>` snapshot, so they can run
/// on other threads while the viewer keeps changing.
#[derive(Debug, Default)]
pub struct Viewer {
    plan: Option<Arc<FloorPlan>>,
    view: ViewState,
    scene: Option<Arc<Scene>>,
    overlay: Option<Arc<RasterImage>>,
}

impl Viewer {
    /// Creates a viewer with nothing mounted.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Mounts a new plan revision, replacing the previous one.
    ///
    /// A selection that no longer names a room is dropped, and so is the
    /// overlay, which was rendered for the previous geometry.
    pub fn set_plan(&mut self, plan: impl Into<Arc<FloorPlan>>) {
        let plan = plan.into();
        let issues = report_plan_issues(&plan);
        if let Some(id) = &self.view.selected_room_id {
            if plan.room(id).is_none() {
                debug!(room = %id, "selection cleared by plan revision");
                self.view.selected_room_id = None;
            }
        }
        self.overlay = None;
        debug!(
            rooms = plan.rooms.len(),
            issues = issues.len(),
            "plan mounted"
        );
        self.plan = Some(plan);
        self.recompose();
    }

    #[must_use]
    pub fn plan(&self) -> Option<&Arc<FloorPlan>> {
        self.plan.as_ref()
    }

    #[must_use]
    pub fn view(&self) -> &ViewState {
        &self.view
    }

    /// Selects a room by id, or clears the selection.
    pub fn select(&mut self, room_id: Option<String>) {
        if self.view.selected_room_id != room_id {
            self.view.selected_room_id = room_id;
            self.recompose();
        }
    }

    /// Selects the room under `point` (scene coordinates), if any.
    ///
    /// A click that hits no room leaves the selection as it was. Returns
    /// the id of the room hit.
    pub fn click(&mut self, point: Point2) -> Option<String> {
        let hit = pick_room(self.scene.as_deref()?, point).map(str::to_owned);
        if hit.is_some() {
            self.select(hit.clone());
        }
        hit
    }

    pub fn set_show_background(&mut self, show: bool) {
        if self.view.show_background != show {
            self.view.show_background = show;
            self.recompose();
        }
    }

    /// Returns the current scene snapshot.
    ///
    /// # Errors
    ///
    /// Returns `SceneError::Unavailable` before a plan is mounted.
    pub fn scene(&self) -> Result<Arc<Scene>> {
        self.scene.clone().ok_or_else(|| SceneError::Unavailable.into())
    }

    fn mounted(&self) -> Result<(Arc<FloorPlan>, Arc<Scene>)> {
        match (&self.plan, &self.scene) {
            (Some(plan), Some(scene)) => Ok((Arc::clone(plan), Arc::clone(scene))),
            _ => Err(SceneError::Unavailable.into()),
        }
    }

    /// Exports the wireframe as PNG.
    ///
    /// # Errors
    ///
    /// Returns `SceneError::Unavailable` before a plan is mounted, or the
    /// underlying export error.
    pub fn export_png(&self, scale: u32) -> Result<Vec<u8>> {
        let scene = self.scene()?;
        export_png(&scene, scale)
    }

    /// Exports the wireframe as a single-page PDF.
    ///
    /// # Errors
    ///
    /// Returns `SceneError::Unavailable` before a plan is mounted, or the
    /// underlying export error.
    pub fn export_pdf(&self, raster: RasterParams, page: &PageParams) -> Result<Vec<u8>> {
        let (plan, scene) = self.mounted()?;
        export_pdf(&scene, &plan, raster, page)
    }

    /// Runs `stylizer` on the current scene and keeps its output as the
    /// overlay. On failure the previous overlay is kept.
    ///
    /// # Errors
    ///
    /// Returns `SceneError::Unavailable` before a plan is mounted, or the
    /// error from [`RenderView::execute`].
    pub fn render_view<S: Stylizer + ?Sized>(&mut self, stylizer: &S, scale: u32) -> Result<()> {
        let (plan, scene) = self.mounted()?;
        let overlay = RenderView::new(&scene, &plan, stylizer)
            .with_scale(scale)
            .execute()?;
        self.overlay = Some(Arc::new(overlay));
        Ok(())
    }

    #[must_use]
    pub fn overlay(&self) -> Option<&Arc<RasterImage>> {
        self.overlay.as_ref()
    }

    /// The overlay drawn over the furniture-free wireframe it was made from.
    ///
    /// # Errors
    ///
    /// Returns `SceneError::OverlayUnavailable` without an overlay, or a
    /// raster error if the wireframe cannot be rebuilt at the same size.
    pub fn composite(&self, scale: u32) -> Result<RasterImage> {
        let overlay = self.overlay.as_ref().ok_or(SceneError::OverlayUnavailable)?;
        let scene = self.scene()?;
        let wireframe = Rasterize::new(
            &scene,
            RasterParams {
                scale,
                include_furniture: false,
            },
        )
        .execute()?;
        compose_overlay(&wireframe, overlay)
    }

    /// Exports the overlay as PNG.
    ///
    /// # Errors
    ///
    /// Returns `SceneError::OverlayUnavailable` without an overlay.
    pub fn export_overlay_png(&self) -> Result<Vec<u8>> {
        export_overlay_png(self.overlay.as_deref())
    }

    fn recompose(&mut self) {
        if let Some(plan) = &self.plan {
            self.scene = Some(Arc::new(compose_scene(plan, &self.view)));
        }
    }
}
