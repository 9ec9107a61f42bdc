use crate::error::{DocumentError, Result};
use crate::model::FloorPlan;

/// Physical page size in points (1/72 inch), portrait.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f64,
    pub height: f64,
}

impl PageSize {
    pub const A4: Self = Self {
        width: 595.0,
        height: 842.0,
    };

    pub const LETTER: Self = Self {
        width: 612.0,
        height: 792.0,
    };

    /// Returns the page turned to `orientation`.
    #[must_use]
    pub fn oriented(self, orientation: Orientation) -> Self {
        let (short, long) = if self.width <= self.height {
            (self.width, self.height)
        } else {
            (self.height, self.width)
        };
        match orientation {
            Orientation::Portrait => Self {
                width: short,
                height: long,
            },
            Orientation::Landscape => Self {
                width: long,
                height: short,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Orientation {
    Portrait,
    Landscape,
}

impl Orientation {
    /// Landscape exactly when the plan is strictly wider than tall.
    #[must_use]
    pub fn for_plan(plan: &FloorPlan) -> Self {
        if plan.is_landscape() {
            Self::Landscape
        } else {
            Self::Portrait
        }
    }
}

/// Parameters for document export.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageParams {
    pub page: PageSize,
    /// Uniform margin in points.
    pub margin: f64,
}

impl Default for PageParams {
    fn default() -> Self {
        Self {
            page: PageSize::A4,
            margin: 40.0,
        }
    }
}

/// Where the plan image lands on the page. All values in points, origin at
/// the top-left corner of the page.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageLayout {
    pub page: PageSize,
    pub content_width: f64,
    pub content_height: f64,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl PageLayout {
    /// Fits a `plan_aspect` (width / height) image into the page content
    /// box and centers it on the page.
    ///
    /// A plan relatively wider than the content box fills the content
    /// width; otherwise it fills the content height.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::Layout` if the margins leave no content area
    /// or the aspect ratio is not a positive finite number.
    pub fn fit(plan_aspect: f64, page: PageSize, margin: f64) -> Result<Self> {
        if !(plan_aspect.is_finite() && plan_aspect > 0.0) {
            return Err(DocumentError::Layout(format!("plan aspect ratio {plan_aspect}")).into());
        }
        let content_width = page.width - 2.0 * margin;
        let content_height = page.height - 2.0 * margin;
        if !(content_width > 0.0 && content_height > 0.0) {
            return Err(DocumentError::Layout(format!(
                "margin {margin} leaves no room on a {}x{} page",
                page.width, page.height
            ))
            .into());
        }

        let (width, height) = if plan_aspect > content_width / content_height {
            (content_width, content_width / plan_aspect)
        } else {
            (content_height * plan_aspect, content_height)
        };
        Ok(Self {
            page,
            content_width,
            content_height,
            x: (page.width - width) / 2.0,
            y: (page.height - height) / 2.0,
            width,
            height,
        })
    }

    /// Lays a plan out on a page oriented to match it.
    ///
    /// # Errors
    ///
    /// See [`PageLayout::fit`].
    pub fn for_plan(plan: &FloorPlan, params: &PageParams) -> Result<Self> {
        let page = params.page.oriented(Orientation::for_plan(plan));
        Self::fit(plan.aspect_ratio(), page, params.margin)
    }
}
