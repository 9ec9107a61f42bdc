use pdf_writer::{Content, Finish, Name, Pdf, Rect, Ref, TextStr};
use tracing::debug;

use crate::error::{DocumentError, Result};

use super::page::PageLayout;
use super::raster::RasterImage;

const CATALOG: Ref = Ref::new(1);
const PAGE_TREE: Ref = Ref::new(2);
const PAGE: Ref = Ref::new(3);
const IMAGE: Ref = Ref::new(4);
const CONTENT: Ref = Ref::new(5);
const INFO: Ref = Ref::new(6);
const IMAGE_NAME: Name<'static> = Name(b"Im1");
const TITLE: &str = "Floor plan";

/// Builds a single-page PDF holding one raster image.
#[derive(Debug, Clone, Copy)]
pub struct ComposeDocument<'a> {
    image: &'a RasterImage,
    layout: PageLayout,
}

impl<'a> ComposeDocument<'a> {
    #[must_use]
    pub fn new(image: &'a RasterImage, layout: PageLayout) -> Self {
        Self { image, layout }
    }

    /// Writes the document.
    ///
    /// The image is placed at the layout rectangle, stretched to it, with
    /// alpha flattened onto white.
    ///
    /// # Errors
    ///
    /// Returns `DocumentError::EmptyImage` for an image without pixels and
    /// `DocumentError::Layout` if the image is too large to describe.
    pub fn execute(&self) -> Result<Vec<u8>> {
        let (width, height) = (self.image.width(), self.image.height());
        if width == 0 || height == 0 {
            return Err(DocumentError::EmptyImage.into());
        }
        let pixel_w = i32::try_from(width)
            .map_err(|_| DocumentError::Layout(format!("image width {width}")))?;
        let pixel_h = i32::try_from(height)
            .map_err(|_| DocumentError::Layout(format!("image height {height}")))?;

        let layout = &self.layout;
        let mut pdf = Pdf::new();
        pdf.catalog(CATALOG).pages(PAGE_TREE);
        pdf.pages(PAGE_TREE).kids([PAGE]).count(1);
        pdf.document_info(INFO).title(TextStr(TITLE));

        #[allow(clippy::cast_possible_truncation)]
        let (page_w, page_h) = (layout.page.width as f32, layout.page.height as f32);
        let mut page = pdf.page(PAGE);
        page.media_box(Rect::new(0.0, 0.0, page_w, page_h));
        page.parent(PAGE_TREE);
        page.contents(CONTENT);
        page.resources().x_objects().pair(IMAGE_NAME, IMAGE);
        page.finish();

        let rgb = self.image.rgb_on_white();
        let mut image = pdf.image_xobject(IMAGE, &rgb);
        image.width(pixel_w);
        image.height(pixel_h);
        image.color_space().device_rgb();
        image.bits_per_component(8);
        image.finish();

        // PDF user space has its origin at the bottom-left corner.
        #[allow(clippy::cast_possible_truncation)]
        let placement = [
            layout.width as f32,
            0.0,
            0.0,
            layout.height as f32,
            layout.x as f32,
            (layout.page.height - layout.y - layout.height) as f32,
        ];
        let mut content = Content::new();
        content.save_state();
        content.transform(placement);
        content.x_object(IMAGE_NAME);
        content.restore_state();
        pdf.stream(CONTENT, &content.finish());

        let bytes = pdf.finish();
        debug!(bytes = bytes.len(), width, height, "document composed");
        Ok(bytes)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::export::page::{PageParams, PageSize};
    use crate::export::raster::rasterize_svg;
    use crate::model::FloorPlan;

    fn contains(haystack: &[u8], needle: &[u8]) -> bool {
        haystack.windows(needle.len()).any(|w| w == needle)
    }

    #[test]
    fn writes_single_page_pdf_with_image() {
        let image = rasterize_svg(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="6" height="12"/>"#,
            1,
        )
        .unwrap();
        let layout = PageLayout::for_plan(&FloorPlan::sample(), &PageParams::default()).unwrap();
        let pdf = ComposeDocument::new(&image, layout).execute().unwrap();
        assert!(pdf.starts_with(b"%PDF-"));
        assert!(contains(&pdf, b"/MediaBox [0 0 595 842]"));
        assert!(contains(&pdf, b"/Subtype /Image"));
        assert!(contains(&pdf, b"/Im1 Do"));
        assert!(contains(&pdf, b"/Width 6"));
        assert!(contains(&pdf, b"/Height 12"));
        assert!(contains(&pdf, b"/Title (Floor plan)"));
    }

    #[test]
    fn landscape_layout_sets_wide_media_box() {
        let image = rasterize_svg(
            r#"<svg xmlns="http://www.w3.org/2000/svg" width="3" height="1"/>"#,
            1,
        )
        .unwrap();
        let layout = PageLayout::fit(3.0, PageSize::A4.oriented(crate::export::Orientation::Landscape), 40.0).unwrap();
        let pdf = ComposeDocument::new(&image, layout).execute().unwrap();
        assert!(contains(&pdf, b"/MediaBox [0 0 842 595]"));
    }
}
