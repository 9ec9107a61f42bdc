use std::sync::{Arc, OnceLock};

use resvg::{tiny_skia, usvg};
use tracing::{debug, warn};

use crate::error::{InputError, RasterError, Result};
use crate::scene::{to_svg, Scene, FALLBACK_SIZE};

use super::strip::strip_for_export;

/// Parameters for [`Rasterize`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RasterParams {
    /// Output pixels per plan unit.
    pub scale: u32,
    pub include_furniture: bool,
}

impl Default for RasterParams {
    fn default() -> Self {
        Self {
            scale: 4,
            include_furniture: true,
        }
    }
}

/// An RGBA raster image.
#[derive(Debug, Clone, PartialEq)]
pub struct RasterImage {
    pixmap: tiny_skia::Pixmap,
}

impl RasterImage {
    #[must_use]
    pub fn width(&self) -> u32 {
        self.pixmap.width()
    }

    #[must_use]
    pub fn height(&self) -> u32 {
        self.pixmap.height()
    }

    /// Returns the straight-alpha RGBA value at `(x, y)`.
    #[must_use]
    pub fn pixel(&self, x: u32, y: u32) -> Option<[u8; 4]> {
        self.pixmap.pixel(x, y).map(|p| {
            let c = p.demultiply();
            [c.red(), c.green(), c.blue(), c.alpha()]
        })
    }

    /// Straight-alpha RGBA bytes, row-major.
    #[must_use]
    pub fn rgba(&self) -> Vec<u8> {
        self.pixmap
            .pixels()
            .iter()
            .flat_map(|p| {
                let c = p.demultiply();
                [c.red(), c.green(), c.blue(), c.alpha()]
            })
            .collect()
    }

    /// RGB bytes with alpha flattened onto white, row-major.
    #[must_use]
    pub fn rgb_on_white(&self) -> Vec<u8> {
        // Premultiplied channel plus the white showing through.
        self.pixmap
            .pixels()
            .iter()
            .flat_map(|p| {
                let under = 255 - p.alpha();
                [
                    p.red().saturating_add(under),
                    p.green().saturating_add(under),
                    p.blue().saturating_add(under),
                ]
            })
            .collect()
    }

    /// Encodes the image as an 8-bit RGBA PNG.
    ///
    /// # Errors
    ///
    /// Returns `RasterError::Encode` if the encoder fails.
    pub fn to_png(&self) -> Result<Vec<u8>> {
        let mut buf = Vec::new();
        let mut encoder = png::Encoder::new(&mut buf, self.width(), self.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        encoder.set_filter(png::FilterType::NoFilter);
        encoder.set_compression(png::Compression::Default);
        let mut writer = encoder.write_header().map_err(RasterError::from)?;
        writer
            .write_image_data(&self.rgba())
            .map_err(RasterError::from)?;
        writer.finish().map_err(RasterError::from)?;
        Ok(buf)
    }

    /// Decodes an 8-bit or 16-bit PNG of any color type.
    ///
    /// # Errors
    ///
    /// Returns `RasterError::Decode` for malformed data and
    /// `RasterError::UnsupportedPng` for layouts that cannot be expanded to
    /// 8-bit RGBA.
    pub fn from_png(bytes: &[u8]) -> Result<Self> {
        let mut decoder = png::Decoder::new(bytes);
        decoder.set_transformations(png::Transformations::EXPAND | png::Transformations::STRIP_16);
        let mut reader = decoder.read_info().map_err(RasterError::from)?;
        let mut buf = vec![0; reader.output_buffer_size()];
        let info = reader.next_frame(&mut buf).map_err(RasterError::from)?;
        if info.bit_depth != png::BitDepth::Eight {
            return Err(RasterError::UnsupportedPng(format!("bit depth {:?}", info.bit_depth)).into());
        }
        let channels = match info.color_type {
            png::ColorType::Grayscale => 1,
            png::ColorType::GrayscaleAlpha => 2,
            png::ColorType::Rgb => 3,
            png::ColorType::Rgba => 4,
            png::ColorType::Indexed => {
                return Err(RasterError::UnsupportedPng("unexpanded palette".into()).into())
            }
        };

        let mut pixmap = new_pixmap(info.width, info.height)?;
        let src = buf[..info.buffer_size()].chunks_exact(channels);
        for (dst, px) in pixmap.pixels_mut().iter_mut().zip(src) {
            let (r, g, b, a) = match *px {
                [v] => (v, v, v, 255),
                [v, a] => (v, v, v, a),
                [r, g, b] => (r, g, b, 255),
                [r, g, b, a] => (r, g, b, a),
                _ => (0, 0, 0, 0),
            };
            *dst = tiny_skia::ColorU8::from_rgba(r, g, b, a).premultiply();
        }
        Ok(Self { pixmap })
    }

    /// Draws `overlay` over this image, source-over, at the origin.
    pub(crate) fn draw_over(&mut self, overlay: &RasterImage) {
        self.pixmap.draw_pixmap(
            0,
            0,
            overlay.pixmap.as_ref(),
            &tiny_skia::PixmapPaint::default(),
            tiny_skia::Transform::identity(),
            None,
        );
    }
}

/// Rasterizes the print form of a scene.
///
/// The interactive-only parts of the scene are stripped first (see
/// [`strip_for_export`]), then the vector serialization is rendered onto
/// an opaque white background at `params.scale` pixels per plan unit.
#[derive(Debug, Clone, Copy)]
pub struct Rasterize<'a> {
    scene: &'a Scene,
    params: RasterParams,
}

impl<'a> Rasterize<'a> {
    #[must_use]
    pub fn new(scene: &'a Scene, params: RasterParams) -> Self {
        Self { scene, params }
    }

    /// Renders the image.
    ///
    /// # Errors
    ///
    /// Returns `InputError::InvalidParameter` for a zero scale and
    /// `RasterError` if rendering fails.
    pub fn execute(&self) -> Result<RasterImage> {
        let print = strip_for_export(self.scene, self.params.include_furniture);
        rasterize_svg(&to_svg(&print), self.params.scale)
    }
}

/// Renders SVG markup at `scale` pixels per user unit onto white.
///
/// A document without a usable size renders at the fallback size.
///
/// # Errors
///
/// Returns `InputError::InvalidParameter` for a zero scale,
/// `RasterError::Parse` for markup `usvg` rejects and
/// `RasterError::Allocation` when the pixmap would exceed [`MAX_PIXELS`]
/// or cannot be created.
pub fn rasterize_svg(svg: &str, scale: u32) -> Result<RasterImage> {
    if scale == 0 {
        return Err(InputError::InvalidParameter("raster scale must be at least 1".into()).into());
    }
    let options = usvg::Options {
        fontdb: font_database(),
        ..usvg::Options::default()
    };
    let tree = usvg::Tree::from_str(svg, &options).map_err(|e| RasterError::Parse(e.to_string()))?;

    let size = tree.size();
    let sized = size.width() > 0.0 && size.height() > 0.0;
    let (natural_w, natural_h) = if sized {
        (f64::from(size.width()), f64::from(size.height()))
    } else {
        FALLBACK_SIZE
    };
    let width = pixel_extent(natural_w, scale);
    let height = pixel_extent(natural_h, scale);

    let mut pixmap = new_pixmap(width, height)?;
    pixmap.fill(tiny_skia::Color::WHITE);
    #[allow(clippy::cast_precision_loss)]
    let transform = if sized {
        tiny_skia::Transform::from_scale(
            width as f32 / size.width(),
            height as f32 / size.height(),
        )
    } else {
        tiny_skia::Transform::from_scale(scale as f32, scale as f32)
    };
    resvg::render(&tree, transform, &mut pixmap.as_mut());
    debug!(width, height, scale, "scene rasterized");
    Ok(RasterImage { pixmap })
}

/// Largest pixmap, in pixels, that is ever allocated (1 GiB of RGBA).
pub const MAX_PIXELS: u64 = 1 << 28;

fn new_pixmap(width: u32, height: u32) -> Result<tiny_skia::Pixmap> {
    let too_large = u64::from(width) * u64::from(height) > MAX_PIXELS;
    let pixmap = if too_large {
        None
    } else {
        tiny_skia::Pixmap::new(width, height)
    };
    pixmap.ok_or_else(|| {
        warn!(width, height, "raster size refused");
        RasterError::Allocation { width, height }.into()
    })
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn pixel_extent(natural: f64, scale: u32) -> u32 {
    (natural * f64::from(scale)).round().clamp(1.0, f64::from(u32::MAX)) as u32
}

/// System fonts, loaded once per process.
fn font_database() -> Arc<usvg::fontdb::Database> {
    static FONTS: OnceLock<Arc<usvg::fontdb::Database>> = OnceLock::new();
    FONTS
        .get_or_init(|| {
            let mut db = usvg::fontdb::Database::new();
            db.load_system_fonts();
            debug!(faces = db.len(), "font database loaded");
            Arc::new(db)
        })
        .clone()
}
