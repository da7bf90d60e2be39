//! Renderer-facing abstractions.
//!
//! The layout engine never talks to a PDF library directly: it measures text
//! through [`Measure`] and records [`DrawCommand`]s into [`Page`]s. A
//! [`PageSink`] implementation replays those commands into an actual
//! document backend. `measure()` must be implemented with the exact metrics
//! the backend draws with, otherwise wrapping and rendering diverge.

use crate::error::Error;
use crate::fonts::Font;

/// Text measurement, shared by layout and drawing.
pub trait Measure {
    /// Width in points of `text` set in `font` at `size`.
    fn measure(&self, text: &str, font: Font, size: f32) -> f32;
}

/// Primitive drawing operations a renderer exposes.
///
/// Coordinates are top-down: `y` grows toward the bottom of the page, and
/// text positions name the baseline. Backends convert to their native
/// coordinate space.
pub trait PageSink: Measure {
    fn begin_page(&mut self);
    fn draw_text(&mut self, cmd: &TextCommand);
    fn draw_line(&mut self, cmd: &LineCommand);
    fn draw_rect(&mut self, cmd: &RectCommand);
    fn draw_image(&mut self, cmd: &ImageCommand);
    fn end_page(&mut self);
    /// Serialize everything drawn so far into the final byte artifact.
    fn serialize(&mut self) -> Result<Vec<u8>, Error>;
}

/// A single page of recorded draw commands.
///
/// Commands are appended during the content pass; the stamp pass appends
/// footer/watermark overlays but never rewrites what the content pass
/// produced.
#[derive(Clone, Debug)]
pub struct Page {
    pub index: usize,
    pub commands: Vec<DrawCommand>,
}

impl Page {
    pub(crate) fn new(index: usize) -> Self {
        Page {
            index,
            commands: Vec::new(),
        }
    }
}

#[derive(Clone, Debug)]
pub enum DrawCommand {
    Text(TextCommand),
    Line(LineCommand),
    Rect(RectCommand),
    Image(ImageCommand),
}

#[derive(Clone, Debug)]
pub struct TextCommand {
    pub x: f32,
    /// Baseline position, top-down.
    pub y: f32,
    pub text: String,
    pub font: Font,
    pub size: f32,
    pub color: [u8; 3],
    /// Counter-clockwise rotation in degrees around the baseline origin.
    pub angle_deg: f32,
}

#[derive(Clone, Debug)]
pub struct LineCommand {
    pub x1: f32,
    pub y1: f32,
    pub x2: f32,
    pub y2: f32,
    pub width: f32,
    pub color: [u8; 3],
}

#[derive(Clone, Debug)]
pub struct RectCommand {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub fill: [u8; 3],
}

#[derive(Clone, Debug)]
pub struct ImageCommand {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub image: EmbeddedImage,
}

/// A decoded raster image ready for embedding.
///
/// Decoding happens before any layout decision that depends on the image,
/// so the pagination pass stays deterministic and asset failures can fall
/// back to a placeholder without aborting generation.
#[derive(Clone, Debug)]
pub struct EmbeddedImage {
    pub pixel_width: u32,
    pub pixel_height: u32,
    /// Raw 8-bit RGB samples, row-major.
    pub rgb: Vec<u8>,
    /// Raw 8-bit alpha samples when the source has transparency.
    pub alpha: Option<Vec<u8>>,
}

impl EmbeddedImage {
    /// Decode PNG bytes into embeddable samples.
    pub fn decode_png(bytes: &[u8]) -> Result<EmbeddedImage, String> {
        let cursor = std::io::Cursor::new(bytes);
        let reader = image::ImageReader::with_format(
            std::io::BufReader::new(cursor),
            image::ImageFormat::Png,
        );
        let decoded = reader.decode().map_err(|e| e.to_string())?;
        let rgba: image::RgbaImage = decoded.to_rgba8();
        let (w, h) = (rgba.width(), rgba.height());
        let has_alpha = rgba.pixels().any(|p| p.0[3] < 255);

        let rgb: Vec<u8> = rgba.pixels().flat_map(|p| [p.0[0], p.0[1], p.0[2]]).collect();
        let alpha = if has_alpha {
            Some(rgba.pixels().map(|p| p.0[3]).collect())
        } else {
            None
        };

        Ok(EmbeddedImage {
            pixel_width: w,
            pixel_height: h,
            rgb,
            alpha,
        })
    }
}
