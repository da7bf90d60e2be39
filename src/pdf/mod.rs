//! PDF backend: a [`PageSink`] implementation over `pdf-writer`, and the
//! assembler that replays finished pages into it.
//!
//! The sink registers the four base Type1 fonts with WinAnsi encoding and
//! measures with the same width tables the drawing path encodes with.
//! Content streams are Flate-compressed; PNG images become RGB XObjects
//! with an SMask when the source carries alpha.

use pdf_writer::{Content, Filter, Name, Pdf, Rect, Ref, Str};

use crate::error::Error;
use crate::fonts::{self, Font};
use crate::layout::{Layout, PageGeometry};
use crate::sink::{
    DrawCommand, EmbeddedImage, ImageCommand, LineCommand, Measure, PageSink, RectCommand,
    TextCommand,
};

pub struct PdfSink {
    geometry: PageGeometry,
    current: Option<Content>,
    finished: Vec<Content>,
    images: Vec<EmbeddedImage>,
}

impl PdfSink {
    pub fn new(geometry: PageGeometry) -> Self {
        PdfSink {
            geometry,
            current: None,
            finished: Vec::new(),
            images: Vec::new(),
        }
    }

    fn content(&mut self) -> &mut Content {
        self.current.as_mut().expect("page begun")
    }

    fn set_fill(content: &mut Content, color: [u8; 3]) {
        if color == [0, 0, 0] {
            content.set_fill_gray(0.0);
        } else {
            content.set_fill_rgb(
                color[0] as f32 / 255.0,
                color[1] as f32 / 255.0,
                color[2] as f32 / 255.0,
            );
        }
    }
}

impl Measure for PdfSink {
    fn measure(&self, text: &str, font: Font, size: f32) -> f32 {
        fonts::text_width(text, font, size)
    }
}

impl PageSink for PdfSink {
    fn begin_page(&mut self) {
        self.current = Some(Content::new());
    }

    fn draw_text(&mut self, cmd: &TextCommand) {
        let bytes = fonts::to_winansi_bytes(&cmd.text);
        if bytes.is_empty() {
            return;
        }
        let page_h = self.geometry.height;
        let colored = cmd.color != [0, 0, 0];
        let rotated = cmd.angle_deg != 0.0;
        let content = self.content();
        if colored || rotated {
            content.save_state();
        }
        if rotated {
            // rotate the whole text object around the baseline origin
            let rad = cmd.angle_deg.to_radians();
            let (sin, cos) = (rad.sin(), rad.cos());
            content.transform([cos, sin, -sin, cos, cmd.x, page_h - cmd.y]);
        }
        if colored {
            Self::set_fill(content, cmd.color);
        }
        content.begin_text();
        content.set_font(Name(cmd.font.resource_name().as_bytes()), cmd.size);
        if rotated {
            content.next_line(0.0, 0.0);
        } else {
            content.next_line(cmd.x, page_h - cmd.y);
        }
        content.show(Str(&bytes));
        content.end_text();
        if colored || rotated {
            content.restore_state();
        }
    }

    fn draw_line(&mut self, cmd: &LineCommand) {
        let page_h = self.geometry.height;
        let content = self.content();
        content.save_state();
        content.set_line_width(cmd.width);
        content.set_stroke_rgb(
            cmd.color[0] as f32 / 255.0,
            cmd.color[1] as f32 / 255.0,
            cmd.color[2] as f32 / 255.0,
        );
        content.move_to(cmd.x1, page_h - cmd.y1);
        content.line_to(cmd.x2, page_h - cmd.y2);
        content.stroke();
        content.restore_state();
    }

    fn draw_rect(&mut self, cmd: &RectCommand) {
        let page_h = self.geometry.height;
        let content = self.content();
        content.save_state();
        Self::set_fill(content, cmd.fill);
        content.rect(
            cmd.x,
            page_h - cmd.y - cmd.height,
            cmd.width,
            cmd.height,
        );
        content.fill_nonzero();
        content.restore_state();
    }

    fn draw_image(&mut self, cmd: &ImageCommand) {
        self.images.push(cmd.image.clone());
        let name = format!("Im{}", self.images.len());
        let page_h = self.geometry.height;
        let content = self.content();
        content.save_state();
        content.transform([
            cmd.width,
            0.0,
            0.0,
            cmd.height,
            cmd.x,
            page_h - cmd.y - cmd.height,
        ]);
        content.x_object(Name(name.as_bytes()));
        content.restore_state();
    }

    fn end_page(&mut self) {
        if let Some(content) = self.current.take() {
            self.finished.push(content);
        }
    }

    fn serialize(&mut self) -> Result<Vec<u8>, Error> {
        if self.current.is_some() {
            return Err(Error::Assembly("serialize called with an open page".into()));
        }
        if self.finished.is_empty() {
            return Err(Error::Assembly("no pages were drawn".into()));
        }

        let mut pdf = Pdf::new();
        let mut next_id = 1i32;
        let mut alloc = || {
            let r = Ref::new(next_id);
            next_id += 1;
            r
        };

        let catalog_id = alloc();
        let pages_id = alloc();

        let font_pairs: Vec<(&str, Ref)> = Font::ALL
            .iter()
            .map(|&font| {
                let font_ref = alloc();
                pdf.type1_font(font_ref)
                    .base_font(Name(font.base_name().as_bytes()))
                    .encoding_predefined(Name(b"WinAnsiEncoding"));
                (font.resource_name(), font_ref)
            })
            .collect();

        let mut image_pairs: Vec<(String, Ref)> = Vec::new();
        for (i, img) in self.images.iter().enumerate() {
            let w = i32::try_from(img.pixel_width)
                .map_err(|_| Error::Assembly("image width out of range".into()))?;
            let h = i32::try_from(img.pixel_height)
                .map_err(|_| Error::Assembly("image height out of range".into()))?;

            let smask_ref = match &img.alpha {
                Some(alpha) => {
                    let compressed = miniz_oxide::deflate::compress_to_vec_zlib(alpha, 6);
                    let mask_ref = alloc();
                    let mut mask = pdf.image_xobject(mask_ref, &compressed);
                    mask.filter(Filter::FlateDecode);
                    mask.width(w);
                    mask.height(h);
                    mask.color_space().device_gray();
                    mask.bits_per_component(8);
                    Some(mask_ref)
                }
                None => None,
            };

            let compressed = miniz_oxide::deflate::compress_to_vec_zlib(&img.rgb, 6);
            let xobj_ref = alloc();
            let mut xobj = pdf.image_xobject(xobj_ref, &compressed);
            xobj.filter(Filter::FlateDecode);
            xobj.width(w);
            xobj.height(h);
            xobj.color_space().device_rgb();
            xobj.bits_per_component(8);
            if let Some(mask_ref) = smask_ref {
                xobj.s_mask(mask_ref);
            }
            drop(xobj);

            image_pairs.push((format!("Im{}", i + 1), xobj_ref));
        }

        let contents = std::mem::take(&mut self.finished);
        let n = contents.len();
        let page_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();
        let content_ids: Vec<Ref> = (0..n).map(|_| alloc()).collect();

        for (i, content) in contents.into_iter().enumerate() {
            let raw = content.finish();
            let compressed = miniz_oxide::deflate::compress_to_vec_zlib(raw.as_slice(), 6);
            pdf.stream(content_ids[i], &compressed)
                .filter(Filter::FlateDecode);
        }

        pdf.catalog(catalog_id).pages(pages_id);
        pdf.pages(pages_id)
            .kids(page_ids.iter().copied())
            .count(n as i32);

        for i in 0..n {
            let mut page = pdf.page(page_ids[i]);
            page.media_box(Rect::new(0.0, 0.0, self.geometry.width, self.geometry.height))
                .parent(pages_id)
                .contents(content_ids[i]);
            let mut resources = page.resources();
            {
                let mut fonts = resources.fonts();
                for (name, font_ref) in &font_pairs {
                    fonts.pair(Name(name.as_bytes()), *font_ref);
                }
            }
            if !image_pairs.is_empty() {
                let mut xobjects = resources.x_objects();
                for (name, xobj_ref) in &image_pairs {
                    xobjects.pair(Name(name.as_bytes()), *xobj_ref);
                }
            }
        }

        Ok(pdf.finish())
    }
}

/// Replay finished pages into the sink and serialize the document.
pub fn assemble(layout: &Layout, sink: &mut dyn PageSink) -> Result<Vec<u8>, Error> {
    if layout.pages.is_empty() {
        return Err(Error::Assembly("layout produced no pages".into()));
    }
    for page in &layout.pages {
        sink.begin_page();
        for cmd in &page.commands {
            match cmd {
                DrawCommand::Text(t) => sink.draw_text(t),
                DrawCommand::Line(l) => sink.draw_line(l),
                DrawCommand::Rect(r) => sink.draw_rect(r),
                DrawCommand::Image(i) => sink.draw_image(i),
            }
        }
        sink.end_page();
    }
    sink.serialize()
}
