//! printpdf backend for the `Canvas` abstraction.
//!
//! Converts the renderer's top-down mm coordinates to PDF bottom-up
//! space and embeds bitmaps as raw RGB xobjects sized via DPI.

use crate::error::{Result, VisitReportError};
use printpdf::path::{PaintMode, WindingOrder};
use printpdf::*;
use std::fs::File;
use std::io::BufWriter;
use std::path::Path;
use visit_report_common::layout::{A4_HEIGHT_MM, A4_WIDTH_MM};
use visit_report_common::{Canvas, FontStyle, RgbBitmap};

pub struct PdfCanvas {
    doc: PdfDocumentReference,
    current_layer: PdfLayerReference,
    font_regular: IndirectFontRef,
    font_bold: IndirectFontRef,
}

impl PdfCanvas {
    pub fn new(title: &str) -> Result<Self> {
        let (doc, page1, layer1) = PdfDocument::new(
            title,
            Mm(A4_WIDTH_MM),
            Mm(A4_HEIGHT_MM),
            "Layer 1",
        );

        let font_regular = doc
            .add_builtin_font(BuiltinFont::Helvetica)
            .map_err(|e| VisitReportError::PdfGeneration(format!("font error: {:?}", e)))?;
        let font_bold = doc
            .add_builtin_font(BuiltinFont::HelveticaBold)
            .map_err(|e| VisitReportError::PdfGeneration(format!("font error: {:?}", e)))?;

        let current_layer = doc.get_page(page1).get_layer(layer1);

        Ok(Self {
            doc,
            current_layer,
            font_regular,
            font_bold,
        })
    }

    pub fn save(self, output_path: &Path) -> Result<()> {
        let file = File::create(output_path)?;
        let mut writer = BufWriter::new(file);
        self.doc
            .save(&mut writer)
            .map_err(|e| VisitReportError::PdfGeneration(format!("save error: {:?}", e)))?;
        Ok(())
    }

    fn font_for(&self, style: FontStyle) -> &IndirectFontRef {
        match style {
            FontStyle::Regular => &self.font_regular,
            FontStyle::Bold => &self.font_bold,
        }
    }
}

impl Canvas for PdfCanvas {
    fn page_size_mm(&self) -> (f32, f32) {
        (A4_WIDTH_MM, A4_HEIGHT_MM)
    }

    fn new_page(&mut self) {
        let (page, layer) = self
            .doc
            .add_page(Mm(A4_WIDTH_MM), Mm(A4_HEIGHT_MM), "Layer 1");
        self.current_layer = self.doc.get_page(page).get_layer(layer);
    }

    fn draw_text(&mut self, text: &str, size_pt: f32, x_mm: f32, y_mm: f32, style: FontStyle) {
        // a fill_rect may have left a light fill color behind
        self.current_layer
            .set_fill_color(Color::Rgb(Rgb::new(0.0, 0.0, 0.0, None)));
        self.current_layer.use_text(
            text,
            size_pt,
            Mm(x_mm),
            Mm(A4_HEIGHT_MM - y_mm),
            self.font_for(style),
        );
    }

    fn draw_image(&mut self, bitmap: &RgbBitmap, x_mm: f32, y_mm: f32, w_mm: f32, h_mm: f32) {
        let image = Image::from(ImageXObject {
            width: Px(bitmap.width as usize),
            height: Px(bitmap.height as usize),
            color_space: ColorSpace::Rgb,
            bits_per_component: ColorBits::Bit8,
            interpolate: true,
            image_data: bitmap.data.clone(),
            image_filter: None,
            clipping_bbox: None,
            smask: None,
        });

        // DPI that makes the bitmap exactly w_mm wide; the caller's box
        // matches the bitmap aspect, so h_mm follows.
        let dpi = bitmap.width as f32 / (w_mm / 25.4);
        image.add_to_layer(
            self.current_layer.clone(),
            ImageTransform {
                translate_x: Some(Mm(x_mm)),
                translate_y: Some(Mm(A4_HEIGHT_MM - y_mm - h_mm)),
                dpi: Some(dpi),
                ..Default::default()
            },
        );
    }

    fn fill_rect(&mut self, x_mm: f32, y_mm: f32, w_mm: f32, h_mm: f32, gray: f32) {
        let top = A4_HEIGHT_MM - y_mm;
        let bottom = top - h_mm;
        let rect = Polygon {
            rings: vec![vec![
                (Point::new(Mm(x_mm), Mm(bottom)), false),
                (Point::new(Mm(x_mm + w_mm), Mm(bottom)), false),
                (Point::new(Mm(x_mm + w_mm), Mm(top)), false),
                (Point::new(Mm(x_mm), Mm(top)), false),
            ]],
            mode: PaintMode::Fill,
            winding_order: WindingOrder::NonZero,
        };
        self.current_layer
            .set_fill_color(Color::Rgb(Rgb::new(gray, gray, gray, None)));
        self.current_layer.add_polygon(rect);
    }
}
