//! Page export to image formats.
//!
//! Renders a [`PageState`] as the user sees it with nothing selected: every
//! element in its preview variant, in paint order. The page is first written
//! as SVG and then rasterized with resvg/tiny-skia.

use std::fmt::Write;
use std::path::Path;

use base64::Engine;
use image::ImageEncoder;
use slide_core::{Element, ImageElement, LineElement, PageState, StageSize, TextElement};

use crate::error::{RenderError, RenderResult};
use crate::layout::wrap;

/// Export output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    /// PNG image.
    Png,
    /// JPEG image.
    Jpeg,
    /// SVG markup as UTF-8 bytes.
    Svg,
}

/// Configuration for page export.
#[derive(Debug, Clone)]
pub struct ExportConfig {
    /// Canvas size in page units.
    pub stage: StageSize,
    /// Pixel ratio of the output (e.g. 2.0 for retina).
    pub scale: f32,
    /// Background color as RGBA bytes.
    pub background: [u8; 4],
    /// JPEG quality 1-100.
    pub jpeg_quality: u8,
    /// Load system fonts before rasterizing text.
    pub load_system_fonts: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            stage: StageSize::default(),
            scale: 1.0,
            background: [255, 255, 255, 255],
            jpeg_quality: 85,
            load_system_fonts: true,
        }
    }
}

/// Exports a [`PageState`] to image formats.
#[derive(Debug, Clone)]
pub struct SlideExporter {
    config: ExportConfig,
}

impl SlideExporter {
    /// Create a new exporter with the given configuration.
    #[must_use]
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    /// Create an exporter with default configuration.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self::new(ExportConfig::default())
    }

    /// Export a page to the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if the page cannot be rendered or encoded.
    pub fn export(&self, page: &PageState, format: ExportFormat) -> RenderResult<Vec<u8>> {
        match format {
            ExportFormat::Png => self.render_to_png(page),
            ExportFormat::Jpeg => self.render_to_jpeg(page),
            ExportFormat::Svg => Ok(self.render_to_svg(page).into_bytes()),
        }
    }

    /// Export the page to PNG bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if rasterizing or encoding fails.
    pub fn render_to_png(&self, page: &PageState) -> RenderResult<Vec<u8>> {
        let pixmap = self.rasterize(&self.render_to_svg(page))?;
        pixmap
            .encode_png()
            .map_err(|e| RenderError::Encode(format!("PNG encoding failed: {e}")))
    }

    /// Export the page to JPEG bytes, flattened onto the background color.
    ///
    /// # Errors
    ///
    /// Returns an error if rasterizing or encoding fails.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn render_to_jpeg(&self, page: &PageState) -> RenderResult<Vec<u8>> {
        let pixmap = self.rasterize(&self.render_to_svg(page))?;

        let (width, height) = (pixmap.width(), pixmap.height());
        let bg = &self.config.background;
        let mut rgb = Vec::with_capacity((width * height * 3) as usize);
        for pixel in pixmap.pixels() {
            let color = pixel.demultiply();
            let alpha = f32::from(color.alpha()) / 255.0;
            let inv = 1.0 - alpha;
            for (channel, back) in [color.red(), color.green(), color.blue()].into_iter().zip(bg) {
                rgb.push(f32::from(channel).mul_add(alpha, f32::from(*back) * inv) as u8);
            }
        }

        let mut buf = std::io::Cursor::new(Vec::new());
        image::codecs::jpeg::JpegEncoder::new_with_quality(&mut buf, self.config.jpeg_quality)
            .write_image(&rgb, width, height, image::ColorType::Rgb8.into())
            .map_err(|e| RenderError::Encode(format!("JPEG encoding failed: {e}")))?;
        Ok(buf.into_inner())
    }

    /// PNG export wrapped in a `data:` URL, ready for a download link.
    ///
    /// # Errors
    ///
    /// Returns an error if PNG export fails.
    pub fn png_data_url(&self, page: &PageState) -> RenderResult<String> {
        let png = self.render_to_png(page)?;
        let encoded = base64::engine::general_purpose::STANDARD.encode(png);
        Ok(format!("data:image/png;base64,{encoded}"))
    }

    /// Write a PNG export to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if export or the write fails.
    pub fn write_png(&self, page: &PageState, path: impl AsRef<Path>) -> RenderResult<()> {
        let png = self.render_to_png(page)?;
        std::fs::write(path.as_ref(), png)?;
        tracing::info!(path = %path.as_ref().display(), "wrote page export");
        Ok(())
    }

    /// Render the page as SVG markup.
    #[must_use]
    pub fn render_to_svg(&self, page: &PageState) -> String {
        let (out_w, out_h) = self.output_dimensions();
        let StageSize { width, height } = self.config.stage;

        let mut svg = String::with_capacity(4096);
        let _ = write!(
            svg,
            "<svg xmlns=\"http://www.w3.org/2000/svg\" width=\"{out_w}\" height=\"{out_h}\" viewBox=\"0 0 {width} {height}\">",
        );

        let bg = &self.config.background;
        let bg_alpha = f32::from(bg[3]) / 255.0;
        let _ = write!(
            svg,
            "<rect width=\"100%\" height=\"100%\" fill=\"rgba({},{},{},{})\"/>",
            bg[0], bg[1], bg[2], bg_alpha,
        );

        for element in page.elements() {
            match &element {
                Element::Text(text) => render_text_svg(&mut svg, text),
                Element::Image(image) => render_image_svg(&mut svg, image),
                Element::Line(line) => render_line_svg(&mut svg, line),
            }
        }

        svg.push_str("</svg>");
        tracing::debug!(elements = page.element_count(), "rendered page svg");
        svg
    }

    /// Output dimensions (width, height) in pixels.
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    fn output_dimensions(&self) -> (u32, u32) {
        let scale = f64::from(self.config.scale);
        let out_w = (self.config.stage.width.max(1.0) * scale).round() as u32;
        let out_h = (self.config.stage.height.max(1.0) * scale).round() as u32;
        (out_w.max(1), out_h.max(1))
    }

    /// Rasterize an SVG string to a tiny-skia Pixmap.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    fn rasterize(&self, svg_string: &str) -> RenderResult<tiny_skia::Pixmap> {
        let mut opt = usvg::Options::default();
        if self.config.load_system_fonts {
            opt.fontdb_mut().load_system_fonts();
        }
        let tree = usvg::Tree::from_str(svg_string, &opt)
            .map_err(|e| RenderError::Svg(e.to_string()))?;

        let px_w = tree.size().width().round() as u32;
        let px_h = tree.size().height().round() as u32;

        let mut pixmap = tiny_skia::Pixmap::new(px_w.max(1), px_h.max(1))
            .ok_or_else(|| RenderError::Raster(format!("cannot allocate {px_w}x{px_h} pixmap")))?;

        resvg::render(&tree, tiny_skia::Transform::default(), &mut pixmap.as_mut());

        Ok(pixmap)
    }
}

impl Default for SlideExporter {
    fn default() -> Self {
        Self::with_defaults()
    }
}

/// Text box: wrapped lines, each vertically centred in its line box.
fn render_text_svg(svg: &mut String, text: &TextElement) {
    let layout = wrap(
        &text.text,
        text.width,
        text.font_size,
        text.line_height,
        text.is_bold,
    );
    let weight = if text.is_bold { "bold" } else { "normal" };
    let _ = write!(
        svg,
        "<text font-size=\"{}\" font-weight=\"{weight}\" font-family=\"sans-serif\" fill=\"black\" dominant-baseline=\"central\" xml:space=\"preserve\">",
        text.font_size,
    );
    let mut line_top = text.y;
    for line in &layout.lines {
        let center = line_top + layout.line_height_px / 2.0;
        let _ = write!(
            svg,
            "<tspan x=\"{}\" y=\"{center}\">{}</tspan>",
            text.x,
            escape_xml(line),
        );
        line_top += layout.line_height_px;
    }
    svg.push_str("</text>");
}

/// Image stretched to its box.
fn render_image_svg(svg: &mut String, image: &ImageElement) {
    let _ = write!(
        svg,
        "<image x=\"{}\" y=\"{}\" width=\"{}\" height=\"{}\" preserveAspectRatio=\"none\" href=\"{}\"/>",
        image.x,
        image.y,
        image.width,
        image.height,
        escape_xml(&image.src),
    );
}

/// Horizontal stroke starting at the element's origin.
fn render_line_svg(svg: &mut String, line: &LineElement) {
    let _ = write!(
        svg,
        "<line x1=\"{}\" y1=\"{}\" x2=\"{}\" y2=\"{}\" stroke=\"{}\" stroke-width=\"{}\"/>",
        line.x,
        line.y,
        line.x + line.width,
        line.y,
        line.stroke.as_css(),
        line.height,
    );
}

/// Escape special XML characters.
fn escape_xml(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}
