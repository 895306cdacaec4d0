//! Canvas encoding to PNG, WebP and PDF files

use crate::chart::canvas::Canvas;
use crate::io::configuration::OutputFormat;
use crate::io::error::{ChartError, Result};
use crate::math::units::pixels_to_mm;
use image::codecs::png::{CompressionType, FilterType, PngEncoder};
use image::codecs::webp::WebPEncoder;
use image::{ExtendedColorType, ImageEncoder};
use std::path::{Path, PathBuf};
use tracing::{error, info};

/// Outcome of exporting every enabled format
#[derive(Debug, Default)]
pub struct ExportReport {
    /// Files written successfully
    pub written: Vec<(OutputFormat, PathBuf)>,
    /// Formats that failed, with the reason
    pub failures: Vec<(OutputFormat, ChartError)>,
}

impl ExportReport {
    /// Whether every attempted format was written
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }

    /// Number of formats attempted
    pub fn attempted(&self) -> usize {
        self.written.len() + self.failures.len()
    }

    /// Convert collected failures into a single error
    ///
    /// # Errors
    ///
    /// Returns `ExportIncomplete` if any format failed
    pub fn into_result(self) -> Result<Vec<(OutputFormat, PathBuf)>> {
        if self.failures.is_empty() {
            Ok(self.written)
        } else {
            Err(ChartError::ExportIncomplete {
                failed: self.failures.len(),
                attempted: self.attempted(),
            })
        }
    }
}

/// `<dir>/<name>.<extension>`
pub fn output_path(dir: &Path, name: &str, format: OutputFormat) -> PathBuf {
    dir.join(format!("{name}.{}", format.extension()))
}

/// Encode the canvas in `format`
///
/// # Errors
///
/// Returns an error if the encoder or PDF builder rejects the canvas
pub fn encode(canvas: &Canvas, format: OutputFormat, dpi: u32, path: &Path) -> Result<Vec<u8>> {
    match format {
        OutputFormat::Png => {
            let (samples, color) = canvas.as_samples();
            encode_png(samples, canvas.dimensions(), color, path)
        }
        OutputFormat::Webp => {
            let (samples, color) = canvas.as_samples();
            let (width, height) = canvas.dimensions();
            let mut buf = Vec::new();
            WebPEncoder::new_lossless(&mut buf)
                .write_image(samples, width, height, color)
                .map_err(|e| ChartError::ImageExport {
                    path: path.to_path_buf(),
                    source: e,
                })?;
            Ok(buf)
        }
        OutputFormat::Pdf => encode_pdf(canvas, dpi, path),
    }
}

fn encode_png(
    samples: &[u8],
    (width, height): (u32, u32),
    color: ExtendedColorType,
    path: &Path,
) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    PngEncoder::new_with_quality(&mut buf, CompressionType::Best, FilterType::Adaptive)
        .write_image(samples, width, height, color)
        .map_err(|e| ChartError::ImageExport {
            path: path.to_path_buf(),
            source: e,
        })?;
    Ok(buf)
}

fn encode_pdf(canvas: &Canvas, dpi: u32, path: &Path) -> Result<Vec<u8>> {
    let rgb = canvas.to_rgb();
    let (width, height) = rgb.dimensions();
    let png = encode_png(rgb.as_raw(), (width, height), ExtendedColorType::Rgb8, path)?;

    let document_error = |reason: String| ChartError::DocumentExport {
        path: path.to_path_buf(),
        reason,
    };

    // printpdf bundles its own image crate version, so hand it encoded bytes
    let decoded = printpdf::image_crate::load_from_memory(&png)
        .map_err(|e| document_error(format!("failed to decode raster for PDF: {e}")))?;
    let pdf_image = printpdf::Image::from_dynamic_image(&decoded);

    let page_width = printpdf::Mm(pixels_to_mm(dpi, width) as f32);
    let page_height = printpdf::Mm(pixels_to_mm(dpi, height) as f32);
    let (doc, page, layer) =
        printpdf::PdfDocument::new("Eye Chart", page_width, page_height, "Chart");
    let current_layer = doc.get_page(page).get_layer(layer);

    pdf_image.add_to_layer(
        current_layer,
        printpdf::ImageTransform {
            translate_x: Some(printpdf::Mm(0.0)),
            translate_y: Some(printpdf::Mm(0.0)),
            dpi: Some(dpi as f32),
            ..Default::default()
        },
    );

    doc.save_to_bytes()
        .map_err(|e| document_error(format!("PDF save failed: {e}")))
}

/// Encode and write one format
///
/// # Errors
///
/// Returns an error if encoding fails or the file cannot be written
pub fn write_format(canvas: &Canvas, format: OutputFormat, dpi: u32, path: &Path) -> Result<()> {
    let bytes = encode(canvas, format, dpi, path)?;

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| ChartError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }

    std::fs::write(path, bytes).map_err(|e| ChartError::FileSystem {
        path: path.to_path_buf(),
        operation: "write",
        source: e,
    })
}

/// Write one file per enabled format, attempting every format even after a failure
pub fn export_canvas(
    canvas: &Canvas,
    dpi: u32,
    formats: &[OutputFormat],
    dir: &Path,
    name: &str,
) -> ExportReport {
    let mut report = ExportReport::default();

    for &format in formats {
        let path = output_path(dir, name, format);
        match write_format(canvas, format, dpi, &path) {
            Ok(()) => {
                info!("Saved eye chart as '{}'", path.display());
                report.written.push((format, path));
            }
            Err(e) => {
                error!("Could not save {format}: {e}");
                report.failures.push((format, e));
            }
        }
    }

    report
}
