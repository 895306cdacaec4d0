//! Tests for PNG, WebP and PDF export

#[cfg(test)]
mod tests {
    use eyechart::ChartError;
    use eyechart::chart::canvas::{BLACK, Canvas};
    use eyechart::io::configuration::{ColorMode, OutputFormat};
    use eyechart::io::export::{encode, export_canvas, output_path, write_format};
    use std::path::{Path, PathBuf};

    fn sample_canvas(mode: ColorMode) -> Canvas {
        let mut canvas = Canvas::new(32, mode);
        canvas.fill_rect(4, 4, 8, 8, BLACK);
        canvas
    }

    // Tests output names combine directory, stem and extension
    // Verified by dropping the extension
    #[test]
    fn test_output_path() {
        assert_eq!(
            output_path(Path::new("out"), "eye_chart", OutputFormat::Webp),
            PathBuf::from("out/eye_chart.webp")
        );
    }

    // Tests PNG output decodes back to the same pixels
    // Verified by encoding an empty buffer
    #[test]
    fn test_png_is_lossless() {
        let canvas = sample_canvas(ColorMode::Grayscale);
        let Ok(bytes) = encode(&canvas, OutputFormat::Png, 72, Path::new("mem.png")) else {
            unreachable!("PNG encoding should succeed");
        };
        let Ok(decoded) = image::load_from_memory(&bytes) else {
            unreachable!("PNG should decode");
        };
        let gray = decoded.to_luma8();
        assert_eq!(gray.dimensions(), (32, 32));
        assert_eq!(gray.get_pixel(5, 5).0[0], 0);
        assert_eq!(gray.get_pixel(20, 20).0[0], 255);
    }

    // Tests WebP output is lossless
    // Verified by switching to a lossy encoder
    #[test]
    fn test_webp_is_lossless() {
        let canvas = sample_canvas(ColorMode::Rgb);
        let Ok(bytes) = encode(&canvas, OutputFormat::Webp, 72, Path::new("mem.webp")) else {
            unreachable!("WebP encoding should succeed");
        };
        let Ok(decoded) = image::load_from_memory(&bytes) else {
            unreachable!("WebP should decode");
        };
        assert_eq!(decoded.to_rgb8(), canvas.to_rgb());
    }

    // Tests PDF output carries the document header
    // Verified by returning the raster bytes
    #[test]
    fn test_pdf_header() {
        let canvas = sample_canvas(ColorMode::Grayscale);
        let Ok(bytes) = encode(&canvas, OutputFormat::Pdf, 72, Path::new("mem.pdf")) else {
            unreachable!("PDF encoding should succeed");
        };
        assert!(bytes.starts_with(b"%PDF"));
    }

    // Tests every enabled format is written to disk
    // Verified by stopping after the first format
    #[test]
    fn test_export_all_formats() {
        let Ok(dir) = tempfile::tempdir() else {
            unreachable!("tempdir should be creatable");
        };
        let canvas = sample_canvas(ColorMode::Grayscale);
        let report = export_canvas(&canvas, 72, &OutputFormat::ALL, dir.path(), "chart");

        assert!(report.is_complete());
        assert_eq!(report.attempted(), 3);
        for format in OutputFormat::ALL {
            assert!(output_path(dir.path(), "chart", format).is_file());
        }
    }

    // Tests a failing format does not stop the others
    // Verified by returning on the first error
    #[test]
    fn test_export_continues_after_failure() {
        let Ok(dir) = tempfile::tempdir() else {
            unreachable!("tempdir should be creatable");
        };
        // A directory where the PNG file should go makes that write fail
        let blocked = output_path(dir.path(), "chart", OutputFormat::Png);
        if std::fs::create_dir_all(&blocked).is_err() {
            unreachable!("blocking directory should be creatable");
        }

        let canvas = sample_canvas(ColorMode::Rgb);
        let report = export_canvas(
            &canvas,
            72,
            &[OutputFormat::Png, OutputFormat::Webp],
            dir.path(),
            "chart",
        );

        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.written.len(), 1);
        assert!(output_path(dir.path(), "chart", OutputFormat::Webp).is_file());
        assert!(matches!(
            report.into_result(),
            Err(ChartError::ExportIncomplete {
                failed: 1,
                attempted: 2
            })
        ));
    }

    // Tests missing parent directories are created
    // Verified by skipping directory creation
    #[test]
    fn test_write_format_creates_parent() {
        let Ok(dir) = tempfile::tempdir() else {
            unreachable!("tempdir should be creatable");
        };
        let path = dir.path().join("nested/deeper/chart.png");
        let canvas = sample_canvas(ColorMode::Grayscale);
        assert!(write_format(&canvas, OutputFormat::Png, 72, &path).is_ok());
        assert!(path.is_file());
    }
}
