//! Tests for error types including source chaining and message formatting

#[cfg(test)]
mod tests {
    use eyechart::ChartError;
    use eyechart::io::error::invalid_parameter;
    use std::error::Error;
    use std::path::PathBuf;

    // Tests error source chaining works correctly
    // Verified by breaking source chain
    #[test]
    fn test_error_source_chain() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error = ChartError::FileSystem {
            path: "/tmp/chart.png".into(),
            operation: "write",
            source: io_error,
        };

        assert!(error.source().is_some());
        assert!(error.to_string().contains("write"));
    }

    // Tests InvalidParameter error contains all fields
    // Verified by omitting value from message
    #[test]
    fn test_invalid_parameter_error() {
        let error = invalid_parameter("dpi", &0, &"must be positive");

        let message = error.to_string();
        assert!(message.contains("dpi"));
        assert!(message.contains('0'));
        assert!(message.contains("must be positive"));
        assert!(error.source().is_none());
    }

    // Tests pool errors describe the shortfall
    // Verified by swapping available and required
    #[test]
    fn test_pool_errors() {
        let insufficient = ChartError::InsufficientPool {
            available: 5,
            required: 8,
        };
        assert_eq!(
            insufficient.to_string(),
            "Letter pool has 5 distinct letter(s) but 8 are required"
        );

        let empty = ChartError::EmptyImagePool { attempted: 3 };
        assert!(empty.to_string().contains('3'));
        assert!(empty.is_configuration());
    }

    // Tests ImageExport error with IO source
    // Verified by excluding source error from message
    #[test]
    fn test_image_export_error() {
        let image_error = image::ImageError::IoError(std::io::Error::new(
            std::io::ErrorKind::PermissionDenied,
            "access denied",
        ));
        let error = ChartError::ImageExport {
            path: PathBuf::from("/readonly/chart.webp"),
            source: image_error,
        };

        let message = error.to_string();
        assert!(message.contains("/readonly/chart.webp"));
        assert!(message.contains("access denied"));
        assert!(error.source().is_some());
        assert!(!error.is_configuration());
    }

    // Tests conversions from library errors
    // Verified by dropping the From implementations
    #[test]
    fn test_from_conversions() {
        let from_io: ChartError = std::io::Error::other("boom").into();
        assert!(matches!(from_io, ChartError::FileSystem { .. }));

        let from_image: ChartError = image::ImageError::IoError(std::io::Error::other("bad")).into();
        assert!(matches!(from_image, ChartError::ImageLoad { .. }));
    }

    // Tests export summary formatting
    // Verified by omitting attempted count
    #[test]
    fn test_export_incomplete_message() {
        let error = ChartError::ExportIncomplete {
            failed: 1,
            attempted: 3,
        };
        assert_eq!(error.to_string(), "1 of 3 output format(s) failed to export");
    }
}
