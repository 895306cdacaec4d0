//! Chart constants and the configuration value handed to the composer

use crate::io::error::{ChartError, Result, invalid_parameter};
use crate::math::units::inches_to_pixels;
use std::fmt;
use std::path::PathBuf;

// Print geometry defaults
/// Default print resolution in dots per inch
pub const DEFAULT_DPI: u32 = 1200;
/// Default physical edge length of the square chart
pub const DEFAULT_INCHES: f64 = 12.0;
/// Ring radius scaling factor per dot of resolution
pub const RADIUS_SCALING_PER_DPI: u32 = 6;
/// Divisor turning resolution into the element size scaling factor
pub const SIZE_SCALING_DIVISOR: u32 = 6;

// Safety limit to prevent excessive memory allocation
/// Maximum allowed canvas edge in pixels
pub const MAX_CANVAS_SIZE: u32 = 32_768;

// Ring layout
/// Elements evenly spaced around each ring
pub const DEFAULT_ELEMENTS_PER_RING: usize = 8;
/// Fractions of the radius scaling factor, innermost ring first
pub const RING_RADIUS_FRACTIONS: [f64; 4] = [0.1, 0.2, 0.4, 0.8];
/// Multiples of the size scaling factor, innermost ring first
pub const RING_SIZE_MULTIPLIERS: [f64; 4] = [1.0, 2.0, 4.0, 8.0];

// Element pools
/// Eye chart letters without visually confusable glyphs (no I, no Q)
pub const EYE_CHART_LETTERS: &str = "ABCDEFGHJKLMNOPRSTUVWXYZ";
/// Fixation marker drawn at the canvas midpoint
pub const DEFAULT_CENTER_GLYPH: &str = "X";
/// Preferred font file, looked up in the working and system font directories
pub const DEFAULT_FONT_FILE: &str = "DejaVuSans-Bold.ttf";
/// System directories searched for the preferred font
pub const FONT_SEARCH_DIRS: &[&str] = &[
    "/usr/share/fonts/truetype/dejavu",
    "/usr/share/fonts/dejavu",
    "/usr/share/fonts/TTF",
    "/usr/local/share/fonts",
    "/Library/Fonts",
    "C:\\Windows\\Fonts",
];

// Border
/// Default border thickness in millimetres
pub const DEFAULT_BORDER_MM: f64 = 1.0;
/// Default border gray level
pub const DEFAULT_BORDER_GRAY: u8 = 127;

/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;

// Output settings
/// File stem used for letter charts
pub const LETTER_CHART_NAME: &str = "eye_chart";
/// File stem used for thumbnail charts
pub const IMAGE_CHART_NAME: &str = "eye_chart_images";

/// Pixel layout of the canvas
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorMode {
    /// Single 8-bit luminance channel
    Grayscale,
    /// Three 8-bit color channels
    Rgb,
}

/// Output file encodings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum OutputFormat {
    /// Lossless PNG with maximum compression
    Png,
    /// Lossless WebP
    Webp,
    /// Single-page PDF embedding the raster at print size
    Pdf,
}

impl OutputFormat {
    /// Every supported format, in export order
    pub const ALL: [Self; 3] = [Self::Pdf, Self::Png, Self::Webp];

    /// File extension without the leading dot
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Webp => "webp",
            Self::Pdf => "pdf",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.extension())
    }
}

/// How far letter uniqueness reaches
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum LetterScope {
    /// Letters never repeat within a ring; each ring draws from the full alphabet
    #[default]
    Ring,
    /// Letters never repeat anywhere on the chart
    Chart,
}

impl fmt::Display for LetterScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Ring => f.write_str("ring"),
            Self::Chart => f.write_str("chart"),
        }
    }
}

/// What the rings are made of
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ElementSource {
    /// Rendered letters drawn without replacement
    Letters {
        /// Candidate letters; duplicates are ignored
        alphabet: Vec<char>,
        /// Uniqueness policy
        scope: LetterScope,
    },
    /// Thumbnail images drawn with replacement
    Images {
        /// Candidate image files; missing ones are skipped
        paths: Vec<PathBuf>,
    },
}

impl ElementSource {
    /// Eye chart alphabet with per-ring uniqueness
    pub fn default_letters() -> Self {
        Self::Letters {
            alphabet: EYE_CHART_LETTERS.chars().collect(),
            scope: LetterScope::Ring,
        }
    }

    /// Number of distinct letters, or `None` for image sources
    pub fn distinct_letters(&self) -> Option<usize> {
        match self {
            Self::Letters { alphabet, .. } => {
                let mut seen = alphabet.clone();
                seen.sort_unstable();
                seen.dedup();
                Some(seen.len())
            }
            Self::Images { .. } => None,
        }
    }
}

/// Radius and element size of one ring
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RingSpec {
    /// Distance from the canvas center in pixels
    pub radius: u32,
    /// Font size in pixels per em, or thumbnail edge in pixels
    pub element_size: u32,
}

/// Solid frame around the canvas edge
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BorderSpec {
    /// Physical thickness in millimetres
    pub thickness_mm: f64,
    /// Fill color
    pub color: [u8; 3],
}

impl BorderSpec {
    /// Gray border of the given thickness
    pub const fn gray(thickness_mm: f64, level: u8) -> Self {
        Self {
            thickness_mm,
            color: [level, level, level],
        }
    }
}

/// Build the geometric ring series from radius and size scaling factors
///
/// Fractional pixels are truncated toward zero.
pub fn geometric_rings(radius_scaling: f64, size_scaling: f64) -> Vec<RingSpec> {
    RING_RADIUS_FRACTIONS
        .iter()
        .zip(RING_SIZE_MULTIPLIERS.iter())
        .map(|(fraction, multiplier)| RingSpec {
            radius: (radius_scaling * fraction).trunc().max(0.0) as u32,
            element_size: (size_scaling * multiplier).trunc().max(0.0) as u32,
        })
        .collect()
}

/// Everything a single chart generation run needs
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    /// Print resolution
    pub dpi: u32,
    /// Canvas edge length in pixels
    pub canvas_size: u32,
    /// Rings, innermost first
    pub rings: Vec<RingSpec>,
    /// Elements per ring
    pub elements_per_ring: usize,
    /// Text of the fixation marker
    pub center_glyph: String,
    /// Font size of the fixation marker
    pub center_size: u32,
    /// Ring contents
    pub source: ElementSource,
    /// Optional frame
    pub border: Option<BorderSpec>,
    /// Enabled output encodings
    pub formats: Vec<OutputFormat>,
    /// Directory receiving the output files
    pub output_dir: PathBuf,
    /// Output file stem
    pub output_name: String,
    /// Preferred font file tried before the default lookup
    pub font_path: Option<PathBuf>,
    /// Random seed
    pub seed: u64,
}

impl ChartConfig {
    /// Default letter chart for a print of `inches` at `dpi`
    ///
    /// # Errors
    ///
    /// Returns an error if the resulting configuration fails validation
    pub fn letters(dpi: u32, inches: f64) -> Result<Self> {
        let config = Self::with_source(dpi, inches, ElementSource::default_letters());
        config.validate()?;
        Ok(config)
    }

    /// Default thumbnail chart for a print of `inches` at `dpi`
    ///
    /// # Errors
    ///
    /// Returns an error if the resulting configuration fails validation
    pub fn images(dpi: u32, inches: f64, paths: Vec<PathBuf>) -> Result<Self> {
        let config = Self::with_source(dpi, inches, ElementSource::Images { paths });
        config.validate()?;
        Ok(config)
    }

    /// Unvalidated configuration with the default geometry for `source`
    pub fn with_source(dpi: u32, inches: f64, source: ElementSource) -> Self {
        let size_scaling = dpi / SIZE_SCALING_DIVISOR;
        let radius_scaling = f64::from(dpi) * f64::from(RADIUS_SCALING_PER_DPI);
        let output_name = match source {
            ElementSource::Letters { .. } => LETTER_CHART_NAME,
            ElementSource::Images { .. } => IMAGE_CHART_NAME,
        };

        Self {
            dpi,
            canvas_size: inches_to_pixels(dpi, inches),
            rings: geometric_rings(radius_scaling, f64::from(size_scaling)),
            elements_per_ring: DEFAULT_ELEMENTS_PER_RING,
            center_glyph: DEFAULT_CENTER_GLYPH.to_string(),
            center_size: size_scaling,
            source,
            border: Some(BorderSpec::gray(DEFAULT_BORDER_MM, DEFAULT_BORDER_GRAY)),
            formats: vec![OutputFormat::Pdf, OutputFormat::Png],
            output_dir: PathBuf::from("."),
            output_name: output_name.to_string(),
            font_path: None,
            seed: DEFAULT_SEED,
        }
    }

    /// Letter charts are grayscale, thumbnail charts keep their colors
    pub const fn color_mode(&self) -> ColorMode {
        match self.source {
            ElementSource::Letters { .. } => ColorMode::Grayscale,
            ElementSource::Images { .. } => ColorMode::Rgb,
        }
    }

    /// Shared center of every ring, in canvas coordinates
    pub fn center(&self) -> [f64; 2] {
        let mid = f64::from(self.canvas_size / 2);
        [mid, mid]
    }

    /// Number of distinct letters the configuration consumes
    pub fn required_letters(&self) -> usize {
        match &self.source {
            ElementSource::Letters {
                scope: LetterScope::Chart,
                ..
            } => self.elements_per_ring.saturating_mul(self.rings.len()),
            _ => self.elements_per_ring,
        }
    }

    /// Check every invariant the composer relies on
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The resolution or canvas size is zero, or the canvas is too large
    /// - Rings are missing, empty, or do not grow strictly outward
    /// - No elements per ring or no center glyph are configured
    /// - The border thickness is negative or not finite
    /// - The letter pool cannot fill the rings without repeats
    pub fn validate(&self) -> Result<()> {
        if self.dpi == 0 {
            return Err(invalid_parameter("dpi", &self.dpi, &"must be positive"));
        }
        if self.canvas_size == 0 || self.canvas_size > MAX_CANVAS_SIZE {
            return Err(invalid_parameter(
                "canvas_size",
                &self.canvas_size,
                &format!("must be between 1 and {MAX_CANVAS_SIZE} pixels"),
            ));
        }
        if self.elements_per_ring == 0 {
            return Err(invalid_parameter(
                "elements_per_ring",
                &self.elements_per_ring,
                &"must be positive",
            ));
        }
        if self.rings.is_empty() {
            return Err(invalid_parameter("rings", &0, &"at least one ring is required"));
        }
        for (index, ring) in self.rings.iter().enumerate() {
            if ring.radius == 0 || ring.element_size == 0 {
                return Err(invalid_parameter(
                    "rings",
                    &format!("{index}: {ring:?}"),
                    &"radius and element size must be positive",
                ));
            }
        }
        for (index, pair) in self.rings.windows(2).enumerate() {
            if let [inner, outer] = pair {
                if outer.radius <= inner.radius || outer.element_size <= inner.element_size {
                    return Err(invalid_parameter(
                        "rings",
                        &format!("{}: {outer:?}", index + 1),
                        &"radius and element size must grow strictly outward",
                    ));
                }
            }
        }
        if self.center_glyph.trim().is_empty() {
            return Err(invalid_parameter(
                "center_glyph",
                &self.center_glyph,
                &"must contain a visible character",
            ));
        }
        if let Some(border) = &self.border {
            if !border.thickness_mm.is_finite() || border.thickness_mm < 0.0 {
                return Err(invalid_parameter(
                    "border_mm",
                    &border.thickness_mm,
                    &"must be a non-negative number",
                ));
            }
        }
        if let Some(available) = self.source.distinct_letters() {
            let required = self.required_letters();
            if available < required {
                return Err(ChartError::InsufficientPool {
                    available,
                    required,
                });
            }
        }
        Ok(())
    }
}
