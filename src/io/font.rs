//! Font resolution with a built-in bitmap fallback, and glyph rasterization

use crate::io::configuration::{DEFAULT_FONT_FILE, FONT_SEARCH_DIRS};
use ab_glyph::{Font, FontVec, GlyphId, PxScale, ScaleFont, point};
use image::{GrayImage, Luma};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Rows of the built-in 5x7 face, most significant of the low five bits on the left
type BitmapGlyph = [u8; 7];

const BITMAP_COLUMNS: u32 = 5;
const BITMAP_ROWS: u32 = 7;

// Shown for characters the built-in face has no glyph for
const UNKNOWN_GLYPH: BitmapGlyph = [
    0b11111, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11111,
];

const BITMAP_LETTERS: [BitmapGlyph; 26] = [
    [0b01110, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001], // A
    [0b11110, 0b10001, 0b10001, 0b11110, 0b10001, 0b10001, 0b11110], // B
    [0b01110, 0b10001, 0b10000, 0b10000, 0b10000, 0b10001, 0b01110], // C
    [0b11110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b11110], // D
    [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b11111], // E
    [0b11111, 0b10000, 0b10000, 0b11110, 0b10000, 0b10000, 0b10000], // F
    [0b01110, 0b10001, 0b10000, 0b10111, 0b10001, 0b10001, 0b01111], // G
    [0b10001, 0b10001, 0b10001, 0b11111, 0b10001, 0b10001, 0b10001], // H
    [0b01110, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b01110], // I
    [0b00111, 0b00010, 0b00010, 0b00010, 0b00010, 0b10010, 0b01100], // J
    [0b10001, 0b10010, 0b10100, 0b11000, 0b10100, 0b10010, 0b10001], // K
    [0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b10000, 0b11111], // L
    [0b10001, 0b11011, 0b10101, 0b10101, 0b10001, 0b10001, 0b10001], // M
    [0b10001, 0b10001, 0b11001, 0b10101, 0b10011, 0b10001, 0b10001], // N
    [0b01110, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110], // O
    [0b11110, 0b10001, 0b10001, 0b11110, 0b10000, 0b10000, 0b10000], // P
    [0b01110, 0b10001, 0b10001, 0b10001, 0b10101, 0b10010, 0b01101], // Q
    [0b11110, 0b10001, 0b10001, 0b11110, 0b10100, 0b10010, 0b10001], // R
    [0b01111, 0b10000, 0b10000, 0b01110, 0b00001, 0b00001, 0b11110], // S
    [0b11111, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100, 0b00100], // T
    [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01110], // U
    [0b10001, 0b10001, 0b10001, 0b10001, 0b10001, 0b01010, 0b00100], // V
    [0b10001, 0b10001, 0b10001, 0b10101, 0b10101, 0b10101, 0b01010], // W
    [0b10001, 0b10001, 0b01010, 0b00100, 0b01010, 0b10001, 0b10001], // X
    [0b10001, 0b10001, 0b01010, 0b00100, 0b00100, 0b00100, 0b00100], // Y
    [0b11111, 0b00001, 0b00010, 0b00100, 0b01000, 0b10000, 0b11111], // Z
];

fn bitmap_glyph(ch: char) -> Option<BitmapGlyph> {
    if ch == ' ' {
        return None;
    }
    let upper = ch.to_ascii_uppercase();
    if upper.is_ascii_uppercase() {
        let index = (upper as u8 - b'A') as usize;
        BITMAP_LETTERS.get(index).copied()
    } else {
        Some(UNKNOWN_GLYPH)
    }
}

/// Where the glyphs come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FontSource {
    /// Scalable font parsed from this file
    File(PathBuf),
    /// Built-in bitmap face used when no font file could be loaded
    Builtin,
}

enum Face {
    Outline(FontVec),
    Bitmap,
}

/// Resolved typeface shared by every text element of a chart
pub struct FontProvider {
    face: Face,
    source: FontSource,
}

impl std::fmt::Debug for FontProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontProvider")
            .field("source", &self.source)
            .finish_non_exhaustive()
    }
}

impl FontProvider {
    /// Provider using the built-in bitmap face
    pub const fn builtin() -> Self {
        Self {
            face: Face::Bitmap,
            source: FontSource::Builtin,
        }
    }

    /// Provider parsing a font file
    ///
    /// Returns `None` if the file cannot be read or is not a valid font.
    pub fn from_file(path: &Path) -> Option<Self> {
        let bytes = std::fs::read(path).ok()?;
        match FontVec::try_from_vec(bytes) {
            Ok(font) => Some(Self {
                face: Face::Outline(font),
                source: FontSource::File(path.to_path_buf()),
            }),
            Err(e) => {
                warn!("Ignoring invalid font file {}: {e}", path.display());
                None
            }
        }
    }

    /// Font files tried in order: `preferred`, then the default font in the
    /// working directory, then the default font in the system font directories
    pub fn candidates(preferred: Option<&Path>) -> Vec<PathBuf> {
        let mut candidates: Vec<PathBuf> = preferred.map(Path::to_path_buf).into_iter().collect();
        candidates.push(PathBuf::from(DEFAULT_FONT_FILE));
        candidates.extend(
            FONT_SEARCH_DIRS
                .iter()
                .map(|dir| Path::new(dir).join(DEFAULT_FONT_FILE)),
        );
        candidates
    }

    /// First loadable candidate font, or the built-in face with a warning
    pub fn resolve(preferred: Option<&Path>) -> Self {
        for candidate in Self::candidates(preferred) {
            if !candidate.is_file() {
                continue;
            }
            if let Some(provider) = Self::from_file(&candidate) {
                debug!("Using font {}", candidate.display());
                return provider;
            }
        }

        warn!(
            "Font '{DEFAULT_FONT_FILE}' not found, falling back to the built-in bitmap face"
        );
        Self::builtin()
    }

    /// Where the glyphs come from
    pub const fn source(&self) -> &FontSource {
        &self.source
    }

    /// Whether the built-in fallback face is in use
    pub const fn is_fallback(&self) -> bool {
        matches!(self.source, FontSource::Builtin)
    }

    /// The face at `size` pixels per em
    pub const fn sized(&self, size: u32) -> SizedFont<'_> {
        SizedFont {
            provider: self,
            size,
        }
    }
}

/// A face at a fixed size
#[derive(Debug, Clone, Copy)]
pub struct SizedFont<'a> {
    provider: &'a FontProvider,
    size: u32,
}

impl SizedFont<'_> {
    /// Size in pixels per em
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Width and height of the inked bounding box of `text`
    pub fn text_dimensions(&self, text: &str) -> (u32, u32) {
        self.rasterize(text).dimensions()
    }

    /// Coverage mask of `text` cropped to its inked bounding box
    ///
    /// Text without visible glyphs yields a 0x0 mask.
    pub fn rasterize(&self, text: &str) -> GrayImage {
        match &self.provider.face {
            Face::Outline(font) => rasterize_outline(font, self.size, text),
            Face::Bitmap => rasterize_bitmap(self.size, text),
        }
    }
}

fn rasterize_outline(font: &FontVec, size: u32, text: &str) -> GrayImage {
    // Size is the em square, matching point sizes of the usual text APIs
    let units_per_em = font.units_per_em().unwrap_or(1000.0);
    let scale = PxScale::from(size as f32 * font.height_unscaled() / units_per_em);
    let scaled = font.as_scaled(scale);

    let mut caret = 0.0_f32;
    let mut previous: Option<GlyphId> = None;
    let mut outlines = Vec::new();
    for ch in text.chars() {
        let id = scaled.glyph_id(ch);
        if let Some(prev) = previous {
            caret += scaled.kern(prev, id);
        }
        let glyph = id.with_scale_and_position(scale, point(caret, scaled.ascent()));
        caret += scaled.h_advance(id);
        previous = Some(id);
        if let Some(outline) = font.outline_glyph(glyph) {
            outlines.push(outline);
        }
    }

    let Some((min_x, min_y, max_x, max_y)) = outlines
        .iter()
        .map(|o| {
            let b = o.px_bounds();
            (b.min.x, b.min.y, b.max.x, b.max.y)
        })
        .reduce(|a, b| (a.0.min(b.0), a.1.min(b.1), a.2.max(b.2), a.3.max(b.3)))
    else {
        return GrayImage::new(0, 0);
    };

    let width = (max_x - min_x).ceil().max(0.0) as u32;
    let height = (max_y - min_y).ceil().max(0.0) as u32;
    let mut mask = GrayImage::new(width, height);

    for outline in &outlines {
        let bounds = outline.px_bounds();
        let offset_x = (bounds.min.x - min_x).round() as u32;
        let offset_y = (bounds.min.y - min_y).round() as u32;
        outline.draw(|x, y, coverage| {
            let value = (coverage.clamp(0.0, 1.0) * 255.0).round() as u8;
            if let Some(pixel) = mask.get_pixel_mut_checked(offset_x + x, offset_y + y) {
                pixel.0[0] = pixel.0[0].max(value);
            }
        });
    }

    mask
}

fn rasterize_bitmap(size: u32, text: &str) -> GrayImage {
    // Cap height of the 7-row face is roughly 0.7 em
    let cell = ((size as f32) / 10.0).round().max(1.0) as u32;
    let glyphs: Vec<Option<BitmapGlyph>> = text.chars().map(bitmap_glyph).collect();

    let first = glyphs.iter().position(Option::is_some);
    let last = glyphs.iter().rposition(Option::is_some);
    let (Some(first), Some(last)) = (first, last) else {
        return GrayImage::new(0, 0);
    };

    let advance = (BITMAP_COLUMNS + 1) * cell;
    let columns = (last - first) as u32 * (BITMAP_COLUMNS + 1) + BITMAP_COLUMNS;
    let mut mask = GrayImage::new(columns * cell, BITMAP_ROWS * cell);

    for (index, glyph) in glyphs.iter().enumerate().skip(first).take(last - first + 1) {
        let Some(rows) = glyph else {
            continue;
        };
        let left = (index - first) as u32 * advance;
        for (row, bits) in (0u32..).zip(rows.iter()) {
            for column in 0..BITMAP_COLUMNS {
                if bits & (1 << (BITMAP_COLUMNS - 1 - column)) == 0 {
                    continue;
                }
                for dy in 0..cell {
                    for dx in 0..cell {
                        if let Some(pixel) = mask.get_pixel_mut_checked(
                            left + column * cell + dx,
                            row * cell + dy,
                        ) {
                            *pixel = Luma([255]);
                        }
                    }
                }
            }
        }
    }

    mask
}
