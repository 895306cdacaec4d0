//! Sequential chart composition: center glyph, rings, border

use crate::chart::border::draw_border;
use crate::chart::canvas::{BLACK, Canvas};
use crate::chart::rings::{Placement, RingLayout};
use crate::chart::selection::{LetterPool, assign_letters, pick_with_replacement};
use crate::io::configuration::{ChartConfig, ElementSource, LetterScope};
use crate::io::error::{ChartError, Result};
use crate::io::font::FontProvider;
use crate::io::image::{ImagePool, load_images};
use crate::math::geometry::{centered_origin, truncated_origin};
use image::RgbaImage;
use rand::{SeedableRng, rngs::StdRng};
use std::collections::HashMap;
use tracing::debug;

/// Candidates the rings are filled from
#[derive(Debug, Clone)]
pub enum ElementPool {
    /// Letters drawn without replacement under the given scope
    Letters(LetterPool, LetterScope),
    /// Thumbnails drawn with replacement
    Images(ImagePool),
}

impl ElementPool {
    /// Build the pool described by `source`, loading thumbnails from disk
    ///
    /// # Errors
    ///
    /// Returns an error if thumbnails cannot be loaded or none exist
    pub fn from_source(source: &ElementSource) -> Result<Self> {
        match source {
            ElementSource::Letters { alphabet, scope } => Ok(Self::Letters(
                LetterPool::new(alphabet.iter().copied()),
                *scope,
            )),
            ElementSource::Images { paths } => load_images(paths).map(Self::Images),
        }
    }
}

/// What ended up in a slot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementKind {
    /// Rendered letter
    Letter(char),
    /// Index into the image pool
    Image(usize),
}

/// An element drawn at a ring slot
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacedElement {
    /// Slot geometry
    pub placement: Placement,
    /// Element drawn there
    pub kind: ElementKind,
}

/// Finished chart
#[derive(Debug)]
pub struct Composition {
    /// Rendered canvas
    pub canvas: Canvas,
    /// Every ring element, innermost ring first
    pub placed: Vec<PlacedElement>,
    /// Whether text used the built-in fallback face
    pub font_fallback: bool,
    /// Border thickness actually drawn
    pub border_pixels: u32,
}

/// Owns the canvas and every resource for one generation run
pub struct ChartComposer {
    config: ChartConfig,
    canvas: Canvas,
    layout: RingLayout,
    font: FontProvider,
    pool: ElementPool,
    rng: StdRng,
    letters: Vec<Vec<char>>,
    thumbnails: HashMap<(usize, u32), RgbaImage>,
    placed: Vec<PlacedElement>,
    border_pixels: u32,
}

impl ChartComposer {
    /// Composer over already resolved resources
    ///
    /// Letter assignment happens here so an undersized pool fails before any drawing.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the pool is too small
    pub fn new(config: ChartConfig, font: FontProvider, pool: ElementPool) -> Result<Self> {
        config.validate()?;

        let mut rng = StdRng::seed_from_u64(config.seed);
        let layout = RingLayout::new(
            config.center(),
            config.rings.clone(),
            config.elements_per_ring,
        );

        let letters = match &pool {
            ElementPool::Letters(letters, scope) => assign_letters(
                letters,
                layout.ring_count(),
                layout.per_ring(),
                *scope,
                &mut rng,
            )?,
            ElementPool::Images(_) => Vec::new(),
        };

        Ok(Self {
            canvas: Canvas::new(config.canvas_size, config.color_mode()),
            config,
            layout,
            font,
            pool,
            rng,
            letters,
            thumbnails: HashMap::new(),
            placed: Vec::new(),
            border_pixels: 0,
        })
    }

    /// Composer resolving the font and loading the element pool from `config`
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or resources cannot be loaded
    pub fn from_config(config: ChartConfig) -> Result<Self> {
        config.validate()?;
        let pool = ElementPool::from_source(&config.source)?;
        let font = FontProvider::resolve(config.font_path.as_deref());
        Self::new(config, font, pool)
    }

    /// Configuration in use
    pub const fn config(&self) -> &ChartConfig {
        &self.config
    }

    /// Ring geometry
    pub const fn layout(&self) -> &RingLayout {
        &self.layout
    }

    /// Canvas drawn so far
    pub const fn canvas(&self) -> &Canvas {
        &self.canvas
    }

    /// Ring elements drawn so far
    pub fn placed(&self) -> &[PlacedElement] {
        &self.placed
    }

    /// Whether text is rendered with the built-in fallback face
    pub const fn font_fallback(&self) -> bool {
        self.font.is_fallback()
    }

    /// Drawing steps: center glyph, each ring, border
    pub fn step_count(&self) -> usize {
        self.layout.ring_count() + 2
    }

    /// Draw the fixation glyph centered on the canvas midpoint
    pub fn draw_center(&mut self) {
        let mask = self
            .font
            .sized(self.config.center_size)
            .rasterize(&self.config.center_glyph);
        let origin = centered_origin(self.layout.center(), mask.width(), mask.height());
        self.canvas.draw_coverage(&mask, origin, BLACK);
    }

    /// Draw every element of ring `ring`
    ///
    /// # Errors
    ///
    /// Returns an error if `ring` does not exist or the pool cannot supply it
    pub fn draw_ring(&mut self, ring: usize) -> Result<()> {
        let placements = self.layout.placements(ring);
        if placements.is_empty() {
            return Err(ChartError::InvalidParameter {
                parameter: "ring",
                value: ring.to_string(),
                reason: format!("only {} ring(s) configured", self.layout.ring_count()),
            });
        }

        let kinds: Vec<ElementKind> = match &self.pool {
            ElementPool::Letters(..) => self
                .letters
                .get(ring)
                .map(|letters| letters.iter().copied().map(ElementKind::Letter).collect())
                .unwrap_or_default(),
            ElementPool::Images(images) => {
                pick_with_replacement(images.len(), placements.len(), &mut self.rng)?
                    .into_iter()
                    .map(ElementKind::Image)
                    .collect()
            }
        };

        for (placement, kind) in placements.into_iter().zip(kinds) {
            match kind {
                ElementKind::Letter(letter) => self.draw_letter(&placement, letter),
                ElementKind::Image(index) => self.draw_thumbnail(&placement, index),
            }
            self.placed.push(PlacedElement { placement, kind });
        }
        debug!("Drew ring {ring}");

        Ok(())
    }

    fn draw_letter(&mut self, placement: &Placement, letter: char) {
        let mut buf = [0u8; 4];
        let mask = self
            .font
            .sized(placement.element_size)
            .rasterize(letter.encode_utf8(&mut buf));
        let origin = centered_origin(placement.point, mask.width(), mask.height());
        self.canvas.draw_coverage(&mask, origin, BLACK);
    }

    fn draw_thumbnail(&mut self, placement: &Placement, index: usize) {
        let ElementPool::Images(images) = &self.pool else {
            return;
        };
        let size = placement.element_size;
        let key = (index, size);
        if !self.thumbnails.contains_key(&key) {
            let Some(thumbnail) = images.thumbnail(index, size) else {
                return;
            };
            self.thumbnails.insert(key, thumbnail);
        }
        if let Some(thumbnail) = self.thumbnails.get(&key) {
            let origin = truncated_origin(placement.point, size, size);
            self.canvas.composite(thumbnail, origin);
        }
    }

    /// Draw the configured border, returning its thickness in pixels
    pub fn draw_border(&mut self) -> u32 {
        self.border_pixels = self
            .config
            .border
            .as_ref()
            .map_or(0, |spec| draw_border(&mut self.canvas, self.config.dpi, spec));
        self.border_pixels
    }

    /// Hand over the finished canvas
    pub fn finish(self) -> Composition {
        Composition {
            font_fallback: self.font.is_fallback(),
            canvas: self.canvas,
            placed: self.placed,
            border_pixels: self.border_pixels,
        }
    }

    /// Run every drawing step in order
    ///
    /// # Errors
    ///
    /// Returns an error if any ring cannot be drawn
    pub fn compose(mut self) -> Result<Composition> {
        self.draw_center();
        for ring in 0..self.layout.ring_count() {
            self.draw_ring(ring)?;
        }
        self.draw_border();
        Ok(self.finish())
    }
}
