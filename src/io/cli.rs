//! Command-line interface and the generation run it drives

use crate::chart::composer::ChartComposer;
use crate::io::configuration::{
    BorderSpec, ChartConfig, DEFAULT_BORDER_GRAY, DEFAULT_BORDER_MM, DEFAULT_CENTER_GLYPH,
    DEFAULT_DPI, DEFAULT_ELEMENTS_PER_RING, DEFAULT_INCHES, DEFAULT_SEED, ElementSource,
    EYE_CHART_LETTERS, LetterScope, OutputFormat,
};
use crate::io::error::Result;
use crate::io::export::export_canvas;
use crate::io::progress::ProgressManager;
use clap::Parser;
use std::path::PathBuf;
use std::time::Instant;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "eyechart")]
#[command(
    author,
    version,
    about = "Generate a parody eye chart of letter or thumbnail rings"
)]
/// Command-line arguments for chart generation
pub struct Cli {
    /// Thumbnail images for the rings; letters are used when none are given
    #[arg(value_name = "IMAGES")]
    pub images: Vec<PathBuf>,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Print resolution in dots per inch
    #[arg(short, long, default_value_t = DEFAULT_DPI)]
    pub dpi: u32,

    /// Physical edge length of the chart in inches
    #[arg(short, long, default_value_t = DEFAULT_INCHES)]
    pub inches: f64,

    /// Elements per ring
    #[arg(short = 'n', long, default_value_t = DEFAULT_ELEMENTS_PER_RING)]
    pub per_ring: usize,

    /// Output formats, comma separated
    #[arg(short, long, value_enum, value_delimiter = ',', default_values_t = [OutputFormat::Pdf, OutputFormat::Png])]
    pub formats: Vec<OutputFormat>,

    /// Output file stem (defaults depend on letter or image mode)
    #[arg(short, long)]
    pub output: Option<String>,

    /// Directory receiving the output files
    #[arg(short = 'D', long, default_value = ".")]
    pub directory: PathBuf,

    /// Preferred font file
    #[arg(long)]
    pub font: Option<PathBuf>,

    /// Border thickness in millimetres, 0 disables the border
    #[arg(short, long, default_value_t = DEFAULT_BORDER_MM)]
    pub border_mm: f64,

    /// Border gray level
    #[arg(long, default_value_t = DEFAULT_BORDER_GRAY)]
    pub border_gray: u8,

    /// Letters to draw from in letter mode
    #[arg(long, default_value = EYE_CHART_LETTERS)]
    pub letters: String,

    /// Whether letters are unique per ring or across the whole chart
    #[arg(long, value_enum, default_value_t = LetterScope::Ring)]
    pub letter_scope: LetterScope,

    /// Text of the center fixation glyph
    #[arg(long, default_value = DEFAULT_CENTER_GLYPH)]
    pub center: String,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Build the chart configuration these arguments describe
    ///
    /// # Errors
    ///
    /// Returns an error if the resulting configuration fails validation
    pub fn to_config(&self) -> Result<ChartConfig> {
        let source = if self.images.is_empty() {
            ElementSource::Letters {
                alphabet: self.letters.chars().filter(|c| !c.is_whitespace()).collect(),
                scope: self.letter_scope,
            }
        } else {
            ElementSource::Images {
                paths: self.images.clone(),
            }
        };

        let mut config = ChartConfig::with_source(self.dpi, self.inches, source);
        config.seed = self.seed;
        config.elements_per_ring = self.per_ring;
        config.formats.clone_from(&self.formats);
        config.output_dir.clone_from(&self.directory);
        if let Some(name) = &self.output {
            config.output_name.clone_from(name);
        }
        config.font_path.clone_from(&self.font);
        config.center_glyph.clone_from(&self.center);
        config.border = (self.border_mm != 0.0)
            .then(|| BorderSpec::gray(self.border_mm, self.border_gray));

        config.validate()?;
        Ok(config)
    }

    /// Install the tracing subscriber; `RUST_LOG` overrides the default level
    pub fn init_logging(&self) {
        let level = if self.quiet { "warn" } else { "info" };
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
        // A subscriber may already be installed when embedded or under test
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .with_target(false)
            .try_init();
    }
}

/// Runs one chart generation with progress tracking
pub struct ChartProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
}

impl ChartProcessor {
    /// Create a new processor with the given CLI arguments
    pub const fn new(cli: Cli) -> Self {
        Self {
            cli,
            progress_manager: None,
        }
    }

    /// Load resources, draw the chart and export every enabled format
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The arguments describe an invalid configuration
    /// - Thumbnails cannot be loaded
    /// - Any enabled format fails to export (after all formats were attempted)
    pub fn process(&mut self) -> Result<Vec<(OutputFormat, PathBuf)>> {
        let start_time = Instant::now();
        let config = self.cli.to_config()?;
        if config.formats.is_empty() {
            warn!("No output formats enabled, nothing will be written");
        }

        let mut composer = ChartComposer::from_config(config)?;
        if composer.font_fallback() {
            warn!("Letters are rendered with the built-in bitmap face");
        }

        let total_steps = composer.step_count() + composer.config().formats.len();
        self.progress_manager = Some(if self.cli.should_show_progress() {
            ProgressManager::new(total_steps)
        } else {
            ProgressManager::hidden(total_steps)
        });

        self.begin_step("center");
        composer.draw_center();
        self.end_step();

        for ring in 0..composer.layout().ring_count() {
            self.begin_step(&format!("ring {}", ring + 1));
            composer.draw_ring(ring)?;
            self.end_step();
        }

        self.begin_step("border");
        composer.draw_border();
        self.end_step();

        let config = composer.config().clone();
        let composition = composer.finish();

        self.begin_step("export");
        let report = export_canvas(
            &composition.canvas,
            config.dpi,
            &config.formats,
            &config.output_dir,
            &config.output_name,
        );
        for _ in 0..report.attempted() {
            self.end_step();
        }
        if let Some(pm) = &self.progress_manager {
            pm.finish();
        }

        info!(
            "Generated {} element(s) in {:.2?}",
            composition.placed.len(),
            start_time.elapsed()
        );

        report.into_result()
    }

    fn begin_step(&self, label: &str) {
        if let Some(pm) = &self.progress_manager {
            pm.start_step(label);
        }
    }

    fn end_step(&self) {
        if let Some(pm) = &self.progress_manager {
            pm.complete_step();
        }
    }
}
