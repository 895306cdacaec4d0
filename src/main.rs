//! CLI entry point for the eye chart generator

use clap::Parser;
use eyechart::io::cli::{ChartProcessor, Cli};

fn main() -> eyechart::Result<()> {
    let cli = Cli::parse();
    cli.init_logging();
    let mut processor = ChartProcessor::new(cli);
    processor.process().map(|_| ())
}
