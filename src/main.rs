//! CLI entry point for the quadtree image approximation tool

use clap::Parser;
use quadart::io::cli::{Cli, ImageRunner};

fn main() -> quadart::Result<()> {
    let cli = Cli::parse();
    let mut runner = ImageRunner::new(cli);
    runner.process()
}
