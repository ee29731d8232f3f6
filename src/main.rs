use std::path::PathBuf;

use anyhow::{bail, Context as _};
use clap::{command, value_parser, Arg, Command};
use context::Context;
use generator::generate;

mod context;
mod converter;
mod format;
mod generator;
mod metadata;
mod renderer;

// Default roots, anchored at the crate directory.
const CONTENT_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/content");
const OUT_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/docs");
const LAYOUT_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/layouts");

fn cli() -> Command {
    command!().args(&[
        Arg::new("content_dir")
            .help("Directory path of contents. Text files are converted, others are copied as they are.")
            .value_parser(value_parser!(PathBuf))
            .default_value(CONTENT_DIR),
        Arg::new("out_dir")
            .help("Directory path of output. Mirrors content_dir.")
            .value_parser(value_parser!(PathBuf))
            .default_value(OUT_DIR),
        Arg::new("layout_dir")
            .help("Directory of layouts (<name>.html)")
            .value_parser(value_parser!(PathBuf))
            .default_value(LAYOUT_DIR),
    ])
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let matches = cli().get_matches();

    let content_dir: &PathBuf = matches.get_one("content_dir").context("content_dir")?;
    if !content_dir.is_dir() {
        bail!("content_dir must be a directory.");
    }
    let out_dir: &PathBuf = matches.get_one("out_dir").context("out_dir")?;
    if out_dir.exists() && !out_dir.is_dir() {
        bail!("if out_dir exists, it must be directory.");
    }
    let layout_dir: &PathBuf = matches.get_one("layout_dir").context("layout_dir")?;
    if !layout_dir.is_dir() {
        bail!("layout_dir must be a directory.")
    }

    let mut ctx = Context::new(
        content_dir.to_owned(),
        out_dir.to_owned(),
        layout_dir.to_owned(),
    );
    generate(&mut ctx)
}
