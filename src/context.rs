use std::path::PathBuf;

use crate::{converter::Converter, renderer::Renderer};

/// Everything one build run needs. Built once in `main` and handed to the
/// generator.
#[derive(Debug)]
pub(crate) struct Context {
    pub content_dir: PathBuf,
    pub out_dir: PathBuf,

    pub converter: Converter,
    pub renderer: Renderer,
}

impl Context {
    pub fn new(content_dir: PathBuf, out_dir: PathBuf, layout_dir: PathBuf) -> Self {
        Self {
            content_dir,
            out_dir,
            converter: Converter::new(),
            renderer: Renderer::new(layout_dir),
        }
    }
}
