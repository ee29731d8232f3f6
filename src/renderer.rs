use std::collections::HashMap;
use std::fmt::Write as _;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use handlebars::{handlebars_helper, Handlebars};
use log::debug;
use serde::Serialize;

pub(crate) const DEFAULT_LAYOUT: &str = "default";

handlebars_helper!(breadcrumbs: |path: str| {
    let path = Path::new(path);
    let mut current_path = PathBuf::from("/");
    let mut res = String::new();
    let mut components = path.components();
    if path.has_root() {
        components.next();
    }
    res.push_str("<a href=\"/\">/</a> ");
    for (i, c) in components.enumerate() {
        current_path.push(c);
        let _ = write!(
            res,
            "{}<a href=\"{}\">{}</a>",
            if i == 0 {""} else {" / "},
            current_path.to_string_lossy(),
            current_path.file_stem().map(|s| s.to_string_lossy()).unwrap_or_default()
        );
    }

    res
});

/// Layout engine. Values are interpolated raw: the page body is already
/// HTML and must not be escaped a second time.
#[derive(Debug)]
pub(crate) struct Renderer {
    layout_dir: PathBuf,
    handlebars: Handlebars<'static>,
    /// Layout sources by name, read once per run.
    layouts: HashMap<String, String>,
}

impl Renderer {
    pub fn new(layout_dir: PathBuf) -> Self {
        let mut handlebars = Handlebars::new();
        handlebars.register_escape_fn(handlebars::no_escape);
        handlebars.register_helper("breadcrumbs", Box::new(breadcrumbs));

        Self {
            layout_dir,
            handlebars,
            layouts: HashMap::new(),
        }
    }

    /// `<layout_dir>/<name>.html`, with an empty name meaning [`DEFAULT_LAYOUT`].
    pub fn layout_path(&self, name: &str) -> PathBuf {
        let name = if name.is_empty() { DEFAULT_LAYOUT } else { name };
        self.layout_dir.join(format!("{name}.html"))
    }

    /// Renders `data` into the named layout, reading the layout file on
    /// first use.
    pub fn render<T: Serialize>(&mut self, layout: &str, data: &T) -> anyhow::Result<String> {
        let name = if layout.is_empty() { DEFAULT_LAYOUT } else { layout };
        if !self.layouts.contains_key(name) {
            let path = self.layout_path(name);
            if !path.is_file() {
                bail!("layout not found: {}", path.display());
            }
            debug!("Loading layout {path:?}");
            let template = std::fs::read_to_string(&path)
                .with_context(|| format!("while loading layout {}", path.display()))?;
            self.layouts.insert(name.to_string(), template);
        }

        self.render_template(&self.layouts[name], data)
            .with_context(|| format!("while rendering layout {name:?}"))
    }

    /// Interpolates `data` into raw template text.
    pub fn render_template<T: Serialize>(&self, template: &str, data: &T) -> anyhow::Result<String> {
        Ok(self.handlebars.render_template(template, data)?)
    }
}
