use pulldown_cmark::{html, Options, Parser};

use crate::format::Format;

use self::hatena::HatenaConverter;

mod hatena;

/// Turns entry bodies into HTML fragments.
///
/// Holds the hatena engine so that it is built once per run and shared by
/// every hatena entry.
#[derive(Debug)]
pub(crate) struct Converter {
    hatena: HatenaConverter,
    markdown_options: Options,
}

impl Converter {
    pub fn new() -> Self {
        let mut markdown_options = Options::empty();
        markdown_options.insert(Options::ENABLE_STRIKETHROUGH);
        markdown_options.insert(Options::ENABLE_TABLES);
        markdown_options.insert(Options::ENABLE_FOOTNOTES);

        Self {
            hatena: HatenaConverter::new(),
            markdown_options,
        }
    }

    pub fn convert(&self, format: Format, body: &str) -> String {
        match format {
            Format::Markdown => self.markdown(body),
            Format::Hatena => self.hatena.convert(body),
            Format::Html => body.to_string(),
        }
    }

    fn markdown(&self, body: &str) -> String {
        let parser = Parser::new_ext(body, self.markdown_options);
        let mut body_html = String::new();
        html::push_html(&mut body_html, parser);
        body_html
    }
}
