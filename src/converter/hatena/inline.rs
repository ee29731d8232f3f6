use regex::{Captures, Regex};

use super::footnote::Footnotes;

const INLINE_PATTERN: &str = concat!(
    r"(?P<tag></?[A-Za-z][^<>]*>)",
    r"|\(\((?P<note>.+?)\)\)",
    r#"|\[(?P<url>https?://[^\]\s]+?)(?P<opt>:image|:title=[^\]]*)?\]"#,
    r#"|(?P<bare>https?://[^\s<>"'\[\]()]+)"#,
);

/// Inline pass: footnotes, bracket links, images and bare URLs.
/// HTML tags are matched first and passed through, so URLs inside
/// attributes stay untouched.
#[derive(Debug)]
pub(super) struct InlineRenderer {
    pattern: Regex,
    markup: Regex,
}

impl InlineRenderer {
    pub fn new() -> Self {
        Self {
            pattern: Regex::new(INLINE_PATTERN).unwrap(),
            markup: Regex::new(r"<[^>]*>").unwrap(),
        }
    }

    pub fn render(&self, text: &str, notes: &mut Footnotes) -> String {
        self.pattern
            .replace_all(text, |caps: &Captures| {
                if let Some(note) = caps.name("note") {
                    let note = self.render_links(note.as_str());
                    let title = self.markup.replace_all(&note, "").replace('"', "&quot;");
                    let n = notes.push(note);
                    format!(
                        "<span class=\"footnote\"><a href=\"#f{n}\" title=\"{title}\" id=\"fn{n}\">*{n}</a></span>"
                    )
                } else {
                    self.link(caps)
                }
            })
            .into_owned()
    }

    /// Footnote bodies get links but never nested footnotes.
    fn render_links(&self, text: &str) -> String {
        self.pattern
            .replace_all(text, |caps: &Captures| self.link(caps))
            .into_owned()
    }

    fn link(&self, caps: &Captures) -> String {
        if let Some(url) = caps.name("url") {
            let url = url.as_str();
            match caps.name("opt").map(|m| m.as_str()) {
                Some(":image") => format!("<img src=\"{url}\" alt=\"{url}\">"),
                Some(opt) => {
                    let title = opt.trim_start_matches(":title=");
                    format!("<a href=\"{url}\">{title}</a>")
                }
                None => format!("<a href=\"{url}\">{url}</a>"),
            }
        } else if let Some(url) = caps.name("bare") {
            let url = url.as_str();
            format!("<a href=\"{url}\">{url}</a>")
        } else {
            caps[0].to_string()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(text: &str) -> (String, Footnotes) {
        let mut notes = Footnotes::default();
        let html = InlineRenderer::new().render(text, &mut notes);
        (html, notes)
    }

    #[test]
    fn plain_text_is_untouched() {
        assert_eq!(render("just & some <b>text</b>").0, "just & some <b>text</b>");
    }

    #[test]
    fn footnote_becomes_reference() {
        let (html, notes) = render("body((the note)) rest");
        assert_eq!(
            html,
            "body<span class=\"footnote\"><a href=\"#f1\" title=\"the note\" id=\"fn1\">*1</a></span> rest"
        );
        assert!(!notes.is_empty());
    }

    #[test]
    fn footnotes_number_in_order() {
        let (html, notes) = render("a((x)) b((y))");
        assert!(html.find("*1").unwrap() < html.find("*2").unwrap());
        assert!(notes.render().find(": x").unwrap() < notes.render().find(": y").unwrap());
    }

    #[test]
    fn footnote_title_drops_markup() {
        let (html, _) = render(r#"((see [http://example.com:title=the "site"]))"#);
        assert!(html.contains("title=\"see the &quot;site&quot;\""), "{html}");
    }

    #[test]
    fn bracket_links() {
        assert_eq!(
            render("[http://example.com/a]").0,
            "<a href=\"http://example.com/a\">http://example.com/a</a>"
        );
        assert_eq!(
            render("[https://example.com:title=Example]").0,
            "<a href=\"https://example.com\">Example</a>"
        );
        assert_eq!(
            render("[http://example.com:8080/x]").0,
            "<a href=\"http://example.com:8080/x\">http://example.com:8080/x</a>"
        );
    }

    #[test]
    fn bracket_image() {
        assert_eq!(
            render("[http://example.com/a.png:image]").0,
            "<img src=\"http://example.com/a.png\" alt=\"http://example.com/a.png\">"
        );
    }

    #[test]
    fn bare_url_is_linked() {
        assert_eq!(
            render("see https://example.com/x now").0,
            "see <a href=\"https://example.com/x\">https://example.com/x</a> now"
        );
    }

    #[test]
    fn bare_angle_brackets_do_not_hide_notation() {
        let (html, notes) = render("if a < b then ((note)) and c > d http://example.com");
        assert!(html.starts_with("if a < b then <span class=\"footnote\">"), "{html}");
        assert!(html.ends_with("c > d <a href=\"http://example.com\">http://example.com</a>"), "{html}");
        assert!(notes.render().contains(": note</p>"));
    }

    #[test]
    fn urls_inside_tags_are_not_relinked() {
        let text = "<a href=\"https://example.com\">site</a>";
        assert_eq!(render(text).0, text);
    }
}
