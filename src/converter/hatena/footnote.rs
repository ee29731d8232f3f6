use maud::{html, PreEscaped};

/// Notes referenced by `((...))` in one entry, in encounter order.
#[derive(Debug, Default)]
pub(super) struct Footnotes {
    notes: Vec<String>,
}

impl Footnotes {
    /// Stores a rendered note and returns its 1-based number.
    pub fn push(&mut self, note: String) -> usize {
        self.notes.push(note);
        self.notes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.notes.is_empty()
    }

    pub fn render(&self) -> String {
        let mut res = String::from("<div class=\"footnote\">\n");
        for (i, note) in self.notes.iter().enumerate() {
            let n = i + 1;
            let line = html! {
                p.footnote {
                    a href=(format!("#fn{n}")) id=(format!("f{n}")) { "*" (n) }
                    ": " (PreEscaped(note))
                }
            };
            res.push_str(&line.into_string());
            res.push('\n');
        }
        res.push_str("</div>\n");
        res
    }
}
