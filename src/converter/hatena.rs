//! Hatena-style wiki markup.
//!
//! Block notation handled here, line by line:
//!
//! ```text
//! *heading            <h3>, ** <h4>, *** <h5>
//! -item / +item       <ul> / <ol>, repeat the marker to nest (--, ++)
//! :term:description   <dl>
//! |*head|cell|        <table>
//! >> ... <<           <blockquote>, nestable
//! >| ... |<           <pre> with inline notation
//! >|| ... ||<         <pre> escaped as it is (>|lang| for a language class)
//! >< ... ><           raw html
//! ```
//!
//! Everything else becomes a paragraph. Inline notation is handled by
//! [`inline::InlineRenderer`], footnotes are collected per conversion and
//! appended after the body.

use std::fmt::Write as _;

use maud::html;
use regex::Regex;

use self::{footnote::Footnotes, inline::InlineRenderer};

mod footnote;
mod inline;

#[derive(Debug)]
pub(crate) struct HatenaConverter {
    inline: InlineRenderer,
    heading: Regex,
    list_item: Regex,
    definition: Regex,
    super_pre: Regex,
}

impl HatenaConverter {
    pub fn new() -> Self {
        Self {
            inline: InlineRenderer::new(),
            heading: Regex::new(r"^(\*{1,3})(.*)$").unwrap(),
            list_item: Regex::new(r"^([-+]+)(.*)$").unwrap(),
            definition: Regex::new(r"^:([^:]*):(.*)$").unwrap(),
            super_pre: Regex::new(r"^>\|([\w+#-]*)\|$").unwrap(),
        }
    }

    pub fn convert(&self, text: &str) -> String {
        let lines: Vec<&str> = text.lines().collect();
        let mut notes = Footnotes::default();
        let mut res = String::new();
        self.render_blocks(&lines, &mut notes, &mut res);
        if !notes.is_empty() {
            res.push_str(&notes.render());
        }
        res
    }

    fn render_blocks(&self, lines: &[&str], notes: &mut Footnotes, res: &mut String) {
        let mut i = 0;
        while i < lines.len() {
            let line = lines[i];

            if line.trim().is_empty() {
                i += 1;
            } else if let Some(caps) = self.super_pre.captures(line) {
                let (body, next) = take_until(lines, i + 1, |l| l == "||<");
                let code = body.join("\n");
                let markup = match &caps[1] {
                    "" => html! { pre.code { (code) } },
                    lang => html! {
                        pre class=(format!("code lang-{lang}")) data-lang=(lang) { (code) }
                    },
                };
                res.push_str(&markup.into_string());
                res.push('\n');
                i = next;
            } else if line == ">|" {
                let (body, next) = take_until(lines, i + 1, |l| l == "|<");
                let inner: Vec<String> = body
                    .iter()
                    .map(|l| self.inline.render(l, notes))
                    .collect();
                let _ = writeln!(res, "<pre>{}</pre>", inner.join("\n"));
                i = next;
            } else if line == ">>" {
                let (body, next) = take_quote(lines, i + 1);
                res.push_str("<blockquote>\n");
                self.render_blocks(body, notes, res);
                res.push_str("</blockquote>\n");
                i = next;
            } else if line.starts_with("><") {
                i = self.raw_html(lines, i, res);
            } else if let Some(caps) = self.heading.captures(line) {
                let level = caps[1].len() + 2;
                let text = self.inline.render(caps[2].trim_start(), notes);
                let _ = writeln!(res, "<h{level}>{text}</h{level}>");
                i += 1;
            } else if self.list_item.is_match(line) {
                let end = run_end(lines, i, |l| self.list_item.is_match(l));
                self.list(&lines[i..end], notes, res);
                i = end;
            } else if self.definition.is_match(line) {
                let end = run_end(lines, i, |l| self.definition.is_match(l));
                res.push_str("<dl>\n");
                for l in &lines[i..end] {
                    if let Some(caps) = self.definition.captures(l) {
                        let term = self.inline.render(&caps[1], notes);
                        let desc = self.inline.render(&caps[2], notes);
                        let _ = writeln!(res, "<dt>{term}</dt>\n<dd>{desc}</dd>");
                    }
                }
                res.push_str("</dl>\n");
                i = end;
            } else if is_table_row(line) {
                let end = run_end(lines, i, is_table_row);
                self.table(&lines[i..end], notes, res);
                i = end;
            } else {
                let text = self.inline.render(line, notes);
                let _ = writeln!(res, "<p>{text}</p>");
                i += 1;
            }
        }
    }

    /// `><...><` on one line or across several. Returns the next line index.
    fn raw_html(&self, lines: &[&str], start: usize, res: &mut String) -> usize {
        let first = &lines[start][1..];
        if first.len() >= 2 && first.ends_with("><") {
            let _ = writeln!(res, "{}", &first[..first.len() - 1]);
            return start + 1;
        }
        if first != "<" {
            let _ = writeln!(res, "{first}");
        }
        let mut i = start + 1;
        while i < lines.len() {
            let line = lines[i];
            i += 1;
            if line == "><" {
                return i;
            }
            if let Some(last) = line.strip_suffix("><") {
                let _ = writeln!(res, "{last}>");
                return i;
            }
            let _ = writeln!(res, "{line}");
        }
        i
    }

    fn list(&self, items: &[&str], notes: &mut Footnotes, res: &mut String) {
        let mut open: Vec<&'static str> = Vec::new();
        for item in items {
            let Some(caps) = self.list_item.captures(item) else {
                continue;
            };
            let marker = &caps[1];
            // one level deeper at most, so every nested list sits in an <li>
            let depth = marker.len().min(open.len() + 1);
            let tag = if marker.starts_with('+') { "ol" } else { "ul" };

            if open.len() < depth {
                let _ = writeln!(res, "<{tag}>");
                open.push(tag);
            } else {
                res.push_str("</li>\n");
                while open.len() > depth {
                    if let Some(closed) = open.pop() {
                        let _ = writeln!(res, "</{closed}>\n</li>");
                    }
                }
                if open.last() != Some(&tag) {
                    if let Some(closed) = open.pop() {
                        let _ = writeln!(res, "</{closed}>");
                    }
                    let _ = writeln!(res, "<{tag}>");
                    open.push(tag);
                }
            }
            let text = self.inline.render(caps[2].trim_start(), notes);
            let _ = write!(res, "<li>{text}");
        }
        res.push_str("</li>\n");
        while let Some(closed) = open.pop() {
            let _ = writeln!(res, "</{closed}>");
            if !open.is_empty() {
                res.push_str("</li>\n");
            }
        }
    }

    fn table(&self, rows: &[&str], notes: &mut Footnotes, res: &mut String) {
        res.push_str("<table>\n");
        for row in rows {
            res.push_str("<tr>");
            for cell in row[1..row.len() - 1].split('|') {
                match cell.strip_prefix('*') {
                    Some(head) => {
                        let _ = write!(res, "<th>{}</th>", self.inline.render(head, notes));
                    }
                    None => {
                        let _ = write!(res, "<td>{}</td>", self.inline.render(cell, notes));
                    }
                }
            }
            res.push_str("</tr>\n");
        }
        res.push_str("</table>\n");
    }
}

fn is_table_row(line: &str) -> bool {
    line.len() >= 2 && line.starts_with('|') && line.ends_with('|')
}

/// Index one past the last consecutive line (from `start`) matching `pred`.
fn run_end(lines: &[&str], start: usize, pred: impl Fn(&str) -> bool) -> usize {
    lines[start..]
        .iter()
        .position(|l| !pred(l))
        .map_or(lines.len(), |n| start + n)
}

/// Lines from `start` up to the closing marker, and the index after it.
/// An unclosed block runs to the end.
fn take_until<'a, 'b>(
    lines: &'b [&'a str],
    start: usize,
    is_end: impl Fn(&str) -> bool,
) -> (&'b [&'a str], usize) {
    match lines[start..].iter().position(|l| is_end(l)) {
        Some(n) => (&lines[start..start + n], start + n + 1),
        None => (&lines[start..], lines.len()),
    }
}

/// Like [`take_until`] for `>>`/`<<`, honouring nested quotes.
fn take_quote<'a, 'b>(lines: &'b [&'a str], start: usize) -> (&'b [&'a str], usize) {
    let mut depth = 0;
    for (n, line) in lines[start..].iter().enumerate() {
        match *line {
            ">>" => depth += 1,
            "<<" if depth == 0 => return (&lines[start..start + n], start + n + 1),
            "<<" => depth -= 1,
            _ => {}
        }
    }
    (&lines[start..], lines.len())
}
