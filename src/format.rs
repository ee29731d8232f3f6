use std::{fmt, path::Path};

use anyhow::bail;
use serde::Serialize;

/// Markup kind of a text entry.
#[derive(Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub(crate) enum Format {
    Markdown,
    Hatena,
    Html,
}

impl Format {
    /// Detects the format from the file extension (case-sensitive).
    /// `None` means the file is an opaque asset and gets copied as it is.
    pub fn detect(path: &Path) -> Option<Self> {
        match path.extension().and_then(|ext| ext.to_str()) {
            Some("md") | Some("markdown") => Some(Self::Markdown),
            Some("txt") => Some(Self::Hatena),
            Some("html") => Some(Self::Html),
            _ => None,
        }
    }

    /// Resolves a `meta-format` value.
    pub fn from_name(name: &str) -> anyhow::Result<Self> {
        match name {
            "markdown" => Ok(Self::Markdown),
            "hatena" => Ok(Self::Hatena),
            "html" => Ok(Self::Html),
            other => bail!("unsupported format: {other:?}"),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Markdown => "markdown",
            Self::Hatena => "hatena",
            Self::Html => "html",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
