use serde::Serialize;

use crate::format::Format;

/// One content file, parsed and converted, as handed to the layout.
#[derive(Serialize, Debug, Clone)]
pub(super) struct Entry {
    pub title: String,
    pub description: String,
    pub author: String,
    pub tags: String,
    pub tag_list: Vec<String>,
    pub layout: String,
    pub format: Format,
    pub text: String,
    pub update_at: String,
    pub pubdate: String,
    /// Site-absolute URL of the generated page.
    pub path: String,
}
