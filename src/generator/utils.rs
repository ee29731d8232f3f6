use std::{path::Path, time::SystemTime};

use chrono::{DateTime, Local};

/// `(update_at, pubdate)` for a file modification time: a display stamp and
/// an RFC 2822 stamp for feeds.
pub(super) fn timestamps(modified: SystemTime) -> (String, String) {
    let modified: DateTime<Local> = modified.into();
    (
        modified.format("%Y-%m-%d %H:%M").to_string(),
        modified.to_rfc2822(),
    )
}

/// `post.md` -> `post.html`. Only the last extension is replaced.
pub(super) fn html_file_name(path: &Path) -> String {
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();
    format!("{stem}.html")
}

/// URL of the page generated from `relative_path` (relative to the content
/// root), always with forward slashes.
pub(super) fn site_path(relative_path: &Path) -> String {
    let mut res = String::new();
    if let Some(parent) = relative_path.parent() {
        for c in parent.components() {
            res.push('/');
            res.push_str(&c.as_os_str().to_string_lossy());
        }
    }
    res.push('/');
    res.push_str(&html_file_name(relative_path));
    res
}

pub(super) fn split_tags(tags: &str) -> Vec<String> {
    tags.split(',')
        .map(str::trim)
        .filter(|tag| !tag.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use std::time::Duration;

    #[test]
    fn html_file_name_replaces_last_extension() {
        assert_eq!(html_file_name(Path::new("post.md")), "post.html");
        assert_eq!(html_file_name(Path::new("dir/a.b.txt")), "a.b.html");
        assert_eq!(html_file_name(Path::new("page.html")), "page.html");
    }

    #[test]
    fn site_path_mirrors_directories() {
        assert_eq!(site_path(Path::new("index.md")), "/index.html");
        assert_eq!(site_path(Path::new("blog/2024/post.txt")), "/blog/2024/post.html");
    }

    #[test]
    fn split_tags_trims_and_drops_empty() {
        assert_eq!(split_tags("a, b,,c "), vec!["a", "b", "c"]);
        assert!(split_tags("").is_empty());
    }

    #[test]
    fn timestamps_come_from_modification_time() {
        let modified = SystemTime::UNIX_EPOCH + Duration::from_secs(1_700_000_000);
        let (update_at, pubdate) = timestamps(modified);

        let parsed = DateTime::parse_from_rfc2822(&pubdate).unwrap();
        assert_eq!(parsed.timestamp(), 1_700_000_000);

        let local = Utc.timestamp_opt(1_700_000_000, 0).unwrap().with_timezone(&Local);
        assert_eq!(update_at, local.format("%Y-%m-%d %H:%M").to_string());
    }
}
