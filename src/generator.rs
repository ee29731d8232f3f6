use std::path::{Path, PathBuf};

use anyhow::Context as _;
use fs_extra::file::CopyOptions;
use log::{debug, info};
use walkdir::WalkDir;

use crate::{context::Context, format::Format, metadata::parse_entry};

use self::data::Entry;

mod data;
mod utils;

/// Files under `root`, depth first. Directories are not yielded.
fn walk(root: &Path) -> impl Iterator<Item = anyhow::Result<PathBuf>> {
    WalkDir::new(root)
        .follow_links(true)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|entry| match entry {
            Ok(entry) if entry.file_type().is_file() => Some(Ok(entry.into_path())),
            Ok(_) => None,
            Err(e) => Some(Err(e.into())),
        })
}

fn preprocess_file(
    ctx: &Context,
    path: &Path,
    relative_path: &Path,
    detected: Format,
) -> anyhow::Result<Entry> {
    let content = std::fs::read_to_string(path)?;
    let modified = std::fs::metadata(path)?.modified()?;

    let (metadata, body) = parse_entry(&content);
    let format = match metadata.get("format") {
        "" => detected,
        name => Format::from_name(name)?,
    };
    let (update_at, pubdate) = utils::timestamps(modified);

    Ok(Entry {
        title: metadata.get("title").to_string(),
        description: metadata.get("description").to_string(),
        author: metadata.get("author").to_string(),
        tags: metadata.get("tags").to_string(),
        tag_list: utils::split_tags(metadata.get("tags")),
        layout: metadata.get("layout").to_string(),
        format,
        text: ctx.converter.convert(format, body),
        update_at,
        pubdate,
        path: utils::site_path(relative_path),
    })
}

fn generate_entry(
    ctx: &mut Context,
    path: &Path,
    relative_path: &Path,
    format: Format,
    dest_dir: &Path,
) -> anyhow::Result<()> {
    let entry = preprocess_file(ctx, path, relative_path, format)?;
    let html = ctx.renderer.render(&entry.layout, &entry)?;

    let out_path = dest_dir.join(utils::html_file_name(path));
    std::fs::write(&out_path, html).with_context(|| format!("while writing {out_path:?}"))?;
    info!("Generated {out_path:?} ({})", entry.format);
    Ok(())
}

fn copy_asset(path: &Path, dest_dir: &Path) -> anyhow::Result<()> {
    let mut options = CopyOptions::new();
    options.overwrite = true;

    let file_name = path.file_name().with_context(|| format!("no file name: {path:?}"))?;
    let out_path = dest_dir.join(file_name);
    fs_extra::file::copy(path, &out_path, &options)
        .with_context(|| format!("while copying {path:?} to {out_path:?}"))?;
    debug!("Copied {out_path:?}");
    Ok(())
}

pub(crate) fn generate(ctx: &mut Context) -> anyhow::Result<()> {
    let content_dir = ctx.content_dir.clone();
    info!("Generating {:?} from {:?}", ctx.out_dir, content_dir);

    let mut count = 0;
    for path in walk(&content_dir) {
        let path = path?;
        let relative_path = path.strip_prefix(&content_dir)?;
        let dest_dir = match relative_path.parent() {
            Some(parent) => ctx.out_dir.join(parent),
            None => ctx.out_dir.clone(),
        };
        fs_extra::dir::create_all(&dest_dir, false)
            .with_context(|| format!("while creating {dest_dir:?}"))?;

        match Format::detect(&path) {
            Some(format) => generate_entry(ctx, &path, relative_path, format, &dest_dir)
                .with_context(|| format!("while generating from {relative_path:?}"))?,
            None => copy_asset(&path, &dest_dir)?,
        }
        count += 1;
    }

    info!("Done: {count} files");
    Ok(())
}
