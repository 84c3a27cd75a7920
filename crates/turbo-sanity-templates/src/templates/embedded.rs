//! Templates compiled into the binary

use crate::error::{Error, Result};
use camino::{Utf8Path, Utf8PathBuf};
use rust_embed::RustEmbed;
use std::collections::BTreeSet;
use std::fs;
use tracing::debug;

#[derive(RustEmbed)]
#[folder = "$CARGO_MANIFEST_DIR/templates/"]
struct TemplateAssets;

/// Stored without the leading dot so packaging keeps them
const DOTFILES: &[&str] = &["gitignore", "npmrc"];

/// Names of the embedded templates
pub fn embedded_template_names() -> Vec<String> {
    TemplateAssets::iter()
        .filter_map(|path| path.split('/').next().map(str::to_string))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .collect()
}

pub fn has_embedded_template(name: &str) -> bool {
    let prefix = format!("{}/", name);
    TemplateAssets::iter().any(|path| path.starts_with(&prefix))
}

/// Write every file of template `name` below `target`
pub fn write_embedded_template(name: &str, target: &Utf8Path) -> Result<Vec<Utf8PathBuf>> {
    let prefix = format!("{}/", name);
    let mut written = Vec::new();

    for asset in TemplateAssets::iter() {
        let Some(relative) = asset.strip_prefix(prefix.as_str()) else {
            continue;
        };
        let file = TemplateAssets::get(&asset).ok_or_else(|| Error::template_not_found(name))?;

        let dest = target.join(output_path(relative));
        if let Some(parent) = dest.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&dest, file.data.as_ref())?;
        debug!("Wrote {}", dest);
        written.push(dest);
    }

    if written.is_empty() {
        return Err(Error::template_not_found(name));
    }

    Ok(written)
}

fn output_path(relative: &str) -> Utf8PathBuf {
    let path = Utf8Path::new(relative);
    match path.file_name() {
        Some(name) if DOTFILES.contains(&name) => path.with_file_name(format!(".{}", name)),
        _ => path.to_path_buf(),
    }
}
