//! Loading bottle photos from disk.

use anyhow::{anyhow, Context, Result};
use std::fs;
use std::path::Path;
use wine_types::ImageAsset;

/// Upload types the identification service accepts
const ACCEPTED_TYPES: [&str; 2] = ["image/jpeg", "image/png"];

/// Read a JPG/PNG file into an ImageAsset.
///
/// The MIME type comes from the file content; the extension is only
/// consulted when the content is not recognized.
pub fn load_image(path: &Path) -> Result<ImageAsset> {
    let bytes =
        fs::read(path).with_context(|| format!("Failed to read image {}", path.display()))?;

    let mime_type = detect_mime(&bytes, path)
        .ok_or_else(|| anyhow!("{} is not a JPG or PNG image", path.display()))?;

    let filename = path
        .file_name()
        .and_then(|name| name.to_str())
        .unwrap_or("upload")
        .to_string();

    Ok(ImageAsset::new(bytes, filename, mime_type)?)
}

fn detect_mime(bytes: &[u8], path: &Path) -> Option<&'static str> {
    let mime = match infer::get(bytes) {
        Some(kind) => kind.mime_type(),
        None => {
            let extension = path.extension()?.to_str()?.to_ascii_lowercase();
            match extension.as_str() {
                "jpg" | "jpeg" => "image/jpeg",
                "png" => "image/png",
                _ => return None,
            }
        }
    };
    ACCEPTED_TYPES.contains(&mime).then_some(mime)
}
