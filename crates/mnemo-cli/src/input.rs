//! Reading note text and image files from the terminal side.

use std::io::Read;
use std::path::Path;

use anyhow::{bail, Context, Result};

use mnemo_core::ImagePayload;

/// Note text from the argument, or from `stdin` when the argument is `-`.
pub fn read_note(arg: &str, mut stdin: impl Read) -> Result<String> {
    if arg != "-" {
        return Ok(arg.to_string());
    }
    let mut text = String::new();
    stdin
        .read_to_string(&mut text)
        .context("Failed to read note from stdin")?;
    Ok(text)
}

/// Load an image file as a `data:` URI, sniffing the MIME type from its bytes.
pub fn load_image(path: &Path) -> Result<String> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read {}", path.display()))?;
    if bytes.is_empty() {
        bail!("{} is empty", path.display());
    }

    let mime = match infer::get(&bytes) {
        Some(kind) if kind.matcher_type() == infer::MatcherType::Image => kind.mime_type(),
        Some(kind) => bail!(
            "{} is not an image (detected {})",
            path.display(),
            kind.mime_type()
        ),
        None => bail!("{} is not a recognized image format", path.display()),
    };

    Ok(ImagePayload::from_bytes(&bytes, mime).to_data_uri())
}
