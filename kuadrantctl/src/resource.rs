use anyhow::{bail, Context, Result};
use kuadrantctl_core::Document;
use std::io::Read;
use tracing::debug;

/// Names standard input as a document source.
pub(crate) const STDIN: &str = "-";

/// Loads an OpenAPI document from a local file, or from standard input when
/// the source is `-`.
pub(crate) fn load(source: &str) -> Result<Document> {
    let bytes = read(source)?;
    let doc = Document::from_slice(&bytes)
        .with_context(|| format!("failed to parse OpenAPI document from {source}"))?;
    debug!(
        %source,
        title = %doc.info.title,
        paths = doc.paths.len(),
        "Loaded OpenAPI document"
    );
    Ok(doc)
}

fn read(source: &str) -> Result<Vec<u8>> {
    if source == STDIN {
        let mut buf = Vec::new();
        std::io::stdin()
            .lock()
            .read_to_end(&mut buf)
            .context("failed to read OpenAPI document from standard input")?;
        return Ok(buf);
    }

    if is_remote(source) {
        bail!("remote OpenAPI documents are not supported, download {source} first");
    }

    std::fs::read(source).with_context(|| format!("failed to read {source}"))
}

fn is_remote(source: &str) -> bool {
    ["http://", "https://"].iter().any(|scheme| {
        source
            .get(..scheme.len())
            .map_or(false, |s| s.eq_ignore_ascii_case(scheme))
    })
}
