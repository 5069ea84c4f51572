use anyhow::{Context, Result};
use std::path::Path;

/// Build an index from a catalog file.
pub fn run_build(catalog: &Path, output: &Path) -> Result<()> {
    log::info!("Building index from {}", catalog.display());

    let index = setlist_search::build_index(catalog, output)
        .with_context(|| format!("Failed to build index from {}", catalog.display()))?;

    println!("Index built: {}  ({} tracks)", output.display(), index.len());
    Ok(())
}
