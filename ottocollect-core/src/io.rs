use crate::error::{CoreError, Result};
use crate::models::{CatalogEntry, CollectionFile};
use std::fs;
use std::path::Path;
use tracing::debug;

/// Load a catalog from a JSON file
/// Accepts a bare array of entries or a `{ "items": [...] }` document
pub fn load_collection<P: AsRef<Path>>(path: P) -> Result<CollectionFile> {
    let path = path.as_ref();
    let contents = fs::read_to_string(path).map_err(|source| CoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let collection = parse_collection(&contents)?;
    debug!(
        path = %path.display(),
        items = collection.items.len(),
        "loaded collection"
    );
    Ok(collection)
}

/// Parse catalog JSON text
pub fn parse_collection(contents: &str) -> Result<CollectionFile> {
    let value: serde_json::Value = serde_json::from_str(contents)?;

    if value.is_array() {
        let items: Vec<CatalogEntry> = serde_json::from_value(value)?;
        return Ok(CollectionFile {
            items,
            ..Default::default()
        });
    }

    Ok(serde_json::from_value(value)?)
}

/// Save a catalog to a JSON file with pretty printing
pub fn save_collection<P: AsRef<Path>>(collection: &CollectionFile, path: P) -> Result<()> {
    let path = path.as_ref();
    let json = serde_json::to_string_pretty(collection)?;
    fs::write(path, json).map_err(|source| CoreError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    debug!(path = %path.display(), items = collection.items.len(), "saved collection");
    Ok(())
}
