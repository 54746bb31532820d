use anyhow::Context;
use ottocollect_core::*;
use std::path::{Path, PathBuf};
use tracing::info;

/// Application state management - Domain state only
#[derive(Debug)]
pub struct AppState {
    /// Derived view over the currently loaded catalog
    pub view: Option<CollectionView<CatalogEntry>>,
    /// Catalog title from the loaded file
    pub title: Option<String>,
    /// Path to current catalog file
    pub current_file: Option<PathBuf>,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            view: None,
            title: None,
            current_file: None,
        }
    }

    /// Load a catalog file and build a fresh, unfiltered view over it
    pub fn load_from_file(&mut self, path: PathBuf) -> anyhow::Result<()> {
        let collection = load_collection(&path)
            .with_context(|| format!("loading catalog {}", path.display()))?;

        let mut view = CollectionView::new(collection.items, FilterState::default());
        view.set_sultan_order(collection.sultan_order);
        info!(
            path = %path.display(),
            entries = view.items().len(),
            categories = view.available_categories().len(),
            "catalog loaded"
        );

        self.view = Some(view);
        self.title = collection.title;
        self.current_file = Some(path);

        Ok(())
    }

    /// Apply a filter update to the loaded view
    /// Returns whether the view was recomputed
    pub fn apply_filters(&mut self, update: FilterUpdate) -> bool {
        self.view
            .as_mut()
            .map(|view| view.update_filters(update))
            .unwrap_or(false)
    }

    /// Overlay sultan ranks on top of the ones stored in the catalog
    pub fn merge_sultan_order(&mut self, overrides: SultanOrderMap) {
        if overrides.is_empty() {
            return;
        }

        if let Some(view) = self.view.as_mut() {
            let mut order = view.sultan_order().cloned().unwrap_or_default();
            order.extend(overrides);
            view.set_sultan_order(Some(order));
        }
    }

    /// Write the filtered, sorted entries to a new catalog file
    /// Returns the number of entries written
    pub fn export_filtered(&self, path: &Path) -> anyhow::Result<usize> {
        let view = self
            .view
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("No catalog loaded"))?;

        let collection = CollectionFile {
            title: self.title.clone(),
            items: view.filtered_items().to_vec(),
            sultan_order: view.sultan_order().cloned(),
            ..Default::default()
        };
        save_collection(&collection, path)
            .with_context(|| format!("exporting to {}", path.display()))?;
        info!(path = %path.display(), entries = collection.items.len(), "filtered catalog exported");

        Ok(collection.items.len())
    }

    /// Get report heading with catalog title or file name
    pub fn get_heading(&self) -> String {
        let file_name = self
            .current_file
            .as_ref()
            .and_then(|p| p.file_name())
            .and_then(|n| n.to_str())
            .unwrap_or("Untitled");

        match self.title.as_deref() {
            Some(title) => format!("{} ({})", title, file_name),
            None => file_name.to_string(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
