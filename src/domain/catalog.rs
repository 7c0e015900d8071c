//! Item display metadata passed through to presentation.
//!
//! The catalog never influences mining; it only lets callers decorate item
//! names with a code or image when rendering rules.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Display metadata for one catalog item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemInfo {
    pub name: String,
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
}

/// Item metadata keyed by item name.
#[derive(Debug, Clone, Default)]
pub struct ItemCatalog {
    items: HashMap<String, ItemInfo>,
}

impl ItemCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an item.
    pub fn insert(&mut self, info: ItemInfo) {
        self.items.insert(info.name.clone(), info);
    }

    /// Look up an item by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&ItemInfo> {
        self.items.get(name)
    }

    /// Item code for `name`, falling back to the name itself.
    #[must_use]
    pub fn code_or_name<'a>(&'a self, name: &'a str) -> &'a str {
        self.get(name)
            .and_then(|info| info.code.as_deref())
            .unwrap_or(name)
    }

    /// Number of catalog entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the catalog is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl FromIterator<ItemInfo> for ItemCatalog {
    fn from_iter<I: IntoIterator<Item = ItemInfo>>(iter: I) -> Self {
        let mut catalog = Self::new();
        for info in iter {
            catalog.insert(info);
        }
        catalog
    }
}
