/// Category catalog: the persisted set of selectable interests
///
/// Membership and order are fixed once the catalog is generated. Only the
/// `selected` flag of a category ever changes.

use crate::config::{CATEGORIES_KEY, ShellConfig};
use crate::error::{CatalogError, StoreError};
use crate::storage::PersistentStore;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

const DEPARTMENTS: &[&str] = &[
    "Automotive",
    "Baby",
    "Beauty",
    "Books",
    "Clothing",
    "Computers",
    "Electronics",
    "Games",
    "Garden",
    "Grocery",
    "Health",
    "Home",
    "Industrial",
    "Jewelery",
    "Kids",
    "Movies",
    "Music",
    "Outdoors",
    "Shoes",
    "Sports",
    "Tools",
    "Toys",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    pub id: String,
    #[serde(rename = "name")]
    pub label: String,
    #[serde(rename = "isSelected")]
    pub selected: bool,
}

impl Category {
    /// Notification text for the category's current state
    pub fn selection_message(&self) -> String {
        if self.selected {
            format!("Added {} to interests", self.label)
        } else {
            format!("Removed {} from interests", self.label)
        }
    }
}

/// Generate `count` unselected categories with fresh UUIDs
pub fn generate_categories(count: usize) -> Vec<Category> {
    (0..count)
        .map(|_| {
            let id = Uuid::new_v4();
            // The id is random; reuse its leading bytes to pick a label
            let bytes = id.as_bytes();
            let pick = u16::from_le_bytes([bytes[0], bytes[1]]) as usize % DEPARTMENTS.len();
            Category {
                id: id.to_string(),
                label: DEPARTMENTS[pick].to_string(),
                selected: false,
            }
        })
        .collect()
}

pub struct CategoryCatalog {
    store: PersistentStore,
    size: usize,
    items: Option<Vec<Category>>,
}

impl CategoryCatalog {
    pub fn new(store: PersistentStore) -> Self {
        Self::with_config(store, &ShellConfig::default())
    }

    pub fn with_config(store: PersistentStore, config: &ShellConfig) -> Self {
        CategoryCatalog {
            store,
            size: config.catalog_size,
            items: None,
        }
    }

    /// Load the persisted catalog, generating and persisting it on first use
    pub fn load(&mut self) -> Result<&[Category], StoreError> {
        let items = match self.store.read::<Vec<Category>>(CATEGORIES_KEY)? {
            Some(items) => {
                log::debug!("catalog: loaded {} categories", items.len());
                items
            }
            None => {
                let items = generate_categories(self.size);
                self.store.write(CATEGORIES_KEY, &items)?;
                log::info!("catalog: generated {} categories", items.len());
                items
            }
        };

        let items = self.items.insert(items);
        Ok(items.as_slice())
    }

    /// Categories as last loaded; empty before the first `load`
    pub fn categories(&self) -> &[Category] {
        self.items.as_deref().unwrap_or_default()
    }

    /// Flip the selection of one category and persist the whole catalog.
    ///
    /// The flip is applied to the stored catalog, not the cached copy, so
    /// toggles made through another handle on the same store are kept.
    pub fn toggle(&mut self, id: &str) -> Result<Category, CatalogError> {
        if self.items.is_none() {
            self.load()?;
        }

        let (toggled, items) = self
            .store
            .update(CATEGORIES_KEY, |items: &mut Vec<Category>| {
                let Some(index) = items.iter().position(|c| c.id == id) else {
                    log::warn!("catalog: toggle of unknown category {}", id);
                    return Err(CatalogError::NotFound(id.to_string()));
                };
                items[index].selected = !items[index].selected;
                Ok((items[index].clone(), items.clone()))
            })?;

        self.items = Some(items);
        log::debug!("catalog: {} selected={}", toggled.id, toggled.selected);
        Ok(toggled)
    }

    /// Selected categories in catalog order. O(n) per call.
    pub fn selected(&self) -> Vec<&Category> {
        self.categories().iter().filter(|c| c.selected).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::testing::flaky_store;
    use std::collections::HashSet;

    fn ids(items: &[Category]) -> Vec<String> {
        items.iter().map(|c| c.id.clone()).collect()
    }

    #[test]
    fn test_fresh_catalog() {
        let mut catalog = CategoryCatalog::new(PersistentStore::in_memory());

        let items = catalog.load().unwrap();

        assert_eq!(items.len(), 100);
        assert!(items.iter().all(|c| !c.selected));
        assert!(items.iter().all(|c| !c.label.is_empty()));
        let unique: HashSet<&str> = items.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(unique.len(), 100);
    }

    #[test]
    fn test_load_is_stable() {
        let store = PersistentStore::in_memory();
        let mut catalog = CategoryCatalog::new(store.clone());

        let first = ids(catalog.load().unwrap());
        let second = ids(catalog.load().unwrap());
        let reopened = ids(CategoryCatalog::new(store).load().unwrap());

        assert_eq!(first, second);
        assert_eq!(first, reopened);
    }

    #[test]
    fn test_stored_empty_catalog_is_kept() {
        let store = PersistentStore::in_memory();
        store.write(CATEGORIES_KEY, &Vec::<Category>::new()).unwrap();
        let mut catalog = CategoryCatalog::new(store);

        assert!(catalog.load().unwrap().is_empty());
    }

    #[test]
    fn test_toggle_selects_one() {
        let mut catalog = CategoryCatalog::new(PersistentStore::in_memory());
        let id = catalog.load().unwrap()[3].id.clone();

        let toggled = catalog.toggle(&id).unwrap();

        assert!(toggled.selected);
        assert!(catalog.categories()[3].selected);
        assert_eq!(catalog.selected().len(), 1);
        assert_eq!(catalog.selected()[0].id, id);
    }

    #[test]
    fn test_toggle_twice_restores_state() {
        let mut catalog = CategoryCatalog::new(PersistentStore::in_memory());
        let before = catalog.load().unwrap().to_vec();
        let id = before[10].id.clone();

        catalog.toggle(&id).unwrap();
        let toggled = catalog.toggle(&id).unwrap();

        assert!(!toggled.selected);
        assert_eq!(catalog.categories(), before.as_slice());
    }

    #[test]
    fn test_toggle_persists() {
        let store = PersistentStore::in_memory();
        let mut catalog = CategoryCatalog::new(store.clone());
        let id = catalog.load().unwrap()[0].id.clone();

        catalog.toggle(&id).unwrap();

        let mut reopened = CategoryCatalog::new(store);
        assert!(reopened.load().unwrap()[0].selected);
    }

    #[test]
    fn test_toggle_before_load() {
        let store = PersistentStore::in_memory();
        let id = CategoryCatalog::new(store.clone()).load().unwrap()[5].id.clone();
        let mut catalog = CategoryCatalog::new(store);

        let toggled = catalog.toggle(&id).unwrap();

        assert!(toggled.selected);
        assert_eq!(catalog.categories().len(), 100);
    }

    #[test]
    fn test_toggle_unknown_id() {
        let mut catalog = CategoryCatalog::new(PersistentStore::in_memory());
        catalog.load().unwrap();

        let result = catalog.toggle("nope");

        assert!(matches!(result, Err(CatalogError::NotFound(id)) if id == "nope"));
        assert!(catalog.selected().is_empty());
    }

    #[test]
    fn test_failed_persist_leaves_catalog_unchanged() {
        let (store, fail_writes) = flaky_store();
        let mut catalog = CategoryCatalog::new(store);
        let id = catalog.load().unwrap()[0].id.clone();
        fail_writes.set(true);

        let result = catalog.toggle(&id);

        assert!(matches!(result, Err(CatalogError::Persistence(_))));
        assert!(!catalog.categories()[0].selected);
    }

    #[test]
    fn test_toggles_from_two_handles_are_both_kept() {
        let store = PersistentStore::in_memory();
        let mut first = CategoryCatalog::new(store.clone());
        let mut second = CategoryCatalog::new(store.clone());
        let items = first.load().unwrap().to_vec();
        second.load().unwrap();

        second.toggle(&items[0].id).unwrap();
        first.toggle(&items[1].id).unwrap();

        let stored: Vec<Category> = store.read(CATEGORIES_KEY).unwrap().unwrap();
        assert!(stored[0].selected);
        assert!(stored[1].selected);
        assert!(first.categories()[0].selected);
        assert_eq!(first.selected().len(), 2);
    }

    #[test]
    fn test_failed_first_load_stores_nothing() {
        let (store, fail_writes) = flaky_store();
        let mut catalog = CategoryCatalog::new(store.clone());
        fail_writes.set(true);

        let result = catalog.load();

        assert!(matches!(result, Err(StoreError::Write { .. })));
        assert!(catalog.categories().is_empty());
        assert_eq!(store.read::<Vec<Category>>(CATEGORIES_KEY).unwrap(), None);
    }

    #[test]
    fn test_selected_follows_catalog_order() {
        let mut catalog = CategoryCatalog::new(PersistentStore::in_memory());
        let items = catalog.load().unwrap().to_vec();

        catalog.toggle(&items[40].id).unwrap();
        catalog.toggle(&items[2].id).unwrap();
        catalog.toggle(&items[17].id).unwrap();

        let selected: Vec<&str> = catalog.selected().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(
            selected,
            vec![items[2].id.as_str(), items[17].id.as_str(), items[40].id.as_str()]
        );
        assert_eq!(catalog.selected(), catalog.selected());
    }

    #[test]
    fn test_selection_message() {
        let mut category = Category {
            id: "c1".to_string(),
            label: "Books".to_string(),
            selected: true,
        };
        assert_eq!(category.selection_message(), "Added Books to interests");

        category.selected = false;
        assert_eq!(category.selection_message(), "Removed Books from interests");
    }

    #[test]
    fn test_stored_layout() {
        let category = Category {
            id: "c1".to_string(),
            label: "Toys".to_string(),
            selected: false,
        };

        let json = serde_json::to_value(&category).unwrap();

        assert_eq!(
            json,
            serde_json::json!({ "id": "c1", "name": "Toys", "isSelected": false })
        );
    }
}
