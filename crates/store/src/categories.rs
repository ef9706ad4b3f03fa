//! Category table. Names are unique.

use shop_core::{Category, CategoryDraft, CategoryId, ValidationCode, ValidationError, ValidationErrors};
use tracing::{debug, info};

use crate::{MemoryStore, Result, next_id, not_found, rejected, shape_errors};

impl MemoryStore {
    /// Record a `unique` failure if another category already has this name.
    fn check_category_name(&self, errors: &mut ValidationErrors, name: &str, except: Option<CategoryId>) {
        let taken = self
            .categories
            .values()
            .any(|c| c.name == name && Some(c.id) != except);
        if taken {
            errors.push(
                "name",
                ValidationError::new(ValidationCode::Unique, "Category with this name already exists."),
            );
        }
    }

    /// Store a new category.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Validation` for a blank, too long or already
    /// used name.
    pub fn create_category(&mut self, draft: CategoryDraft) -> Result<&Category> {
        let mut errors = shape_errors(draft.validate());
        self.check_category_name(&mut errors, &draft.name, None);
        if !errors.is_empty() {
            return Err(rejected("category", errors));
        }

        let id = CategoryId::new(next_id(&mut self.sequences.category, "category")?);
        let category = draft.into_category(id).map_err(|e| rejected("category", e))?;

        debug!(category_id = %id, name = %category.name, "category created");
        Ok(&*self.categories.entry(id).or_insert(category))
    }

    /// Get a category by id.
    #[must_use]
    pub fn category(&self, id: CategoryId) -> Option<&Category> {
        self.categories.get(&id)
    }

    /// Find a category by its exact name.
    #[must_use]
    pub fn category_by_name(&self, name: &str) -> Option<&Category> {
        self.categories.values().find(|c| c.name == name)
    }

    /// All categories, in id order.
    pub fn categories(&self) -> impl Iterator<Item = &Category> {
        self.categories.values()
    }

    /// Rename a category. Keeping the current name is not a conflict.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the category does not exist.
    /// Returns `RepositoryError::Validation` for an invalid or taken name.
    pub fn update_category(&mut self, id: CategoryId, draft: CategoryDraft) -> Result<&Category> {
        if !self.categories.contains_key(&id) {
            return Err(not_found("category", id.as_i32()));
        }

        let mut errors = shape_errors(draft.validate());
        self.check_category_name(&mut errors, &draft.name, Some(id));
        if !errors.is_empty() {
            return Err(rejected("category", errors));
        }

        let category = draft.into_category(id).map_err(|e| rejected("category", e))?;
        debug!(category_id = %id, name = %category.name, "category updated");
        self.categories.insert(id, category);
        self.categories
            .get(&id)
            .ok_or_else(|| not_found("category", id.as_i32()))
    }

    /// Delete a category and unlink it from every product.
    ///
    /// Products themselves are kept. Returns how many products were unlinked.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the category does not exist.
    pub fn delete_category(&mut self, id: CategoryId) -> Result<usize> {
        if self.categories.remove(&id).is_none() {
            return Err(not_found("category", id.as_i32()));
        }

        let unlinked = self
            .products
            .values_mut()
            .map(|p| p.categories.remove(&id))
            .filter(|removed| *removed)
            .count();

        info!(category_id = %id, unlinked, "category deleted");
        Ok(unlinked)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use crate::test_support::*;

    use super::*;

    #[test]
    fn test_duplicate_name_is_rejected() {
        let mut store = MemoryStore::new();
        store.create_category(category_draft("Electronics")).unwrap();

        let err = store.create_category(category_draft("Electronics")).unwrap_err();
        assert_eq!(
            err.validation().unwrap().codes_for("name"),
            vec![ValidationCode::Unique]
        );
        assert_eq!(store.categories().count(), 1);
    }

    #[test]
    fn test_names_are_case_sensitive() {
        let mut store = MemoryStore::new();
        store.create_category(category_draft("Electronics")).unwrap();
        assert!(store.create_category(category_draft("electronics")).is_ok());
    }

    #[test]
    fn test_blank_name_reports_blank_only() {
        let mut store = MemoryStore::new();
        let err = store.create_category(category_draft("")).unwrap_err();
        assert_eq!(
            err.validation().unwrap().codes_for("name"),
            vec![ValidationCode::Blank]
        );
    }

    #[test]
    fn test_lookup_by_name() {
        let mut store = MemoryStore::new();
        let id = store.create_category(category_draft("Books")).unwrap().id;
        assert_eq!(store.category_by_name("Books").unwrap().id, id);
        assert!(store.category_by_name("books").is_none());
        assert_eq!(store.category(id).unwrap().to_string(), "Books");
    }

    #[test]
    fn test_rename_to_own_name_is_allowed() {
        let mut store = MemoryStore::new();
        let id = store.create_category(category_draft("Books")).unwrap().id;
        assert!(store.update_category(id, category_draft("Books")).is_ok());
    }

    #[test]
    fn test_rename_to_taken_name_is_rejected() {
        let mut store = MemoryStore::new();
        store.create_category(category_draft("Books")).unwrap();
        let games = store.create_category(category_draft("Games")).unwrap().id;

        let err = store.update_category(games, category_draft("Books")).unwrap_err();
        assert!(err.validation().unwrap().has("name", ValidationCode::Unique));
        assert_eq!(store.category(games).unwrap().name, "Games");
    }

    #[test]
    fn test_delete_unlinks_products_but_keeps_them() {
        let mut s = scenario();
        let books = s.store.create_category(category_draft("Books")).unwrap().id;
        let games = s.store.create_category(category_draft("Games")).unwrap().id;

        let mut draft = product_draft(s.seller);
        draft.categories = [books, games].into_iter().collect();
        s.store.update_product(s.product, draft).unwrap();

        let unlinked = s.store.delete_category(books).unwrap();
        assert_eq!(unlinked, 1);

        let product = s.store.product(s.product).unwrap();
        assert_eq!(product.categories.iter().copied().collect::<Vec<_>>(), vec![games]);
        assert!(s.store.category(books).is_none());
    }

    #[test]
    fn test_delete_missing_category() {
        let mut store = MemoryStore::new();
        assert!(store.delete_category(CategoryId::new(3)).is_err());
    }
}
