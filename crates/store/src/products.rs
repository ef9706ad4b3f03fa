//! Product table.

use shop_core::{CategoryId, Product, ProductDraft, ProductId, SellerId, ValidationErrors};
use tracing::{debug, info};

use crate::{
    DeleteSummary, MemoryStore, Result, missing_reference, next_id, not_found, rejected,
    shape_errors,
};

impl MemoryStore {
    /// Check that the seller and every listed category exist.
    fn check_product_references(&self, errors: &mut ValidationErrors, draft: &ProductDraft) {
        if !self.sellers.contains_key(&draft.seller) {
            missing_reference(errors, "seller", "Seller", draft.seller.as_i32());
        }
        for category in &draft.categories {
            if !self.categories.contains_key(category) {
                missing_reference(errors, "categories", "Category", category.as_i32());
            }
        }
    }

    fn checked_product_draft(&self, draft: &ProductDraft) -> Result<()> {
        let mut errors = shape_errors(draft.validate());
        self.check_product_references(&mut errors, draft);
        if errors.is_empty() {
            Ok(())
        } else {
            Err(rejected("product", errors))
        }
    }

    /// Store a new product.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Validation` with every failed field rule and
    /// a `does_not_exist` failure per missing seller or category.
    pub fn create_product(&mut self, draft: ProductDraft) -> Result<&Product> {
        self.checked_product_draft(&draft)?;

        let id = ProductId::new(next_id(&mut self.sequences.product, "product")?);
        let product = draft.into_product(id).map_err(|e| rejected("product", e))?;

        debug!(product_id = %id, seller_id = %product.seller, title = %product.title, "product created");
        Ok(&*self.products.entry(id).or_insert(product))
    }

    /// Get a product by id.
    #[must_use]
    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.get(&id)
    }

    /// All products, in id order.
    pub fn products(&self) -> impl Iterator<Item = &Product> {
        self.products.values()
    }

    /// Products listed by one seller.
    pub fn products_by_seller(&self, seller: SellerId) -> impl Iterator<Item = &Product> {
        self.products.values().filter(move |p| p.seller == seller)
    }

    /// Products linked to one category.
    pub fn products_in_category(&self, category: CategoryId) -> impl Iterator<Item = &Product> {
        self.products
            .values()
            .filter(move |p| p.categories.contains(&category))
    }

    /// Replace a product's fields, including its seller and categories.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product does not exist.
    /// Returns `RepositoryError::Validation` with every failed rule.
    pub fn update_product(&mut self, id: ProductId, draft: ProductDraft) -> Result<&Product> {
        if !self.products.contains_key(&id) {
            return Err(not_found("product", id.as_i32()));
        }
        self.checked_product_draft(&draft)?;

        let product = draft.into_product(id).map_err(|e| rejected("product", e))?;
        debug!(product_id = %id, "product updated");
        self.products.insert(id, product);
        self.products
            .get(&id)
            .ok_or_else(|| not_found("product", id.as_i32()))
    }

    /// Delete a product and every order item that references it.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::NotFound` if the product does not exist.
    pub fn delete_product(&mut self, id: ProductId) -> Result<DeleteSummary> {
        if !self.products.contains_key(&id) {
            return Err(not_found("product", id.as_i32()));
        }

        let mut summary = DeleteSummary::default();
        self.remove_product_cascade(id, &mut summary);

        info!(product_id = %id, order_items = summary.order_items, "product deleted");
        Ok(summary)
    }

    /// Remove a product and the order items for it. Category links go with
    /// the product record.
    pub(crate) fn remove_product_cascade(&mut self, id: ProductId, summary: &mut DeleteSummary) {
        let before = self.order_items.len();
        self.order_items.retain(|_, item| item.product != id);
        summary.order_items += before - self.order_items.len();

        if self.products.remove(&id).is_some() {
            summary.products += 1;
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use rust_decimal::Decimal;
    use shop_core::ValidationCode;

    use crate::test_support::*;

    use super::*;

    #[test]
    fn test_create_product_for_seller() {
        let mut store = MemoryStore::new();
        let seller = store.create_seller(seller_draft("merchant")).unwrap().id();
        let product = store.create_product(product_draft(seller)).unwrap();

        assert_eq!(product.id, ProductId::new(1));
        assert_eq!(product.seller, seller);
        assert_eq!(product.to_string(), "Mechanical keyboard");
    }

    #[test]
    fn test_plain_customer_cannot_sell() {
        let mut store = MemoryStore::new();
        let id = store.create_customer(customer_draft("plain")).unwrap().id;

        let err = store
            .create_product(product_draft(SellerId::new(id.as_i32())))
            .unwrap_err();
        assert!(
            err.validation()
                .unwrap()
                .has("seller", ValidationCode::DoesNotExist)
        );
        assert_eq!(store.products().count(), 0);
    }

    #[test]
    fn test_reference_and_field_failures_are_reported_together() {
        let mut store = MemoryStore::new();
        let mut draft = product_draft(SellerId::new(9));
        draft.price = Decimal::new(-1, 0);
        draft.categories.insert(CategoryId::new(4));
        draft.categories.insert(CategoryId::new(5));

        let err = store.create_product(draft).unwrap_err();
        let errors = err.validation().unwrap();
        assert!(errors.has("price", ValidationCode::MinValue));
        assert!(errors.has("seller", ValidationCode::DoesNotExist));
        assert_eq!(
            errors.codes_for("categories"),
            vec![ValidationCode::DoesNotExist, ValidationCode::DoesNotExist]
        );
    }

    #[test]
    fn test_product_may_have_no_categories() {
        let s = scenario();
        assert!(s.store.product(s.product).unwrap().categories.is_empty());
    }

    #[test]
    fn test_filters_by_seller_and_category() {
        let mut s = scenario();
        let other = s.store.create_seller(seller_draft("trader")).unwrap().id();
        let books = s.store.create_category(category_draft("Books")).unwrap().id;

        let mut draft = product_draft(other);
        draft.title = "Field guide".to_owned();
        draft.categories.insert(books);
        let guide = s.store.create_product(draft).unwrap().id;

        let by_merchant: Vec<_> = s.store.products_by_seller(s.seller).map(|p| p.id).collect();
        assert_eq!(by_merchant, vec![s.product]);
        let in_books: Vec<_> = s.store.products_in_category(books).map(|p| p.id).collect();
        assert_eq!(in_books, vec![guide]);
    }

    #[test]
    fn test_update_product_keeps_id() {
        let mut s = scenario();
        let mut draft = product_draft(s.seller);
        draft.quantity = 0;
        draft.price = Decimal::new(2499, 2);

        let product = s.store.update_product(s.product, draft).unwrap();
        assert_eq!(product.id, s.product);
        assert_eq!(product.price, Decimal::new(2499, 2));
        assert_eq!(product.quantity, 0);
    }

    #[test]
    fn test_update_missing_product() {
        let mut s = scenario();
        let err = s
            .store
            .update_product(ProductId::new(99), product_draft(s.seller))
            .unwrap_err();
        assert!(err.validation().is_none());
    }

    #[test]
    fn test_delete_product_removes_its_order_items() {
        let mut s = scenario();
        let summary = s.store.delete_product(s.product).unwrap();

        assert_eq!(summary.products, 1);
        assert_eq!(summary.order_items, 1);
        assert_eq!(summary.total(), 2);
        assert!(s.store.order_item(s.item).is_none());
        assert!(s.store.order(s.order).is_some());
        assert!(s.store.seller(s.seller).is_some());
    }
}
