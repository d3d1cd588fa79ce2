//! In-memory product collection: ordered, id-keyed CRUD.
//!
//! - Insertion order is preserved; `replace_all` swaps the whole sequence.
//! - Unknown ids on update/delete are silent no-ops, not errors.

use uuid::Uuid;

use super::model::{Product, ProductDraft, ProductPatch};

pub fn synthesize_product_id() -> String {
    Uuid::new_v4().to_string()
}

#[derive(Debug, Default)]
pub struct ProductStore {
    products: Vec<Product>,
}

impl ProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_products(products: Vec<Product>) -> Self {
        Self { products }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Appends a new product; a blank or missing draft id is replaced by a
    /// synthesized one. Returns the stored record.
    pub fn add(&mut self, draft: ProductDraft) -> Product {
        let id = draft
            .id
            .filter(|id| !id.trim().is_empty())
            .unwrap_or_else(synthesize_product_id);

        let product = Product {
            id,
            ean: draft.ean,
            name: draft.name,
            status: draft.status,
            score: draft.score,
            mirakl_image: draft.mirakl_image,
            bb_image_url: draft.bb_image_url,
        };

        self.products.push(product.clone());
        product
    }

    /// Merges the given fields into the record matching `id`. The id itself
    /// cannot be changed. Returns whether a record was touched.
    pub fn update(&mut self, id: &str, patch: &ProductPatch) -> bool {
        let Some(product) = self.products.iter_mut().find(|p| p.id == id) else {
            return false;
        };

        if let Some(ean) = &patch.ean {
            product.ean = ean.clone();
        }
        if let Some(name) = &patch.name {
            product.name = name.clone();
        }
        if let Some(status) = &patch.status {
            product.status = status.clone();
        }
        if let Some(score) = patch.score {
            product.score = score;
        }
        if let Some(mirakl_image) = &patch.mirakl_image {
            product.mirakl_image = mirakl_image.clone();
        }
        if let Some(bb_image_url) = &patch.bb_image_url {
            product.bb_image_url = bb_image_url.clone();
        }

        true
    }

    /// Removes the first record matching `id`. Returns whether one existed.
    pub fn delete(&mut self, id: &str) -> bool {
        let Some(index) = self.products.iter().position(|p| p.id == id) else {
            return false;
        };
        self.products.remove(index);
        true
    }

    pub fn get_by_id(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    /// Atomic whole-collection swap (bulk import).
    pub fn replace_all(&mut self, products: Vec<Product>) {
        self.products = products;
    }
}
