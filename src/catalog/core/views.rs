//! Derived views over the product collection: filters and metrics.
//!
//! All functions are pure and recomputed on every call; callers that hold
//! the collection behind a store re-derive on read, so observers always see
//! values consistent with the current collection.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use super::model::{Product, NA_SENTINEL, STATUS_OK, STATUS_UNAVAILABLE};

/// Free-text + status filter. Empty parts match everything.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct ProductFilter {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub status: String,
}

impl ProductFilter {
    pub fn new(query: impl Into<String>, status: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            status: status.into(),
        }
    }

    pub fn is_active(&self) -> bool {
        !self.query.is_empty() || !self.status.is_empty()
    }

    /// Query matches name, id or ean case-insensitively; status matches
    /// exactly. Both predicates must hold.
    pub fn matches(&self, product: &Product) -> bool {
        let matches_query = self.query.is_empty() || {
            let query = self.query.to_lowercase();
            product.name.to_lowercase().contains(&query)
                || product.id.to_lowercase().contains(&query)
                || product.ean.to_lowercase().contains(&query)
        };

        let matches_status = self.status.is_empty() || product.status == self.status;

        matches_query && matches_status
    }
}

pub fn filter_products(products: &[Product], filter: &ProductFilter) -> Vec<Product> {
    products
        .iter()
        .filter(|p| filter.matches(p))
        .cloned()
        .collect()
}

/// Distinct non-empty status values, first-seen order.
pub fn distinct_statuses(products: &[Product]) -> Vec<String> {
    let mut seen: HashSet<&str> = HashSet::new();
    let mut statuses: Vec<String> = Vec::new();
    for product in products {
        if product.status.is_empty() {
            continue;
        }
        if seen.insert(product.status.as_str()) {
            statuses.push(product.status.clone());
        }
    }
    statuses
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CatalogMetrics {
    pub with_bb_image: u32,
    pub with_mirakl_image: u32,
    pub unavailable: u32,
    pub ok: u32,
    /// Mean over products with a score, rounded to 3 decimals; 0 when none.
    pub average_score: f64,
    pub total: u32,
    pub with_both_images: u32,
}

impl CatalogMetrics {
    pub fn compute(products: &[Product]) -> Self {
        let has_bb = |p: &Product| !p.bb_image_url.trim().is_empty();
        let has_mirakl = |p: &Product| {
            let image = p.mirakl_image.trim();
            !image.is_empty() && image != NA_SENTINEL
        };

        let scores: Vec<f64> = products.iter().filter_map(|p| p.score).collect();
        let average_score = if scores.is_empty() {
            0.0
        } else {
            let total: f64 = scores.iter().sum();
            (total / scores.len() as f64 * 1000.0).round() / 1000.0
        };

        Self {
            with_bb_image: count(products, has_bb),
            with_mirakl_image: count(products, has_mirakl),
            unavailable: count(products, |p| p.status == STATUS_UNAVAILABLE),
            ok: count(products, |p| p.status == STATUS_OK),
            average_score,
            total: products.len() as u32,
            with_both_images: count(products, |p| {
                !p.bb_image_url.trim().is_empty() && !p.mirakl_image.trim().is_empty()
            }),
        }
    }
}

fn count(products: &[Product], predicate: impl Fn(&Product) -> bool) -> u32 {
    products.iter().filter(|p| predicate(p)).count() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, name: &str, ean: &str, status: &str) -> Product {
        Product {
            id: id.to_string(),
            ean: ean.to_string(),
            name: name.to_string(),
            status: status.to_string(),
            score: None,
            mirakl_image: String::new(),
            bb_image_url: String::new(),
        }
    }

    fn sample() -> Vec<Product> {
        vec![
            product("J1", "Cafeteira ABC", "789000111", STATUS_OK),
            product("J2", "Liquidificador", "789000222", STATUS_UNAVAILABLE),
            product("ABC-3", "Torradeira", "789000333", STATUS_OK),
            product("J4", "Batedeira", "789abc444", ""),
        ]
    }

    #[test]
    fn empty_filter_matches_everything_and_is_inactive() {
        let products = sample();
        let filter = ProductFilter::default();
        assert!(!filter.is_active());
        assert_eq!(filter_products(&products, &filter).len(), products.len());
    }

    #[test]
    fn query_matches_name_id_or_ean_case_insensitively() {
        let products = sample();
        let filter = ProductFilter::new("abc", "");
        let matched = filter_products(&products, &filter);
        let ids: Vec<&str> = matched.iter().map(|p| p.id.as_str()).collect();
        // name "Cafeteira ABC", id "ABC-3", ean "789abc444"
        assert_eq!(ids, ["J1", "ABC-3", "J4"]);
    }

    #[test]
    fn status_filter_is_exact_and_ands_with_the_query() {
        let products = sample();

        let by_status = filter_products(&products, &ProductFilter::new("", STATUS_OK));
        assert_eq!(by_status.len(), 2);

        let both = filter_products(&products, &ProductFilter::new("abc", STATUS_OK));
        let ids: Vec<&str> = both.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["J1", "ABC-3"]);
    }

    #[test]
    fn is_active_iff_any_part_is_non_empty() {
        assert!(!ProductFilter::new("", "").is_active());
        assert!(ProductFilter::new("x", "").is_active());
        assert!(ProductFilter::new("", STATUS_OK).is_active());
    }

    #[test]
    fn distinct_statuses_keeps_first_seen_order_and_drops_empty() {
        let statuses = distinct_statuses(&sample());
        assert_eq!(statuses, [STATUS_OK, STATUS_UNAVAILABLE]);
    }

    #[test]
    fn average_score_ignores_absent_scores_and_rounds_to_3_decimals() {
        let mut products = sample();
        products[0].score = Some(4.0);
        products[1].score = None;
        products[2].score = Some(2.0);

        let metrics = CatalogMetrics::compute(&products);
        assert_eq!(metrics.average_score, 3.0);

        products[2].score = Some(2.0001);
        let metrics = CatalogMetrics::compute(&products);
        assert_eq!(metrics.average_score, 3.0);
    }

    #[test]
    fn average_score_is_zero_when_no_product_has_a_score() {
        let metrics = CatalogMetrics::compute(&sample());
        assert_eq!(metrics.average_score, 0.0);
    }

    #[test]
    fn image_metrics_treat_na_and_blank_as_missing() {
        let mut products = sample();
        products[0].bb_image_url = "https://img.example/b0.jpg".to_string();
        products[0].mirakl_image = NA_SENTINEL.to_string();
        products[1].mirakl_image = "https://img.example/m1.jpg".to_string();
        products[2].bb_image_url = "https://img.example/b2.jpg".to_string();
        products[2].mirakl_image = "https://img.example/m2.jpg".to_string();
        products[3].mirakl_image = "  ".to_string();

        let metrics = CatalogMetrics::compute(&products);
        assert_eq!(metrics.with_bb_image, 2);
        assert_eq!(metrics.with_mirakl_image, 2);
        // J1 has a bb image and a literal "N/A" mirakl value: the pair count
        // only requires both fields non-empty.
        assert_eq!(metrics.with_both_images, 2);
    }

    #[test]
    fn status_counts_match_exact_values() {
        let metrics = CatalogMetrics::compute(&sample());
        assert_eq!(metrics.ok, 2);
        assert_eq!(metrics.unavailable, 1);
        assert_eq!(metrics.total, 4);
    }
}
