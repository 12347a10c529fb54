use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use crate::rows::{DecorationPriceRow, PriceDependence, ProductTierRow};
use crate::{CatalogError, CatalogResult};

/// One structural problem found while loading the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationIssue {
    /// The item code or technique code the issue belongs to.
    pub code: String,
    pub reason: String,
}

impl fmt::Display for ValidationIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code, self.reason)
    }
}

/// A base product: its tier rows plus the technique codes it can be
/// decorated with.
#[derive(Debug, Clone)]
pub struct ProductEntry {
    description: String,
    decoration_codes: Vec<String>,
    tiers: Vec<ProductTierRow>,
}

impl ProductEntry {
    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn decoration_codes(&self) -> &[String] {
        &self.decoration_codes
    }

    /// Tier rows sorted by ascending price bar.
    pub fn tiers(&self) -> &[ProductTierRow] {
        &self.tiers
    }

    pub fn offers_technique(&self, technique_code: &str) -> bool {
        self.decoration_codes.iter().any(|c| c == technique_code)
    }
}

/// A decoration technique: its price rows under one shared dependence.
#[derive(Debug, Clone)]
pub struct TechniqueEntry {
    name: String,
    dependence: PriceDependence,
    rows: Vec<DecorationPriceRow>,
}

impl TechniqueEntry {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn dependence(&self) -> PriceDependence {
        self.dependence
    }

    pub fn rows(&self) -> &[DecorationPriceRow] {
        &self.rows
    }
}

/// Listing entry returned by product search.
#[derive(Debug, Clone, Serialize)]
pub struct ProductSummary {
    pub item_code: String,
    pub description: String,
}

/// An immutable catalog snapshot.
///
/// Built once by [`Catalog::load`], then only read. Every pricing call takes
/// a `&Catalog`; embeddings that reload feeds swap in a whole new snapshot
/// rather than mutating this one.
#[derive(Debug, Clone)]
pub struct Catalog {
    products: HashMap<String, ProductEntry>,
    techniques: HashMap<String, TechniqueEntry>,
}

impl Catalog {
    /// Build a catalog from parsed feed rows, validating every structural
    /// invariant. All offending rows are reported in one pass; a catalog
    /// with validation issues is never partially loaded.
    pub fn load(
        product_rows: Vec<ProductTierRow>,
        decoration_rows: Vec<DecorationPriceRow>,
    ) -> CatalogResult<Catalog> {
        let mut issues = Vec::new();

        let mut products: HashMap<String, ProductEntry> = HashMap::new();
        for row in product_rows {
            let entry = products.entry(row.item_code.clone()).or_insert_with(|| ProductEntry {
                description: row.description.clone(),
                decoration_codes: row.decoration_codes.clone(),
                tiers: Vec::new(),
            });
            if entry.tiers.iter().any(|t| t.price_bar == row.price_bar) {
                issues.push(ValidationIssue {
                    code: row.item_code.clone(),
                    reason: format!("duplicate price bar {}", row.price_bar),
                });
            }
            entry.tiers.push(row);
        }
        for entry in products.values_mut() {
            entry.tiers.sort_by_key(|t| t.price_bar);
        }

        let mut techniques: HashMap<String, TechniqueEntry> = HashMap::new();
        for row in decoration_rows {
            let entry =
                techniques.entry(row.technique_code.clone()).or_insert_with(|| TechniqueEntry {
                    name: row.technique_name.clone(),
                    dependence: row.price_dependence,
                    rows: Vec::new(),
                });
            if row.price_dependence != entry.dependence {
                issues.push(ValidationIssue {
                    code: row.technique_code.clone(),
                    reason: format!(
                        "mixed price dependence: {} vs {}",
                        row.price_dependence, entry.dependence
                    ),
                });
            }
            entry.rows.push(row);
        }

        for (code, entry) in &techniques {
            validate_technique(code, entry, &mut issues);
        }

        if !issues.is_empty() {
            return Err(CatalogError::Validation(issues));
        }

        // A product may reference a technique the decoration feed does not
        // carry. That cannot fail the load (it would take every other
        // product offline); the quote path reports it as a typed error.
        for (item_code, entry) in &products {
            for code in &entry.decoration_codes {
                if !techniques.contains_key(code) {
                    tracing::warn!(item_code, technique_code = %code, "dangling technique reference");
                }
            }
        }

        tracing::info!(
            products = products.len(),
            techniques = techniques.len(),
            "catalog loaded"
        );
        Ok(Catalog { products, techniques })
    }

    pub fn product(&self, item_code: &str) -> Option<&ProductEntry> {
        self.products.get(item_code)
    }

    pub fn technique(&self, technique_code: &str) -> Option<&TechniqueEntry> {
        self.techniques.get(technique_code)
    }

    /// Case-insensitive substring search over product descriptions. An empty
    /// query lists the whole catalog. Results are ordered by item code.
    pub fn search_products(&self, query: &str) -> Vec<ProductSummary> {
        let needle = query.trim().to_lowercase();
        let mut matches: Vec<ProductSummary> = self
            .products
            .iter()
            .filter(|(_, entry)| {
                needle.is_empty() || entry.description.to_lowercase().contains(&needle)
            })
            .map(|(item_code, entry)| ProductSummary {
                item_code: item_code.clone(),
                description: entry.description.clone(),
            })
            .collect();
        matches.sort_by(|a, b| a.item_code.cmp(&b.item_code));
        matches
    }

    pub fn product_count(&self) -> usize {
        self.products.len()
    }

    pub fn technique_count(&self) -> usize {
        self.techniques.len()
    }
}

fn validate_technique(code: &str, entry: &TechniqueEntry, issues: &mut Vec<ValidationIssue>) {
    let push = |issues: &mut Vec<ValidationIssue>, reason: String| {
        issues.push(ValidationIssue { code: code.to_string(), reason });
    };

    match entry.dependence {
        PriceDependence::Flat => {
            if entry.rows.len() != 1 {
                push(
                    issues,
                    format!("flat technique has {} price rows, expected exactly 1", entry.rows.len()),
                );
            }
        }
        PriceDependence::ColorCount => {
            let mut seen = Vec::new();
            for row in &entry.rows {
                match row.color {
                    None => push(issues, "price row is missing its color count key".to_string()),
                    Some(color) => {
                        if seen.contains(&color) {
                            push(issues, format!("duplicate color key: {color}"));
                        }
                        seen.push(color);
                    }
                }
            }
        }
        PriceDependence::Size => {
            let mut seen = Vec::new();
            for row in &entry.rows {
                match row.size_cm2 {
                    None => push(issues, "price row is missing its size key".to_string()),
                    Some(size) => {
                        if seen.contains(&size) {
                            push(issues, format!("duplicate size key: {size} cm2"));
                        }
                        seen.push(size);
                    }
                }
            }
        }
        PriceDependence::QuantityTier => {
            let mut seen = Vec::new();
            for row in &entry.rows {
                match row.min_quantity {
                    None => {
                        push(issues, "price row is missing its minimum quantity key".to_string())
                    }
                    Some(bar) => {
                        if seen.contains(&bar) {
                            push(issues, format!("duplicate minimum quantity {bar}"));
                        }
                        seen.push(bar);
                    }
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rows::ColorSelection;
    use rust_decimal_macros::dec;

    fn tier(item: &str, bar: u32, price: rust_decimal::Decimal) -> ProductTierRow {
        ProductTierRow {
            item_code: item.to_string(),
            description: format!("{item} desc"),
            decoration_codes: vec!["EMB".to_string()],
            price_bar: bar,
            unit_price: price,
        }
    }

    fn deco(
        code: &str,
        dependence: PriceDependence,
        color: Option<ColorSelection>,
        min_quantity: Option<u32>,
    ) -> DecorationPriceRow {
        DecorationPriceRow {
            technique_code: code.to_string(),
            technique_name: format!("{code} name"),
            price_dependence: dependence,
            color,
            size_cm2: None,
            setup_charge: dec!(5),
            unit_price: dec!(0.50),
            min_quantity,
        }
    }

    #[test]
    fn loads_and_sorts_tiers() {
        let catalog = Catalog::load(
            vec![tier("MUG", 100, dec!(8)), tier("MUG", 1, dec!(10)), tier("MUG", 50, dec!(9))],
            vec![deco("EMB", PriceDependence::Flat, None, None)],
        )
        .unwrap();

        let bars: Vec<u32> =
            catalog.product("MUG").unwrap().tiers().iter().map(|t| t.price_bar).collect();
        assert_eq!(bars, vec![1, 50, 100]);
    }

    #[test]
    fn rejects_duplicate_price_bar() {
        let err = Catalog::load(
            vec![tier("MUG", 50, dec!(9)), tier("MUG", 50, dec!(8))],
            Vec::new(),
        )
        .unwrap_err();

        match err {
            CatalogError::Validation(issues) => {
                assert_eq!(issues.len(), 1);
                assert_eq!(issues[0].code, "MUG");
                assert!(issues[0].reason.contains("duplicate price bar 50"));
            }
            other => panic!("expected validation error, got {other}"),
        }
    }

    #[test]
    fn rejects_mixed_dependence_and_flat_with_two_rows() {
        let err = Catalog::load(
            Vec::new(),
            vec![
                deco("EMB", PriceDependence::Flat, None, None),
                deco("EMB", PriceDependence::ColorCount, Some(ColorSelection::Count(1)), None),
                deco("SCR", PriceDependence::Flat, None, None),
                deco("SCR", PriceDependence::Flat, None, None),
            ],
        )
        .unwrap_err();

        let CatalogError::Validation(issues) = err else {
            panic!("expected validation error");
        };
        assert!(issues.iter().any(|i| i.code == "EMB" && i.reason.contains("mixed")));
        assert!(issues.iter().any(|i| i.code == "SCR" && i.reason.contains("expected exactly 1")));
    }

    #[test]
    fn rejects_missing_and_duplicate_keys() {
        let err = Catalog::load(
            Vec::new(),
            vec![
                deco("PRN", PriceDependence::ColorCount, Some(ColorSelection::Count(2)), None),
                deco("PRN", PriceDependence::ColorCount, Some(ColorSelection::Count(2)), None),
                deco("PRN", PriceDependence::ColorCount, None, None),
                deco("TRF", PriceDependence::QuantityTier, None, Some(50)),
                deco("TRF", PriceDependence::QuantityTier, None, None),
            ],
        )
        .unwrap_err();

        let CatalogError::Validation(issues) = err else {
            panic!("expected validation error");
        };
        assert!(issues.iter().any(|i| i.code == "PRN" && i.reason.contains("duplicate color key")));
        assert!(issues.iter().any(|i| i.code == "PRN" && i.reason.contains("missing its color")));
        assert!(issues.iter().any(|i| i.code == "TRF" && i.reason.contains("missing its minimum")));
    }

    #[test]
    fn dangling_technique_reference_still_loads() {
        // MUG references EMB which the decoration feed does not carry; the
        // reference is reported at quote time, not load time.
        let catalog = Catalog::load(vec![tier("MUG", 1, dec!(10))], Vec::new()).unwrap();
        assert!(catalog.product("MUG").is_some());
        assert!(catalog.technique("EMB").is_none());
    }

    #[test]
    fn search_matches_case_insensitive_substrings() {
        let mut rows = vec![tier("MUG", 1, dec!(10))];
        rows[0].description = "Ceramic Mug 300ml".to_string();
        let mut pen = tier("PEN", 1, dec!(1));
        pen.description = "Ballpoint pen blue".to_string();
        rows.push(pen);

        let catalog = Catalog::load(rows, Vec::new()).unwrap();

        let hits = catalog.search_products("mug");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].item_code, "MUG");

        assert_eq!(catalog.search_products("").len(), 2);
        assert!(catalog.search_products("umbrella").is_empty());
    }
}
