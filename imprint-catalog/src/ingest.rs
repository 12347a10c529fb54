use std::io::Read;

use serde::Deserialize;

use imprint_shared::parse_decimal;

use crate::rows::{ColorSelection, DecorationPriceRow, PriceDependence, ProductTierRow};
use crate::{CatalogError, CatalogResult};

/// Shape of one delimited feed. The observed feeds are semicolon separated,
/// but the delimiter differs across sources, so it is configured per feed.
#[derive(Debug, Clone, Copy)]
pub struct FeedFormat {
    pub delimiter: u8,
}

impl Default for FeedFormat {
    fn default() -> Self {
        Self { delimiter: b';' }
    }
}

impl FeedFormat {
    pub fn new(delimiter: u8) -> Self {
        Self { delimiter }
    }
}

// ============================================================================
// Raw feed records (column names as they appear in the feeds)
// ============================================================================

#[derive(Debug, Deserialize)]
struct RawProductRecord {
    #[serde(rename = "itemcode")]
    item_code: String,
    description: String,
    /// Comma-joined technique codes, e.g. `"S1,T1"`.
    #[serde(rename = "decoCharge", default)]
    deco_charge: String,
    #[serde(rename = "priceBar")]
    price_bar: String,
    #[serde(rename = "nettPrice")]
    nett_price: String,
}

#[derive(Debug, Deserialize)]
struct RawDecorationRecord {
    #[serde(rename = "printCode")]
    print_code: String,
    #[serde(rename = "impMethod")]
    imp_method: String,
    #[serde(rename = "priceDependence")]
    price_dependence: String,
    #[serde(rename = "amountColorsId", default)]
    amount_colors_id: Option<String>,
    #[serde(rename = "sizeCm2", default)]
    size_cm2: Option<String>,
    #[serde(rename = "setupCharge")]
    setup_charge: String,
    #[serde(rename = "decoPrice")]
    deco_price: String,
    #[serde(rename = "decoPriceFromQty", default)]
    deco_price_from_qty: Option<String>,
}

// ============================================================================
// Feed readers
// ============================================================================

const PRODUCT_FEED: &str = "product price";
const DECORATION_FEED: &str = "decoration price";

/// Read the product price feed into tier rows.
pub fn read_product_feed(
    reader: impl Read,
    format: &FeedFormat,
) -> CatalogResult<Vec<ProductTierRow>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(format.delimiter)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (index, record) in csv_reader.deserialize::<RawProductRecord>().enumerate() {
        let record = record.map_err(|source| CatalogError::Feed { feed: PRODUCT_FEED, source })?;
        let record_no = index + 1;

        let price_bar = parse_quantity(&record.price_bar)
            .map_err(|reason| field_error(PRODUCT_FEED, record_no, "priceBar", reason))?;
        let unit_price = parse_decimal(&record.nett_price)
            .map_err(|e| field_error(PRODUCT_FEED, record_no, "nettPrice", e.to_string()))?;

        rows.push(ProductTierRow {
            item_code: record.item_code,
            description: record.description,
            decoration_codes: split_codes(&record.deco_charge),
            price_bar,
            unit_price,
        });
    }

    tracing::debug!(rows = rows.len(), "product feed ingested");
    Ok(rows)
}

/// Read the decoration price feed into technique price rows.
pub fn read_decoration_feed(
    reader: impl Read,
    format: &FeedFormat,
) -> CatalogResult<Vec<DecorationPriceRow>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .delimiter(format.delimiter)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut rows = Vec::new();
    for (index, record) in csv_reader.deserialize::<RawDecorationRecord>().enumerate() {
        let record =
            record.map_err(|source| CatalogError::Feed { feed: DECORATION_FEED, source })?;
        let record_no = index + 1;

        let price_dependence = PriceDependence::parse(&record.price_dependence).ok_or_else(|| {
            field_error(
                DECORATION_FEED,
                record_no,
                "priceDependence",
                format!("unknown price dependence {:?}", record.price_dependence),
            )
        })?;

        let color = match non_empty(record.amount_colors_id.as_deref()) {
            None => None,
            Some(raw) => Some(ColorSelection::parse(raw).ok_or_else(|| {
                field_error(
                    DECORATION_FEED,
                    record_no,
                    "amountColorsId",
                    format!("not a color count or the full-color key: {raw:?}"),
                )
            })?),
        };

        let size_cm2 = match non_empty(record.size_cm2.as_deref()) {
            None => None,
            Some(raw) => Some(parse_decimal(raw).map_err(|e| {
                field_error(DECORATION_FEED, record_no, "sizeCm2", e.to_string())
            })?),
        };

        let min_quantity = match non_empty(record.deco_price_from_qty.as_deref()) {
            None => None,
            Some(raw) => Some(parse_quantity(raw).map_err(|reason| {
                field_error(DECORATION_FEED, record_no, "decoPriceFromQty", reason)
            })?),
        };

        let setup_charge = parse_decimal(&record.setup_charge)
            .map_err(|e| field_error(DECORATION_FEED, record_no, "setupCharge", e.to_string()))?;
        let unit_price = parse_decimal(&record.deco_price)
            .map_err(|e| field_error(DECORATION_FEED, record_no, "decoPrice", e.to_string()))?;

        rows.push(DecorationPriceRow {
            technique_code: record.print_code,
            technique_name: record.imp_method,
            price_dependence,
            color,
            size_cm2,
            setup_charge,
            unit_price,
            min_quantity,
        });
    }

    tracing::debug!(rows = rows.len(), "decoration feed ingested");
    Ok(rows)
}

fn field_error(
    feed: &'static str,
    record: usize,
    field: &'static str,
    reason: String,
) -> CatalogError {
    CatalogError::Field { feed, record, field, reason }
}

fn parse_quantity(raw: &str) -> Result<u32, String> {
    raw.trim().parse::<u32>().map_err(|_| format!("not an integer quantity: {raw:?}"))
}

fn split_codes(raw: &str) -> Vec<String> {
    raw.split(',').map(str::trim).filter(|c| !c.is_empty()).map(str::to_string).collect()
}

fn non_empty(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|s| !s.is_empty())
}
