/// Order line data for a single table's draft.
///
/// A line is identified by its [`LineKey`]: the item code plus the chosen
/// variant attributes. Quantity and price are payload, not identity.
use serde::{Serialize, Deserialize};
use std::collections::BTreeMap;

/// Chosen variant options for a line, keyed by attribute name.
///
/// A `BTreeMap` so that two independently built selections for the same
/// options compare equal by content, regardless of the order the user
/// picked them in.
pub type VariantAttributes = BTreeMap<String, String>;

/// The identity of an orderable line.
///
/// Two lines with the same item code but different attribute selections are
/// distinct lines: a `{size: "M"}` shirt and a `{size: "L"}` shirt never
/// merge.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LineKey {
    pub item_code: String,
    pub attributes: VariantAttributes,
}

/// A single candidate order line held in a draft.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderLine {
    pub item_code: String,
    pub item_name: String,
    /// Always at least 1. Dropping to zero is modeled as removal, not decrement.
    pub quantity: u32,
    /// Informational only; the backend reprices on submission.
    pub unit_price: f64,
    #[serde(default)]
    pub attributes: VariantAttributes,
}

impl OrderLine {
    /// Creates a new line with quantity 1.
    pub fn new(
        item_code: impl Into<String>,
        item_name: impl Into<String>,
        unit_price: f64,
        attributes: VariantAttributes,
    ) -> Self {
        Self {
            item_code: item_code.into(),
            item_name: item_name.into(),
            quantity: 1,
            unit_price,
            attributes,
        }
    }

    /// Returns the identity key used for deduplication.
    pub fn key(&self) -> LineKey {
        LineKey {
            item_code: self.item_code.clone(),
            attributes: self.attributes.clone(),
        }
    }

    /// True if `other` represents the same orderable line (same key).
    pub fn same_line(&self, other: &OrderLine) -> bool {
        self.item_code == other.item_code && self.attributes == other.attributes
    }

    /// Line total: quantity times unit price.
    pub fn amount(&self) -> f64 {
        self.quantity as f64 * self.unit_price
    }
}
