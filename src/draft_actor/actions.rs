//! Messages understood by a [`DraftSession`](super::DraftSession).
//!
//! Amendments are local bookkeeping on the draft; submissions reach the
//! kitchen backend. Every amendment answers with a [`DraftStatus`] snapshot
//! so the calling UI can re-render without a second round trip.

use serde::{Serialize, Deserialize};

use crate::model::{MenuItem, OrderLine, VariantAttributes};

/// A menu selection ready to be added to a draft: a concrete (or resolved)
/// item plus the chosen variant attributes, empty for plain items.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineSelection {
    pub item_code: String,
    pub item_name: String,
    pub unit_price: f64,
    #[serde(default)]
    pub attributes: VariantAttributes,
}

impl LineSelection {
    pub fn new(
        item_code: impl Into<String>,
        item_name: impl Into<String>,
        unit_price: f64,
        attributes: VariantAttributes,
    ) -> Self {
        Self {
            item_code: item_code.into(),
            item_name: item_name.into(),
            unit_price,
            attributes,
        }
    }

    /// Builds a selection from a validated menu record.
    pub fn from_menu_item(item: &MenuItem, attributes: VariantAttributes) -> Self {
        Self::new(
            item.item_code.as_str(),
            item.item_name.as_str(),
            item.standard_rate,
            attributes,
        )
    }
}

/// Local mutations of a table's draft.
#[derive(Debug, Clone)]
pub enum DraftAmend {
    /// Add a selection; merges into an existing line with the same identity
    /// key, otherwise appends a quantity-1 line.
    AddLine(LineSelection),
    /// Increase the quantity of the line at this index by 1.
    IncrementLine(usize),
    /// Decrease the quantity of the line at this index by 1; a no-op at
    /// quantity 1. Subject to the session's sent-line policy.
    DecrementLine(usize),
    /// Remove the line at this index. Subject to the session's sent-line
    /// policy.
    RemoveLine(usize),
    /// Throw the whole draft away and start over, acknowledgments included.
    StartNewOrder,
}

/// Submissions to the kitchen backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DraftSubmit {
    /// Send every line; the first send for a table goes this way.
    FullOrder,
    /// Send only the lines not yet acknowledged. Requires a prior
    /// successful send.
    AdditionalItems,
}

/// Render snapshot returned after every amendment.
#[derive(Debug, Clone, PartialEq)]
pub struct DraftStatus {
    /// Current lines in display order.
    pub lines: Vec<OrderLine>,
    /// Whether the "send to kitchen" action should be enabled.
    pub can_send_full_order: bool,
    /// Whether the "send additional items" action should be enabled.
    pub can_send_additional: bool,
    /// Sum of all line amounts, for the order footer.
    pub total_amount: f64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn selection_from_menu_item_carries_the_rate() {
        let item = MenuItem {
            item_code: "TSHIRT".into(),
            item_name: "T-Shirt".into(),
            standard_rate: 15.0,
            has_variants: true,
            item_group: None,
        };
        let mut chosen = VariantAttributes::new();
        chosen.insert("size".into(), "M".into());

        let selection = LineSelection::from_menu_item(&item, chosen.clone());
        assert_eq!(selection.item_code, "TSHIRT");
        assert_eq!(selection.unit_price, 15.0);
        assert_eq!(selection.attributes, chosen);
    }
}
