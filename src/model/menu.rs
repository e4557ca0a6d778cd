//! Typed records for menu data arriving from the backend.
//!
//! The backend responses are loosely shaped; instead of passing ad hoc maps
//! around, they are deserialized into these records at the transport boundary,
//! with defined defaults for fields the backend may omit. Only validated
//! records reach the draft.

use serde::{Serialize, Deserialize};

use super::draft::DraftError;
use super::line::VariantAttributes;

/// A menu entry as advertised by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MenuItem {
    pub item_code: String,
    pub item_name: String,
    /// List price; 0 when the backend omits it (it reprices on submission).
    #[serde(default)]
    pub standard_rate: f64,
    /// True for template items that need a variant selection before ordering.
    #[serde(default)]
    pub has_variants: bool,
    #[serde(default)]
    pub item_group: Option<String>,
}

impl MenuItem {
    /// Checks the record is usable before any line is built from it.
    pub fn validate(&self) -> Result<(), DraftError> {
        if self.item_code.is_empty() {
            return Err(DraftError::InvalidItemCode);
        }
        Ok(())
    }
}

/// A variant attribute descriptor for a template item, e.g.
/// `size` with options `["S", "M", "L"]`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VariantAttribute {
    pub attribute: String,
    pub field_name: String,
    #[serde(default)]
    pub options: Vec<String>,
}

/// True when every advertised attribute has a chosen value.
///
/// An incomplete selection must not become an order line; the backend cannot
/// resolve a variant from a partial attribute set.
pub fn selection_complete(attributes: &[VariantAttribute], chosen: &VariantAttributes) -> bool {
    attributes.iter().all(|attr| {
        chosen
            .get(&attr.field_name)
            .map(|value| !value.is_empty())
            .unwrap_or(false)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sparse_backend_json_gets_defaults() {
        let item: MenuItem =
            serde_json::from_str(r#"{"item_code": "COFFEE", "item_name": "Coffee"}"#).unwrap();
        assert_eq!(item.standard_rate, 0.0);
        assert!(!item.has_variants);
        assert_eq!(item.item_group, None);
        assert!(item.validate().is_ok());
    }

    #[test]
    fn missing_item_code_fails_validation() {
        let item: MenuItem =
            serde_json::from_str(r#"{"item_code": "", "item_name": "Ghost"}"#).unwrap();
        assert_eq!(item.validate(), Err(DraftError::InvalidItemCode));
    }

    #[test]
    fn selection_complete_requires_every_attribute() {
        let attributes = vec![
            VariantAttribute {
                attribute: "Size".into(),
                field_name: "size".into(),
                options: vec!["M".into(), "L".into()],
            },
            VariantAttribute {
                attribute: "Colour".into(),
                field_name: "colour".into(),
                options: vec![],
            },
        ];

        let mut chosen = VariantAttributes::new();
        chosen.insert("size".into(), "M".into());
        assert!(!selection_complete(&attributes, &chosen));

        chosen.insert("colour".into(), "red".into());
        assert!(selection_complete(&attributes, &chosen));
    }

    #[test]
    fn empty_choice_does_not_count() {
        let attributes = vec![VariantAttribute {
            attribute: "Size".into(),
            field_name: "size".into(),
            options: vec![],
        }];
        let mut chosen = VariantAttributes::new();
        chosen.insert("size".into(), "".into());
        assert!(!selection_complete(&attributes, &chosen));
    }
}
