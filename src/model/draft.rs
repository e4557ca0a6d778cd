//! The order draft: the client-held, not-yet-confirmed set of lines for one
//! table, plus the snapshot of what the kitchen has already acknowledged.
//!
//! # Architecture Note
//! This is deliberately a plain synchronous struct with no channels, no locks
//! and no logging. It is owned by exactly one session at a time (see
//! [`DraftSession`](crate::draft_actor::DraftSession)), and the actor model
//! gives it single-threaded access for free. All failure modes are programming
//! errors surfaced immediately as [`DraftError`]; nothing here retries.

use thiserror::Error;

use super::line::{OrderLine, VariantAttributes};

/// Programming errors raised by draft operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum DraftError {
    /// `add_line` was called with an empty item code.
    #[error("invalid argument: item code must not be empty")]
    InvalidItemCode,

    /// An operation addressed a line that does not exist.
    #[error("no order line at index {index} (draft has {len} lines)")]
    IndexOutOfRange { index: usize, len: usize },
}

/// The working set of order lines for the currently selected table.
///
/// Tracks two things:
/// - `lines`: what the waiter has composed, in display order.
/// - `acknowledged`: a wholesale copy of `lines` taken at the moment of the
///   last successful send to the kitchen. Replaced, never merged.
///
/// The difference between the two answers "which lines still need to go to
/// the kitchen" and drives the send-eligibility gates.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct OrderDraft {
    lines: Vec<OrderLine>,
    acknowledged: Vec<OrderLine>,
}

impl OrderDraft {
    /// Creates an empty draft, as when a table is first selected.
    pub fn new() -> Self {
        Self::default()
    }

    /// All current lines, in insertion (display) order.
    pub fn lines(&self) -> &[OrderLine] {
        &self.lines
    }

    /// The snapshot taken at the last successful send. Empty before the
    /// first send.
    pub fn acknowledged_lines(&self) -> &[OrderLine] {
        &self.acknowledged
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Adds a selection to the draft.
    ///
    /// If a line with the same identity key (item code + attribute content)
    /// already exists, its quantity is incremented by 1; otherwise a new
    /// quantity-1 line is appended. The scan is linear, which is fine at the
    /// scale of a single table's order.
    pub fn add_line(
        &mut self,
        item_code: impl Into<String>,
        item_name: impl Into<String>,
        unit_price: f64,
        attributes: VariantAttributes,
    ) -> Result<(), DraftError> {
        let item_code = item_code.into();
        if item_code.is_empty() {
            return Err(DraftError::InvalidItemCode);
        }

        let existing = self
            .lines
            .iter_mut()
            .find(|line| line.item_code == item_code && line.attributes == attributes);

        match existing {
            Some(line) => line.quantity += 1,
            None => self
                .lines
                .push(OrderLine::new(item_code, item_name, unit_price, attributes)),
        }
        Ok(())
    }

    /// Increments the quantity of the line at `index`. No upper bound.
    pub fn increment_quantity(&mut self, index: usize) -> Result<(), DraftError> {
        self.line_mut(index)?.quantity += 1;
        Ok(())
    }

    /// Decrements the quantity of the line at `index`.
    ///
    /// A no-op (not an error) when the quantity is already 1: quantity never
    /// drops below 1 via this path, removal is a separate explicit operation.
    pub fn decrement_quantity(&mut self, index: usize) -> Result<(), DraftError> {
        self.decrement_quantity_if(index, |_| true).map(|_| ())
    }

    /// Decrement with a caller-supplied rule for already-sent lines.
    ///
    /// `permit_sent` is consulted only when the line's key appears in the
    /// acknowledged snapshot; returning `false` leaves the line untouched.
    /// Whether amending a sent line should be allowed, silently kept, or
    /// rejected is business policy owned by the caller, not the draft.
    ///
    /// Returns whether the quantity actually changed.
    pub fn decrement_quantity_if(
        &mut self,
        index: usize,
        permit_sent: impl FnOnce(&OrderLine) -> bool,
    ) -> Result<bool, DraftError> {
        let acknowledged = self.is_line_acknowledged(index)?;
        let line = &mut self.lines[index];
        if acknowledged && !permit_sent(line) {
            return Ok(false);
        }
        if line.quantity <= 1 {
            return Ok(false);
        }
        line.quantity -= 1;
        Ok(true)
    }

    /// Removes the line at `index` entirely, sent or not, and returns it.
    pub fn remove_line(&mut self, index: usize) -> Result<OrderLine, DraftError> {
        self.check_index(index)?;
        Ok(self.lines.remove(index))
    }

    /// Remove with a caller-supplied rule for already-sent lines, as with
    /// [`decrement_quantity_if`](Self::decrement_quantity_if).
    ///
    /// Returns the removed line, or `None` if the guard kept it.
    pub fn remove_line_if(
        &mut self,
        index: usize,
        permit_sent: impl FnOnce(&OrderLine) -> bool,
    ) -> Result<Option<OrderLine>, DraftError> {
        if self.is_line_acknowledged(index)? && !permit_sent(&self.lines[index]) {
            return Ok(None);
        }
        Ok(Some(self.lines.remove(index)))
    }

    /// True if the key of the line at `index` appears in the acknowledged
    /// snapshot, i.e. some quantity of it is already in the kitchen.
    pub fn is_line_acknowledged(&self, index: usize) -> Result<bool, DraftError> {
        self.check_index(index)?;
        let line = &self.lines[index];
        Ok(self.acknowledged_entry(line).is_some())
    }

    /// Replaces the acknowledged snapshot with a copy of the current lines.
    ///
    /// Called only after the external send has succeeded. A failed send must
    /// not call this, which is what keeps the draft safe to retry.
    pub fn mark_sent(&mut self) {
        self.acknowledged = self.lines.clone();
    }

    /// Clears both the lines and the acknowledged snapshot.
    ///
    /// Used on table deselection, new-order start, and cancellation.
    pub fn reset(&mut self) {
        self.lines.clear();
        self.acknowledged.clear();
    }

    /// True if any line has not been acknowledged at its current quantity:
    /// its key is absent from the snapshot, or present with a different
    /// quantity.
    ///
    /// A line *removed* after a send does not by itself make the draft
    /// unsent; there is nothing left to transmit for it.
    pub fn has_unsent_lines(&self) -> bool {
        self.lines.iter().any(|line| self.is_unsent(line))
    }

    /// The lines an "additional items" submission should carry: everything
    /// not yet acknowledged at its current quantity.
    pub fn unsent_lines(&self) -> Vec<OrderLine> {
        self.lines
            .iter()
            .filter(|line| self.is_unsent(line))
            .cloned()
            .collect()
    }

    /// True iff a table is selected and there is anything to send.
    pub fn can_send_full_order(&self, table_selected: bool) -> bool {
        table_selected && !self.lines.is_empty()
    }

    /// True iff a table is selected, at least one send already succeeded,
    /// and there are new lines since. A first send is never "additional".
    pub fn can_send_additional(&self, table_selected: bool) -> bool {
        table_selected && !self.acknowledged.is_empty() && self.has_unsent_lines()
    }

    /// Sum of all line amounts.
    pub fn total_amount(&self) -> f64 {
        self.lines.iter().map(OrderLine::amount).sum()
    }

    fn is_unsent(&self, line: &OrderLine) -> bool {
        match self.acknowledged_entry(line) {
            None => true,
            Some(ack) => ack.quantity != line.quantity,
        }
    }

    fn acknowledged_entry(&self, line: &OrderLine) -> Option<&OrderLine> {
        self.acknowledged.iter().find(|ack| ack.same_line(line))
    }

    fn check_index(&self, index: usize) -> Result<(), DraftError> {
        if index >= self.lines.len() {
            return Err(DraftError::IndexOutOfRange {
                index,
                len: self.lines.len(),
            });
        }
        Ok(())
    }

    fn line_mut(&mut self, index: usize) -> Result<&mut OrderLine, DraftError> {
        self.check_index(index)?;
        Ok(&mut self.lines[index])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn attrs(pairs: &[(&str, &str)]) -> VariantAttributes {
        pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect()
    }

    fn plain(draft: &mut OrderDraft, code: &str) {
        draft.add_line(code, code, 1.0, VariantAttributes::new()).unwrap();
    }

    #[test]
    fn repeated_adds_accumulate_into_one_line() {
        let mut draft = OrderDraft::new();
        plain(&mut draft, "COFFEE");
        plain(&mut draft, "COFFEE");
        assert_eq!(draft.len(), 1);
        assert_eq!(draft.lines()[0].quantity, 2);
    }

    #[test]
    fn different_attributes_stay_distinct() {
        let mut draft = OrderDraft::new();
        draft.add_line("TSHIRT", "T-Shirt", 15.0, attrs(&[("size", "M")])).unwrap();
        draft.add_line("TSHIRT", "T-Shirt", 15.0, attrs(&[("size", "L")])).unwrap();
        assert_eq!(draft.len(), 2);
        assert_eq!(draft.lines()[0].quantity, 1);
        assert_eq!(draft.lines()[1].quantity, 1);
    }

    #[test]
    fn empty_item_code_is_rejected() {
        let mut draft = OrderDraft::new();
        let err = draft.add_line("", "Nameless", 1.0, VariantAttributes::new());
        assert_eq!(err, Err(DraftError::InvalidItemCode));
        assert!(draft.is_empty());
    }

    #[test]
    fn decrement_never_drops_below_one() {
        let mut draft = OrderDraft::new();
        plain(&mut draft, "COFFEE");
        draft.decrement_quantity(0).unwrap();
        assert_eq!(draft.lines()[0].quantity, 1);
    }

    #[test]
    fn increment_then_decrement_round_trips() {
        let mut draft = OrderDraft::new();
        plain(&mut draft, "COFFEE");
        draft.increment_quantity(0).unwrap();
        assert_eq!(draft.lines()[0].quantity, 2);
        draft.decrement_quantity(0).unwrap();
        assert_eq!(draft.lines()[0].quantity, 1);
    }

    #[test]
    fn index_errors_carry_context() {
        let mut draft = OrderDraft::new();
        plain(&mut draft, "COFFEE");
        let err = draft.increment_quantity(3).unwrap_err();
        assert_eq!(err, DraftError::IndexOutOfRange { index: 3, len: 1 });
        assert!(draft.remove_line(1).is_err());
        assert!(draft.decrement_quantity(1).is_err());
    }

    #[test]
    fn mark_sent_clears_unsent_state() {
        let mut draft = OrderDraft::new();
        plain(&mut draft, "COFFEE");
        plain(&mut draft, "COFFEE");
        plain(&mut draft, "COFFEE");
        assert!(draft.has_unsent_lines());

        draft.mark_sent();
        assert!(!draft.has_unsent_lines());
        assert!(draft.unsent_lines().is_empty());
    }

    #[test]
    fn adding_after_send_reopens_the_delta() {
        let mut draft = OrderDraft::new();
        plain(&mut draft, "COFFEE");
        draft.mark_sent();

        plain(&mut draft, "TEA");
        assert!(draft.has_unsent_lines());
        assert!(draft.can_send_additional(true));
        assert!(draft.can_send_full_order(true));

        let delta = draft.unsent_lines();
        assert_eq!(delta.len(), 1);
        assert_eq!(delta[0].item_code, "TEA");
    }

    #[test]
    fn quantity_bump_after_send_counts_as_unsent() {
        let mut draft = OrderDraft::new();
        plain(&mut draft, "COFFEE");
        draft.mark_sent();

        draft.increment_quantity(0).unwrap();
        assert!(draft.has_unsent_lines());
        let delta = draft.unsent_lines();
        assert_eq!(delta.len(), 1);
        assert_eq!(delta[0].quantity, 2);
    }

    #[test]
    fn first_send_is_never_additional() {
        let mut draft = OrderDraft::new();
        plain(&mut draft, "COFFEE");
        plain(&mut draft, "TEA");
        // No acknowledgment exists yet, so only the full-order gate opens.
        assert!(!draft.can_send_additional(true));
        assert!(draft.can_send_full_order(true));
    }

    #[test]
    fn no_table_means_no_send() {
        let mut draft = OrderDraft::new();
        plain(&mut draft, "COFFEE");
        draft.mark_sent();
        plain(&mut draft, "TEA");
        assert!(!draft.can_send_full_order(false));
        assert!(!draft.can_send_additional(false));
    }

    #[test]
    fn empty_draft_cannot_send() {
        let draft = OrderDraft::new();
        assert!(!draft.can_send_full_order(true));
        assert!(!draft.can_send_additional(true));
    }

    #[test]
    fn removing_the_only_line_closes_the_full_order_gate() {
        let mut draft = OrderDraft::new();
        plain(&mut draft, "COFFEE");
        let removed = draft.remove_line(0).unwrap();
        assert_eq!(removed.item_code, "COFFEE");
        assert!(draft.is_empty());
        assert!(!draft.can_send_full_order(true));
    }

    #[test]
    fn reset_behaves_like_a_fresh_draft() {
        let mut draft = OrderDraft::new();
        plain(&mut draft, "COFFEE");
        draft.mark_sent();
        plain(&mut draft, "TEA");

        draft.reset();
        assert!(draft.is_empty());
        assert!(draft.acknowledged_lines().is_empty());
        assert!(!draft.can_send_full_order(true));

        plain(&mut draft, "COFFEE");
        assert_eq!(draft.len(), 1);
        assert!(!draft.can_send_additional(true));
    }

    #[test]
    fn guard_keeps_sent_lines_when_denied() {
        let mut draft = OrderDraft::new();
        plain(&mut draft, "COFFEE");
        draft.increment_quantity(0).unwrap();
        draft.mark_sent();

        let changed = draft.decrement_quantity_if(0, |_| false).unwrap();
        assert!(!changed);
        assert_eq!(draft.lines()[0].quantity, 2);

        let removed = draft.remove_line_if(0, |_| false).unwrap();
        assert!(removed.is_none());
        assert_eq!(draft.len(), 1);
    }

    #[test]
    fn guard_is_not_consulted_for_unsent_lines() {
        let mut draft = OrderDraft::new();
        plain(&mut draft, "COFFEE");
        // Never sent, so even a deny-all guard lets the removal through.
        let removed = draft.remove_line_if(0, |_| false).unwrap();
        assert!(removed.is_some());
        assert!(draft.is_empty());
    }

    #[test]
    fn acknowledged_snapshot_is_replaced_wholesale() {
        let mut draft = OrderDraft::new();
        plain(&mut draft, "COFFEE");
        draft.mark_sent();
        draft.remove_line(0).unwrap();
        plain(&mut draft, "TEA");

        draft.mark_sent();
        assert_eq!(draft.acknowledged_lines().len(), 1);
        assert_eq!(draft.acknowledged_lines()[0].item_code, "TEA");
    }

    #[test]
    fn total_amount_sums_line_amounts() {
        let mut draft = OrderDraft::new();
        draft.add_line("COFFEE", "Coffee", 2.5, VariantAttributes::new()).unwrap();
        draft.add_line("COFFEE", "Coffee", 2.5, VariantAttributes::new()).unwrap();
        draft.add_line("TEA", "Tea", 2.0, VariantAttributes::new()).unwrap();
        assert_eq!(draft.total_amount(), 7.0);
    }
}
