//! Totals over a list of line items.

use crate::line_item::LineItem;

/// Sum the amounts of `items`, counting items without an amount as zero.
///
/// An empty list totals zero.
pub fn total_amount(items: &[LineItem]) -> f64 {
    items.iter().map(LineItem::amount_or_zero).sum()
}
