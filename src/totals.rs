use crate::model::{DiscountState, LineItem};

/// Quote totals. Always recomputed from the line items, never stored.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Totals {
    pub total_excluding_tax: f64,
    pub total_tax: f64,
    pub discount_applied: f64,
    pub subtotal: f64,
    pub total_including_tax: f64,
}

/// Sum the line items and apply the flat discount.
///
/// Tax is computed per line on the full pre-discount amount; the discount only
/// lowers the excl.-tax subtotal, which is allowed to go negative.
pub fn compute_totals(line_items: &[LineItem], discount: &DiscountState) -> Totals {
    let (total_excluding_tax, total_tax) =
        line_items.iter().fold((0.0, 0.0), |(excl, tax), item| {
            (excl + item.total_excluding_tax(), tax + item.tax())
        });

    let discount_applied = if discount.applied { discount.amount } else { 0.0 };
    let subtotal = total_excluding_tax - discount_applied;

    Totals {
        total_excluding_tax,
        total_tax,
        discount_applied,
        subtotal,
        total_including_tax: subtotal + total_tax,
    }
}
