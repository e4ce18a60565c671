use crate::error::Error;
use crate::model::{DiscountState, LineItem, Quote};

const MAX_TAX_RATE: f64 = 100.0;

/// Check every line item and the discount before anything is laid out.
///
/// Returns the first violation in print order; within a line the quantity is
/// checked before the unit price, and the price before the tax rate.
pub fn validate_quote(quote: &Quote, discount: &DiscountState) -> Result<(), Error> {
    if quote.line_items.is_empty() {
        return Err(Error::EmptyDocument);
    }
    for (i, item) in quote.line_items.iter().enumerate() {
        validate_line(i + 1, item)?;
    }
    if discount.applied && !(discount.amount.is_finite() && discount.amount >= 0.0) {
        return Err(Error::InvalidDiscount {
            amount: discount.amount,
        });
    }
    Ok(())
}

fn validate_line(line: usize, item: &LineItem) -> Result<(), Error> {
    let qty = item.quantity.value;
    if !qty.is_finite() || qty < 0.0 {
        return Err(Error::InvalidQuantity { line, value: qty });
    }
    if !item.unit_price.is_finite() || item.unit_price < 0.0 {
        return Err(Error::InvalidUnitPrice {
            line,
            value: item.unit_price,
        });
    }
    let rate = item.tax_rate_percent;
    if !rate.is_finite() || !(0.0..=MAX_TAX_RATE).contains(&rate) {
        return Err(Error::InvalidTaxRate { line, value: rate });
    }
    Ok(())
}
