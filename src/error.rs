use thiserror::Error;

/// Errors raised while validating, rendering or saving a quote.
///
/// Line numbers are 1-based, matching the row numbers a user sees in the
/// editor.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum Error {
    /// Quantity is not finite or is negative.
    #[error("line {line}: invalid quantity {value}")]
    InvalidQuantity { line: usize, value: f64 },

    /// Unit price is not finite or is negative.
    #[error("line {line}: invalid unit price {value}")]
    InvalidUnitPrice { line: usize, value: f64 },

    /// Tax rate is not finite or lies outside 0..=100 percent.
    #[error("line {line}: invalid tax rate {value}%")]
    InvalidTaxRate { line: usize, value: f64 },

    /// An applied discount is not finite or is negative.
    #[error("invalid discount amount {amount}")]
    InvalidDiscount { amount: f64 },

    /// The quote has no line items.
    #[error("quote has no line items")]
    EmptyDocument,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid quote JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// The offending line (1-based) for line-item validation failures.
    pub fn line(&self) -> Option<usize> {
        match self {
            Error::InvalidQuantity { line, .. }
            | Error::InvalidUnitPrice { line, .. }
            | Error::InvalidTaxRate { line, .. } => Some(*line),
            _ => None,
        }
    }

    /// Name of the offending field for validation failures.
    pub fn field(&self) -> Option<&'static str> {
        match self {
            Error::InvalidQuantity { .. } => Some("quantity"),
            Error::InvalidUnitPrice { .. } => Some("unit_price"),
            Error::InvalidTaxRate { .. } => Some("tax_rate_percent"),
            Error::InvalidDiscount { .. } => Some("discount"),
            _ => None,
        }
    }
}
