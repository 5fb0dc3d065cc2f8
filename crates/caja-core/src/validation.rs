//! # Input Validation
//!
//! Shape and range checks applied before any row is written. Parsing and
//! validation happen at the edge; once a value reaches a repository it is
//! assumed well-formed.
//!
//! Limits are deliberately generous. They exist to catch pasted garbage
//! and UI bugs, not to constrain real shop data.

use crate::error::ValidationError;
use crate::money::Money;

/// Maximum length for product and user names.
pub const MAX_NAME_LEN: usize = 200;

/// Maximum length for expense descriptions.
pub const MAX_DESCRIPTION_LEN: usize = 500;

/// Maximum units in a single sale line. A corner shop does not ring up
/// ten thousand of anything in one go.
pub const MAX_SALE_QUANTITY: i64 = 9_999;

/// Checks a product name: non-blank, within length.
pub fn validate_product_name(name: &str) -> Result<(), ValidationError> {
    non_blank_within(name, "product name", MAX_NAME_LEN)
}

/// Checks a user name: non-blank, within length.
pub fn validate_user_name(name: &str) -> Result<(), ValidationError> {
    non_blank_within(name, "user name", MAX_NAME_LEN)
}

/// Checks an expense description: non-blank, within length.
pub fn validate_description(description: &str) -> Result<(), ValidationError> {
    non_blank_within(description, "description", MAX_DESCRIPTION_LEN)
}

/// Checks a sale quantity: strictly positive, within the sanity cap.
pub fn validate_quantity(quantity: i64) -> Result<(), ValidationError> {
    if quantity <= 0 {
        return Err(ValidationError::MustBePositive { field: "quantity" });
    }
    if quantity > MAX_SALE_QUANTITY {
        return Err(ValidationError::OutOfRange {
            field: "quantity",
            min: 1,
            max: MAX_SALE_QUANTITY,
        });
    }
    Ok(())
}

/// Checks a unit price. Zero is allowed (giveaways), negative is not.
pub fn validate_price(price: Money) -> Result<(), ValidationError> {
    if price.is_negative() {
        return Err(ValidationError::MustNotBeNegative { field: "price" });
    }
    Ok(())
}

/// Checks an expense amount: strictly positive. A zero expense is noise
/// and a negative one would silently inflate profit.
pub fn validate_amount(amount: Money) -> Result<(), ValidationError> {
    if amount.cents() <= 0 {
        return Err(ValidationError::MustBePositive { field: "amount" });
    }
    Ok(())
}

/// Checks a stock count: zero or more.
pub fn validate_stock(stock: i64) -> Result<(), ValidationError> {
    if stock < 0 {
        return Err(ValidationError::MustNotBeNegative { field: "stock" });
    }
    Ok(())
}

/// Checks a calendar month number (1-12).
pub fn validate_month(month: u32) -> Result<(), ValidationError> {
    if !(1..=12).contains(&month) {
        return Err(ValidationError::OutOfRange {
            field: "month",
            min: 1,
            max: 12,
        });
    }
    Ok(())
}

fn non_blank_within(
    value: &str,
    field: &'static str,
    max: usize,
) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required { field });
    }
    // chars, not bytes: "Jabón" is 5 characters, 6 bytes
    if value.chars().count() > max {
        return Err(ValidationError::TooLong { field, max });
    }
    Ok(())
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_name_rejects_blank_and_oversized() {
        assert!(validate_product_name("Coca-Cola 600ml").is_ok());
        assert!(matches!(
            validate_product_name("   "),
            Err(ValidationError::Required { field: "product name" })
        ));
        let long = "x".repeat(MAX_NAME_LEN + 1);
        assert!(matches!(
            validate_product_name(&long),
            Err(ValidationError::TooLong { .. })
        ));
    }

    #[test]
    fn name_length_counts_characters_not_bytes() {
        // 200 accented characters are 400 bytes but exactly at the limit
        let accented = "é".repeat(MAX_NAME_LEN);
        assert!(validate_product_name(&accented).is_ok());
    }

    #[test]
    fn quantity_must_be_positive_and_sane() {
        assert!(validate_quantity(1).is_ok());
        assert!(validate_quantity(MAX_SALE_QUANTITY).is_ok());
        assert!(matches!(
            validate_quantity(0),
            Err(ValidationError::MustBePositive { field: "quantity" })
        ));
        assert!(matches!(
            validate_quantity(-3),
            Err(ValidationError::MustBePositive { .. })
        ));
        assert!(matches!(
            validate_quantity(MAX_SALE_QUANTITY + 1),
            Err(ValidationError::OutOfRange { .. })
        ));
    }

    #[test]
    fn price_allows_zero_but_not_negative() {
        assert!(validate_price(Money::zero()).is_ok());
        assert!(validate_price(Money::from_cents(450)).is_ok());
        assert!(matches!(
            validate_price(Money::from_cents(-1)),
            Err(ValidationError::MustNotBeNegative { field: "price" })
        ));
    }

    #[test]
    fn expense_amount_must_be_strictly_positive() {
        assert!(validate_amount(Money::from_cents(1)).is_ok());
        assert!(matches!(
            validate_amount(Money::zero()),
            Err(ValidationError::MustBePositive { field: "amount" })
        ));
        assert!(matches!(
            validate_amount(Money::from_cents(-500)),
            Err(ValidationError::MustBePositive { .. })
        ));
    }

    #[test]
    fn stock_allows_zero() {
        assert!(validate_stock(0).is_ok());
        assert!(validate_stock(25).is_ok());
        assert!(matches!(
            validate_stock(-1),
            Err(ValidationError::MustNotBeNegative { field: "stock" })
        ));
    }

    #[test]
    fn month_must_be_a_calendar_month() {
        assert!(validate_month(1).is_ok());
        assert!(validate_month(12).is_ok());
        assert!(matches!(
            validate_month(0),
            Err(ValidationError::OutOfRange { .. })
        ));
        assert!(matches!(
            validate_month(13),
            Err(ValidationError::OutOfRange { .. })
        ));
    }
}
