//! # Validation Module
//!
//! Input validation for product edits and login input, run before state
//! mutation. The state machine's own precondition checks (shift open,
//! cart non-empty) are control flow, not validation; see `duka-store`.

use crate::error::ValidationError;
use crate::money::Money;
use crate::quantity::Quantity;
use crate::types::Unit;
use crate::MAX_LINE_QUANTITY_MILLI;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Validators
// =============================================================================

/// Validates a product name: non-empty, at most 200 characters.
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.len() > 200 {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: 200,
        });
    }

    Ok(())
}

/// Validates a barcode: non-empty digits, at most 32 characters.
///
/// Barcodes are unique within one business only, so no global uniqueness
/// check belongs here.
pub fn validate_barcode(barcode: &str) -> ValidationResult<()> {
    let barcode = barcode.trim();

    if barcode.is_empty() {
        return Err(ValidationError::Required {
            field: "barcode".to_string(),
        });
    }

    if barcode.len() > 32 {
        return Err(ValidationError::TooLong {
            field: "barcode".to_string(),
            max: 32,
        });
    }

    if !barcode.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "barcode".to_string(),
            reason: "must contain only digits".to_string(),
        });
    }

    Ok(())
}

/// Validates a unit price: must be positive.
pub fn validate_price(price: Money) -> ValidationResult<()> {
    if !price.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "price".to_string(),
        });
    }
    Ok(())
}

/// Validates a cart line quantity: positive and within the per-line cap.
pub fn validate_line_quantity(quantity: Quantity) -> ValidationResult<()> {
    if !quantity.is_positive() {
        return Err(ValidationError::MustBePositive {
            field: "quantity".to_string(),
        });
    }

    if quantity.milli() > MAX_LINE_QUANTITY_MILLI {
        return Err(ValidationError::TooLarge {
            field: "quantity".to_string(),
            max: MAX_LINE_QUANTITY_MILLI / 1000,
        });
    }

    Ok(())
}

/// Validates a quantity against the product's unit of measure: counted
/// units (pieces, bottles, trays) sell in whole numbers only; weight and
/// volume units may be fractional.
pub fn validate_quantity_for_unit(quantity: Quantity, unit: Unit) -> ValidationResult<()> {
    if !unit.is_fractional() && quantity.milli() % 1000 != 0 {
        return Err(ValidationError::InvalidFormat {
            field: "quantity".to_string(),
            reason: "must be a whole number for this unit".to_string(),
        });
    }
    Ok(())
}

/// Validates a login PIN before it is sent to the auth collaborator:
/// exactly 4 ASCII digits. Verification itself is external.
pub fn validate_pin(pin: &str) -> ValidationResult<()> {
    if pin.len() != 4 || !pin.chars().all(|c| c.is_ascii_digit()) {
        return Err(ValidationError::InvalidFormat {
            field: "pin".to_string(),
            reason: "must be exactly 4 digits".to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("Soko Maize Flour 2kg").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name("   ").is_err());
        assert!(validate_product_name(&"x".repeat(201)).is_err());
    }

    #[test]
    fn test_validate_barcode() {
        assert!(validate_barcode("100006").is_ok());
        assert!(validate_barcode("").is_err());
        assert!(validate_barcode("ABC-123").is_err());
    }

    #[test]
    fn test_validate_price() {
        assert!(validate_price(Money::from_shillings(70)).is_ok());
        assert!(validate_price(Money::zero()).is_err());
        assert!(validate_price(Money::from_cents(-100)).is_err());
    }

    #[test]
    fn test_validate_line_quantity() {
        assert!(validate_line_quantity(Quantity::from_whole(2)).is_ok());
        assert!(validate_line_quantity(Quantity::from_milli(500)).is_ok());
        assert!(validate_line_quantity(Quantity::ZERO).is_err());
        assert!(validate_line_quantity(Quantity::from_whole(1000)).is_err());
    }

    #[test]
    fn test_validate_quantity_for_unit() {
        assert!(validate_quantity_for_unit(Quantity::from_milli(1_500), Unit::Kilogram).is_ok());
        assert!(validate_quantity_for_unit(Quantity::from_milli(375), Unit::Litre).is_ok());
        assert!(validate_quantity_for_unit(Quantity::from_whole(3), Unit::Piece).is_ok());
        assert!(validate_quantity_for_unit(Quantity::from_milli(1_500), Unit::Piece).is_err());
        assert!(validate_quantity_for_unit(Quantity::from_milli(500), Unit::Bottle).is_err());
    }

    #[test]
    fn test_validate_pin() {
        assert!(validate_pin("1111").is_ok());
        assert!(validate_pin("123").is_err());
        assert!(validate_pin("12345").is_err());
        assert!(validate_pin("12ab").is_err());
    }
}
