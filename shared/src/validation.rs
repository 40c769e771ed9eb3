//! Validation utilities for sale submissions
//!
//! These are superficial field checks run before a sale is saved. Custom
//! validators plug into the `validator` derive on [`crate::SaleInput`].

use std::borrow::Cow;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use validator::{Validate, ValidationError, ValidationErrors};

use crate::models::{SaleInput, SALE_DATE_FORMAT};

/// Required length of a buyer phone number
pub const PHONE_DIGITS: usize = 9;

fn error(code: &'static str, message: &'static str) -> ValidationError {
    let mut err = ValidationError::new(code);
    err.message = Some(Cow::Borrowed(message));
    err
}

// ============================================================================
// Field Validations
// ============================================================================

/// Validate buyer phone: empty, or exactly 9 digits
pub fn validate_buyer_phone(phone: &str) -> Result<(), ValidationError> {
    if phone.is_empty() {
        return Ok(());
    }
    if phone.len() == PHONE_DIGITS && phone.chars().all(|c| c.is_ascii_digit()) {
        Ok(())
    } else {
        Err(error("phone", "Phone number must have 9 digits"))
    }
}

/// Validate the sale date is a real `YYYY-MM-DD` date
pub fn validate_sale_date(date: &str) -> Result<(), ValidationError> {
    if date.trim().is_empty() {
        return Err(error("required", "Date is required"));
    }
    NaiveDate::parse_from_str(date.trim(), SALE_DATE_FORMAT)
        .map(|_| ())
        .map_err(|_| error("date", "Date must be in YYYY-MM-DD format"))
}

/// Validate cost is not negative
pub fn validate_cost(cost: &Decimal) -> Result<(), ValidationError> {
    if *cost < Decimal::ZERO {
        return Err(error("range", "Cost cannot be negative"));
    }
    Ok(())
}

/// Validate price is present (non-zero) and not negative
pub fn validate_price(price: &Decimal) -> Result<(), ValidationError> {
    if *price < Decimal::ZERO {
        return Err(error("range", "Price cannot be negative"));
    }
    if price.is_zero() {
        return Err(error("required", "Price is required"));
    }
    Ok(())
}

// ============================================================================
// Form Validation
// ============================================================================

/// A single failed field check
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub code: String,
    pub message: String,
}

/// Validate a sale submission, returning the first failure by field name
pub fn validate_sale_input(input: &SaleInput) -> Result<(), FieldError> {
    input.validate().map_err(|errors| first_field_error(&errors))
}

fn first_field_error(errors: &ValidationErrors) -> FieldError {
    let field_errors = errors.field_errors();
    let mut fields: Vec<_> = field_errors.keys().copied().collect();
    fields.sort_unstable();

    fields
        .first()
        .and_then(|field| {
            field_errors
                .get(field)
                .and_then(|errs| errs.first())
                .map(|err| FieldError {
                    field: field.to_string(),
                    code: err.code.to_string(),
                    message: err
                        .message
                        .as_ref()
                        .map(|m| m.to_string())
                        .unwrap_or_else(|| format!("Invalid {}", field)),
                })
        })
        .unwrap_or_else(|| FieldError {
            field: String::new(),
            code: "invalid".to_string(),
            message: "Invalid sale".to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_input() -> SaleInput {
        SaleInput {
            date: "2024-01-15".to_string(),
            buyer_name: "Juan Pérez".to_string(),
            buyer_phone: "912345678".to_string(),
            product: "Vase".to_string(),
            cost: Decimal::from(20),
            price: Decimal::from(50),
            ..Default::default()
        }
    }

    #[test]
    fn test_validate_buyer_phone_valid() {
        assert!(validate_buyer_phone("912345678").is_ok());
        assert!(validate_buyer_phone("").is_ok());
    }

    #[test]
    fn test_validate_buyer_phone_invalid() {
        assert!(validate_buyer_phone("91234567").is_err()); // 8 digits
        assert!(validate_buyer_phone("9123456789").is_err()); // 10 digits
        assert!(validate_buyer_phone("912-345-678").is_err());
        assert!(validate_buyer_phone("+51912345").is_err());
    }

    #[test]
    fn test_validate_sale_date() {
        assert!(validate_sale_date("2024-02-29").is_ok());
        assert!(validate_sale_date("2023-02-29").is_err());
        assert!(validate_sale_date("").is_err());
        assert!(validate_sale_date("15/01/2024").is_err());
    }

    #[test]
    fn test_validate_amounts() {
        assert!(validate_cost(&Decimal::ZERO).is_ok());
        assert!(validate_cost(&Decimal::from(-1)).is_err());
        assert!(validate_price(&Decimal::new(1, 2)).is_ok());
        assert!(validate_price(&Decimal::ZERO).is_err());
        assert!(validate_price(&Decimal::from(-5)).is_err());
    }

    #[test]
    fn test_validate_sale_input_valid() {
        assert!(validate_sale_input(&valid_input()).is_ok());
    }

    #[test]
    fn test_validate_sale_input_missing_buyer() {
        let input = SaleInput {
            buyer_name: String::new(),
            ..valid_input()
        };
        let err = validate_sale_input(&input).unwrap_err();
        assert_eq!(err.field, "buyer_name");
        assert_eq!(err.message, "Buyer name is required");
    }

    #[test]
    fn test_validate_sale_input_bad_phone() {
        let input = SaleInput {
            buyer_phone: "12345".to_string(),
            ..valid_input()
        };
        let err = validate_sale_input(&input).unwrap_err();
        assert_eq!(err.field, "buyer_phone");
        assert_eq!(err.code, "phone");
    }

    #[test]
    fn test_validate_sale_input_reports_first_field() {
        let input = SaleInput {
            buyer_name: String::new(),
            product: String::new(),
            ..valid_input()
        };
        // buyer_name sorts before product
        assert_eq!(validate_sale_input(&input).unwrap_err().field, "buyer_name");
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn nine_digit_phones_are_accepted(phone in "[0-9]{9}") {
                prop_assert!(validate_buyer_phone(&phone).is_ok());
            }

            #[test]
            fn other_lengths_are_rejected(phone in "[0-9]{1,8}|[0-9]{10,15}") {
                prop_assert!(validate_buyer_phone(&phone).is_err());
            }

            #[test]
            fn non_negative_cost_is_accepted(cents in 0i64..10_000_000) {
                prop_assert!(validate_cost(&Decimal::new(cents, 2)).is_ok());
            }
        }
    }
}
