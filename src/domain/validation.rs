//! Business rules for order input and status transitions.
//!
//! These are pure functions: they never touch the store, so callers can run
//! them before any lookup.

use bigdecimal::BigDecimal;

use super::errors::DomainError;
use super::order::OrderStatus;

pub const USER_ID_REQUIRED: &str = "User id must not be null";
pub const AMOUNT_NOT_POSITIVE: &str = "Amount must be greater than zero";
pub const CANCELLED_IS_FINAL: &str = "Cancelled Order cannot be updated";

/// Returns the user id and amount once both are known to be valid.
pub fn validate_create(
    user_id: Option<i64>,
    amount: Option<BigDecimal>,
) -> Result<(i64, BigDecimal), DomainError> {
    let user_id = user_id.ok_or_else(|| DomainError::invalid_order(USER_ID_REQUIRED))?;
    match amount {
        Some(amount) if is_positive(&amount) => Ok((user_id, amount)),
        _ => Err(DomainError::invalid_order(AMOUNT_NOT_POSITIVE)),
    }
}

/// Update only checks the amount; `user_id` may be omitted from a patch.
pub fn validate_update_amount(amount: Option<&BigDecimal>) -> Result<(), DomainError> {
    match amount {
        Some(amount) if is_positive(amount) => Ok(()),
        _ => Err(DomainError::invalid_order(AMOUNT_NOT_POSITIVE)),
    }
}

pub fn validate_transition(existing: OrderStatus) -> Result<(), DomainError> {
    if existing == OrderStatus::Cancelled {
        return Err(DomainError::invalid_order(CANCELLED_IS_FINAL));
    }
    Ok(())
}

fn is_positive(amount: &BigDecimal) -> bool {
    *amount > BigDecimal::from(0)
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::*;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).expect("valid decimal")
    }

    #[test]
    fn create_requires_user_id() {
        let err = validate_create(None, Some(dec("10"))).unwrap_err();
        assert_eq!(err, DomainError::invalid_order(USER_ID_REQUIRED));
    }

    #[test]
    fn create_rejects_missing_amount() {
        let err = validate_create(Some(1), None).unwrap_err();
        assert_eq!(err, DomainError::invalid_order(AMOUNT_NOT_POSITIVE));
    }

    #[test]
    fn create_rejects_zero_and_negative_amounts() {
        for raw in ["0", "0.00", "-1", "-0.01"] {
            assert!(
                validate_create(Some(1), Some(dec(raw))).is_err(),
                "amount {} should be rejected",
                raw
            );
        }
    }

    #[test]
    fn create_accepts_small_positive_amount() {
        let (user_id, amount) = validate_create(Some(1), Some(dec("0.01"))).unwrap();
        assert_eq!(user_id, 1);
        assert_eq!(amount, dec("0.01"));
    }

    #[test]
    fn user_id_is_checked_before_amount() {
        let err = validate_create(None, None).unwrap_err();
        assert_eq!(err, DomainError::invalid_order(USER_ID_REQUIRED));
    }

    #[test]
    fn update_amount_rules_match_create() {
        assert!(validate_update_amount(None).is_err());
        assert!(validate_update_amount(Some(&dec("0"))).is_err());
        assert!(validate_update_amount(Some(&dec("25000"))).is_ok());
    }

    #[test]
    fn only_cancelled_blocks_transition() {
        assert!(validate_transition(OrderStatus::Created).is_ok());
        assert!(validate_transition(OrderStatus::Approved).is_ok());
        assert_eq!(
            validate_transition(OrderStatus::Cancelled).unwrap_err(),
            DomainError::invalid_order(CANCELLED_IS_FINAL)
        );
    }
}
