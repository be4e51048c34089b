//! Payout balance arithmetic.
//!
//! The available balance is the sum of all recorded royalties minus the sum
//! of payouts that already hold funds (approved or processed), floored at
//! zero. The sums themselves come from the royalty/payout repositories; this
//! module owns the arithmetic and the payout acceptance rules.

use crate::error::CoreError;

/// Minimum payout request amount in the account currency.
pub const MIN_PAYOUT_AMOUNT: f64 = 25.0;

/// Compute the available balance from pre-summed totals.
///
/// Never returns a negative value, even if holding payouts exceed recorded
/// royalties (which can happen after a royalty correction).
pub fn available_balance(total_royalties: f64, total_held_payouts: f64) -> f64 {
    (total_royalties - total_held_payouts).max(0.0)
}

/// Check a requested payout amount against the minimum and the balance.
///
/// An amount exactly equal to the available balance is accepted.
pub fn validate_payout_amount(amount: f64, available: f64) -> Result<(), CoreError> {
    if amount < MIN_PAYOUT_AMOUNT {
        return Err(CoreError::Validation(format!(
            "Minimum payout amount is ${MIN_PAYOUT_AMOUNT}"
        )));
    }
    if amount > available {
        return Err(CoreError::Validation(
            "Insufficient balance for payout request".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn balance_subtracts_held_payouts() {
        assert_eq!(available_balance(100.0, 40.0), 60.0);
    }

    #[test]
    fn balance_floors_at_zero() {
        assert_eq!(available_balance(10.0, 40.0), 0.0);
    }

    #[test]
    fn payout_below_minimum_rejected() {
        let err = validate_payout_amount(24.99, 500.0).unwrap_err();
        assert!(err.to_string().contains("Minimum payout"));
    }

    #[test]
    fn payout_above_balance_rejected() {
        let err = validate_payout_amount(100.0, 99.99).unwrap_err();
        assert!(err.to_string().contains("Insufficient balance"));
    }

    #[test]
    fn payout_exactly_at_balance_accepted() {
        assert!(validate_payout_amount(80.0, 80.0).is_ok());
    }

    #[test]
    fn payout_at_minimum_accepted() {
        assert!(validate_payout_amount(MIN_PAYOUT_AMOUNT, 100.0).is_ok());
    }
}
