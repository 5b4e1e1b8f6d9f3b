//! Internal helpers for input validation and model conversion.
//!
//! These utilities are **not** part of the public API. They centralize
//! validation so every entry point enforces the same invariants.

use crate::{EngineError, Money, ResultEngine};

/// Reject amounts that are zero or negative.
pub(crate) fn ensure_positive_amount(amount: Money) -> ResultEngine<()> {
    if !amount.is_positive() {
        return Err(EngineError::InvalidAmount(format!(
            "invalid amount: {amount}, should be greater than zero"
        )));
    }
    Ok(())
}

/// Trim a required text field and reject it when empty.
pub(crate) fn normalize_required_text(value: &str, label: &str) -> ResultEngine<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidArgument(format!(
            "{label} must not be empty"
        )));
    }
    Ok(trimmed.to_string())
}

/// Parse a decimal stored in the DB into `Money`.
pub(crate) fn model_money(value: &str, label: &str) -> ResultEngine<Money> {
    value
        .parse()
        .map_err(|_| EngineError::InvalidAmount(format!("invalid stored {label}: {value}")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn positive_amounts_pass() {
        assert!(ensure_positive_amount("0.01".parse().unwrap()).is_ok());
    }

    #[test]
    fn zero_and_negative_amounts_fail() {
        assert_eq!(
            ensure_positive_amount(Money::ZERO),
            Err(EngineError::InvalidAmount(
                "invalid amount: 0, should be greater than zero".to_string()
            ))
        );
        assert!(ensure_positive_amount("-5".parse().unwrap()).is_err());
    }

    #[test]
    fn required_text_is_trimmed() {
        assert_eq!(normalize_required_text("  Ann ", "name").unwrap(), "Ann");
        assert_eq!(
            normalize_required_text("   ", "email"),
            Err(EngineError::InvalidArgument("email must not be empty".to_string()))
        );
    }
}
