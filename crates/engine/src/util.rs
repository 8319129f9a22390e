//! Internal helpers for model validation and conversion.
//!
//! These utilities are **not** part of the public API. They centralize
//! validation and mapping logic so the engine enforces consistent invariants.

use unicode_normalization::{UnicodeNormalization, char::is_combining_mark};

use crate::{EngineError, ResultEngine};

/// Trim and collapse inner whitespace for display.
pub(crate) fn normalize_name_display(name: &str) -> ResultEngine<String> {
    let display = name.split_whitespace().collect::<Vec<_>>().join(" ");
    if display.is_empty() {
        return Err(EngineError::InvalidName("name must not be empty".to_string()));
    }
    Ok(display)
}

/// Case- and accent-insensitive key used for the soft owner+name uniqueness
/// check on categories.
pub(crate) fn normalize_name_key(display: &str) -> String {
    display
        .nfkd()
        .filter(|c| !is_combining_mark(*c))
        .collect::<String>()
        .to_lowercase()
}

/// Validate a strictly positive amount in cents.
pub(crate) fn ensure_positive_amount(amount_minor: i64, label: &str) -> ResultEngine<()> {
    if amount_minor <= 0 {
        return Err(EngineError::InvalidAmount(format!(
            "{label} must be > 0, got {amount_minor}"
        )));
    }
    Ok(())
}

/// Validate a calendar month number.
pub(crate) fn ensure_month(month: u32) -> ResultEngine<()> {
    if !(1..=12).contains(&month) {
        return Err(EngineError::InvalidDate(format!(
            "month must be 1-12, got {month}"
        )));
    }
    Ok(())
}
