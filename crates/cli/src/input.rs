//! Boundary-layer validation for values typed at the prompt.

use thiserror::Error;

pub(crate) const TARGET_MIN: f64 = 1.0;
pub(crate) const TARGET_MAX: f64 = 100.0;

#[derive(Error, Debug, Clone, PartialEq)]
pub(crate) enum InputError {
    #[error("{0} cannot be empty")]
    Empty(&'static str),

    #[error("Invalid input. Please type a numeric value.")]
    NotNumeric,

    #[error("Target must be between 1 and 100")]
    TargetOutOfRange,

    #[error("Achieved value cannot be negative")]
    NegativeAchieved,

    #[error("Invalid selection number {0} (choose 1-{1})")]
    SelectionOutOfRange(usize, usize),

    #[error("Perspective names should not contain digits")]
    DigitsInName,
}

pub(crate) fn require_name(what: &'static str, raw: &str) -> Result<String, InputError> {
    let name = raw.trim();
    if name.is_empty() {
        return Err(InputError::Empty(what));
    }
    Ok(name.to_string())
}

fn parse_number(raw: &str) -> Result<f64, InputError> {
    raw.trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or(InputError::NotNumeric)
}

pub(crate) fn parse_target(raw: &str) -> Result<f64, InputError> {
    let value = parse_number(raw)?;
    if !(TARGET_MIN..=TARGET_MAX).contains(&value) {
        return Err(InputError::TargetOutOfRange);
    }
    Ok(value)
}

pub(crate) fn parse_achieved(raw: &str) -> Result<f64, InputError> {
    let value = parse_number(raw)?;
    if value < 0.0 {
        return Err(InputError::NegativeAchieved);
    }
    Ok(value)
}

/// Turn a typed perspective reference into a name.
///
/// Input starting with a digit picks from `existing` by 1-based position.
/// Anything else is a (possibly new) name, which must not contain digits.
pub(crate) fn resolve_perspective(raw: &str, existing: &[&str]) -> Result<String, InputError> {
    let text = require_name("Perspective", raw)?;
    if text.starts_with(|c: char| c.is_ascii_digit()) {
        let pick = text
            .parse::<usize>()
            .map_err(|_| InputError::SelectionOutOfRange(0, existing.len()))?;
        return pick
            .checked_sub(1)
            .and_then(|idx| existing.get(idx))
            .map(|name| name.to_string())
            .ok_or(InputError::SelectionOutOfRange(pick, existing.len()));
    }
    if text.chars().any(|c| c.is_ascii_digit()) {
        return Err(InputError::DigitsInName);
    }
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const NAMES: [&str; 4] = ["Financial", "Customer", "Internal", "Learning"];

    #[test]
    fn names_are_trimmed_and_required() {
        assert_eq!(require_name("KPI name", "  nps "), Ok("nps".to_string()));
        assert_eq!(
            require_name("KPI name", "   "),
            Err(InputError::Empty("KPI name"))
        );
    }

    #[test]
    fn target_must_be_numeric_and_in_range() {
        assert_eq!(parse_target(" 50 "), Ok(50.0));
        assert_eq!(parse_target("1"), Ok(1.0));
        assert_eq!(parse_target("100"), Ok(100.0));
        assert_eq!(parse_target("abc"), Err(InputError::NotNumeric));
        assert_eq!(parse_target("NaN"), Err(InputError::NotNumeric));
        assert_eq!(parse_target("0"), Err(InputError::TargetOutOfRange));
        assert_eq!(parse_target("100.5"), Err(InputError::TargetOutOfRange));
    }

    #[test]
    fn achieved_must_be_non_negative() {
        assert_eq!(parse_achieved("0"), Ok(0.0));
        assert_eq!(parse_achieved("250.5"), Ok(250.5));
        assert_eq!(parse_achieved("-1"), Err(InputError::NegativeAchieved));
        assert_eq!(parse_achieved(""), Err(InputError::NotNumeric));
    }

    #[test]
    fn numbers_select_existing_perspectives() {
        assert_eq!(resolve_perspective("1", &NAMES), Ok("Financial".to_string()));
        assert_eq!(resolve_perspective(" 4 ", &NAMES), Ok("Learning".to_string()));
        assert_eq!(
            resolve_perspective("5", &NAMES),
            Err(InputError::SelectionOutOfRange(5, 4))
        );
        assert_eq!(
            resolve_perspective("0", &NAMES),
            Err(InputError::SelectionOutOfRange(0, 4))
        );
        assert!(matches!(
            resolve_perspective("2x", &NAMES),
            Err(InputError::SelectionOutOfRange(..))
        ));
    }

    #[test]
    fn new_names_reject_digits() {
        assert_eq!(
            resolve_perspective("Sustainability", &NAMES),
            Ok("Sustainability".to_string())
        );
        assert_eq!(
            resolve_perspective("Q3 Growth", &NAMES),
            Err(InputError::DigitsInName)
        );
        assert_eq!(
            resolve_perspective("", &NAMES),
            Err(InputError::Empty("Perspective"))
        );
    }
}
