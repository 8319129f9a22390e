//! One-line transaction entry.
//!
//! Grammar: `[+|-]amount [#category] [note…]`. A leading `+` records
//! income, `-` or nothing records an expense. The amount accepts `.` or `,`
//! decimals ([`engine::Money`]); at most one `#category` tag; remaining
//! tokens form the note.

use api_types::EntryKind;
use engine::Money;

use crate::error::{AppError, Result};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QuickAddParsed {
    pub kind: EntryKind,
    pub amount_minor: i64,
    pub category: Option<String>,
    pub note: Option<String>,
}

pub fn parse(input: &str) -> Result<QuickAddParsed> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(AppError::Validation("enter an amount".to_string()));
    }

    let (kind, rest) = if let Some(stripped) = trimmed.strip_prefix('+') {
        (EntryKind::Income, stripped.trim_start())
    } else if let Some(stripped) = trimmed.strip_prefix('-') {
        (EntryKind::Expense, stripped.trim_start())
    } else {
        (EntryKind::Expense, trimmed)
    };

    let mut parts = rest.splitn(2, ' ');
    let amount_raw = parts.next().unwrap_or("").trim();
    if amount_raw.is_empty() {
        return Err(AppError::Validation("missing amount".to_string()));
    }
    let tail = parts.next().unwrap_or("").trim();

    let amount_minor = amount_raw
        .parse::<Money>()
        .map_err(|err| AppError::Validation(err.to_string()))?
        .minor();
    if amount_minor <= 0 {
        return Err(AppError::Validation("amount must be > 0".to_string()));
    }

    let (category, note) = parse_tag(tail)?;

    Ok(QuickAddParsed {
        kind,
        amount_minor,
        category,
        note,
    })
}

fn parse_tag(tail: &str) -> Result<(Option<String>, Option<String>)> {
    if tail.is_empty() {
        return Ok((None, None));
    }

    let mut tag: Option<String> = None;
    let mut kept: Vec<&str> = Vec::new();

    for token in tail.split_whitespace() {
        if let Some(rest) = token.strip_prefix('#') {
            if rest.is_empty() {
                kept.push(token);
                continue;
            }
            if tag.is_some() {
                return Err(AppError::Validation(
                    "at most one #category tag".to_string(),
                ));
            }
            tag = Some(rest.to_string());
        } else {
            kept.push(token);
        }
    }

    let note = kept.join(" ");
    let note = if note.is_empty() { None } else { Some(note) };
    Ok((tag, note))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_amount_is_an_expense() {
        let parsed = parse("12,50").unwrap();
        assert_eq!(parsed.kind, EntryKind::Expense);
        assert_eq!(parsed.amount_minor, 12_50);
        assert_eq!(parsed.category, None);
        assert_eq!(parsed.note, None);
    }

    #[test]
    fn signed_amounts_with_tag_and_note() {
        let parsed = parse("+2000 #Salary june pay").unwrap();
        assert_eq!(parsed.kind, EntryKind::Income);
        assert_eq!(parsed.amount_minor, 2000_00);
        assert_eq!(parsed.category.as_deref(), Some("Salary"));
        assert_eq!(parsed.note.as_deref(), Some("june pay"));

        let parsed = parse("- 45.99 groceries #Food").unwrap();
        assert_eq!(parsed.kind, EntryKind::Expense);
        assert_eq!(parsed.amount_minor, 45_99);
        assert_eq!(parsed.category.as_deref(), Some("Food"));
        assert_eq!(parsed.note.as_deref(), Some("groceries"));
    }

    #[test]
    fn rejects_empty_zero_and_double_tag() {
        assert!(matches!(parse("  "), Err(AppError::Validation(_))));
        assert!(matches!(parse("0"), Err(AppError::Validation(_))));
        assert!(matches!(parse("abc"), Err(AppError::Validation(_))));
        assert!(matches!(
            parse("10 #a #b"),
            Err(AppError::Validation(_))
        ));
    }
}
