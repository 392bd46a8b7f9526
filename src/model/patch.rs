//! Typed form submission for [`Sales`].
//!
//! The editor never spreads raw form values over an entity. Each field is
//! validated into a [`SalesPatch`], which is then applied to the current
//! entity, preserving its `id`.

use chrono::NaiveDate;
use thiserror::Error;

use super::sales::{Sales, SalesState};

/// Column width of `sales.description` on the server.
pub const DESCRIPTION_MAX_LEN: usize = 255;

const DATE_FORMAT: &str = "%Y-%m-%d";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PatchError {
    #[error("Description is {len} characters long (max {DESCRIPTION_MAX_LEN})")]
    DescriptionTooLong { len: usize },

    #[error("Date '{input}' is not a valid YYYY-MM-DD date")]
    InvalidDate { input: String },
}

/// Validated values for every editable field. `None` clears the field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SalesPatch {
    pub description: Option<String>,
    pub state: Option<SalesState>,
    pub date: Option<NaiveDate>,
}

impl SalesPatch {
    /// Validate raw form input field by field.
    pub fn parse(
        description: &str,
        state: Option<SalesState>,
        date: &str,
    ) -> Result<Self, PatchError> {
        Ok(Self {
            description: parse_description(description)?,
            state,
            date: parse_date(date)?,
        })
    }

    /// Merge the patch over `base`; the identifier is always kept.
    pub fn apply(self, base: &Sales) -> Sales {
        Sales {
            id: base.id,
            description: self.description,
            state: self.state,
            date: self.date,
        }
    }
}

fn parse_description(input: &str) -> Result<Option<String>, PatchError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    let len = trimmed.chars().count();
    if len > DESCRIPTION_MAX_LEN {
        return Err(PatchError::DescriptionTooLong { len });
    }
    Ok(Some(trimmed.to_string()))
}

fn parse_date(input: &str) -> Result<Option<NaiveDate>, PatchError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    NaiveDate::parse_from_str(trimmed, DATE_FORMAT)
        .map(Some)
        .map_err(|_| PatchError::InvalidDate {
            input: trimmed.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_fields_clear_values() {
        let patch = SalesPatch::parse("   ", None, "").unwrap();
        assert_eq!(patch, SalesPatch::default());
    }

    #[test]
    fn rejects_malformed_date() {
        let err = SalesPatch::parse("Order", None, "02/02/2020").unwrap_err();
        assert_eq!(
            err,
            PatchError::InvalidDate {
                input: "02/02/2020".into()
            }
        );
    }

    #[test]
    fn rejects_overlong_description() {
        let long = "x".repeat(DESCRIPTION_MAX_LEN + 1);
        let err = SalesPatch::parse(&long, None, "").unwrap_err();
        assert_eq!(
            err,
            PatchError::DescriptionTooLong {
                len: DESCRIPTION_MAX_LEN + 1
            }
        );
    }

    #[test]
    fn apply_keeps_id_and_replaces_fields() {
        let base = Sales {
            id: Some(7),
            description: Some("old".into()),
            state: Some(SalesState::InCharge),
            date: None,
        };
        let patch = SalesPatch::parse(" new ", Some(SalesState::Delivered), "2021-03-04").unwrap();
        let merged = patch.apply(&base);
        assert_eq!(merged.id, Some(7));
        assert_eq!(merged.description.as_deref(), Some("new"));
        assert_eq!(merged.state, Some(SalesState::Delivered));
        assert_eq!(merged.date, NaiveDate::from_ymd_opt(2021, 3, 4));
    }
}
