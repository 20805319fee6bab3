//! Book instance (physical copy) model and related types

use chrono::{NaiveDate, Utc};
use serde::Deserialize;
use sqlx::FromRow;
use std::str::FromStr;
use validator::Validate;

use super::book::Book;

/// Loan status of a physical copy. The DB stores the display string and
/// enforces the same four values with a CHECK constraint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CopyStatus {
    Available,
    #[default]
    Maintenance,
    Loaned,
    Reserved,
}

impl CopyStatus {
    pub const ALL: [CopyStatus; 4] = [
        CopyStatus::Available,
        CopyStatus::Maintenance,
        CopyStatus::Loaned,
        CopyStatus::Reserved,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CopyStatus::Available => "Available",
            CopyStatus::Maintenance => "Maintenance",
            CopyStatus::Loaned => "Loaned",
            CopyStatus::Reserved => "Reserved",
        }
    }
}

impl FromStr for CopyStatus {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Available" => Ok(CopyStatus::Available),
            "Maintenance" => Ok(CopyStatus::Maintenance),
            "Loaned" => Ok(CopyStatus::Loaned),
            "Reserved" => Ok(CopyStatus::Reserved),
            _ => Err(()),
        }
    }
}

impl std::fmt::Display for CopyStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Full book instance model from database
#[derive(Debug, Clone, FromRow)]
pub struct BookInstance {
    pub id: i32,
    pub book_id: Option<i32>,
    pub imprint: String,
    pub status: String,
    pub due_back: NaiveDate,
}

impl BookInstance {
    pub fn url(&self) -> String {
        format!("/bookInstance/{}", self.id)
    }
}

/// Book instance with its book reference populated
#[derive(Debug, Clone)]
pub struct BookInstanceWithBook {
    pub instance: BookInstance,
    pub book: Option<Book>,
}

/// Raw book instance form submission
#[derive(Debug, Deserialize)]
pub struct BookInstanceForm {
    #[serde(default)]
    pub book: String,
    #[serde(default)]
    pub imprint: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub due_back: String,
}

/// Trimmed book instance fields, ready for validation. The status has
/// already been parsed: a value outside the four enumerated ones is
/// rejected before this struct is built.
#[derive(Debug, Validate)]
pub struct BookInstanceInput {
    pub book_id: Option<i32>,
    #[validate(length(min = 1, message = "Imprint must not be empty."))]
    pub imprint: String,
    pub status: CopyStatus,
    pub due_back: Option<NaiveDate>,
}

impl BookInstanceInput {
    pub fn sanitize(&self) -> NewBookInstance {
        NewBookInstance {
            book_id: self.book_id,
            imprint: crate::forms::escape_html(&self.imprint),
            status: self.status,
            // dueBack defaults to the submission time
            due_back: self.due_back.unwrap_or_else(|| Utc::now().date_naive()),
        }
    }
}

/// Sanitized book instance fields, as persisted
#[derive(Debug, Clone)]
pub struct NewBookInstance {
    pub book_id: Option<i32>,
    pub imprint: String,
    pub status: CopyStatus,
    pub due_back: NaiveDate,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_display() {
        for status in CopyStatus::ALL {
            assert_eq!(status.as_str().parse::<CopyStatus>(), Ok(status));
        }
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!("Borrowed".parse::<CopyStatus>().is_err());
        assert!("available".parse::<CopyStatus>().is_err());
        assert!("".parse::<CopyStatus>().is_err());
    }

    #[test]
    fn default_status_is_maintenance() {
        assert_eq!(CopyStatus::default(), CopyStatus::Maintenance);
    }
}
