//! Form boundary helpers: sanitization, date parsing and validation-error
//! flattening.
//!
//! Submitted text goes through trim -> length validation -> HTML escape,
//! in that order; the escaped value is what gets persisted and what gets
//! re-displayed when the form is re-rendered with errors.

use chrono::NaiveDate;
use validator::ValidationErrors;

/// Escape markup-significant characters in user-submitted text
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

/// Parse an optional HTML date input value (ISO-8601, `YYYY-MM-DD`).
///
/// An empty field is simply absent; a malformed one records a field error
/// and is treated as absent for the re-rendered form.
pub fn parse_optional_date(value: &str, label: &str, errors: &mut Vec<String>) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    match NaiveDate::parse_from_str(value, "%Y-%m-%d") {
        Ok(date) => Some(date),
        Err(_) => {
            errors.push(format!("{} must be a valid date (YYYY-MM-DD).", label));
            None
        }
    }
}

/// Flatten `validator` errors into display messages for the form view
pub fn validation_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut messages = Vec::new();
    for (field, field_errors) in errors.field_errors() {
        for error in field_errors {
            match &error.message {
                Some(message) => messages.push(message.to_string()),
                None => messages.push(format!("Invalid value for {}.", field)),
            }
        }
    }
    messages
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{AuthorInput, GenreInput};
    use validator::Validate;

    #[test]
    fn escape_html_replaces_markup_characters() {
        assert_eq!(
            escape_html(r#"<script>alert("x&y")</script>"#),
            "&lt;script&gt;alert(&quot;x&amp;y&quot;)&lt;/script&gt;"
        );
        assert_eq!(escape_html("O'Brien"), "O&#x27;Brien");
        assert_eq!(escape_html("Jane Austen"), "Jane Austen");
    }

    #[test]
    fn valid_date_parses() {
        let mut errors = Vec::new();
        let date = parse_optional_date("1817-07-18", "Date of death", &mut errors);
        assert_eq!(date, Some(NaiveDate::from_ymd_opt(1817, 7, 18).unwrap()));
        assert!(errors.is_empty());
    }

    #[test]
    fn empty_date_is_absent_without_error() {
        let mut errors = Vec::new();
        assert_eq!(parse_optional_date("  ", "Date of birth", &mut errors), None);
        assert!(errors.is_empty());
    }

    #[test]
    fn malformed_date_records_field_error() {
        let mut errors = Vec::new();
        assert_eq!(
            parse_optional_date("18/07/1817", "Date of death", &mut errors),
            None
        );
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("Date of death"));
    }

    #[test]
    fn short_author_first_name_yields_one_error() {
        let input = AuthorInput {
            first_name: "Al".to_string(),
            last_name: "Hitchcock".to_string(),
            date_of_birth: None,
            date_of_death: None,
        };
        let errors = input.validate().unwrap_err();
        let messages = validation_messages(&errors);
        assert_eq!(messages.len(), 1);
        assert!(messages[0].contains("First name"));
    }

    #[test]
    fn genre_name_length_bounds() {
        let too_short = GenreInput {
            name: "Sf".to_string(),
        };
        assert!(too_short.validate().is_err());

        let ok = GenreInput {
            name: "Science Fiction".to_string(),
        };
        assert!(ok.validate().is_ok());

        let too_long = GenreInput {
            name: "x".repeat(101),
        };
        assert!(too_long.validate().is_err());
    }
}
