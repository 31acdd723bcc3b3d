//! Join-key column resolution.

use crate::error::EngineError;

/// How to locate a key column in a normalized column list. The caller picks
/// the mode per integration; the resolver never guesses across modes.
#[derive(Debug, Clone)]
pub enum KeyMode {
    /// The configured name must be present verbatim (after normalization).
    Exact(String),
    /// First column whose lowered name contains one of the synonyms.
    Fuzzy(Vec<String>),
}

pub fn resolve_key(
    columns: &[String],
    mode: &KeyMode,
    role: &str,
) -> Result<String, EngineError> {
    match mode {
        KeyMode::Exact(name) => columns
            .iter()
            .find(|c| c.as_str() == name)
            .cloned()
            .ok_or_else(|| EngineError::MissingKeyColumn {
                role: role.into(),
                column: name.clone(),
            }),
        KeyMode::Fuzzy(synonyms) => {
            fuzzy_find(columns, synonyms).ok_or_else(|| EngineError::MissingKeyColumn {
                role: role.into(),
                column: synonyms.join("|"),
            })
        }
    }
}

/// First column whose lowered name contains any synonym, in column order.
pub fn fuzzy_find(columns: &[String], synonyms: &[String]) -> Option<String> {
    columns
        .iter()
        .find(|c| {
            let lower = c.to_lowercase();
            synonyms.iter().any(|s| lower.contains(&s.to_lowercase()))
        })
        .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn exact_requires_verbatim_match() {
        let columns = cols(&["EMPLOYEE_CODE", "OFFICE_EMAIL_ADDRESS"]);
        let mode = KeyMode::Exact("OFFICE_EMAIL_ADDRESS".into());
        assert_eq!(
            resolve_key(&columns, &mode, "roster").unwrap(),
            "OFFICE_EMAIL_ADDRESS"
        );

        let mode = KeyMode::Exact("office_email_address".into());
        let err = resolve_key(&columns, &mode, "roster").unwrap_err();
        assert!(err.to_string().contains("office_email_address"));
    }

    #[test]
    fn fuzzy_takes_first_match_in_column_order() {
        let columns = cols(&["id", "recipient name", "recipient email"]);
        let mode = KeyMode::Fuzzy(vec!["email".into(), "name".into()]);
        // "recipient name" comes first and contains "name"
        assert_eq!(
            resolve_key(&columns, &mode, "campaign").unwrap(),
            "recipient name"
        );
    }

    #[test]
    fn fuzzy_is_case_insensitive() {
        let columns = cols(&["Target EMAIL Address"]);
        let mode = KeyMode::Fuzzy(vec!["email".into()]);
        assert_eq!(
            resolve_key(&columns, &mode, "campaign").unwrap(),
            "Target EMAIL Address"
        );
    }

    #[test]
    fn fuzzy_miss_names_the_synonyms() {
        let columns = cols(&["id", "outcome"]);
        let mode = KeyMode::Fuzzy(vec!["email".into(), "name".into()]);
        let err = resolve_key(&columns, &mode, "campaign").unwrap_err();
        assert!(err.to_string().contains("email|name"));
    }
}
