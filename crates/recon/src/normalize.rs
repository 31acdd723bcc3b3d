//! Column and key normalization.

use crate::model::Table;

/// Rows scanned when looking for a real header below banner/title rows.
const HEADER_SCAN_ROWS: usize = 10;

/// Header canonicalization policy. Exactly one policy is active per import,
/// and the same policy is applied to configured column names before any
/// comparison, so both sides see the same form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeaderPolicy {
    /// Trim surrounding whitespace, keep case (roster imports).
    TrimOnly,
    /// Trim and lower-case (campaign imports that fuzzy-match columns).
    TrimLower,
}

impl HeaderPolicy {
    pub fn apply(&self, cell: &str) -> String {
        match self {
            Self::TrimOnly => cell.trim().to_string(),
            Self::TrimLower => cell.trim().to_lowercase(),
        }
    }
}

/// Locate the header row: the first of the leading rows containing any cell
/// whose text case-insensitively contains one of `keywords`. Banner and
/// title rows above the real header match nothing and are skipped. Falls
/// back to row 0.
pub fn find_header_row(rows: &[Vec<String>], keywords: &[String]) -> usize {
    for (idx, row) in rows.iter().take(HEADER_SCAN_ROWS).enumerate() {
        for cell in row {
            let cell = cell.trim().to_lowercase();
            if cell.is_empty() {
                continue;
            }
            if keywords.iter().any(|k| cell.contains(&k.to_lowercase())) {
                return idx;
            }
        }
    }
    0
}

/// Split a raw table into canonical columns plus the data rows below the
/// detected header.
pub fn split_header(table: &Table, keywords: &[String], policy: HeaderPolicy) -> Table {
    let header_idx = find_header_row(&table.rows, keywords);
    let columns = table
        .rows
        .get(header_idx)
        .map(|r| r.iter().map(|c| policy.apply(c)).collect())
        .unwrap_or_default();
    let rows = table.rows.iter().skip(header_idx + 1).cloned().collect();
    Table { columns, rows }
}

/// Canonical join-key form: trimmed and casefolded. Applied to roster and
/// campaign key values alike before any equality check.
pub fn normalize_key(value: &str) -> String {
    value.trim().to_lowercase()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn keywords() -> Vec<String> {
        vec!["email".into(), "manager".into(), "department".into()]
    }

    fn raw(rows: &[&[&str]]) -> Table {
        Table::from_rows(
            rows.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    #[test]
    fn header_found_below_banner_rows() {
        let table = raw(&[
            &["Quarterly Awareness Drive"],
            &[""],
            &["Employee Email", "Status"],
            &["a@x.com", "Clicked"],
        ]);
        assert_eq!(find_header_row(&table.rows, &keywords()), 2);
    }

    #[test]
    fn header_defaults_to_first_row() {
        let table = raw(&[&["col_a", "col_b"], &["1", "2"]]);
        assert_eq!(find_header_row(&table.rows, &keywords()), 0);
    }

    #[test]
    fn split_header_trims_and_skips_banner() {
        let table = raw(&[
            &["Banner"],
            &["  Email ", " MANAGER "],
            &["a@x.com", "Boss"],
        ]);
        let split = split_header(&table, &keywords(), HeaderPolicy::TrimOnly);
        assert_eq!(split.columns, vec!["Email", "MANAGER"]);
        assert_eq!(split.rows.len(), 1);
    }

    #[test]
    fn trim_lower_policy() {
        assert_eq!(HeaderPolicy::TrimLower.apply("  Sent Date "), "sent date");
        assert_eq!(HeaderPolicy::TrimOnly.apply("  Sent Date "), "Sent Date");
    }

    #[test]
    fn key_normalization_casefolds() {
        assert_eq!(normalize_key("  Alice@X.COM "), "alice@x.com");
    }
}
