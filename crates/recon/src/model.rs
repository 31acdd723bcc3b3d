use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::Serialize;

// ---------------------------------------------------------------------------
// Tabular input
// ---------------------------------------------------------------------------

/// A decoded tabular upload: rows of cells, plus canonical column names once
/// a header row has been located (empty until then).
#[derive(Debug, Clone, Default)]
pub struct Table {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl Table {
    pub fn from_rows(rows: Vec<Vec<String>>) -> Self {
        Table {
            columns: Vec::new(),
            rows,
        }
    }

    /// Cell text at (row, col), trimmed. Short rows read as empty.
    pub fn cell(&self, row: usize, col: usize) -> &str {
        self.rows
            .get(row)
            .and_then(|r| r.get(col))
            .map(|s| s.trim())
            .unwrap_or("")
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }
}

// ---------------------------------------------------------------------------
// Roster
// ---------------------------------------------------------------------------

/// One employee from the roster master file.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EmployeeRecord {
    pub employee_id: String,
    pub name: String,
    pub email: String,
    /// Organizational attributes (manager chain, unit, zone, ...), keyed by
    /// roster column name. Columns missing from the upload are absent here.
    pub attributes: BTreeMap<String, String>,
}

// ---------------------------------------------------------------------------
// Campaign
// ---------------------------------------------------------------------------

/// One row of a campaign extract, immutable after import.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CampaignRecord {
    pub key: String,
    pub status: String,
    pub sent_at: Option<NaiveDate>,
    pub batch_id: u32,
}

/// One imported campaign extract. Every record shares the batch's Period.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CampaignBatch {
    pub batch_id: u32,
    /// Upload label, normally the file stem.
    pub source: String,
    /// Period label inferred by majority vote over the date column.
    pub period: String,
    pub records: Vec<CampaignRecord>,
}

// ---------------------------------------------------------------------------
// Reconciliation
// ---------------------------------------------------------------------------

/// A campaign row joined to its roster employee.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MatchedRow {
    pub employee: EmployeeRecord,
    pub status: String,
    pub period: String,
    pub batch_id: u32,
}

/// A campaign row whose key had no roster counterpart. Never discarded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UnmatchedRecord {
    pub key: String,
    pub status: String,
    pub batch_id: u32,
}

#[derive(Debug)]
pub struct ReconcileOutput {
    pub matched: Vec<MatchedRow>,
    pub unmatched: Vec<UnmatchedRecord>,
}

// ---------------------------------------------------------------------------
// Consolidation
// ---------------------------------------------------------------------------

/// One employee's full per-Period status history.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConsolidatedRow {
    pub employee_id: String,
    pub name: String,
    pub email: String,
    pub attributes: BTreeMap<String, String>,
    /// Period label -> latest status. Periods with no entry are absent.
    pub statuses: BTreeMap<String, String>,
    pub risk_count: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Consolidation {
    /// Period labels in first-observed upload order.
    pub periods: Vec<String>,
    /// One row per roster employee, in roster order.
    pub rows: Vec<ConsolidatedRow>,
    /// Campaign keys never present in the roster, each recorded once, in
    /// first-seen order.
    pub unmatched_keys: Vec<String>,
}

// ---------------------------------------------------------------------------
// Summary + Report
// ---------------------------------------------------------------------------

/// Frequency of one status value across every imported campaign record.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryRow {
    pub status: String,
    pub count: usize,
}

/// Everything derived from one roster + the accumulated campaign batches.
#[derive(Debug, Clone, Serialize)]
pub struct Report {
    /// Roster attribute columns, in configured order, for rendering.
    pub attribute_columns: Vec<String>,
    pub matched: Vec<MatchedRow>,
    pub unmatched: Vec<UnmatchedRecord>,
    pub consolidation: Consolidation,
    pub summary: Vec<SummaryRow>,
    pub total_campaign_rows: usize,
}
