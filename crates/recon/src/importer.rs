//! Campaign extract import and Period inference.

use chrono::NaiveDate;

use crate::config::{EngineConfig, KeyMatch};
use crate::error::EngineError;
use crate::model::{CampaignBatch, CampaignRecord, Table};
use crate::normalize::{self, HeaderPolicy};
use crate::resolver::{self, KeyMode};

/// Date formats tried in order. Month-first before day-first: the upstream
/// simulation platform exports US-style dates.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%d %H:%M:%S",
    "%m/%d/%Y",
    "%d/%m/%Y",
    "%m/%d/%y",
    "%d-%b-%Y",
    "%d %b %Y",
];

fn parse_date(value: &str) -> Option<NaiveDate> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(value, fmt).ok())
}

/// Majority vote over the batch's parsed dates: the month abbreviation that
/// occurs most often becomes the batch Period. Ties go to the first-seen
/// month. Returns None when no cell parses as a date.
pub fn infer_period<'a>(dates: impl Iterator<Item = &'a Option<NaiveDate>>) -> Option<String> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for date in dates.flatten() {
        let label = date.format("%b").to_string();
        match counts.iter_mut().find(|(l, _)| *l == label) {
            Some((_, n)) => *n += 1,
            None => counts.push((label, 1)),
        }
    }

    let mut best: Option<(String, usize)> = None;
    for (label, n) in counts {
        match &best {
            Some((_, best_n)) if *best_n >= n => {}
            _ => best = Some((label, n)),
        }
    }
    best.map(|(label, _)| label)
}

/// Parse one campaign extract into a tagged batch. The whole batch succeeds
/// or fails; a failed import leaves no partial state behind.
pub fn import_batch(
    raw: &Table,
    config: &EngineConfig,
    batch_id: u32,
    source: &str,
) -> Result<CampaignBatch, EngineError> {
    let policy = match config.campaign.key_match {
        KeyMatch::Exact => HeaderPolicy::TrimOnly,
        KeyMatch::Fuzzy => HeaderPolicy::TrimLower,
    };
    let table = normalize::split_header(raw, &config.headers.keywords, policy);
    if table.rows.is_empty() {
        return Err(EngineError::EmptyUpload {
            source: source.into(),
        });
    }

    let mode = match config.campaign.key_match {
        KeyMatch::Exact => KeyMode::Exact(policy.apply(&config.campaign.key_column)),
        KeyMatch::Fuzzy => KeyMode::Fuzzy(config.matching.key_synonyms.clone()),
    };
    let key_column = resolver::resolve_key(&table.columns, &mode, "campaign")?;
    let key_idx = table.column_index(&key_column).unwrap();

    let status_column = policy.apply(&config.campaign.status_column);
    let status_idx =
        table
            .column_index(&status_column)
            .ok_or_else(|| EngineError::MissingColumn {
                role: "campaign".into(),
                column: config.campaign.status_column.clone(),
            })?;

    // Date column: exact override first, else first name containing a
    // synonym. Absence is fine; the batch falls back to the source label.
    let date_idx = config
        .campaign
        .date_column
        .as_ref()
        .map(|c| policy.apply(c))
        .and_then(|c| table.column_index(&c))
        .or_else(|| {
            resolver::fuzzy_find(&table.columns, &config.campaign.date_synonyms)
                .and_then(|c| table.column_index(&c))
        });

    let mut records = Vec::with_capacity(table.rows.len());
    for row_idx in 0..table.rows.len() {
        let sent_at = date_idx.and_then(|idx| parse_date(table.cell(row_idx, idx)));
        records.push(CampaignRecord {
            key: table.cell(row_idx, key_idx).to_string(),
            status: table.cell(row_idx, status_idx).to_string(),
            sent_at,
            batch_id,
        });
    }

    let period = infer_period(records.iter().map(|r| &r.sent_at))
        .unwrap_or_else(|| source.to_string());

    Ok(CampaignBatch {
        batch_id,
        source: source.to_string(),
        period,
        records,
    })
}
