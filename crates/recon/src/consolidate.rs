//! Cross-period consolidation with per-(key, Period) deduplication.

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::model::{CampaignBatch, Consolidation, ConsolidatedRow};
use crate::normalize;
use crate::roster::RosterTable;

/// Merge all batches into one wide table keyed by employee, one column per
/// Period label. Batches sharing a label are unioned before deduplication,
/// so dedup is per (key, Period) pair, not per batch; within a pair the
/// last occurrence in upload order wins.
pub fn consolidate(
    roster: &RosterTable,
    batches: &[CampaignBatch],
    risky_statuses: &[String],
) -> Consolidation {
    let risky: HashSet<String> = risky_statuses
        .iter()
        .map(|s| normalize::normalize_key(s))
        .collect();

    let mut periods: Vec<String> = Vec::new();
    let mut latest: HashMap<(String, String), String> = HashMap::new();
    let mut unmatched_keys: Vec<String> = Vec::new();
    let mut unmatched_seen: HashSet<String> = HashSet::new();

    for batch in batches {
        if !periods.contains(&batch.period) {
            periods.push(batch.period.clone());
        }
        for record in &batch.records {
            let key = normalize::normalize_key(&record.key);
            if key.is_empty() {
                continue;
            }
            latest.insert((batch.period.clone(), key.clone()), record.status.clone());
            if !roster.contains_key(&key) && unmatched_seen.insert(key) {
                unmatched_keys.push(record.key.trim().to_string());
            }
        }
    }

    let rows = roster
        .records()
        .iter()
        .map(|employee| {
            let key = normalize::normalize_key(&employee.email);
            let mut statuses = BTreeMap::new();
            let mut risk_count = 0;
            for period in &periods {
                if let Some(status) = latest.get(&(period.clone(), key.clone())) {
                    if risky.contains(&normalize::normalize_key(status)) {
                        risk_count += 1;
                    }
                    statuses.insert(period.clone(), status.clone());
                }
            }
            ConsolidatedRow {
                employee_id: employee.employee_id.clone(),
                name: employee.name.clone(),
                email: employee.email.clone(),
                attributes: employee.attributes.clone(),
                statuses,
                risk_count,
            }
        })
        .collect();

    Consolidation {
        periods,
        rows,
        unmatched_keys,
    }
}
