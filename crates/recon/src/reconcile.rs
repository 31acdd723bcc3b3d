//! Left join of one campaign batch onto the roster.

use crate::model::{CampaignBatch, MatchedRow, ReconcileOutput, UnmatchedRecord};
use crate::roster::RosterTable;

/// Join `batch` against `roster` by normalized key equality. Every campaign
/// row lands in exactly one of the two outputs, in original batch order.
/// Unmatched rows are kept, never dropped.
pub fn reconcile(roster: &RosterTable, batch: &CampaignBatch) -> ReconcileOutput {
    let mut matched = Vec::new();
    let mut unmatched = Vec::new();

    for record in &batch.records {
        match roster.lookup(&record.key) {
            Some(employee) => matched.push(MatchedRow {
                employee: employee.clone(),
                status: record.status.clone(),
                period: batch.period.clone(),
                batch_id: record.batch_id,
            }),
            None => unmatched.push(UnmatchedRecord {
                key: record.key.clone(),
                status: record.status.clone(),
                batch_id: record.batch_id,
            }),
        }
    }

    ReconcileOutput { matched, unmatched }
}
