//! Status-frequency aggregation across every imported campaign record.

use std::collections::HashMap;

use crate::model::{CampaignBatch, SummaryRow};

/// Count occurrences of each distinct trimmed status across all batches.
/// Intentionally not deduplicated: this answers "how many send events had
/// status X", while consolidation answers "who is currently at risk".
/// Ordered by descending count; ties break by first appearance.
pub fn summarize(batches: &[CampaignBatch]) -> Vec<SummaryRow> {
    // status -> (count, first-seen index)
    let mut counts: HashMap<String, (usize, usize)> = HashMap::new();
    let mut next_idx = 0usize;

    for batch in batches {
        for record in &batch.records {
            let status = record.status.trim().to_string();
            let entry = counts.entry(status).or_insert_with(|| {
                let idx = next_idx;
                next_idx += 1;
                (0, idx)
            });
            entry.0 += 1;
        }
    }

    let mut rows: Vec<(String, usize, usize)> = counts
        .into_iter()
        .map(|(status, (count, idx))| (status, count, idx))
        .collect();
    rows.sort_by(|a, b| b.1.cmp(&a.1).then(a.2.cmp(&b.2)));
    rows.into_iter()
        .map(|(status, count, _)| SummaryRow { status, count })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::CampaignRecord;

    fn batch(batch_id: u32, statuses: &[&str]) -> CampaignBatch {
        CampaignBatch {
            batch_id,
            source: format!("extract-{batch_id}"),
            period: "Jan".into(),
            records: statuses
                .iter()
                .enumerate()
                .map(|(i, status)| CampaignRecord {
                    key: format!("user{i}@x.com"),
                    status: status.to_string(),
                    sent_at: None,
                    batch_id,
                })
                .collect(),
        }
    }

    #[test]
    fn counts_sum_to_total_rows() {
        let batches = vec![
            batch(1, &["Clicked", "No Action", "Clicked"]),
            batch(2, &["Submitted Data", "No Action"]),
        ];
        let summary = summarize(&batches);
        let total: usize = summary.iter().map(|r| r.count).sum();
        assert_eq!(total, 5);
    }

    #[test]
    fn ordered_by_count_then_first_seen() {
        let batches = vec![batch(
            1,
            &["No Action", "Clicked", "Clicked", "Submitted Data"],
        )];
        let summary = summarize(&batches);
        assert_eq!(summary[0], SummaryRow { status: "Clicked".into(), count: 2 });
        // 1-1 tie: "No Action" appeared before "Submitted Data"
        assert_eq!(summary[1].status, "No Action");
        assert_eq!(summary[2].status, "Submitted Data");
    }

    #[test]
    fn statuses_are_trimmed_before_counting() {
        let batches = vec![batch(1, &["Clicked", " Clicked ", "Clicked"])];
        let summary = summarize(&batches);
        assert_eq!(summary.len(), 1);
        assert_eq!(summary[0].count, 3);
    }

    #[test]
    fn duplicate_keys_count_every_send_event() {
        let mut b = batch(1, &["Clicked", "Clicked"]);
        for record in &mut b.records {
            record.key = "same@x.com".into();
        }
        let summary = summarize(&[b]);
        assert_eq!(summary[0].count, 2);
    }
}
