//! Report assembly and export-table rendering.

use crate::config::EngineConfig;
use crate::consolidate;
use crate::metrics;
use crate::model::{CampaignBatch, Report, Table};
use crate::reconcile;
use crate::roster::RosterTable;

/// One Reconciler pass per batch, then consolidation and the status summary.
pub fn build_report(
    roster: &RosterTable,
    batches: &[CampaignBatch],
    config: &EngineConfig,
) -> Report {
    let mut matched = Vec::new();
    let mut unmatched = Vec::new();
    for batch in batches {
        let output = reconcile::reconcile(roster, batch);
        matched.extend(output.matched);
        unmatched.extend(output.unmatched);
    }

    Report {
        attribute_columns: roster.attribute_columns().to_vec(),
        matched,
        unmatched,
        consolidation: consolidate::consolidate(roster, batches, &config.risk.statuses),
        summary: metrics::summarize(batches),
        total_campaign_rows: batches.iter().map(|b| b.records.len()).sum(),
    }
}

/// Sheets for the export sink, in workbook order.
pub fn export_sheets(report: &Report) -> Vec<(String, Table)> {
    vec![
        ("Summary Stats".to_string(), summary_table(report)),
        ("Mapped Data".to_string(), mapped_table(report)),
        ("Consolidated".to_string(), consolidated_table(report)),
        ("Unmatched".to_string(), unmatched_table(report)),
    ]
}

fn summary_table(report: &Report) -> Table {
    Table {
        columns: vec!["Status".into(), "Count".into()],
        rows: report
            .summary
            .iter()
            .map(|r| vec![r.status.clone(), r.count.to_string()])
            .collect(),
    }
}

fn mapped_table(report: &Report) -> Table {
    let mut columns = vec![
        "Employee ID".to_string(),
        "Name".to_string(),
        "Email".to_string(),
    ];
    columns.extend(report.attribute_columns.iter().cloned());
    columns.push("Status".into());
    columns.push("Period".into());

    let rows = report
        .matched
        .iter()
        .map(|row| {
            let mut cells = vec![
                row.employee.employee_id.clone(),
                row.employee.name.clone(),
                row.employee.email.clone(),
            ];
            for attr in &report.attribute_columns {
                cells.push(row.employee.attributes.get(attr).cloned().unwrap_or_default());
            }
            cells.push(row.status.clone());
            cells.push(row.period.clone());
            cells
        })
        .collect();

    Table { columns, rows }
}

fn consolidated_table(report: &Report) -> Table {
    let consolidation = &report.consolidation;
    let mut columns = vec![
        "Employee ID".to_string(),
        "Name".to_string(),
        "Email".to_string(),
    ];
    columns.extend(report.attribute_columns.iter().cloned());
    columns.extend(consolidation.periods.iter().cloned());
    columns.push("Risk Count".into());

    let rows = consolidation
        .rows
        .iter()
        .map(|row| {
            let mut cells = vec![row.employee_id.clone(), row.name.clone(), row.email.clone()];
            for attr in &report.attribute_columns {
                cells.push(row.attributes.get(attr).cloned().unwrap_or_default());
            }
            for period in &consolidation.periods {
                cells.push(row.statuses.get(period).cloned().unwrap_or_default());
            }
            cells.push(row.risk_count.to_string());
            cells
        })
        .collect();

    Table { columns, rows }
}

fn unmatched_table(report: &Report) -> Table {
    Table {
        columns: vec!["Key".into(), "Status".into(), "Batch".into()],
        rows: report
            .unmatched
            .iter()
            .map(|r| vec![r.key.clone(), r.status.clone(), r.batch_id.to_string()])
            .collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CampaignRecord, Table};

    fn roster() -> RosterTable {
        let table = Table::from_rows(
            [
                ["EMPLOYEE_CODE", "Full Name", "OFFICE_EMAIL_ADDRESS", "DEPARTMENT"],
                ["E001", "Alice", "alice@x.com", "Finance"],
            ]
            .iter()
            .map(|r| r.iter().map(|c| c.to_string()).collect())
            .collect(),
        );
        RosterTable::from_table(&table, &EngineConfig::default(), "roster.csv").unwrap()
    }

    fn batches() -> Vec<CampaignBatch> {
        vec![CampaignBatch {
            batch_id: 1,
            source: "jan".into(),
            period: "Jan".into(),
            records: vec![
                CampaignRecord {
                    key: "alice@x.com".into(),
                    status: "Clicked".into(),
                    sent_at: None,
                    batch_id: 1,
                },
                CampaignRecord {
                    key: "ghost@x.com".into(),
                    status: "No Action".into(),
                    sent_at: None,
                    batch_id: 1,
                },
            ],
        }]
    }

    #[test]
    fn report_collects_all_derived_tables() {
        let report = build_report(&roster(), &batches(), &EngineConfig::default());
        assert_eq!(report.matched.len(), 1);
        assert_eq!(report.unmatched.len(), 1);
        assert_eq!(report.total_campaign_rows, 2);
        assert_eq!(report.consolidation.periods, vec!["Jan"]);
        assert_eq!(report.summary.len(), 2);
    }

    #[test]
    fn sheets_render_in_workbook_order() {
        let report = build_report(&roster(), &batches(), &EngineConfig::default());
        let sheets = export_sheets(&report);
        let names: Vec<&str> = sheets.iter().map(|(n, _)| n.as_str()).collect();
        assert_eq!(names, vec!["Summary Stats", "Mapped Data", "Consolidated", "Unmatched"]);

        let (_, mapped) = &sheets[1];
        assert_eq!(
            mapped.columns,
            vec!["Employee ID", "Name", "Email", "DEPARTMENT", "Status", "Period"]
        );
        assert_eq!(mapped.rows[0][3], "Finance");
        assert_eq!(mapped.rows[0][4], "Clicked");

        let (_, consolidated) = &sheets[2];
        assert_eq!(consolidated.columns.last().unwrap(), "Risk Count");
        assert_eq!(consolidated.rows[0].last().unwrap(), "1");
    }

    #[test]
    fn report_serializes_to_json() {
        let report = build_report(&roster(), &batches(), &EngineConfig::default());
        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["total_campaign_rows"], 2);
        assert_eq!(json["consolidation"]["periods"][0], "Jan");
        assert_eq!(json["summary"][0]["count"], 1);
    }
}
