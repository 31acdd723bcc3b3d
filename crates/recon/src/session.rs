//! Session-scoped workflow state.

use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::importer;
use crate::model::{CampaignBatch, Report, Table};
use crate::report;
use crate::roster::RosterTable;

/// Workflow lifecycle: Empty → RosterLoaded → CampaignsLoaded, with the
/// report derived on demand from whatever is loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionPhase {
    Empty,
    RosterLoaded,
    CampaignsLoaded,
}

/// All state for one user workflow. Owns the roster and the ordered campaign
/// batches; derived tables are recomputed by `report()`, never cached across
/// uploads.
#[derive(Debug)]
pub struct Session {
    config: EngineConfig,
    roster: Option<RosterTable>,
    batches: Vec<CampaignBatch>,
    next_batch_id: u32,
}

impl Session {
    pub fn new(config: EngineConfig) -> Self {
        Session {
            config,
            roster: None,
            batches: Vec::new(),
            next_batch_id: 1,
        }
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn phase(&self) -> SessionPhase {
        match (&self.roster, self.batches.is_empty()) {
            (None, _) => SessionPhase::Empty,
            (Some(_), true) => SessionPhase::RosterLoaded,
            (Some(_), false) => SessionPhase::CampaignsLoaded,
        }
    }

    /// Load (or replace) the roster. Previously imported campaign batches
    /// belong to the old roster and are discarded. Returns the employee
    /// count.
    pub fn load_roster(&mut self, raw: &Table, source: &str) -> Result<usize, EngineError> {
        let roster = RosterTable::from_table(raw, &self.config, source)?;
        let count = roster.len();
        self.roster = Some(roster);
        self.batches.clear();
        self.next_batch_id = 1;
        Ok(count)
    }

    /// Import one campaign extract. The batch is appended only after a fully
    /// successful import, so a mid-parse failure leaves the session
    /// unchanged.
    pub fn add_campaign(
        &mut self,
        raw: &Table,
        source: &str,
    ) -> Result<&CampaignBatch, EngineError> {
        if self.roster.is_none() {
            return Err(EngineError::RosterNotLoaded);
        }
        let batch = importer::import_batch(raw, &self.config, self.next_batch_id, source)?;
        self.next_batch_id += 1;
        self.batches.push(batch);
        Ok(self.batches.last().unwrap())
    }

    pub fn roster(&self) -> Option<&RosterTable> {
        self.roster.as_ref()
    }

    pub fn batches(&self) -> &[CampaignBatch] {
        &self.batches
    }

    /// Build the full report. Requires a roster and at least one batch.
    pub fn report(&self) -> Result<Report, EngineError> {
        let roster = self.roster.as_ref().ok_or(EngineError::NoReportAvailable)?;
        if self.batches.is_empty() {
            return Err(EngineError::NoReportAvailable);
        }
        Ok(report::build_report(roster, &self.batches, &self.config))
    }

    /// Return to `Empty`, discarding the roster, all batches, and anything
    /// derived from them.
    pub fn reset(&mut self) {
        self.roster = None;
        self.batches.clear();
        self.next_batch_id = 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table(rows: &[&[&str]]) -> Table {
        Table::from_rows(
            rows.iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        )
    }

    fn roster_table() -> Table {
        table(&[
            &["EMPLOYEE_CODE", "Full Name", "OFFICE_EMAIL_ADDRESS"],
            &["E001", "Alice", "alice@x.com"],
        ])
    }

    fn campaign_table() -> Table {
        table(&[
            &["email", "status", "sent date"],
            &["alice@x.com", "Clicked", "2025-01-09"],
        ])
    }

    #[test]
    fn lifecycle_phases() {
        let mut session = Session::new(EngineConfig::default());
        assert_eq!(session.phase(), SessionPhase::Empty);

        session.load_roster(&roster_table(), "roster").unwrap();
        assert_eq!(session.phase(), SessionPhase::RosterLoaded);

        session.add_campaign(&campaign_table(), "jan").unwrap();
        assert_eq!(session.phase(), SessionPhase::CampaignsLoaded);

        session.reset();
        assert_eq!(session.phase(), SessionPhase::Empty);
    }

    #[test]
    fn campaign_before_roster_is_rejected() {
        let mut session = Session::new(EngineConfig::default());
        let err = session.add_campaign(&campaign_table(), "jan").unwrap_err();
        assert!(matches!(err, EngineError::RosterNotLoaded));
    }

    #[test]
    fn report_requires_campaign_data() {
        let mut session = Session::new(EngineConfig::default());
        assert!(matches!(
            session.report().unwrap_err(),
            EngineError::NoReportAvailable
        ));

        session.load_roster(&roster_table(), "roster").unwrap();
        assert!(matches!(
            session.report().unwrap_err(),
            EngineError::NoReportAvailable
        ));

        session.add_campaign(&campaign_table(), "jan").unwrap();
        assert!(session.report().is_ok());
    }

    #[test]
    fn roster_reload_discards_batches() {
        let mut session = Session::new(EngineConfig::default());
        session.load_roster(&roster_table(), "roster").unwrap();
        session.add_campaign(&campaign_table(), "jan").unwrap();

        session.load_roster(&roster_table(), "roster-v2").unwrap();
        assert_eq!(session.phase(), SessionPhase::RosterLoaded);
        assert!(session.batches().is_empty());
        assert!(matches!(
            session.report().unwrap_err(),
            EngineError::NoReportAvailable
        ));
    }

    #[test]
    fn failed_import_leaves_session_unchanged() {
        let mut session = Session::new(EngineConfig::default());
        session.load_roster(&roster_table(), "roster").unwrap();
        session.add_campaign(&campaign_table(), "jan").unwrap();

        // Missing status column: the import fails atomically.
        let bad = table(&[&["email", "outcome"], &["alice@x.com", "Clicked"]]);
        assert!(session.add_campaign(&bad, "bad").is_err());
        assert_eq!(session.batches().len(), 1);

        // Batch ids stay contiguous after a failed import.
        session.add_campaign(&campaign_table(), "jan-2").unwrap();
        assert_eq!(session.batches()[1].batch_id, 2);
    }

    #[test]
    fn reset_after_report_blocks_export() {
        let mut session = Session::new(EngineConfig::default());
        session.load_roster(&roster_table(), "roster").unwrap();
        session.add_campaign(&campaign_table(), "jan").unwrap();
        session.report().unwrap();

        session.reset();
        assert!(matches!(
            session.report().unwrap_err(),
            EngineError::NoReportAvailable
        ));
    }
}
