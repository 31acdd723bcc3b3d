use serde::Deserialize;

use crate::error::EngineError;

// ---------------------------------------------------------------------------
// Top-level config
// ---------------------------------------------------------------------------

/// Engine configuration. Every constant the engine matches against — key
/// columns, header keywords, synonyms, risky statuses — lives here so roster
/// schema drift is a config change, not a code change.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub roster: RosterConfig,
    #[serde(default)]
    pub campaign: CampaignConfig,
    #[serde(default)]
    pub headers: HeaderConfig,
    #[serde(default)]
    pub matching: MatchingConfig,
    #[serde(default)]
    pub risk: RiskConfig,
}

// ---------------------------------------------------------------------------
// Key matching mode
// ---------------------------------------------------------------------------

/// How a join-key column is located. Exact is the default; fuzzy is for
/// inputs without a stable schema. The resolver never falls back from one
/// mode to the other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum KeyMatch {
    Exact,
    Fuzzy,
}

impl Default for KeyMatch {
    fn default() -> Self {
        Self::Exact
    }
}

// ---------------------------------------------------------------------------
// Roster
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct RosterConfig {
    /// Column holding the join key (canonical email).
    #[serde(default = "default_roster_key")]
    pub key_column: String,
    #[serde(default)]
    pub key_match: KeyMatch,
    #[serde(default = "default_id_column")]
    pub id_column: String,
    #[serde(default = "default_name_column")]
    pub name_column: String,
    /// Organizational attribute columns carried into matched output.
    /// Columns absent from an upload are simply skipped.
    #[serde(default = "default_attribute_columns")]
    pub attribute_columns: Vec<String>,
}

impl Default for RosterConfig {
    fn default() -> Self {
        RosterConfig {
            key_column: default_roster_key(),
            key_match: KeyMatch::default(),
            id_column: default_id_column(),
            name_column: default_name_column(),
            attribute_columns: default_attribute_columns(),
        }
    }
}

// ---------------------------------------------------------------------------
// Campaign
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct CampaignConfig {
    #[serde(default = "default_campaign_key")]
    pub key_column: String,
    #[serde(default)]
    pub key_match: KeyMatch,
    #[serde(default = "default_status_column")]
    pub status_column: String,
    /// Exact date column override. When unset, the first column whose name
    /// contains one of `date_synonyms` is used.
    #[serde(default)]
    pub date_column: Option<String>,
    #[serde(default = "default_date_synonyms")]
    pub date_synonyms: Vec<String>,
}

impl Default for CampaignConfig {
    fn default() -> Self {
        CampaignConfig {
            key_column: default_campaign_key(),
            key_match: KeyMatch::default(),
            status_column: default_status_column(),
            date_column: None,
            date_synonyms: default_date_synonyms(),
        }
    }
}

// ---------------------------------------------------------------------------
// Headers + matching + risk
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Deserialize)]
pub struct HeaderConfig {
    /// Keywords that identify a real header row below banner/title rows.
    #[serde(default = "default_header_keywords")]
    pub keywords: Vec<String>,
}

impl Default for HeaderConfig {
    fn default() -> Self {
        HeaderConfig {
            keywords: default_header_keywords(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MatchingConfig {
    /// Synonym substrings used by fuzzy key resolution, tried in column
    /// order with a first-match tie-break.
    #[serde(default = "default_key_synonyms")]
    pub key_synonyms: Vec<String>,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        MatchingConfig {
            key_synonyms: default_key_synonyms(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RiskConfig {
    /// Statuses counted as simulated compromise, compared casefolded.
    #[serde(default = "default_risky_statuses")]
    pub statuses: Vec<String>,
}

impl Default for RiskConfig {
    fn default() -> Self {
        RiskConfig {
            statuses: default_risky_statuses(),
        }
    }
}

// ---------------------------------------------------------------------------
// Defaults (the original extract schema)
// ---------------------------------------------------------------------------

fn default_roster_key() -> String {
    "OFFICE_EMAIL_ADDRESS".into()
}

fn default_id_column() -> String {
    "EMPLOYEE_CODE".into()
}

fn default_name_column() -> String {
    "Full Name".into()
}

fn default_attribute_columns() -> Vec<String> {
    ["L1_MANAGER", "L2_MANAGER", "SBU", "DEPARTMENT", "ZONE", "LOCATION"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_campaign_key() -> String {
    "email".into()
}

fn default_status_column() -> String {
    "status".into()
}

fn default_date_synonyms() -> Vec<String> {
    vec!["date".into(), "sent".into(), "time".into()]
}

fn default_header_keywords() -> Vec<String> {
    ["email", "manager", "department", "team", "designation"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_key_synonyms() -> Vec<String> {
    vec!["email".into(), "name".into()]
}

fn default_risky_statuses() -> Vec<String> {
    vec!["clicked".into(), "submitted data".into()]
}

// ---------------------------------------------------------------------------
// Parse + Validate
// ---------------------------------------------------------------------------

impl EngineConfig {
    pub fn from_toml(input: &str) -> Result<Self, EngineError> {
        let config: EngineConfig =
            toml::from_str(input).map_err(|e| EngineError::ConfigParse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), EngineError> {
        if self.roster.key_match == KeyMatch::Exact && self.roster.key_column.trim().is_empty() {
            return Err(EngineError::ConfigValidation(
                "roster.key_column must not be empty in exact mode".into(),
            ));
        }
        if self.campaign.key_match == KeyMatch::Exact && self.campaign.key_column.trim().is_empty()
        {
            return Err(EngineError::ConfigValidation(
                "campaign.key_column must not be empty in exact mode".into(),
            ));
        }
        if (self.roster.key_match == KeyMatch::Fuzzy
            || self.campaign.key_match == KeyMatch::Fuzzy)
            && self.matching.key_synonyms.is_empty()
        {
            return Err(EngineError::ConfigValidation(
                "matching.key_synonyms must not be empty when fuzzy key matching is enabled"
                    .into(),
            ));
        }
        if self.roster.id_column.trim().is_empty() {
            return Err(EngineError::ConfigValidation(
                "roster.id_column must not be empty".into(),
            ));
        }
        if self.roster.name_column.trim().is_empty() {
            return Err(EngineError::ConfigValidation(
                "roster.name_column must not be empty".into(),
            ));
        }
        if self.campaign.status_column.trim().is_empty() {
            return Err(EngineError::ConfigValidation(
                "campaign.status_column must not be empty".into(),
            ));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
