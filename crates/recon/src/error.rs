use std::fmt;

#[derive(Debug)]
pub enum EngineError {
    /// TOML parse / deserialization error.
    ConfigParse(String),
    /// Config validation error (empty key column, fuzzy mode without
    /// synonyms, etc.).
    ConfigValidation(String),
    /// Join key column absent after normalization.
    MissingKeyColumn { role: String, column: String },
    /// A required non-key column is absent.
    MissingColumn { role: String, column: String },
    /// No data rows after the header-row skip.
    EmptyUpload { source: String },
    /// Campaign upload attempted before a roster is loaded.
    RosterNotLoaded,
    /// Report or export requested before any campaign data exists.
    NoReportAvailable,
}

impl fmt::Display for EngineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigParse(msg) => write!(f, "config parse error: {msg}"),
            Self::ConfigValidation(msg) => write!(f, "config validation error: {msg}"),
            Self::MissingKeyColumn { role, column } => {
                write!(f, "{role}: key column '{column}' not found")
            }
            Self::MissingColumn { role, column } => {
                write!(f, "{role}: missing column '{column}'")
            }
            Self::EmptyUpload { source } => {
                write!(f, "'{source}' contains no data rows")
            }
            Self::RosterNotLoaded => write!(f, "no roster loaded; upload a roster first"),
            Self::NoReportAvailable => write!(f, "no report available; upload campaign data first"),
        }
    }
}

impl std::error::Error for EngineError {}
