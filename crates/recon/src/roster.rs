//! The employee master dataset, keyed by normalized email.

use std::collections::{BTreeMap, HashMap};

use crate::config::{EngineConfig, KeyMatch};
use crate::error::EngineError;
use crate::model::{EmployeeRecord, Table};
use crate::normalize::{self, HeaderPolicy};
use crate::resolver::{self, KeyMode};

#[derive(Debug, Clone)]
pub struct RosterTable {
    /// Attribute columns actually present in this roster, in config order.
    attribute_columns: Vec<String>,
    records: Vec<EmployeeRecord>,
    /// Normalized join key -> index into `records`. Duplicate keys replace
    /// the earlier record in place (last-loaded wins, stable row order).
    by_key: HashMap<String, usize>,
}

impl RosterTable {
    pub fn from_table(
        raw: &Table,
        config: &EngineConfig,
        source: &str,
    ) -> Result<Self, EngineError> {
        let table = normalize::split_header(raw, &config.headers.keywords, HeaderPolicy::TrimOnly);
        if table.rows.is_empty() {
            return Err(EngineError::EmptyUpload {
                source: source.into(),
            });
        }

        let mode = match config.roster.key_match {
            KeyMatch::Exact => KeyMode::Exact(config.roster.key_column.trim().to_string()),
            KeyMatch::Fuzzy => KeyMode::Fuzzy(config.matching.key_synonyms.clone()),
        };
        let key_column = resolver::resolve_key(&table.columns, &mode, "roster")?;
        let key_idx = table.column_index(&key_column).unwrap();

        let id_idx = table
            .column_index(config.roster.id_column.trim())
            .ok_or_else(|| EngineError::MissingColumn {
                role: "roster".into(),
                column: config.roster.id_column.clone(),
            })?;
        let name_idx = table
            .column_index(config.roster.name_column.trim())
            .ok_or_else(|| EngineError::MissingColumn {
                role: "roster".into(),
                column: config.roster.name_column.clone(),
            })?;

        let attr_indices: Vec<(String, usize)> = config
            .roster
            .attribute_columns
            .iter()
            .map(|c| c.trim().to_string())
            .filter_map(|c| table.column_index(&c).map(|idx| (c, idx)))
            .collect();
        let attribute_columns = attr_indices.iter().map(|(c, _)| c.clone()).collect();

        let mut records: Vec<EmployeeRecord> = Vec::new();
        let mut by_key: HashMap<String, usize> = HashMap::new();

        for row_idx in 0..table.rows.len() {
            let email = table.cell(row_idx, key_idx);
            let key = normalize::normalize_key(email);
            if key.is_empty() {
                // A blank key can never join; the row is unreachable.
                continue;
            }

            let mut attributes = BTreeMap::new();
            for (name, idx) in &attr_indices {
                let value = table.cell(row_idx, *idx);
                if !value.is_empty() {
                    attributes.insert(name.clone(), value.to_string());
                }
            }

            let record = EmployeeRecord {
                employee_id: table.cell(row_idx, id_idx).to_string(),
                name: table.cell(row_idx, name_idx).to_string(),
                email: email.to_string(),
                attributes,
            };

            match by_key.get(&key) {
                Some(&existing) => records[existing] = record,
                None => {
                    by_key.insert(key, records.len());
                    records.push(record);
                }
            }
        }

        Ok(RosterTable {
            attribute_columns,
            records,
            by_key,
        })
    }

    /// Look up an employee by raw key value (normalized internally).
    pub fn lookup(&self, key: &str) -> Option<&EmployeeRecord> {
        self.by_key
            .get(&normalize::normalize_key(key))
            .map(|&i| &self.records[i])
    }

    /// Membership test for an already-normalized key.
    pub fn contains_key(&self, normalized_key: &str) -> bool {
        self.by_key.contains_key(normalized_key)
    }

    pub fn records(&self) -> &[EmployeeRecord] {
        &self.records
    }

    pub fn attribute_columns(&self) -> &[String] {
        &self.attribute_columns
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
