//! Static instrument table loaded from an exchange instruments dump.

use std::collections::HashMap;
use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::application::ports::InstrumentResolver;
use crate::domain::shared::{InstrumentToken, Symbol};

/// Errors loading the instrument table.
#[derive(Debug, Error)]
pub enum InstrumentTableError {
    /// The file could not be read.
    #[error("failed to read instrument table {path}: {source}")]
    Io {
        /// Path that failed.
        path: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file could not be parsed.
    #[error("failed to parse instrument table: {0}")]
    Parse(String),
}

/// One row of the instruments dump. Rows missing either field are skipped,
/// matching how the upstream NSE.json files are shaped (many entries carry
/// extra fields or none of the ones we need).
#[derive(Debug, Deserialize)]
struct InstrumentRow {
    #[serde(default)]
    symbol: Option<String>,
    #[serde(default)]
    instrument_token: Option<i64>,
}

/// Symbol-to-token table backed by an NSE.json-style file.
///
/// Read-only after load; symbols are normalized (trim + uppercase) on the
/// way in so lookups are case-insensitive.
#[derive(Debug, Default)]
pub struct JsonInstrumentTable {
    map: HashMap<String, InstrumentToken>,
}

impl JsonInstrumentTable {
    /// Load the table from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be read or is not a JSON array.
    pub fn load(path: &Path) -> Result<Self, InstrumentTableError> {
        let text = std::fs::read_to_string(path).map_err(|source| InstrumentTableError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let rows: Vec<InstrumentRow> =
            serde_json::from_str(&text).map_err(|e| InstrumentTableError::Parse(e.to_string()))?;

        let table = Self::from_rows(rows);
        tracing::info!(
            count = table.len(),
            path = %path.display(),
            "instrument mappings loaded"
        );
        Ok(table)
    }

    /// Build a table from symbol/token pairs. Used by tests and callers
    /// with an in-memory mapping.
    #[must_use]
    pub fn from_entries(entries: impl IntoIterator<Item = (Symbol, InstrumentToken)>) -> Self {
        let map = entries
            .into_iter()
            .map(|(symbol, token)| (symbol.into_inner(), token))
            .collect();
        Self { map }
    }

    fn from_rows(rows: Vec<InstrumentRow>) -> Self {
        let map = rows
            .into_iter()
            .filter_map(|row| {
                let symbol = row.symbol?;
                let token = row.instrument_token?;
                Some((Symbol::new(symbol).into_inner(), InstrumentToken::new(token)))
            })
            .collect();
        Self { map }
    }

    /// Number of mapped symbols.
    #[must_use]
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Check if the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

impl InstrumentResolver for JsonInstrumentTable {
    fn resolve(&self, symbol: &Symbol) -> Option<InstrumentToken> {
        self.map.get(symbol.as_str()).copied()
    }
}
