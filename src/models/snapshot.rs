// src/models/snapshot.rs

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

pub type JsonRow = serde_json::Map<String, serde_json::Value>;

// Tabelas salvas antes de qualquer limpeza.
pub const BACKUP_TABLES: [&str; 4] = ["usuarios", "produtos", "clientes", "vendas"];

/// Cópia em memória das tabelas de negócio, tirada antes do reset.
///
/// Só vai para disco se o orquestrador pedir (ver `RESET_BACKUP_DIR`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BackupSnapshot {
    pub taken_at: DateTime<Utc>,
    pub tables: BTreeMap<String, Vec<JsonRow>>,
    #[serde(default)]
    pub failed_tables: Vec<String>,
}

impl BackupSnapshot {
    pub fn new(taken_at: DateTime<Utc>) -> Self {
        Self {
            taken_at,
            tables: BTreeMap::new(),
            failed_tables: Vec::new(),
        }
    }

    pub fn table_count(&self) -> usize {
        self.tables.len()
    }

    pub fn row_count(&self, table: &str) -> Option<usize> {
        self.tables.get(table).map(Vec::len)
    }

    // (tabela, quantidade de linhas), em ordem alfabética.
    pub fn row_counts(&self) -> Vec<(&str, usize)> {
        self.tables
            .iter()
            .map(|(name, rows)| (name.as_str(), rows.len()))
            .collect()
    }

    pub fn is_complete(&self) -> bool {
        self.failed_tables.is_empty()
    }

    pub fn file_name(&self) -> String {
        format!("backup_{}.json", self.taken_at.format("%Y%m%d_%H%M%S"))
    }
}
