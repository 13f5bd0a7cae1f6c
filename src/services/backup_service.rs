// src/services/backup_service.rs

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use chrono::Utc;

use crate::{
    common::{error::ResetError, identifier::SafeIdentifier},
    db::MaintenanceRepository,
    models::snapshot::{BackupSnapshot, BACKUP_TABLES},
};

#[derive(Clone)]
pub struct BackupService {
    repo: Arc<dyn MaintenanceRepository>,
}

impl BackupService {
    pub fn new(repo: Arc<dyn MaintenanceRepository>) -> Self {
        Self { repo }
    }

    /// Lê todas as linhas das tabelas de negócio.
    ///
    /// O backup é "melhor esforço": uma tabela que falha é registrada em
    /// `failed_tables` e as demais continuam.
    pub async fn collect(&self) -> BackupSnapshot {
        tracing::info!("📦 Fazendo backup dos dados...");
        let mut snapshot = BackupSnapshot::new(Utc::now());

        for name in BACKUP_TABLES {
            let rows = match SafeIdentifier::parse(name) {
                Ok(table) => self.repo.fetch_rows_as_json(&table).await,
                Err(e) => Err(e),
            };

            match rows {
                Ok(rows) => {
                    tracing::info!("   - {}: {} registros salvos", name, rows.len());
                    snapshot.tables.insert(name.to_owned(), rows);
                }
                Err(e) => {
                    tracing::warn!("⚠️  Erro no backup de {}: {}", name, e);
                    snapshot.failed_tables.push(name.to_owned());
                }
            }
        }

        snapshot
    }

    // Grava o snapshot como JSON em `dir` e devolve o caminho do arquivo.
    pub async fn persist(snapshot: &BackupSnapshot, dir: &Path) -> Result<PathBuf, ResetError> {
        tokio::fs::create_dir_all(dir).await?;
        let path = dir.join(snapshot.file_name());
        let body = serde_json::to_vec_pretty(snapshot)?;
        tokio::fs::write(&path, body).await?;
        tracing::info!("💾 Backup gravado em {}", path.display());
        Ok(path)
    }
}
