// src/services/reset_service.rs

use std::{
    path::{Path, PathBuf},
    sync::Arc,
};

use crate::{
    common::error::ResetError,
    db::MaintenanceRepository,
    models::snapshot::BackupSnapshot,
    services::{
        backup_service::BackupService,
        eraser_service::{EraseReport, EraserService},
        schema_service::SchemaService,
        seed_service::SeedService,
    },
};

const SEPARATOR: &str = "============================================================";

/// Fluxos disponíveis para o operador.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Workflow {
    /// Só verifica a conexão.
    Check,
    /// Reset completo: backup, truncate e admin.
    Complete,
    /// Limpeza de dados: hoje executa os mesmos passos do `Complete`.
    DataOnly,
}

impl Workflow {
    pub fn is_destructive(self) -> bool {
        !matches!(self, Workflow::Check)
    }
}

// Resultado de um fluxo, para o resumo final.
#[derive(Debug, Default)]
pub struct ResetSummary {
    pub backup: Option<BackupSnapshot>,
    pub backup_path: Option<PathBuf>,
    pub erase: Option<EraseReport>,
    pub admin_created: bool,
}

#[derive(Clone)]
pub struct ResetService {
    repo: Arc<dyn MaintenanceRepository>,
    backup: BackupService,
    eraser: EraserService,
    schema: SchemaService,
    seed: SeedService,
    backup_dir: Option<PathBuf>,
}

impl ResetService {
    pub fn new(repo: Arc<dyn MaintenanceRepository>, backup_dir: Option<PathBuf>) -> Self {
        let seed = SeedService::new(repo.clone());
        Self::with_seed(repo, backup_dir, seed)
    }

    pub fn with_seed(
        repo: Arc<dyn MaintenanceRepository>,
        backup_dir: Option<PathBuf>,
        seed: SeedService,
    ) -> Self {
        Self {
            backup: BackupService::new(repo.clone()),
            eraser: EraserService::new(repo.clone()),
            schema: SchemaService::new(repo.clone()),
            seed,
            repo,
            backup_dir,
        }
    }

    /// Executa o fluxo e fecha a conexão em qualquer saída.
    pub async fn run(&self, workflow: Workflow) -> Result<ResetSummary, ResetError> {
        let result = match workflow {
            Workflow::Check => {
                tracing::info!("✅ Conexão com o banco online OK!");
                Ok(ResetSummary::default())
            }
            Workflow::Complete => self.reset_complete().await,
            Workflow::DataOnly => self.reset_data_only().await,
        };

        self.repo.close().await;
        result
    }

    pub async fn reset_complete(&self) -> Result<ResetSummary, ResetError> {
        tracing::warn!("🚨 INICIANDO RESET COMPLETO DO BANCO DE DADOS ONLINE");
        tracing::info!("{}", SEPARATOR);

        let summary = self.truncate_and_seed().await.inspect_err(|e| {
            tracing::error!("❌ ERRO NO RESET: {}", e);
        })?;

        tracing::info!("{}", SEPARATOR);
        tracing::info!("✅ RESET COMPLETO CONCLUÍDO COM SUCESSO!");
        self.log_summary(&summary);
        Ok(summary)
    }

    // Mantido como comando separado para o operador, mesmo fazendo o mesmo que reset_complete.
    pub async fn reset_data_only(&self) -> Result<ResetSummary, ResetError> {
        tracing::warn!("🧹 INICIANDO LIMPEZA DOS DADOS (manter estrutura)");
        tracing::info!("{}", SEPARATOR);

        let summary = self.truncate_and_seed().await.inspect_err(|e| {
            tracing::error!("❌ ERRO NA LIMPEZA: {}", e);
        })?;

        tracing::info!("{}", SEPARATOR);
        tracing::info!("✅ LIMPEZA DE DADOS CONCLUÍDA!");
        tracing::info!("   - Estrutura das tabelas mantida");
        self.log_summary(&summary);
        Ok(summary)
    }

    /// Caminho alternativo (sem comando na CLI): remove todas as tabelas,
    /// recria o schema e o admin. Não fecha a conexão.
    pub async fn rebuild_schema(&self) -> Result<ResetSummary, ResetError> {
        tracing::warn!("🚨 RECRIANDO O SCHEMA DO ZERO");

        let (backup, backup_path) = self.take_backup().await;
        let erase = self.eraser.drop_all().await?;
        self.schema.create_tables().await?;
        let admin_created = self.seed_admin().await;

        Ok(ResetSummary {
            backup: Some(backup),
            backup_path,
            erase: Some(erase),
            admin_created,
        })
    }

    async fn truncate_and_seed(&self) -> Result<ResetSummary, ResetError> {
        let (backup, backup_path) = self.take_backup().await;
        let erase = match self.eraser.truncate_all().await {
            Ok(report) => report,
            Err(e) => {
                log_backup_left_behind(&backup, backup_path.as_deref());
                return Err(e);
            }
        };
        let admin_created = self.seed_admin().await;

        Ok(ResetSummary {
            backup: Some(backup),
            backup_path,
            erase: Some(erase),
            admin_created,
        })
    }

    async fn take_backup(&self) -> (BackupSnapshot, Option<PathBuf>) {
        let snapshot = self.backup.collect().await;

        let path = match &self.backup_dir {
            Some(dir) => match BackupService::persist(&snapshot, dir).await {
                Ok(path) => Some(path),
                Err(e) => {
                    tracing::warn!("⚠️  Não foi possível gravar o backup: {}", e);
                    None
                }
            },
            None => {
                tracing::warn!("⚠️  Backup mantido só em memória (defina RESET_BACKUP_DIR para gravar)");
                None
            }
        };

        (snapshot, path)
    }

    // Falha no seed não aborta o fluxo; o operador pode rodar de novo.
    async fn seed_admin(&self) -> bool {
        match self.seed.create_admin_user().await {
            Ok(_) => true,
            Err(e) => {
                tracing::error!("❌ Erro ao criar usuário admin: {}", e);
                false
            }
        }
    }

    fn log_summary(&self, summary: &ResetSummary) {
        tracing::info!("📊 Resumo:");
        if let Some(backup) = &summary.backup {
            tracing::info!("   - Backup realizado: {} tabelas", backup.table_count());
            if !backup.is_complete() {
                tracing::warn!(
                    "   ⚠️  Backup parcial, falharam: {}",
                    backup.failed_tables.join(", ")
                );
            }
        }
        if let Some(erase) = &summary.erase {
            tracing::info!("   - {} tabela(s) truncada(s)", erase.processed.len());
        }
        if summary.admin_created {
            tracing::info!("   - Usuário admin foi recriado automaticamente");
        } else {
            tracing::warn!("   - Usuário admin NÃO foi criado; rode o seed manualmente");
        }
    }
}

// O truncate falhou depois do backup: o operador precisa saber o que foi salvo.
fn log_backup_left_behind(backup: &BackupSnapshot, path: Option<&Path>) {
    match path {
        Some(path) => tracing::warn!("💾 Backup anterior à falha está em {}", path.display()),
        None => tracing::warn!("⚠️  Backup anterior à falha NÃO foi gravado em disco"),
    }
    for (table, rows) in backup.row_counts() {
        tracing::warn!("   - {}: {} registros no snapshot", table, rows);
    }
    if !backup.is_complete() {
        tracing::warn!("   - sem backup: {}", backup.failed_tables.join(", "));
    }
}
