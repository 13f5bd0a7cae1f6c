// src/services/eraser_service.rs

use std::sync::Arc;

use crate::{
    common::{error::ResetError, identifier::SafeIdentifier},
    db::MaintenanceRepository,
    models::schema::MIGRATION_TABLE,
};

/// O que aconteceu com cada tabela do catálogo.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EraseReport {
    pub processed: Vec<String>,
    // Nomes que não passaram na validação de identificador
    pub skipped: Vec<String>,
    // Só preenchido pelo drop_all; no truncate qualquer falha aborta
    pub failed: Vec<String>,
}

#[derive(Clone)]
pub struct EraserService {
    repo: Arc<dyn MaintenanceRepository>,
}

impl EraserService {
    pub fn new(repo: Arc<dyn MaintenanceRepository>) -> Self {
        Self { repo }
    }

    // Catálogo do schema public, separando nomes seguros dos que não podem ir para o SQL.
    async fn catalog(&self, exclude: &[&str]) -> Result<(Vec<SafeIdentifier>, Vec<String>), ResetError> {
        let mut safe = Vec::new();
        let mut skipped = Vec::new();

        for name in self.repo.list_public_tables().await? {
            if exclude.contains(&name.as_str()) {
                continue;
            }
            match SafeIdentifier::parse(&name) {
                Ok(ident) => safe.push(ident),
                Err(_) => {
                    tracing::warn!("⚠️  Tabela ignorada (nome inválido): {:?}", name);
                    skipped.push(name);
                }
            }
        }

        Ok((safe, skipped))
    }

    /// Apaga TODOS os dados preservando a estrutura.
    ///
    /// `CASCADE` torna a ordem irrelevante. Qualquer falha é devolvida ao chamador:
    /// um truncate pela metade deixa o banco num estado que ele precisa conhecer.
    pub async fn truncate_all(&self) -> Result<EraseReport, ResetError> {
        tracing::info!("🧹 Limpando TODOS os dados (TRUNCATE) preservando a estrutura...");

        let (tables, skipped) = self.catalog(&[MIGRATION_TABLE]).await.inspect_err(|e| {
            tracing::error!("❌ Erro ao limpar dados: {}", e);
        })?;

        let mut report = EraseReport {
            skipped,
            ..Default::default()
        };
        if tables.is_empty() {
            tracing::info!("✅ Nenhuma tabela encontrada para limpar");
            return Ok(report);
        }

        for table in tables {
            let sql = format!("TRUNCATE TABLE {} RESTART IDENTITY CASCADE", table.quoted());
            if let Err(e) = self.repo.execute(&sql).await {
                tracing::error!("❌ Erro ao limpar dados ({}): {}", table, e);
                return Err(e);
            }
            tracing::info!("   - {}: OK", table);
            report.processed.push(table.as_str().to_owned());
        }

        tracing::info!("✅ Todos os dados removidos (estrutura preservada)");
        Ok(report)
    }

    /// Remove todas as tabelas do schema public.
    ///
    /// Falhas por tabela são registradas e o laço segue; só a leitura do
    /// catálogo aborta.
    pub async fn drop_all(&self) -> Result<EraseReport, ResetError> {
        tracing::info!("🗑️  Removendo todas as tabelas...");

        let (tables, skipped) = self.catalog(&[]).await.inspect_err(|e| {
            tracing::error!("❌ Erro ao remover tabelas: {}", e);
        })?;

        let mut report = EraseReport {
            skipped,
            ..Default::default()
        };
        if tables.is_empty() {
            tracing::info!("✅ Nenhuma tabela encontrada para remover");
            return Ok(report);
        }

        for table in tables {
            let sql = format!("DROP TABLE IF EXISTS {} CASCADE", table.quoted());
            match self.repo.execute(&sql).await {
                Ok(_) => {
                    tracing::info!("   - {}: removida", table);
                    report.processed.push(table.as_str().to_owned());
                }
                Err(e) => {
                    tracing::warn!("   ⚠️  Falha ao remover {}: {}", table, e);
                    report.failed.push(table.as_str().to_owned());
                }
            }
        }

        tracing::info!("✅ {} tabela(s) removida(s)", report.processed.len());
        Ok(report)
    }
}
