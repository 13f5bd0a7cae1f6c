// src/services/schema_service.rs

use std::sync::Arc;

use crate::{common::error::ResetError, db::MaintenanceRepository, models::schema::TABLES};

#[derive(Clone)]
pub struct SchemaService {
    repo: Arc<dyn MaintenanceRepository>,
}

impl SchemaService {
    pub fn new(repo: Arc<dyn MaintenanceRepository>) -> Self {
        Self { repo }
    }

    // Recria as cinco tabelas. Não usa IF NOT EXISTS: rodar sobre um schema
    // existente falha com objeto duplicado e o erro sobe.
    pub async fn create_tables(&self) -> Result<(), ResetError> {
        tracing::info!("🏗️  Recriando tabelas...");

        for table in TABLES {
            if let Err(e) = self.repo.execute(table.create_sql).await {
                tracing::error!("❌ Erro ao criar tabela {}: {}", table.name, e);
                return Err(e);
            }
            tracing::info!("   - Tabela {} criada", table.name);
        }

        tracing::info!("✅ Todas as tabelas recriadas");
        Ok(())
    }
}
