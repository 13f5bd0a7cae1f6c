// src/services/seed_service.rs

use std::sync::Arc;

use bcrypt::hash;
use uuid::Uuid;

use crate::{
    common::error::ResetError,
    db::MaintenanceRepository,
    models::seed::{NewUser, ADMIN_LOGIN, ADMIN_PASSWORD},
};

#[derive(Clone)]
pub struct SeedService {
    repo: Arc<dyn MaintenanceRepository>,
    cost: u32,
}

impl SeedService {
    pub fn new(repo: Arc<dyn MaintenanceRepository>) -> Self {
        Self::with_cost(repo, bcrypt::DEFAULT_COST)
    }

    pub fn with_cost(repo: Arc<dyn MaintenanceRepository>, cost: u32) -> Self {
        Self { repo, cost }
    }

    /// Cria o usuário admin padrão e devolve o id gerado.
    pub async fn create_admin_user(&self) -> Result<Uuid, ResetError> {
        tracing::info!("👤 Criando usuário admin padrão...");

        // bcrypt é lento de propósito; roda fora do executor async
        let cost = self.cost;
        let senha_hash = tokio::task::spawn_blocking(move || hash(ADMIN_PASSWORD, cost))
            .await??;

        let admin = NewUser::default_admin(senha_hash);
        self.repo.insert_user(&admin).await?;

        tracing::info!("✅ Usuário admin criado (login: {})", ADMIN_LOGIN);
        Ok(admin.id)
    }
}
