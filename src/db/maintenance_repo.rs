// src/db/maintenance_repo.rs

use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use serde_json::Value;
use sqlx::PgPool;

use crate::{
    common::{error::ResetError, identifier::SafeIdentifier},
    models::{seed::NewUser, snapshot::JsonRow},
};

// Tudo o que os serviços de manutenção precisam do banco.
// Os serviços só conhecem esta trait; os testes usam um dublê em memória.
#[async_trait]
pub trait MaintenanceRepository: Send + Sync {
    /// Nomes crus de todas as tabelas do schema `public`, ainda não validados.
    async fn list_public_tables(&self) -> Result<Vec<String>, ResetError>;

    /// Todas as linhas da tabela, cada uma como um mapa coluna -> valor.
    async fn fetch_rows_as_json(&self, table: &SafeIdentifier) -> Result<Vec<JsonRow>, ResetError>;

    /// Executa um comando sem parâmetros (DDL, TRUNCATE, DROP).
    async fn execute(&self, sql: &str) -> Result<u64, ResetError>;

    async fn insert_user(&self, user: &NewUser) -> Result<(), ResetError>;

    /// Fecha a conexão. Chamadas repetidas não fazem nada.
    async fn close(&self);
}

#[derive(Clone)]
pub struct PgMaintenanceRepository {
    pool: PgPool,
    closed: std::sync::Arc<AtomicBool>,
}

impl PgMaintenanceRepository {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            closed: Default::default(),
        }
    }
}

#[async_trait]
impl MaintenanceRepository for PgMaintenanceRepository {
    async fn list_public_tables(&self) -> Result<Vec<String>, ResetError> {
        let tables = sqlx::query_scalar::<_, String>(
            r#"
            SELECT tablename
            FROM pg_tables
            WHERE schemaname = 'public'
            ORDER BY tablename
            "#,
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(tables)
    }

    async fn fetch_rows_as_json(&self, table: &SafeIdentifier) -> Result<Vec<JsonRow>, ResetError> {
        // row_to_json cuida de UUID, DECIMAL e TIMESTAMP sem mapear coluna a coluna
        let sql = format!("SELECT row_to_json(t) FROM {} t", table.quoted());
        let values = sqlx::query_scalar::<_, Value>(&sql)
            .fetch_all(&self.pool)
            .await?;

        Ok(values
            .into_iter()
            .filter_map(|v| match v {
                Value::Object(map) => Some(map),
                _ => None,
            })
            .collect())
    }

    async fn execute(&self, sql: &str) -> Result<u64, ResetError> {
        let result = sqlx::query(sql).execute(&self.pool).await?;
        Ok(result.rows_affected())
    }

    async fn insert_user(&self, user: &NewUser) -> Result<(), ResetError> {
        sqlx::query(
            r#"
            INSERT INTO usuarios (
                id, nome, usuario, senha_hash,
                is_admin, ativo,
                nivel, salario,
                pode_abastecer, pode_gerenciar_despesas, pode_fazer_devolucao
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(user.id)
        .bind(&user.nome)
        .bind(&user.usuario)
        .bind(&user.senha_hash)
        .bind(user.is_admin)
        .bind(user.ativo)
        .bind(user.nivel)
        .bind(user.salario)
        .bind(user.pode_abastecer)
        .bind(user.pode_gerenciar_despesas)
        .bind(user.pode_fazer_devolucao)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn close(&self) {
        if self.closed.swap(true, Ordering::SeqCst) {
            return;
        }
        self.pool.close().await;
        tracing::info!("🔌 Conexão fechada");
    }
}
