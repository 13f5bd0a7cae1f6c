// src/db/connection.rs

use std::{future::Future, time::Duration};

use sqlx::{postgres::PgPoolOptions, PgPool};

use crate::common::error::{connection_hint, ResetError};

/// Quantas tentativas, quanto esperar entre elas e o timeout de cada conexão.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_attempts: u32,
    pub base_delay: Duration,
    pub connect_timeout: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(1500),
            connect_timeout: Duration::from_secs(10),
        }
    }
}

impl RetryPolicy {
    // Backoff linear: base_delay × número da tentativa que falhou.
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(attempt)
    }
}

/// Executa `attempt_fn` até dar certo ou esgotar `policy.max_attempts`.
///
/// Cada tentativa recebe o número dela (começando em 1) e é limitada por
/// `policy.connect_timeout`. Não há espera depois da última falha.
pub async fn connect_with_retry<T, F, Fut>(
    policy: &RetryPolicy,
    mut attempt_fn: F,
) -> Result<T, ResetError>
where
    F: FnMut(u32) -> Fut,
    Fut: Future<Output = Result<T, sqlx::Error>>,
{
    let max_attempts = policy.max_attempts.max(1);
    let mut attempt = 1;

    loop {
        let outcome = match tokio::time::timeout(policy.connect_timeout, attempt_fn(attempt)).await {
            Ok(result) => result,
            Err(_) => Err(sqlx::Error::PoolTimedOut),
        };

        match outcome {
            Ok(value) => return Ok(value),
            Err(e) => {
                tracing::error!(
                    "❌ Erro ao conectar (tentativa {}/{}): {}",
                    attempt,
                    max_attempts,
                    e
                );
                if let Some(hint) = connection_hint(&e) {
                    tracing::warn!("   {}", hint);
                }

                if attempt >= max_attempts {
                    tracing::error!("❌ Falha ao conectar após múltiplas tentativas.");
                    return Err(ResetError::ConnectionFailed {
                        attempts: attempt,
                        source: e,
                    });
                }

                let delay = policy.delay_after(attempt);
                tracing::info!(
                    "   ⏳ Aguardando {:.1}s para nova tentativa...",
                    delay.as_secs_f64()
                );
                tokio::time::sleep(delay).await;
                attempt += 1;
            }
        }
    }
}

// Pool com uma única conexão: todos os comandos rodam em sequência.
pub async fn connect(database_url: &str, policy: &RetryPolicy) -> Result<PgPool, ResetError> {
    let pool = connect_with_retry(policy, |_| {
        PgPoolOptions::new()
            .max_connections(1)
            .acquire_timeout(policy.connect_timeout)
            .connect(database_url)
    })
    .await?;

    tracing::info!("✅ Conectado ao banco PostgreSQL online");
    Ok(pool)
}
