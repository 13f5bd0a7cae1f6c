// src/config.rs

use std::{env, fmt, ops::RangeInclusive, path::PathBuf, time::Duration};

use crate::{common::error::ResetError, db::connection::RetryPolicy};

const DRIVER_SCHEMES: [&str; 2] = ["postgresql+asyncpg://", "postgresql+psycopg2://"];
const PLAIN_SCHEME: &str = "postgresql://";

const MAX_CONNECT_RETRIES: u32 = 100;
// 10 minutos
const MAX_RETRY_BASE_DELAY_MS: u64 = 600_000;
const MAX_CONNECT_TIMEOUT_SECS: u64 = 3600;

// Configuração do script, lida do ambiente (ou do .env carregado pelo main).
#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub retry: RetryPolicy,
    // Se definido, o snapshot do backup é gravado aqui em JSON.
    pub backup_dir: Option<PathBuf>,
}

impl Config {
    pub fn from_env() -> Result<Self, ResetError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Monta a configuração a partir de uma função de busca de variáveis.
    ///
    /// Prefere `DATABASE_PUBLIC_URL` (endpoint público) a `DATABASE_URL` (rede interna).
    /// Falha antes de qualquer tentativa de rede quando nenhuma das duas existe.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ResetError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let non_empty = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let raw_url = non_empty("DATABASE_PUBLIC_URL")
            .or_else(|| non_empty("DATABASE_URL"))
            .ok_or(ResetError::MissingDatabaseUrl)?;

        let defaults = RetryPolicy::default();
        let max_attempts = parse_setting(
            &non_empty,
            "RESET_CONNECT_RETRIES",
            defaults.max_attempts,
            1..=MAX_CONNECT_RETRIES,
        )?;
        let base_delay_ms = parse_setting(
            &non_empty,
            "RESET_RETRY_BASE_DELAY_MS",
            defaults.base_delay.as_millis() as u64,
            0..=MAX_RETRY_BASE_DELAY_MS,
        )?;
        let timeout_secs = parse_setting(
            &non_empty,
            "RESET_CONNECT_TIMEOUT_SECS",
            defaults.connect_timeout.as_secs(),
            1..=MAX_CONNECT_TIMEOUT_SECS,
        )?;

        Ok(Self {
            database_url: normalize_database_url(raw_url.trim()),
            retry: RetryPolicy {
                max_attempts,
                base_delay: Duration::from_millis(base_delay_ms),
                connect_timeout: Duration::from_secs(timeout_secs),
            },
            backup_dir: non_empty("RESET_BACKUP_DIR").map(PathBuf::from),
        })
    }
}

// Valores fora da faixa viram erro de configuração: o sqlx soma o timeout a um
// Instant e entra em pânico com valores gigantes.
fn parse_setting<F, T>(
    lookup: &F,
    name: &'static str,
    default: T,
    allowed: RangeInclusive<T>,
) -> Result<T, ResetError>
where
    F: Fn(&str) -> Option<String>,
    T: std::str::FromStr + PartialOrd,
{
    let Some(value) = lookup(name) else {
        return Ok(default);
    };
    match value.trim().parse::<T>() {
        Ok(parsed) if allowed.contains(&parsed) => Ok(parsed),
        _ => Err(ResetError::InvalidSetting { name, value }),
    }
}

/// Converte URLs no formato SQLAlchemy (`postgresql+asyncpg://`, `postgresql+psycopg2://`)
/// para o esquema puro que o driver entende.
pub fn normalize_database_url(url: &str) -> String {
    for scheme in DRIVER_SCHEMES {
        if let Some(rest) = url.strip_prefix(scheme) {
            return format!("{PLAIN_SCHEME}{rest}");
        }
    }
    url.to_owned()
}

// Esconde a senha da URL para aparecer em logs.
pub fn redact_database_url(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_owned();
    };
    let Some((credentials, host)) = rest.rsplit_once('@') else {
        return url.to_owned();
    };
    match credentials.split_once(':') {
        Some((user, _)) => format!("{scheme}://{user}:***@{host}"),
        None => url.to_owned(),
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("database_url", &redact_database_url(&self.database_url))
            .field("retry", &self.retry)
            .field("backup_dir", &self.backup_dir)
            .finish()
    }
}
