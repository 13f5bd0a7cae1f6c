// src/common/error.rs

use thiserror::Error;

// Erros do script de manutenção, com mensagens curtas para o operador.
#[derive(Debug, Error)]
pub enum ResetError {
    #[error("Nenhuma variável de conexão encontrada. Defina DATABASE_PUBLIC_URL ou DATABASE_URL.")]
    MissingDatabaseUrl,

    #[error("Valor inválido para {name}: '{value}'")]
    InvalidSetting { name: &'static str, value: String },

    #[error("Falha ao conectar após {attempts} tentativa(s): {source}")]
    ConnectionFailed {
        attempts: u32,
        #[source]
        source: sqlx::Error,
    },

    #[error("Nome de tabela inválido: '{0}'")]
    InvalidIdentifier(String),

    #[error("Erro de banco de dados: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Erro de Bcrypt: {0}")]
    BcryptError(#[from] bcrypt::BcryptError),

    #[error("Falha na task de hashing: {0}")]
    HashingTask(#[from] tokio::task::JoinError),

    #[error("Erro de E/S: {0}")]
    Io(#[from] std::io::Error),

    #[error("Erro de serialização JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl ResetError {
    /// Erros de configuração nunca valem uma nova tentativa.
    pub fn is_fatal_config(&self) -> bool {
        matches!(
            self,
            ResetError::MissingDatabaseUrl | ResetError::InvalidSetting { .. }
        )
    }

    /// Dica para o operador quando a falha parece ser de rede ou TLS.
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            ResetError::ConnectionFailed { source, .. } | ResetError::Database(source) => {
                connection_hint(source)
            }
            _ => None,
        }
    }
}

/// Classifica um erro do driver em instabilidade de TLS ou de rede.
pub fn connection_hint(err: &sqlx::Error) -> Option<&'static str> {
    let msg = err.to_string();
    match err {
        sqlx::Error::Tls(_) => Some(TLS_HINT),
        _ if msg.contains("handshake") => Some(TLS_HINT),
        sqlx::Error::Io(_) | sqlx::Error::PoolTimedOut => Some(NETWORK_HINT),
        _ if msg.contains("WinError 64") => Some(NETWORK_HINT),
        _ => None,
    }
}

const TLS_HINT: &str =
    "💡 Dica: Timeout de TLS. Rede lenta/instável ou bloqueio de firewall. Tente novamente, verifique internet/antivírus/firewall.";

const NETWORK_HINT: &str =
    "💡 Dica: instabilidade de rede/VPN/Firewall. Verifique sua conexão, VPN/Proxy e tente novamente.";
