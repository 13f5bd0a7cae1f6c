//src/main.rs

use std::{process::ExitCode, sync::Arc};

use tracing_subscriber::EnvFilter;

use pdv_db_reset::{
    cli::{self, confirmation, Invocation},
    config::Config,
    db::{self, PgMaintenanceRepository},
    services::{ResetService, Workflow},
};

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();

    tracing::info!("🗄️  SCRIPT DE RESET DO BANCO POSTGRESQL ONLINE");

    let action = match cli::parse_invocation(std::env::args_os()) {
        Invocation::Run(action) => action,
        Invocation::Usage => {
            println!("{}", cli::USAGE);
            return Ok(ExitCode::SUCCESS);
        }
        Invocation::Info(text) => {
            print!("{text}");
            return Ok(ExitCode::SUCCESS);
        }
    };
    let workflow = Workflow::from(action);

    // .env é opcional: sem ele seguimos com as variáveis do shell
    if dotenvy::dotenv().is_err() {
        tracing::warn!(
            "⚠️  Arquivo .env não encontrado. Continuando com variáveis de ambiente do sistema (se definidas)..."
        );
    }

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("🔥 {}", e);
            return Ok(ExitCode::FAILURE);
        }
    };
    tracing::debug!("Configuração carregada: {:?}", config);

    let session = cli::open_session(
        workflow,
        || confirmation::confirm_from_stdin(action.description()),
        || db::connect(&config.database_url, &config.retry),
    )
    .await;

    let pool = match session {
        Ok(Some(pool)) => pool,
        Ok(None) => return Ok(ExitCode::SUCCESS),
        Err(e) => {
            tracing::error!("🔥 {}", e);
            if let Some(hint) = e.hint() {
                tracing::warn!("{}", hint);
            }
            return Ok(ExitCode::FAILURE);
        }
    };

    let repo = Arc::new(PgMaintenanceRepository::new(pool));
    let service = ResetService::new(repo, config.backup_dir.clone());

    match service.run(workflow).await {
        Ok(_) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            tracing::error!("🔥 Operação interrompida: {}", e);
            Ok(ExitCode::FAILURE)
        }
    }
}
