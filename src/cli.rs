// src/cli.rs

pub mod confirmation;

use std::{future::Future, io};

use clap::{error::ErrorKind, Parser, ValueEnum};

use crate::{common::error::ResetError, services::Workflow};

pub const USAGE: &str = "\
Uso:
  pdv-db-reset complete    # Reset completo
  pdv-db-reset data        # Limpar apenas dados
  pdv-db-reset check       # Verificar conexão";

#[derive(Parser, Debug)]
#[command(name = "pdv-db-reset", version, about = "Reset do banco PostgreSQL online do PDV")]
pub struct Args {
    #[arg(value_enum, ignore_case = true)]
    pub action: Option<Action>,
}

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Complete,
    Data,
    Check,
}

impl Action {
    // Frase mostrada no aviso da confirmação.
    pub fn description(self) -> &'static str {
        match self {
            Action::Complete => "fazer RESET COMPLETO do banco",
            Action::Data => "LIMPAR TODOS OS DADOS do banco",
            Action::Check => "verificar a conexão com o banco",
        }
    }
}

impl From<Action> for Workflow {
    fn from(action: Action) -> Self {
        match action {
            Action::Complete => Workflow::Complete,
            Action::Data => Workflow::DataOnly,
            Action::Check => Workflow::Check,
        }
    }
}

/// O que o main deve fazer com os argumentos recebidos.
#[derive(Debug, PartialEq, Eq)]
pub enum Invocation {
    Run(Action),
    // Argumento ausente ou desconhecido: mostra o uso e sai sem conectar
    Usage,
    // --help / --version já renderizados pelo clap
    Info(String),
}

pub fn parse_invocation<I, T>(args: I) -> Invocation
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    match Args::try_parse_from(args) {
        Ok(Args { action: Some(action) }) => Invocation::Run(action),
        Ok(Args { action: None }) => Invocation::Usage,
        Err(e) if matches!(e.kind(), ErrorKind::DisplayHelp | ErrorKind::DisplayVersion) => {
            Invocation::Info(e.render().to_string())
        }
        Err(_) => Invocation::Usage,
    }
}

/// Pede a confirmação (só em fluxos destrutivos) e só então conecta.
///
/// `Ok(None)` quando o operador cancela: nesse caso `connect` nunca é chamado.
pub async fn open_session<T, G, GFut, C, CFut>(
    workflow: Workflow,
    confirm: G,
    connect: C,
) -> Result<Option<T>, ResetError>
where
    G: FnOnce() -> GFut,
    GFut: Future<Output = io::Result<bool>>,
    C: FnOnce() -> CFut,
    CFut: Future<Output = Result<T, ResetError>>,
{
    if workflow.is_destructive() && !confirm().await? {
        return Ok(None);
    }
    connect().await.map(Some)
}
