// src/cli/confirmation.rs

use std::io::{self, BufRead, Write};

pub const FIRST_TOKEN: &str = "CONFIRMO";
pub const SECOND_TOKEN: &str = "SIM";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConfirmationState {
    Unconfirmed,
    FirstConfirmed,
    Confirmed,
    Aborted,
}

/// Dupla confirmação antes de qualquer fluxo destrutivo.
///
/// As palavras são fixas e comparadas com diferença de maiúsculas; qualquer
/// outra entrada leva direto a `Aborted`.
#[derive(Debug)]
pub struct ConfirmationGate {
    state: ConfirmationState,
}

impl Default for ConfirmationGate {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfirmationGate {
    pub fn new() -> Self {
        Self {
            state: ConfirmationState::Unconfirmed,
        }
    }

    pub fn state(&self) -> ConfirmationState {
        self.state
    }

    // Avança a máquina de estados com uma entrada do operador.
    pub fn submit(&mut self, input: &str) -> ConfirmationState {
        let input = input.trim();
        self.state = match self.state {
            ConfirmationState::Unconfirmed if input == FIRST_TOKEN => ConfirmationState::FirstConfirmed,
            ConfirmationState::FirstConfirmed if input == SECOND_TOKEN => ConfirmationState::Confirmed,
            ConfirmationState::Unconfirmed | ConfirmationState::FirstConfirmed => ConfirmationState::Aborted,
            done => done,
        };
        self.state
    }

    fn prompt(&self) -> Option<&'static str> {
        match self.state {
            ConfirmationState::Unconfirmed => Some("\nDigite 'CONFIRMO' para continuar: "),
            ConfirmationState::FirstConfirmed => Some("Digite 'SIM' para confirmar novamente: "),
            _ => None,
        }
    }

    /// Conduz a conversa com o operador usando a entrada e a saída dadas.
    /// EOF conta como resposta errada.
    pub fn run<R, W>(mut self, action_name: &str, mut input: R, mut output: W) -> io::Result<bool>
    where
        R: BufRead,
        W: Write,
    {
        writeln!(output, "\n⚠️  ATENÇÃO: Você está prestes a {action_name}")?;
        writeln!(output, "🚨 ESTA AÇÃO IRÁ APAGAR DADOS DO BANCO ONLINE!")?;

        while let Some(prompt) = self.prompt() {
            write!(output, "{prompt}")?;
            output.flush()?;

            let mut line = String::new();
            if input.read_line(&mut line)? == 0 {
                self.state = ConfirmationState::Aborted;
                break;
            }
            self.submit(&line);
        }

        if self.state() == ConfirmationState::Confirmed {
            writeln!(output, "✅ Confirmação recebida. Iniciando operação...")?;
            Ok(true)
        } else {
            writeln!(output, "❌ Operação cancelada")?;
            Ok(false)
        }
    }
}

/// Roda o portão no terminal, fora das threads do runtime.
pub async fn confirm_from_stdin(action_name: &'static str) -> io::Result<bool> {
    tokio::task::spawn_blocking(move || {
        ConfirmationGate::new().run(action_name, io::stdin().lock(), io::stdout())
    })
    .await
    .map_err(io::Error::other)?
}
