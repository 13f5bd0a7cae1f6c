// src/common/identifier.rs

use crate::common::error::ResetError;

// Nomes de tabela não podem ir como parâmetro ($1), então só nomes que casam
// com ^[A-Za-z_][A-Za-z0-9_]*$ chegam a ser interpolados no SQL.
pub fn is_safe_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Identificador já validado, pronto para ir entre aspas duplas no SQL.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct SafeIdentifier(String);

impl SafeIdentifier {
    pub fn parse(name: &str) -> Result<Self, ResetError> {
        if is_safe_identifier(name) {
            Ok(Self(name.to_owned()))
        } else {
            Err(ResetError::InvalidIdentifier(name.to_owned()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn quoted(&self) -> String {
        format!("\"{}\"", self.0)
    }
}

impl std::fmt::Display for SafeIdentifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
