// src/models/seed.rs

use rust_decimal::Decimal;
use uuid::Uuid;

pub const ADMIN_DISPLAY_NAME: &str = "Neotrix Tecnologias";
pub const ADMIN_LOGIN: &str = "Neotrix";
pub(crate) const ADMIN_PASSWORD: &str = "842384";
pub const ADMIN_LEVEL: i32 = 2;

// Linha a ser inserida em `usuarios`. Só carrega o hash, nunca a senha.
#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub id: Uuid,
    pub nome: String,
    pub usuario: String,
    pub senha_hash: String,
    pub is_admin: bool,
    pub ativo: bool,
    pub nivel: i32,
    pub salario: Decimal,
    pub pode_abastecer: bool,
    pub pode_gerenciar_despesas: bool,
    pub pode_fazer_devolucao: bool,
}

impl NewUser {
    /// Administrador padrão recriado depois de todo reset.
    pub fn default_admin(senha_hash: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            nome: ADMIN_DISPLAY_NAME.to_owned(),
            usuario: ADMIN_LOGIN.to_owned(),
            senha_hash,
            is_admin: true,
            ativo: true,
            nivel: ADMIN_LEVEL,
            salario: Decimal::ZERO,
            pode_abastecer: true,
            pode_gerenciar_despesas: true,
            pode_fazer_devolucao: true,
        }
    }
}
