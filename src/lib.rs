//! Script de manutenção do banco PostgreSQL do PDV: backup, limpeza total
//! (TRUNCATE ou DROP + recriação) e recriação do usuário admin padrão.

pub mod cli;
pub mod common;
pub mod config;
pub mod db;
pub mod models;
pub mod services;
