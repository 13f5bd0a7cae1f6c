#![allow(dead_code)]

use std::{
    collections::{BTreeMap, BTreeSet, HashSet},
    sync::{
        atomic::{AtomicUsize, Ordering},
        Arc, Mutex,
    },
};

use async_trait::async_trait;
use pdv_db_reset::{
    common::{error::ResetError, identifier::SafeIdentifier},
    db::MaintenanceRepository,
    models::{seed::NewUser, JsonRow},
    services::{seed_service::SeedService, ResetService},
};
use serde_json::json;

// Banco falso em memória: guarda tabelas, linhas e tudo o que foi executado.
#[derive(Default)]
pub struct FakeDatabase {
    pub tables: Mutex<BTreeSet<String>>,
    pub rows: Mutex<BTreeMap<String, Vec<JsonRow>>>,
    pub users: Mutex<Vec<NewUser>>,
    pub statements: Mutex<Vec<String>>,
    pub close_calls: AtomicUsize,

    pub fail_catalog: bool,
    pub fail_fetch: HashSet<String>,
    pub fail_insert: bool,
    pub fail_statements_containing: Option<String>,
}

fn db_error(msg: impl Into<String>) -> ResetError {
    ResetError::Database(sqlx::Error::Protocol(msg.into()))
}

fn quoted_name(sql: &str, prefix: &str) -> Option<String> {
    let rest = sql.trim().strip_prefix(prefix)?;
    let rest = rest.strip_prefix('"')?;
    rest.split('"').next().map(str::to_owned)
}

impl FakeDatabase {
    /// Banco com o schema do PDV, algumas linhas e as tabelas "extras" pedidas.
    pub fn with_pos_schema(extra_tables: &[&str]) -> Self {
        let db = Self::default();
        {
            let mut tables = db.tables.lock().unwrap();
            for name in ["usuarios", "produtos", "clientes", "vendas", "itens_venda"] {
                tables.insert(name.to_owned());
            }
            for name in extra_tables {
                tables.insert((*name).to_owned());
            }

            let mut rows = db.rows.lock().unwrap();
            rows.insert("usuarios".into(), vec![row(json!({"usuario": "caixa1", "is_admin": false}))]);
            rows.insert(
                "produtos".into(),
                vec![
                    row(json!({"codigo": "789001", "preco_venda": "12.50"})),
                    row(json!({"codigo": "789002", "preco_venda": "3.00"})),
                ],
            );
            rows.insert("vendas".into(), vec![row(json!({"total": "15.50"}))]);
        }
        db
    }

    pub fn statements(&self) -> Vec<String> {
        self.statements.lock().unwrap().clone()
    }

    pub fn table_names(&self) -> BTreeSet<String> {
        self.tables.lock().unwrap().clone()
    }

    pub fn users(&self) -> Vec<NewUser> {
        self.users.lock().unwrap().clone()
    }

    pub fn close_calls(&self) -> usize {
        self.close_calls.load(Ordering::SeqCst)
    }

    pub fn write_statements(&self) -> Vec<String> {
        self.statements()
            .into_iter()
            .filter(|s| {
                let s = s.trim_start().to_ascii_uppercase();
                ["INSERT", "TRUNCATE", "DROP", "CREATE", "DELETE", "UPDATE"]
                    .iter()
                    .any(|kw| s.starts_with(kw))
            })
            .collect()
    }
}

pub fn row(value: serde_json::Value) -> JsonRow {
    value.as_object().cloned().unwrap_or_default()
}

#[async_trait]
impl MaintenanceRepository for FakeDatabase {
    async fn list_public_tables(&self) -> Result<Vec<String>, ResetError> {
        if self.fail_catalog {
            return Err(db_error("catálogo indisponível"));
        }
        Ok(self.tables.lock().unwrap().iter().cloned().collect())
    }

    async fn fetch_rows_as_json(&self, table: &SafeIdentifier) -> Result<Vec<JsonRow>, ResetError> {
        let name = table.as_str();
        if self.fail_fetch.contains(name) {
            return Err(db_error(format!("relation \"{name}\" does not exist")));
        }
        if !self.tables.lock().unwrap().contains(name) {
            return Err(db_error(format!("relation \"{name}\" does not exist")));
        }
        Ok(self.rows.lock().unwrap().get(name).cloned().unwrap_or_default())
    }

    async fn execute(&self, sql: &str) -> Result<u64, ResetError> {
        self.statements.lock().unwrap().push(sql.to_owned());

        if let Some(needle) = &self.fail_statements_containing {
            if sql.contains(needle.as_str()) {
                return Err(db_error(format!("falha simulada em: {needle}")));
            }
        }

        let mut tables = self.tables.lock().unwrap();
        let trimmed = sql.trim();

        if let Some(name) = quoted_name(trimmed, "TRUNCATE TABLE ") {
            if !tables.contains(&name) {
                return Err(db_error(format!("relation \"{name}\" does not exist")));
            }
            let removed = self.rows.lock().unwrap().remove(&name).map_or(0, |r| r.len());
            if name == "usuarios" {
                self.users.lock().unwrap().clear();
            }
            return Ok(removed as u64);
        }

        if let Some(name) = quoted_name(trimmed, "DROP TABLE IF EXISTS ") {
            tables.remove(&name);
            self.rows.lock().unwrap().remove(&name);
            if name == "usuarios" {
                self.users.lock().unwrap().clear();
            }
            return Ok(0);
        }

        if let Some(rest) = trimmed.strip_prefix("CREATE TABLE ") {
            let name = rest.split_whitespace().next().unwrap_or_default().to_owned();
            if !tables.insert(name.clone()) {
                return Err(db_error(format!("relation \"{name}\" already exists")));
            }
            return Ok(0);
        }

        Ok(0)
    }

    async fn insert_user(&self, user: &NewUser) -> Result<(), ResetError> {
        self.statements
            .lock()
            .unwrap()
            .push("INSERT INTO usuarios".to_owned());

        if self.fail_insert {
            return Err(db_error("falha simulada no insert"));
        }
        if !self.tables.lock().unwrap().contains("usuarios") {
            return Err(db_error("relation \"usuarios\" does not exist"));
        }

        let mut users = self.users.lock().unwrap();
        if users.iter().any(|u| u.usuario == user.usuario) {
            return Err(db_error("duplicate key value violates unique constraint"));
        }
        users.push(user.clone());
        Ok(())
    }

    async fn close(&self) {
        self.close_calls.fetch_add(1, Ordering::SeqCst);
    }
}

// Custo mínimo do bcrypt para os testes não ficarem lentos.
pub const TEST_BCRYPT_COST: u32 = 4;

pub fn service_for(db: &Arc<FakeDatabase>) -> ResetService {
    service_with_backup_dir(db, None)
}

pub fn service_with_backup_dir(
    db: &Arc<FakeDatabase>,
    backup_dir: Option<std::path::PathBuf>,
) -> ResetService {
    let repo: Arc<dyn MaintenanceRepository> = db.clone();
    let seed = SeedService::with_cost(repo.clone(), TEST_BCRYPT_COST);
    ResetService::with_seed(repo, backup_dir, seed)
}
