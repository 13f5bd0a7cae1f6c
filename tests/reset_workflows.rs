mod common;

use std::{collections::HashSet, sync::Arc};

use pdv_db_reset::{
    common::{error::ResetError, identifier::is_safe_identifier},
    models::{
        seed::{ADMIN_LEVEL, ADMIN_LOGIN},
        BackupSnapshot,
    },
    services::Workflow,
};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;

use common::{service_for, service_with_backup_dir, FakeDatabase};

const SEED_PASSWORD: &str = "842384";

fn truncated_tables(db: &FakeDatabase) -> Vec<String> {
    db.statements()
        .iter()
        .filter(|s| s.starts_with("TRUNCATE TABLE"))
        .map(|s| s.split('"').nth(1).unwrap_or_default().to_owned())
        .collect()
}

#[tokio::test]
async fn check_never_writes() {
    let db = Arc::new(FakeDatabase::with_pos_schema(&[]));

    let summary = service_for(&db).run(Workflow::Check).await.unwrap();

    assert!(db.write_statements().is_empty());
    assert!(summary.backup.is_none());
    assert!(!summary.admin_created);
    assert_eq!(db.close_calls(), 1);
}

#[tokio::test]
async fn complete_truncates_every_table_and_seeds_one_admin() {
    let db = Arc::new(FakeDatabase::with_pos_schema(&["alembic_version", "caixa_sessoes"]));

    let summary = service_for(&db).run(Workflow::Complete).await.unwrap();

    let mut truncated = truncated_tables(&db);
    truncated.sort();
    assert_eq!(
        truncated,
        vec!["caixa_sessoes", "clientes", "itens_venda", "produtos", "usuarios", "vendas"]
    );
    assert!(truncated.iter().all(|t| is_safe_identifier(t)));
    for sql in db.statements().iter().filter(|s| s.starts_with("TRUNCATE")) {
        assert!(sql.ends_with("RESTART IDENTITY CASCADE"), "{sql}");
    }

    let users = db.users();
    assert_eq!(users.len(), 1);
    let admin = &users[0];
    assert_eq!(admin.usuario, ADMIN_LOGIN);
    assert!(admin.is_admin);
    assert!(admin.ativo);
    assert_eq!(admin.nivel, ADMIN_LEVEL);
    assert_eq!(admin.salario, Decimal::ZERO);
    assert!(admin.pode_abastecer && admin.pode_gerenciar_despesas && admin.pode_fazer_devolucao);
    assert_ne!(admin.senha_hash, SEED_PASSWORD);
    assert!(bcrypt::verify(SEED_PASSWORD, &admin.senha_hash).unwrap());

    assert!(summary.admin_created);
    assert_eq!(summary.erase.unwrap().processed.len(), 6);
    assert_eq!(db.close_calls(), 1);
}

#[tokio::test]
async fn backup_is_taken_before_truncating() {
    let db = Arc::new(FakeDatabase::with_pos_schema(&[]));

    let summary = service_for(&db).run(Workflow::Complete).await.unwrap();

    let backup = summary.backup.unwrap();
    assert_eq!(backup.table_count(), 4);
    assert_eq!(backup.row_count("usuarios"), Some(1));
    assert_eq!(backup.row_count("produtos"), Some(2));
    assert_eq!(backup.row_count("clientes"), Some(0));
    assert_eq!(backup.row_count("vendas"), Some(1));
    assert!(backup.is_complete());
    assert_eq!(backup.tables["produtos"][0]["codigo"], "789001");
    assert!(summary.backup_path.is_none());
}

#[tokio::test]
async fn data_workflow_runs_the_same_statements_as_complete() {
    let complete_db = Arc::new(FakeDatabase::with_pos_schema(&["alembic_version"]));
    let data_db = Arc::new(FakeDatabase::with_pos_schema(&["alembic_version"]));

    service_for(&complete_db).run(Workflow::Complete).await.unwrap();
    service_for(&data_db).run(Workflow::DataOnly).await.unwrap();

    assert_eq!(complete_db.statements(), data_db.statements());
    assert_eq!(data_db.users().len(), 1);
    assert_eq!(data_db.close_calls(), 1);
}

#[tokio::test]
async fn unsafe_catalog_names_are_never_interpolated() {
    let evil = "vendas\"; DROP TABLE usuarios; --";
    let db = Arc::new(FakeDatabase::with_pos_schema(&[evil, "com espaco", "1abc"]));

    let summary = service_for(&db).run(Workflow::DataOnly).await.unwrap();

    let erase = summary.erase.unwrap();
    let skipped: HashSet<_> = erase.skipped.iter().map(String::as_str).collect();
    assert_eq!(skipped, HashSet::from([evil, "com espaco", "1abc"]));
    assert_eq!(truncated_tables(&db).len(), 5);
    for sql in db.statements() {
        assert!(!sql.contains("com espaco"), "{sql}");
        assert!(!sql.contains("DROP TABLE usuarios"), "{sql}");
    }
}

#[tokio::test]
async fn migration_table_is_kept() {
    let db = Arc::new(FakeDatabase::with_pos_schema(&["alembic_version"]));

    service_for(&db).run(Workflow::Complete).await.unwrap();

    assert!(!truncated_tables(&db).contains(&"alembic_version".to_owned()));
}

#[tokio::test]
async fn failed_backup_table_does_not_stop_the_reset() {
    let mut fake = FakeDatabase::with_pos_schema(&[]);
    fake.fail_fetch.insert("clientes".into());
    let db = Arc::new(fake);

    let summary = service_for(&db).run(Workflow::Complete).await.unwrap();

    let backup = summary.backup.unwrap();
    assert_eq!(backup.failed_tables, vec!["clientes".to_owned()]);
    assert_eq!(backup.table_count(), 3);
    assert_eq!(truncated_tables(&db).len(), 5);
    assert_eq!(db.users().len(), 1);
}

#[tokio::test]
async fn truncate_failure_aborts_before_seeding() {
    let mut fake = FakeDatabase::with_pos_schema(&[]);
    fake.fail_statements_containing = Some("\"produtos\"".into());
    let db = Arc::new(fake);

    let err = service_for(&db).run(Workflow::Complete).await.unwrap_err();

    assert!(matches!(err, ResetError::Database(_)));
    assert!(db.users().is_empty());
    assert!(!db.statements().iter().any(|s| s.starts_with("INSERT")));
    assert_eq!(db.close_calls(), 1);
}

#[tokio::test]
async fn catalog_failure_is_fatal_and_still_closes() {
    let fake = FakeDatabase {
        fail_catalog: true,
        ..FakeDatabase::with_pos_schema(&[])
    };
    let db = Arc::new(fake);

    let result = service_for(&db).run(Workflow::DataOnly).await;

    assert!(result.is_err());
    assert!(db.write_statements().is_empty());
    assert_eq!(db.close_calls(), 1);
}

#[tokio::test]
async fn seed_failure_is_reported_but_not_fatal() {
    let fake = FakeDatabase {
        fail_insert: true,
        ..FakeDatabase::with_pos_schema(&[])
    };
    let db = Arc::new(fake);

    let summary = service_for(&db).run(Workflow::Complete).await.unwrap();

    assert!(!summary.admin_created);
    assert!(db.users().is_empty());
    assert_eq!(truncated_tables(&db).len(), 5);
    assert_eq!(db.close_calls(), 1);
}

#[tokio::test]
async fn empty_catalog_is_not_an_error() {
    let db = Arc::new(FakeDatabase::default());

    let summary = service_for(&db).run(Workflow::Complete).await.unwrap();

    let erase = summary.erase.unwrap();
    assert!(erase.processed.is_empty());
    // sem tabela usuarios o seed falha, mas o fluxo termina
    assert!(!summary.admin_created);
    assert_eq!(summary.backup.unwrap().failed_tables.len(), 4);
    assert_eq!(db.close_calls(), 1);
}

#[tokio::test]
async fn repeated_resets_leave_exactly_one_admin() {
    let db = Arc::new(FakeDatabase::with_pos_schema(&[]));

    service_for(&db).run(Workflow::Complete).await.unwrap();
    service_for(&db).run(Workflow::DataOnly).await.unwrap();

    let users = db.users();
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].usuario, ADMIN_LOGIN);
}

#[tokio::test]
async fn backup_is_persisted_when_a_directory_is_configured() {
    let dir = std::env::temp_dir().join(format!("pdv-db-reset-{}", uuid::Uuid::new_v4()));
    let db = Arc::new(FakeDatabase::with_pos_schema(&[]));

    let summary = service_with_backup_dir(&db, Some(dir.clone()))
        .run(Workflow::Complete)
        .await
        .unwrap();

    let path = summary.backup_path.expect("backup deveria ter sido gravado");
    assert!(path.starts_with(&dir));
    let saved: BackupSnapshot = serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
    assert_eq!(&saved, summary.backup.as_ref().unwrap());

    std::fs::remove_dir_all(&dir).unwrap();
}

#[tokio::test]
async fn backup_survives_a_failed_truncate() {
    let dir = std::env::temp_dir().join(format!("pdv-db-reset-{}", uuid::Uuid::new_v4()));
    let mut fake = FakeDatabase::with_pos_schema(&[]);
    fake.fail_statements_containing = Some("\"usuarios\"".into());
    let db = Arc::new(fake);

    let err = service_with_backup_dir(&db, Some(dir.clone()))
        .run(Workflow::DataOnly)
        .await
        .unwrap_err();
    assert!(matches!(err, ResetError::Database(_)));

    let files: Vec<_> = std::fs::read_dir(&dir).unwrap().collect::<Result<_, _>>().unwrap();
    assert_eq!(files.len(), 1);
    let saved: BackupSnapshot = serde_json::from_slice(&std::fs::read(files[0].path()).unwrap()).unwrap();
    assert_eq!(saved.row_count("usuarios"), Some(1));
    assert_eq!(saved.row_count("produtos"), Some(2));
    assert_eq!(db.close_calls(), 1);

    std::fs::remove_dir_all(&dir).unwrap();
}
