//! End-to-end command tests over an in-memory store

use std::io::Cursor;
use std::sync::Arc;

use boom_art_sales::cli::{Cli, Command};
use boom_art_sales::commands;
use boom_art_sales::config::{AppConfig, AssistantConfig, Config, StorageConfig};
use boom_art_sales::error::AppError;
use boom_art_sales::storage::{BlobStore, MemoryBlobStore};
use boom_art_sales::AppState;
use clap::Parser;
use shared::default_users;

fn config() -> Config {
    Config {
        environment: "test".to_string(),
        app: AppConfig::default(),
        storage: StorageConfig {
            data_dir: std::env::temp_dir(),
            sales_key: "boom_art_sales_data".to_string(),
            session_key: "boom_art_user".to_string(),
        },
        assistant: AssistantConfig::default(),
        users: default_users(),
    }
}

fn state() -> (Arc<MemoryBlobStore>, AppState) {
    let store = Arc::new(MemoryBlobStore::new());
    let state = AppState::with_store(config(), store.clone());
    (store, state)
}

fn parse(args: &[&str]) -> Command {
    let mut argv = vec!["boom-sales"];
    argv.extend_from_slice(args);
    Cli::parse_from(argv).command
}

async fn run(state: &mut AppState, args: &[&str]) -> Result<String, AppError> {
    run_with_input(state, args, "").await
}

async fn run_with_input(state: &mut AppState, args: &[&str], input: &str) -> Result<String, AppError> {
    let mut input = Cursor::new(input.as_bytes().to_vec());
    let mut out = Vec::new();
    commands::run(state, parse(args), &mut input, &mut out).await?;
    Ok(String::from_utf8(out).unwrap())
}

async fn logged_in() -> (Arc<MemoryBlobStore>, AppState) {
    let (store, mut state) = state();
    run(&mut state, &["login", "admin@boomart.com", "1234"]).await.unwrap();
    (store, state)
}

async fn add(state: &mut AppState, date: &str, buyer: &str, product: &str, cost: &str, price: &str, pay: &str) {
    run(
        state,
        &[
            "add", "--date", date, "--buyer", buyer, "--product", product, "--cost", cost,
            "--price", price, "--pay", pay,
        ],
    )
    .await
    .unwrap();
}

#[tokio::test]
async fn test_commands_require_login() {
    let (_, mut state) = state();
    let err = run(&mut state, &["list", "--month", "all"]).await.unwrap_err();
    assert!(matches!(err, AppError::NotAuthenticated));

    let out = run(&mut state, &["whoami"]).await.unwrap();
    assert_eq!(out, "No has iniciado sesión\n");
}

#[tokio::test]
async fn test_login_persists_across_runs() {
    let (store, mut state) = state();
    let err = run(&mut state, &["login", "admin@boomart.com", "9999"]).await.unwrap_err();
    assert!(matches!(err, AppError::InvalidCredentials));

    let out = run(&mut state, &["login", "ventas@boomart.com", "0000"]).await.unwrap();
    assert_eq!(out, "Bienvenido, Vendedor\n");

    let store: Arc<dyn BlobStore> = store;
    let mut next_run = AppState::with_store(config(), store.clone());
    let out = run(&mut next_run, &["whoami"]).await.unwrap();
    assert_eq!(out, "Vendedor <ventas@boomart.com>\n");

    run(&mut next_run, &["logout"]).await.unwrap();
    assert_eq!(store.get("boom_art_user").unwrap(), None);
}

#[tokio::test]
async fn test_add_then_report() {
    let (_, mut state) = logged_in().await;
    add(&mut state, "2024-01-10", "Ana", "Vase", "20", "50", "Yape").await;
    add(&mut state, "2024-01-12", "Luis", "Vase", "10", "30", "Efectivo").await;
    add(&mut state, "2024-01-20", "Ana", "Cup", "5", "20", "Yape").await;
    add(&mut state, "2024-02-01", "Ana", "Cup", "5", "20", "Yape").await;

    let out = run(&mut state, &["summary", "--month", "2024-01"]).await.unwrap();
    assert!(out.contains("Ventas totales:  S/ 100.00"));
    assert!(out.contains("Registros:       3"));

    let out = run(&mut state, &["report", "--month", "2024-01", "--group-by", "product"])
        .await
        .unwrap();
    let lines: Vec<_> = out.lines().collect();
    assert!(lines[2].starts_with("Vase"));
    assert!(lines[3].starts_with("Cup"));

    let out = run(
        &mut state,
        &["report", "--month", "all", "--payment", "Yape", "--group-by", "buyer"],
    )
    .await
    .unwrap();
    assert!(out.contains("Reporte por Cliente"));
    assert!(!out.contains("Luis"));

    let out = run(&mut state, &["customers"]).await.unwrap();
    assert_eq!(out, "Ana\nLuis\n");
}

#[tokio::test]
async fn test_report_survives_extreme_amounts() {
    let (_, mut state) = logged_in().await;
    add(&mut state, "2024-01-10", "Ana", "Vase", "1000000000000000000000000000", "0.01", "Yape").await;
    add(&mut state, "2024-01-11", "Ana", "Cup", "5", "20", "Yape").await;

    let out = run(&mut state, &["report", "--month", "2024-01"]).await.unwrap();
    assert!(out.contains("Vase"));
    assert!(out.contains("Cup"));

    let out = run(&mut state, &["summary", "--month", "2024-01"]).await.unwrap();
    assert!(out.contains("Registros:       2"));
}

#[tokio::test]
async fn test_invalid_sale_is_rejected() {
    let (store, mut state) = logged_in().await;
    let err = run(
        &mut state,
        &["add", "--buyer", "Ana", "--product", "Vase", "--price", "50", "--phone", "12345"],
    )
    .await
    .unwrap_err();

    assert_eq!(err.message_es(), "El teléfono debe tener 9 dígitos");
    assert_eq!(store.get("boom_art_sales_data").unwrap(), None);
}

#[tokio::test]
async fn test_edit_and_delete() {
    let (_, mut state) = logged_in().await;
    add(&mut state, "2024-01-10", "Ana", "Vase", "20", "50", "Yape").await;
    let id = state.sales().list()[0].id.clone();

    let out = run(&mut state, &["edit", &id, "--price", "70"]).await.unwrap();
    assert!(out.contains("Utilidad:  S/ 50.00"));
    assert_eq!(state.sales().list().len(), 1);

    let out = run_with_input(&mut state, &["delete", &id], "n\n").await.unwrap();
    assert!(out.ends_with("Cancelado\n"));
    assert_eq!(state.sales().list().len(), 1);

    run_with_input(&mut state, &["delete", &id], "s\n").await.unwrap();
    assert!(state.sales().list().is_empty());

    let err = run(&mut state, &["delete", &id, "--yes"]).await.unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn test_copy_prints_tab_separated_rows() {
    let (_, mut state) = logged_in().await;
    add(&mut state, "2024-01-10", "Ana", "Vase", "20", "50", "Yape").await;

    let out = run(&mut state, &["copy", "--month", "2024-01"]).await.unwrap();
    let lines: Vec<_> = out.lines().collect();
    assert_eq!(lines.len(), 2);
    assert!(lines[0].starts_with("Fecha\tCliente"));
    assert!(lines[1].starts_with("2024-01-10\tAna\t\tVase\t20.00\t50.00\t30.00\tYape\tRecojo"));
}

#[tokio::test]
async fn test_export_writes_named_csv() {
    let (_, mut state) = logged_in().await;
    add(&mut state, "2024-01-10", "Ana", "Vase", "20", "50", "Yape").await;

    let dir = std::env::temp_dir().join(format!("boom-export-{}", uuid::Uuid::new_v4()));
    std::fs::create_dir_all(&dir).unwrap();
    let out_dir = dir.to_string_lossy().to_string();

    let out = run(&mut state, &["export", "--month", "2024-01", "--out-dir", &out_dir])
        .await
        .unwrap();
    assert!(out.starts_with("1 ventas exportadas a"));

    let contents = std::fs::read_to_string(dir.join("boom_art_ventas_2024-01.csv")).unwrap();
    assert!(contents.starts_with("\u{FEFF}ID,Fecha,Cliente"));
    assert_eq!(contents.lines().count(), 2);

    let _ = std::fs::remove_dir_all(&dir);
}

#[tokio::test]
async fn test_corrupt_data_is_reported_not_fatal() {
    let (store, mut state) = logged_in().await;
    store.set("boom_art_sales_data", "{oops").unwrap();

    let out = run(&mut state, &["list", "--month", "all"]).await.unwrap();
    assert!(out.starts_with("Aviso: no se pudieron leer las ventas guardadas"));
    assert!(out.contains("No hay ventas para este filtro."));
}
