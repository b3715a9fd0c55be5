use std::net::SocketAddr;

use configs::{AppConfig, DatabaseConfig, StoreBackend};
use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use server::startup::{build_app, build_state};

struct TestApp {
    base_url: String,
}

async fn start_server(backend: StoreBackend) -> anyhow::Result<TestApp> {
    let mut cfg = AppConfig::default();
    cfg.store.backend = backend;
    // each server gets its own private SQLite database
    cfg.database = DatabaseConfig::with_url("sqlite::memory:");
    cfg.server.static_dir = "/nonexistent-frontend-for-tests".into();

    let state = build_state(&cfg).await?;
    let app = build_app(&cfg, state);
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url })
}

fn client() -> reqwest::Client {
    reqwest::Client::new()
}

async fn cats(app: &TestApp) -> anyhow::Result<Vec<Value>> {
    let res = client().get(format!("{}/cats", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    Ok(res.json::<Vec<Value>>().await?)
}

async fn shelter_scenario(backend: StoreBackend) -> anyhow::Result<()> {
    let app = start_server(backend).await?;
    let c = client();

    let start = cats(&app).await?;
    assert_eq!(start, vec![
        json!({"id": "0", "name": "sandy", "age": 12}),
        json!({"id": "1", "name": "rocky", "age": 8}),
    ]);

    // Create
    let res = c.post(format!("{}/cat", app.base_url))
        .json(&json!({"name": "mittens", "age": 3}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::CREATED);
    let body = res.json::<Value>().await?;
    assert_eq!(body["message"], "cat added!");
    assert_eq!(body["cats"].as_array().unwrap().len(), 3);
    let new_id = body["newCat"]["id"].as_str().unwrap().to_string();
    assert!(new_id != "0" && new_id != "1");

    let res = c.get(format!("{}/cat/{}", app.base_url, new_id)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?, json!({"id": new_id, "name": "mittens", "age": 3}));

    // Delete fixture 0
    let res = c.delete(format!("{}/cat/0", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["message"], "adopted cat with id 0");
    assert_eq!(body["deletedCat"]["name"], "sandy");

    let after = cats(&app).await?;
    assert_eq!(after.len(), 2);
    assert!(after.iter().all(|c| c["id"] != "0"));

    // Second delete: 404, collection unchanged
    let res = c.delete(format!("{}/cat/0", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    assert_eq!(cats(&app).await?, after);
    Ok(())
}

#[tokio::test]
async fn e2e_shelter_scenario_in_memory() -> anyhow::Result<()> {
    shelter_scenario(StoreBackend::Memory).await
}

#[tokio::test]
async fn e2e_shelter_scenario_database() -> anyhow::Result<()> {
    shelter_scenario(StoreBackend::Database).await
}

async fn validation_and_not_found(backend: StoreBackend) -> anyhow::Result<()> {
    let app = start_server(backend).await?;
    let c = client();

    // Missing age: 400 with echo, nothing added
    let res = c.post(format!("{}/cat", app.base_url))
        .json(&json!({"name": "no-age"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::BAD_REQUEST);
    let body = res.json::<Value>().await?;
    assert_eq!(body["message"], "malformed request: name and age properties expected");
    assert_eq!(body["request"], json!({"name": "no-age"}));
    assert_eq!(cats(&app).await?.len(), 2);

    // Unknown id
    let res = c.get(format!("{}/cat/never-issued", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    let body = res.json::<Value>().await?;
    assert_eq!(body["message"], "could not find cat with id never-issued");

    // Update existing: id kept, age given as text coerced
    let res = c.put(format!("{}/cat", app.base_url))
        .json(&json!({"id": "1", "name": "rocky", "age": "9"}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["message"], "updated");
    assert_eq!(body["updatedCat"], json!({"id": "1", "name": "rocky", "age": 9}));

    // Update unknown id: 404, collection unchanged
    let before = cats(&app).await?;
    let res = c.put(format!("{}/cat", app.base_url))
        .json(&json!({"id": "42", "name": "ghost", "age": 1}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::NOT_FOUND);
    assert_eq!(cats(&app).await?, before);
    Ok(())
}

#[tokio::test]
async fn e2e_validation_and_not_found_in_memory() -> anyhow::Result<()> {
    validation_and_not_found(StoreBackend::Memory).await
}

#[tokio::test]
async fn e2e_validation_and_not_found_database() -> anyhow::Result<()> {
    validation_and_not_found(StoreBackend::Database).await
}

#[tokio::test]
async fn e2e_cors_allows_any_origin_with_credentials() -> anyhow::Result<()> {
    let app = start_server(StoreBackend::Memory).await?;
    let res = client()
        .get(format!("{}/cats", app.base_url))
        .header("Origin", "http://example.test")
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let headers = res.headers();
    assert_eq!(headers.get("access-control-allow-origin").unwrap(), "http://example.test");
    assert_eq!(headers.get("access-control-allow-credentials").unwrap(), "true");
    Ok(())
}
