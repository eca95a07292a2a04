use std::net::SocketAddr;

use configs::AppConfig;
use reqwest::StatusCode as HttpStatusCode;
use serde_json::{json, Value};
use tokio::net::TcpListener;
use uuid::Uuid;

struct TestApp {
    base_url: String,
    root: std::path::PathBuf,
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_dir_all(&self.root);
    }
}

async fn start_server() -> anyhow::Result<TestApp> {
    // Isolated storage and asset dirs per test run
    let root = std::env::temp_dir().join(format!("server_e2e_{}", Uuid::new_v4()));
    let mut cfg = AppConfig::default();
    cfg.storage.data_dir = root.join("storage").to_string_lossy().into_owned();
    cfg.storage.menu_file = root.join("menu.json").to_string_lossy().into_owned();
    cfg.assets.public_dir = root.join("public").to_string_lossy().into_owned();
    cfg.assets.images_dir = root.join("public/images").to_string_lossy().into_owned();

    let app = server::build_app(&cfg).await?;
    let listener = TcpListener::bind((std::net::Ipv4Addr::LOCALHOST, 0)).await?;
    let addr: SocketAddr = listener.local_addr()?;
    let base_url = format!("http://{}:{}", addr.ip(), addr.port());

    tokio::spawn(async move {
        if let Err(e) = axum::serve(listener, app).await { eprintln!("server error: {}", e); }
    });

    Ok(TestApp { base_url, root })
}

#[tokio::test]
async fn e2e_public_health() -> anyhow::Result<()> {
    let app = start_server().await?;
    let res = reqwest::get(format!("{}/health", app.base_url)).await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    let body = res.json::<Value>().await?;
    assert_eq!(body["status"], "ok");
    Ok(())
}

#[tokio::test]
async fn e2e_storage_round_trip() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    let res = c.post(format!("{}/storage/cart42", app.base_url))
        .json(&json!({"items": [1, 2, 3]}))
        .send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?, json!({"message": "Saved key \"cart42\" successfully"}));

    let res = c.get(format!("{}/storage/cart42", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.json::<Value>().await?, json!({"items": [1, 2, 3]}));

    let res = c.get(format!("{}/storage/doesnotexist", app.base_url)).send().await?;
    assert_eq!(res.status(), HttpStatusCode::OK);
    assert_eq!(res.text().await?, "null");
    Ok(())
}

#[tokio::test]
async fn e2e_concurrent_writes_to_distinct_keys() -> anyhow::Result<()> {
    let app = start_server().await?;
    let c = reqwest::Client::new();

    let mut tasks = Vec::new();
    for i in 0..20 {
        let c = c.clone();
        let url = format!("{}/storage/order-{i}", app.base_url);
        tasks.push(tokio::spawn(async move {
            c.post(url).json(&json!({"n": i})).send().await
        }));
    }
    for t in tasks {
        assert_eq!(t.await??.status(), HttpStatusCode::OK);
    }

    for i in 0..20 {
        let v = c.get(format!("{}/storage/order-{i}", app.base_url)).send().await?.json::<Value>().await?;
        assert_eq!(v, json!({"n": i}));
    }
    Ok(())
}
