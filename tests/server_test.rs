mod common;

use common::{config_for, spawn_app};
use gistapi::config::ConfigOverrides;
use httpmock::MockServer;
use std::time::Duration;
use tokio::net::TcpStream;

#[tokio::test]
async fn test_listener_accepts_tcp_connections() {
    let github = MockServer::start();
    let app = spawn_app(config_for(&github, ConfigOverrides::default())).await;

    let stream = tokio::time::timeout(Duration::from_secs(5), TcpStream::connect(app.addr))
        .await
        .expect("connect timed out")
        .expect("connection refused");
    drop(stream);

    app.stop().await.unwrap();
}

#[tokio::test]
async fn test_graceful_shutdown_releases_the_port() {
    let github = MockServer::start();
    let app = spawn_app(config_for(&github, ConfigOverrides::default())).await;
    let addr = app.addr;

    app.stop().await.unwrap();

    assert!(TcpStream::connect(addr).await.is_err());
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let github = MockServer::start();
    let app = spawn_app(config_for(&github, ConfigOverrides::default())).await;

    let response = app.client.get(app.url("/api/v1/nothing")).send().await.unwrap();
    assert_eq!(response.status(), 404);

    let response = app.client.get(app.url("/api/v1/search")).send().await.unwrap();
    assert_eq!(response.status(), 405);

    app.stop().await.unwrap();
}

#[tokio::test]
async fn test_bind_conflict_is_reported() {
    let github = MockServer::start();
    let occupied = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = occupied.local_addr().unwrap();

    let overrides = ConfigOverrides {
        bind: Some(addr.to_string()),
        ..Default::default()
    };
    let config = config_for(&github, overrides);

    let result = gistapi::run_server(config).await;
    assert!(matches!(result, Err(gistapi::GistError::IoError(_))));
}
