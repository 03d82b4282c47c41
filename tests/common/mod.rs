#![allow(dead_code)]

use gistapi::config::{ConfigOverrides, ServiceConfig};
use httpmock::prelude::*;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio::sync::oneshot;
use tokio::task::JoinHandle;

pub struct TestApp {
    pub addr: SocketAddr,
    pub client: reqwest::Client,
    shutdown: Option<oneshot::Sender<()>>,
    handle: JoinHandle<gistapi::Result<()>>,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("http://{}{}", self.addr, path)
    }

    pub async fn stop(mut self) -> gistapi::Result<()> {
        if let Some(tx) = self.shutdown.take() {
            let _ = tx.send(());
        }
        self.handle.await.expect("server task panicked")
    }
}

pub fn config_for(github: &MockServer, overrides: ConfigOverrides) -> ServiceConfig {
    let base = ConfigOverrides {
        bind: Some("127.0.0.1:0".to_string()),
        github_api_url: Some(github.base_url()),
        gist_web_url: Some("https://gist.github.com".to_string()),
        ..Default::default()
    };
    ServiceConfig::from_layers(&[base, overrides]).expect("test config is valid")
}

/// Starts the API on an ephemeral port, backed by `github`.
pub async fn spawn_app(config: ServiceConfig) -> TestApp {
    let listener = TcpListener::bind(config.bind).await.expect("bind test listener");
    let addr = listener.local_addr().expect("local addr");
    let state = gistapi::build_state(&config).expect("build state");

    let (tx, rx) = oneshot::channel::<()>();
    let handle = tokio::spawn(gistapi::serve(listener, state, async move {
        let _ = rx.await;
    }));

    TestApp {
        addr,
        client: reqwest::Client::new(),
        shutdown: Some(tx),
        handle,
    }
}

/// Mocks `/users/{username}` as existing.
pub fn mock_user<'a>(github: &'a MockServer, username: &str) -> httpmock::Mock<'a> {
    let path = format!("/users/{}", username);
    github.mock(|when, then| {
        when.method(GET).path(path);
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({"login": username}));
    })
}

pub fn gist_detail(id: &str, files: serde_json::Value) -> serde_json::Value {
    serde_json::json!({
        "id": id,
        "html_url": format!("https://gist.github.com/{}", id),
        "files": files,
    })
}
