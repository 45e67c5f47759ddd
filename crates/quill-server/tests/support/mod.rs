// SPDX-License-Identifier: Apache-2.0
//! Shared harness for the HTTP tests: spawn the app on an ephemeral port
//! with a throwaway data directory, then drive it over a raw TCP stream.
#![allow(dead_code)]

use quill_server::{build_router, AppState};
use quill_store::DocumentStore;
use std::net::SocketAddr;
use std::sync::Arc;
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

pub struct TestServer {
    pub addr: SocketAddr,
    pub data_dir: TempDir,
}

pub async fn spawn_server() -> TestServer {
    let data_dir = tempfile::tempdir().expect("tempdir");
    let store = Arc::new(DocumentStore::new(data_dir.path()));
    store.ensure_layout().expect("ensure layout");
    let app = build_router(AppState::new(store));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind listener");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move { axum::serve(listener, app).await.expect("serve app") });
    TestServer { addr, data_dir }
}

pub async fn send(
    addr: SocketAddr,
    method: &str,
    path: &str,
    headers: &[(&str, &str)],
    body: Option<&str>,
) -> (u16, String, String) {
    let mut stream = tokio::net::TcpStream::connect(addr)
        .await
        .expect("connect server");
    let mut req = format!("{method} {path} HTTP/1.1\r\nHost: {addr}\r\nConnection: close\r\n");
    for (k, v) in headers {
        req.push_str(&format!("{k}: {v}\r\n"));
    }
    if let Some(body) = body {
        req.push_str("Content-Type: application/x-www-form-urlencoded\r\n");
        req.push_str(&format!("Content-Length: {}\r\n", body.len()));
    }
    req.push_str("\r\n");
    if let Some(body) = body {
        req.push_str(body);
    }
    stream
        .write_all(req.as_bytes())
        .await
        .expect("write request");
    let mut response = String::new();
    stream
        .read_to_string(&mut response)
        .await
        .expect("read response");
    let (head, body) = response
        .split_once("\r\n\r\n")
        .expect("http response must have separator");
    let status = head
        .lines()
        .next()
        .and_then(|line| line.split_whitespace().nth(1))
        .and_then(|s| s.parse::<u16>().ok())
        .expect("http status");
    (status, head.to_string(), body.to_string())
}

pub async fn get(addr: SocketAddr, path: &str, headers: &[(&str, &str)]) -> (u16, String, String) {
    send(addr, "GET", path, headers, None).await
}

pub async fn post_form(
    addr: SocketAddr,
    path: &str,
    headers: &[(&str, &str)],
    body: &str,
) -> (u16, String, String) {
    send(addr, "POST", path, headers, Some(body)).await
}

pub fn header_value(head: &str, name: &str) -> Option<String> {
    let prefix = format!("{name}: ");
    head.lines()
        .find_map(|line| line.strip_prefix(&prefix))
        .map(str::to_string)
}

/// Extracts the `quill_session=<token>` pair from Set-Cookie headers, ready
/// to be sent back in a Cookie header.
pub fn session_cookie(head: &str) -> String {
    head.lines()
        .filter_map(|line| line.strip_prefix("set-cookie: "))
        .find(|cookie| cookie.starts_with("quill_session="))
        .and_then(|cookie| cookie.split(';').next())
        .expect("session cookie present")
        .to_string()
}

/// Logs in with the given password and returns the session cookie pair.
pub async fn login(addr: SocketAddr, password: &str) -> String {
    let (status, head, _) =
        post_form(addr, "/login", &[], &format!("password={password}")).await;
    assert_eq!(status, 303, "login should redirect");
    assert_eq!(header_value(&head, "location").as_deref(), Some("/admin"));
    session_cookie(&head)
}
