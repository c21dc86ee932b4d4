//! Stub backend for the end-to-end bridge tests.

use std::net::TcpListener as StdTcpListener;

use axum::Router;

/// Serves `router` on an ephemeral local port and returns its base URL.
pub async fn spawn_stub(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub backend");
    let addr = listener.local_addr().expect("stub address");

    tokio::spawn(async move {
        axum::serve(listener, router).await.expect("stub backend");
    });

    format!("http://{addr}")
}

/// A base URL on which nothing is listening.
pub fn closed_base_url() -> String {
    let listener = StdTcpListener::bind("127.0.0.1:0").expect("bind random port");
    let port = listener.local_addr().expect("random port address").port();
    drop(listener);
    format!("http://127.0.0.1:{port}")
}
