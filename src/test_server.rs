use axum::http::StatusCode;
use axum::routing::get;
use axum::Router;
use std::time::Duration;
use tokio::net::TcpListener;

/// Serves fixed responses on a random local port and returns its base url.
pub async fn serve(routes: Vec<(&'static str, StatusCode, &'static str)>) -> String {
    let mut router = Router::new();
    for (path, status, body) in routes {
        router = router.route(path, get(move || async move { (status, body) }));
    }

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{}", addr)
}

/// Serves `body` on `/` only after `delay` has passed.
pub async fn serve_slow(delay: Duration, body: &'static str) -> String {
    let router = Router::new().route(
        "/",
        get(move || async move {
            tokio::time::sleep(delay).await;
            body
        }),
    );

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{}", addr)
}

/// A base url nothing is listening on.
pub async fn unreachable() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    format!("http://{}", addr)
}
