use axum::{http::StatusCode, response::IntoResponse, routing::get, Router};
use std::net::SocketAddr;

pub const LIVENESS_BODY: &str = "Bot is alive!";

pub fn router() -> Router {
    Router::new().route("/", get(alive))
}

async fn alive() -> impl IntoResponse {
    (StatusCode::OK, LIVENESS_BODY)
}

/// Serve the liveness endpoint until the process exits.
pub async fn serve(port: u16) -> anyhow::Result<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("🚀 Liveness server listening on http://{}", addr);

    axum::serve(listener, router()).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{body::Body, http::Request};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    #[tokio::test]
    async fn test_root_reports_alive() {
        let req = Request::builder().uri("/").body(Body::empty()).unwrap();
        let res = router().oneshot(req).await.unwrap();

        assert_eq!(res.status(), StatusCode::OK);
        let bytes = res.into_body().collect().await.unwrap().to_bytes();
        assert_eq!(&bytes[..], LIVENESS_BODY.as_bytes());
    }

    #[tokio::test]
    async fn test_unknown_path_is_not_found() {
        let req = Request::builder().uri("/status").body(Body::empty()).unwrap();
        let res = router().oneshot(req).await.unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }
}
