use std::net::SocketAddr;
use std::sync::Arc;

use axum::body::Bytes;
use axum::http::StatusCode;
use axum::{routing::post, Json, Router};
use clap::Parser;
use iotauth_core::{ApplyError, AuthHandler, InMemoryStateStore};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// HTTP shell for the iot_auth action handler.
#[derive(Parser, Debug)]
struct Args {
    /// Address to listen on.
    #[arg(long, default_value = "0.0.0.0:8080")]
    bind: SocketAddr,
}

#[derive(Serialize)]
struct Receipt {
    status: String,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let args = Args::parse();
    let handler = Arc::new(AuthHandler::new(Arc::new(InMemoryStateStore::new())));

    let app = Router::new().route(
        "/actions",
        post(move |body: Bytes| {
            let handler = handler.clone();
            async move {
                match handler.apply(&body) {
                    Ok(()) => (StatusCode::OK, Json(Receipt { status: "applied".into() })),
                    Err(err) => {
                        let code = match err {
                            ApplyError::WriteFailed(_) => StatusCode::BAD_GATEWAY,
                            _ => StatusCode::BAD_REQUEST,
                        };
                        (code, Json(Receipt { status: format!("error:{err}") }))
                    }
                }
            }
        }),
    );

    info!("iotauth-server listening on {}", args.bind);
    axum::serve(tokio::net::TcpListener::bind(args.bind).await.unwrap(), app)
        .await
        .unwrap();
}
