use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing::info;

use harbor_api::routes;
use harbor_api::state::{AppState, AppStateInner};
use harbor_chain::ChainClient;
use harbor_crypto::{MessageCipher, keys};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "harbor=debug,tower_http=debug".into()),
        )
        .init();

    // Config
    let jwt_secret =
        std::env::var("HARBOR_JWT_SECRET").unwrap_or_else(|_| "dev-secret-change-me".into());
    let db_path = std::env::var("HARBOR_DB_PATH").unwrap_or_else(|_| "harbor.db".into());
    let key_file = std::env::var("HARBOR_KEY_FILE").unwrap_or_else(|_| "harbor.key".into());
    let relay_url =
        std::env::var("HARBOR_RELAY_URL").unwrap_or_else(|_| "http://127.0.0.1:9000".into());
    let package_id = std::env::var("HARBOR_PACKAGE_ID").unwrap_or_else(|_| "0x0".into());
    let host = std::env::var("HARBOR_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let port: u16 = std::env::var("HARBOR_PORT")
        .unwrap_or_else(|_| "8000".into())
        .parse()?;

    // Init database and cipher key (load-or-generate-and-persist: a fresh
    // key is written to disk before any ciphertext is stored under it)
    let db = harbor_db::Database::open(&PathBuf::from(&db_path))?;
    let key = keys::load_or_generate(&PathBuf::from(&key_file))?;

    // Shared state
    let state: AppState = Arc::new(AppStateInner {
        db,
        cipher: MessageCipher::new(key),
        chain: ChainClient::new(relay_url, package_id),
        jwt_secret,
    });

    let app = routes::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http());

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Harbor server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
