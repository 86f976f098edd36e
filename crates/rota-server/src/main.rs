use std::net::SocketAddr;
use std::path::PathBuf;

use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present
    let _ = dotenvy::dotenv();

    // Init logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "rota_server=debug,rota_api=debug,rota_db=debug,tower_http=debug".into()
            }),
        )
        .init();

    // Config
    let session_secret =
        std::env::var("ROTA_SESSION_SECRET").unwrap_or_else(|_| "dev-secret-change-me".into());
    let db_path = std::env::var("ROTA_DB_PATH").unwrap_or_else(|_| "rota.db".into());
    let host = std::env::var("ROTA_HOST").unwrap_or_else(|_| "0.0.0.0".into());
    let port: u16 = std::env::var("ROTA_PORT")
        .unwrap_or_else(|_| "3000".into())
        .parse()?;

    // Init database
    let db = rota_db::Database::open(&PathBuf::from(&db_path))?;

    let state = rota_api::build_state(db, session_secret)?;
    let app = rota_api::app(state);

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;
    info!("Rota server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
