//src/main.rs

use tokio::net::TcpListener;
use tracing_subscriber::EnvFilter;

use backoffice::config::{AppConfig, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Logger: nível via RUST_LOG (padrão "info")
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_target(false)
        .compact()
        .init();

    // Se a configuração falhar, a aplicação não deve iniciar.
    let config = AppConfig::from_env()?;
    tracing::info!(
        offset = %config.utc_offset,
        admin_stores = config.admin_store_ids.len(),
        page_size = config.default_page_size,
        "✅ Configuração carregada"
    );

    let addr = config.bind_addr.clone();
    let app = backoffice::app(AppState::new(config));

    // Inicia o servidor
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr()?);
    axum::serve(listener, app).await?;

    Ok(())
}
