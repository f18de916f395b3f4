use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::signal;
use tracing::{error, info, warn, Level};

use fleet_console::config::{BackendMode, EnvironmentConfig};
use fleet_console::{build_app, AppState, FleetApiClient, InMemoryBackend, SharedBackend};

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = EnvironmentConfig::from_env()?;

    // Configurar logging
    let level: Level = config.log_level.parse().unwrap_or(Level::INFO);
    tracing_subscriber::fmt().with_max_level(level).init();

    info!("🚚 Fleet Console - Rosters y emparejamientos");
    info!("================================================");

    let backend: SharedBackend = match config.backend_mode {
        BackendMode::Http => {
            let client = FleetApiClient::new(&config.fleet_api_base_url, config.http_timeout())
                .context("No se pudo crear el cliente del backend de flota")?;
            info!("🔌 Backend de flota: {}", client.base_url());
            Arc::new(client)
        }
        BackendMode::Memory => {
            warn!("🧪 Backend en memoria con datos de ejemplo (modo demo)");
            Arc::new(InMemoryBackend::demo())
        }
    };

    let addr: SocketAddr = config
        .server_url()
        .parse()
        .with_context(|| format!("Dirección inválida: {}", config.server_url()))?;

    let app = build_app(AppState::new(config, backend));

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   POST /login, POST /logout, GET /health");
    info!("   GET  /dashboard - Resumen de la flota");
    info!("   GET|POST /drivers, PUT /drivers/:id, POST /drivers/:id/block|unblock");
    info!("   GET|POST /vehicles, PUT /vehicles/:id, POST /vehicles/:id/block|unblock");
    info!("   GET|POST /employees, DELETE /employees/:id");
    info!("   GET|POST /pairingvehicle, GET|POST /pairingemployees");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        error!("❌ Error del servidor: {}", e);
        return Err(e.into());
    }

    info!("👋 Servidor terminado");
    Ok(())
}

/// Señal de apagado graceful
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("❌ No se pudo instalar el handler de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("❌ No se pudo instalar el handler de SIGTERM: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("🛑 Señal Ctrl+C recibida, apagando servidor...");
        },
        _ = terminate => {
            info!("🛑 Señal de terminación recibida, apagando servidor...");
        },
    }
}
