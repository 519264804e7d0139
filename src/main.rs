use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use dotenvy::dotenv;
use tokio::signal;
use tracing::{error, info, warn};

use school_transport::config::{DatabaseConfig, EnvironmentConfig};
use school_transport::database::DatabaseConnection;
use school_transport::repositories::{
    InMemoryTransportStore, PostgresTransportStore, TransportStore,
};
use school_transport::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Cargar variables de entorno
    dotenv().ok();

    let config = EnvironmentConfig::from_env()?;

    // Configurar logging
    let level = config
        .log_level
        .parse::<tracing::Level>()
        .unwrap_or(tracing::Level::INFO);
    tracing_subscriber::fmt().with_max_level(level).init();

    info!("🚐 School Transport - Rutas y seguimiento en vivo");
    info!("================================================");

    // Inicializar almacenamiento
    let db_config = DatabaseConfig::from_env()?;
    let store: Arc<dyn TransportStore> = match &db_config.url {
        Some(url) => match DatabaseConnection::connect(&db_config, url).await {
            Ok(conn) => Arc::new(PostgresTransportStore::new(conn.pool().clone())),
            Err(e) => {
                error!("❌ Error conectando a la base de datos: {:#}", e);
                return Err(e);
            }
        },
        None => {
            warn!("⚠️ DATABASE_URL no definido, usando store en memoria");
            Arc::new(InMemoryTransportStore::new())
        }
    };

    let addr: SocketAddr = config.server_url().parse()?;
    let app = school_transport::create_app(AppState::new(store, config));

    info!("🌐 Servidor iniciando en http://{}", addr);
    info!("🔍 Endpoints disponibles:");
    info!("   GET    /health - Estado del servicio");
    info!("   POST   /routes/create - Crear ruta");
    info!("   GET    /routes - Listar rutas (agency_id, driver_id)");
    info!("   DELETE /routes/:id - Eliminar ruta");
    info!("   POST   /update-location - Reportar ubicación de un van");
    info!("   POST   /vans/:id/toggle-tracking - Alternar seguimiento");
    info!("   GET    /ws/location - Suscripción WebSocket de ubicaciones");

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
            error!("No se pudo instalar el manejador de Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("No se pudo instalar el manejador de SIGTERM: {}", e);
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
