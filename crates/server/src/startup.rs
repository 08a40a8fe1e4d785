use std::sync::Arc;

use configs::{AppConfig, MailConfig};
use migration::{Migrator, MigratorTrait};
use service::mail::{LogMailer, Mailer, SmtpMailer};
use service::Repositories;
use tower_http::cors::CorsLayer;
use tracing::{info, warn};

use crate::errors::StartupError;
use crate::routes;
use crate::state::ServerState;

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

/// SMTP when credentials are configured, otherwise mail is only logged.
pub fn select_mailer(cfg: &MailConfig) -> Result<Arc<dyn Mailer>, StartupError> {
    if !cfg.smtp_enabled() {
        warn!("smtp credentials missing; outgoing mail will only be logged");
        return Ok(Arc::new(LogMailer));
    }
    match SmtpMailer::from_config(cfg)? {
        Some(smtp) => Ok(Arc::new(smtp)),
        None => Err(StartupError::InvalidConfig("mail credentials are incomplete".into())),
    }
}

/// Connect to Postgres, apply pending migrations and wire the services.
pub async fn build_state(cfg: &AppConfig) -> Result<ServerState, StartupError> {
    let db = models::db::connect_with_config(&cfg.database)
        .await
        .map_err(|e| StartupError::Database(e.to_string()))?;

    if cfg.database.run_migrations {
        Migrator::up(&db, None)
            .await
            .map_err(|e| StartupError::Migration(e.to_string()))?;
        info!("database migrations applied");
    }

    let mailer = select_mailer(&cfg.mail)?;
    Ok(ServerState::new(Repositories::seaorm(db), mailer, &cfg.auth, &cfg.mail))
}

/// Build the app and serve it until Ctrl+C or SIGTERM.
pub async fn run(cfg: AppConfig) -> Result<(), StartupError> {
    let state = build_state(&cfg).await?;
    let app = routes::build_router(state, build_cors());

    let host = cfg.server.host.as_str();
    let port = cfg.server.port;
    let listener = tokio::net::TcpListener::bind((host, port))
        .await
        .map_err(|e| StartupError::InvalidConfig(format!("cannot bind {host}:{port}: {e}")))?;
    info!(host, port, "worker portal listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| StartupError::Any(e.into()))?;
    info!("server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "failed to listen for ctrl+c");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("received ctrl+c, shutting down"),
        _ = terminate => info!("received SIGTERM, shutting down"),
    }
}
