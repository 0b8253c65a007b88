use std::{net::SocketAddr, sync::Arc};

use anyhow::Result;
use tower_http::trace::TraceLayer;

use crate::{
    config::Config,
    email::SmtpNotifier,
    routes::AppState,
    upload::{FsBlobStore, UploadService},
};

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal");
        },
    }

    tracing::info!("Starting graceful shutdown...");
}

pub async fn serve(
    config: Config,
    host_override: Option<String>,
    port_override: Option<u16>,
) -> Result<()> {
    tracing::info!("Starting yummio server...");

    let host = host_override.unwrap_or(config.server.host.to_owned());
    let port = port_override.unwrap_or(config.server.port);

    // The write pool creates the database file, so it has to exist before the read pool.
    let write_pool = yummio_db::create_write_pool(&config.database.url).await?;
    super::run_migrations(&write_pool).await?;
    let read_pool =
        yummio_db::create_read_pool(&config.database.url, config.database.max_connections).await?;

    let notifier: Arc<dyn yummio_user::Notifier> = if config.email.enabled {
        tracing::info!(host = %config.email.smtp_host, "password reset emails sent over SMTP");
        Arc::new(SmtpNotifier::new(&config.email)?)
    } else {
        Arc::new(yummio_user::LogNotifier)
    };

    let upload = UploadService::new(
        Arc::new(FsBlobStore::new(
            &config.upload.dir,
            config.upload.base_url.clone(),
        )),
        &config.upload,
    );

    let state = AppState::new(
        config,
        yummio_shared::State::new(read_pool.clone(), write_pool.clone()),
        notifier,
        upload,
    )?;

    let app = crate::routes::router(state).layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Closing database pools...");
    read_pool.close().await;
    write_pool.close().await;

    tracing::info!("Graceful shutdown complete");

    Ok(())
}
