use std::{
    net::{IpAddr, SocketAddr},
    sync::Arc,
};

use anyhow::Context;
use axum::Router;
use folio_core_contact_contracts::ContactFeatureService;
use folio_core_health_contracts::HealthFeatureService;
use folio_core_projects_contracts::ProjectsFeatureService;
use folio_di::Build;
use folio_utils::Apply;
use tokio::net::TcpListener;
use tracing::info;

mod middlewares;
mod models;
mod routes;

#[derive(Debug, Clone, Build)]
pub struct RestServer<Health, Projects, Contact> {
    health: Health,
    projects: Projects,
    contact: Contact,
    config: RestServerConfig,
}

#[derive(Debug, Clone)]
pub struct RestServerConfig {
    pub addr: IpAddr,
    pub port: u16,
    pub real_ip: Option<Arc<RestServerRealIpConfig>>,
}

/// Trust `header` for the client address of requests coming from `set_from`,
/// e.g. a reverse proxy.
#[derive(Debug, Clone)]
pub struct RestServerRealIpConfig {
    pub header: String,
    pub set_from: IpAddr,
}

impl<Health, Projects, Contact> RestServer<Health, Projects, Contact>
where
    Health: HealthFeatureService,
    Projects: ProjectsFeatureService,
    Contact: ContactFeatureService,
{
    pub async fn serve(self) -> anyhow::Result<()> {
        let addr = (self.config.addr, self.config.port);
        let real_ip = self.config.real_ip.clone();
        let router = self.router(real_ip);

        let listener = TcpListener::bind(addr)
            .await
            .with_context(|| format!("Failed to bind to {}:{}", addr.0, addr.1))?;
        info!("Listening on {}:{}", addr.0, addr.1);

        axum::serve(
            listener,
            router.into_make_service_with_connect_info::<SocketAddr>(),
        )
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("Failed to run http server")
    }

    fn router(self, real_ip: Option<Arc<RestServerRealIpConfig>>) -> Router<()> {
        Router::new()
            .merge(routes::health::router(self.health.into()))
            .merge(routes::projects::router(self.projects.into()))
            .merge(routes::contact::router(self.contact.into()))
            .apply(middlewares::panic_handler::add)
            .apply(middlewares::trace::add)
            .apply(middlewares::request_id::add)
            .apply(middlewares::client_ip::add(real_ip))
            .apply(middlewares::cors::add)
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for ctrl-c: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!("Failed to listen for SIGTERM: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }

    info!("Shutting down");
}
