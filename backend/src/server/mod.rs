//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerSettings;
pub use state_builders::build_http_state;

use std::future::Future;
use std::net::SocketAddr;

use actix_web::dev::{Server, ServerHandle, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::{info, warn};

use bloodbank::Trace;
#[cfg(debug_assertions)]
use bloodbank::doc::ApiDoc;
use bloodbank::inbound::http::api_routes;
use bloodbank::inbound::http::health::{HealthState, live, ready};
use bloodbank::inbound::http::json_config;
use bloodbank::inbound::http::state::HttpState;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(json_config())
        .wrap(Trace)
        .service(web::scope("/api").configure(api_routes))
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Resolves on SIGINT, or on SIGTERM where the platform has it.
async fn shutdown_signal() -> std::io::Result<()> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut terminate = signal(SignalKind::terminate())?;
        tokio::select! {
            result = tokio::signal::ctrl_c() => result,
            _ = terminate.recv() => Ok(()),
        }
    }
    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await
    }
}

/// Fail liveness once `signal` fires, then stop the server gracefully.
async fn drain_on<S>(signal: S, server: ServerHandle, health_state: web::Data<HealthState>)
where
    S: Future<Output = std::io::Result<()>>,
{
    if let Err(error) = signal.await {
        warn!(%error, "shutdown signal listener failed; draining now");
    }
    health_state.mark_unhealthy();
    info!("draining connections");
    server.stop(true).await;
}

/// Bind the HTTP listener and mark the health state ready.
///
/// Actix's own signal handling is disabled. SIGINT or SIGTERM fails the
/// liveness probe first, then stops the server gracefully.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
    bind_addr: SocketAddr,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
        })
    })
    .disable_signals()
    .bind(bind_addr)?
    .run();

    actix_web::rt::spawn(drain_on(
        shutdown_signal(),
        server.handle(),
        health_state.clone(),
    ));
    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    //! Shutdown drain behaviour.

    use super::*;

    #[actix_web::test]
    async fn drain_fails_liveness_and_stops_the_server() {
        let health_state = web::Data::new(HealthState::new());
        health_state.mark_ready();
        let server = HttpServer::new(App::new)
            .disable_signals()
            .workers(1)
            .bind(("127.0.0.1", 0))
            .expect("bind ephemeral port")
            .run();
        let handle = server.handle();
        let running = actix_web::rt::spawn(server);

        drain_on(async { Ok(()) }, handle, health_state.clone()).await;

        assert!(!health_state.is_alive());
        running
            .await
            .expect("server task joins")
            .expect("server stops cleanly");
    }
}
