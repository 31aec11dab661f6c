//! Server construction and middleware wiring.

mod config;

pub use config::ServerConfig;

use config::Binding;

use actix_cors::Cors;
use actix_web::body::{BoxBody, EitherBody};
use actix_web::dev::{Server, ServerHandle, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::inbound::http::error::path_error_handler;
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::posts;
use crate::inbound::http::state::HttpState;
use crate::middleware::{JsonContentType, Trace};
use tracing::info;

/// Shared state handed to every worker's [`App`].
#[derive(Clone)]
pub struct AppDependencies {
    pub health_state: web::Data<HealthState>,
    pub http_state: web::Data<HttpState>,
    pub cors_permissive: bool,
}

fn cors(permissive: bool) -> Cors {
    if permissive {
        Cors::permissive()
    } else {
        Cors::default()
    }
}

/// Assemble the application: `/api` routes, health probes, and docs.
pub fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<EitherBody<BoxBody>>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
        cors_permissive,
    } = deps;

    let api = web::scope("/api")
        .wrap(JsonContentType)
        .configure(posts::configure);

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(web::PathConfig::default().error_handler(path_error_handler))
        .wrap(cors(cors_permissive))
        .wrap(Trace)
        .service(api)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server over `http_state`.
///
/// Readiness is marked once the listener is bound. The returned [`Server`]
/// must be awaited (or spawned) to accept connections. Actix's own signal
/// handling is disabled; callers stop the server through [`drain`].
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    http_state: HttpState,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let ServerConfig {
        binding,
        cors_permissive,
    } = config;
    let deps = AppDependencies {
        health_state: health_state.clone(),
        http_state: web::Data::new(http_state),
        cors_permissive,
    };

    let server = HttpServer::new(move || build_app(deps.clone())).disable_signals();
    let server = match binding {
        Binding::Addr(addr) => server.bind(addr)?,
        Binding::Listener(listener) => server.listen(listener)?,
    }
    .run();

    health_state.mark_ready();
    Ok(server)
}

/// Fail liveness probes, then stop the server once in-flight requests finish.
pub async fn drain(health_state: &HealthState, handle: ServerHandle) {
    health_state.mark_draining();
    info!("draining board server");
    handle.stop(true).await;
}

/// Resolve on Ctrl-C or, on Unix, SIGTERM.
///
/// # Errors
/// Returns [`std::io::Error`] when a signal listener cannot be installed.
pub async fn shutdown_signal() -> std::io::Result<()> {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut terminate = signal(SignalKind::terminate())?;
        tokio::select! {
            res = tokio::signal::ctrl_c() => res,
            _ = terminate.recv() => Ok(()),
        }
    }
    #[cfg(not(unix))]
    {
        tokio::signal::ctrl_c().await
    }
}
