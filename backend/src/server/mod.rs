//! Server construction and middleware wiring.

mod config;
#[cfg(feature = "metrics")]
mod metrics;
mod shutdown;
mod state_builders;

pub use config::ServerConfig;
pub use shutdown::shutdown_on_signal;
#[cfg(feature = "metrics")]
pub(crate) use metrics::prometheus;
pub use state_builders::build_http_state;

#[cfg(feature = "metrics")]
use metrics::MetricsLayer;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use geriatrics_portal::Trace;
#[cfg(debug_assertions)]
use geriatrics_portal::doc::ApiDoc;
use geriatrics_portal::inbound::http::analyze::analyze;
use geriatrics_portal::inbound::http::error::{json_config, query_config};
use geriatrics_portal::inbound::http::health::{HealthState, live, ready};
use geriatrics_portal::inbound::http::medical_research::{
    get_article, list_guidelines, research_symptom, search_literature,
};
use geriatrics_portal::inbound::http::pages::{dashboard, home};
use geriatrics_portal::inbound::http::state::HttpState;
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
        .app_data(query_config())
        .wrap(Trace)
        .service(home)
        .service(dashboard)
        .service(analyze)
        .service(search_literature)
        .service(research_symptom)
        .service(list_guidelines)
        .service(get_article)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));

    app
}

/// Construct an Actix HTTP server for the portal.
///
/// Readiness is flipped once the listener is bound.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    http_state: HttpState,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let server_health_state = health_state.clone();
    let http_state = web::Data::new(http_state);
    let ServerConfig {
        bind_addr,
        #[cfg(feature = "metrics")]
        prometheus,
    } = config;

    #[cfg(feature = "metrics")]
    let metrics_layer = MetricsLayer::from_option(prometheus);

    let server = HttpServer::new(move || {
        let app = build_app(AppDependencies {
            health_state: server_health_state.clone(),
            http_state: http_state.clone(),
        });

        #[cfg(feature = "metrics")]
        let app = app.wrap(metrics_layer.clone());

        app
    })
    .disable_signals()
    .bind(bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::http::StatusCode;
    use actix_web::test as actix_test;
    use rstest::rstest;

    fn deps() -> AppDependencies {
        AppDependencies {
            health_state: web::Data::new(HealthState::new()),
            http_state: web::Data::new(HttpState::default()),
        }
    }

    #[rstest]
    #[case::home("/", StatusCode::OK)]
    #[case::dashboard("/dashboard", StatusCode::OK)]
    #[case::guidelines("/api/medical-research/guidelines", StatusCode::OK)]
    #[case::missing_symptom("/api/medical-research", StatusCode::BAD_REQUEST)]
    #[case::not_ready("/health/ready", StatusCode::SERVICE_UNAVAILABLE)]
    #[case::unknown("/nope", StatusCode::NOT_FOUND)]
    #[actix_web::test]
    async fn routes_are_registered(#[case] uri: &str, #[case] expected: StatusCode) {
        let app = actix_test::init_service(build_app(deps())).await;
        let response =
            actix_test::call_service(&app, actix_test::TestRequest::get().uri(uri).to_request())
                .await;
        assert_eq!(response.status(), expected);
        assert!(response.headers().contains_key("trace-id"));
    }
}
