// src/routes.rs

use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::{config::AppState, docs::ApiDoc, handlers};

// Router completo da aplicação (usado pelo main e pelos testes)
pub fn app(app_state: AppState) -> Router {
    let role_routes = Router::new()
        .route(
            "/",
            get(handlers::rbac::list_roles).post(handlers::rbac::create_role),
        )
        .route(
            "/{id}",
            get(handlers::rbac::get_role)
                .patch(handlers::rbac::update_role)
                .delete(handlers::rbac::delete_role),
        );

    Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/roles", role_routes)
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}
