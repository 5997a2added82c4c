//src/main.rs

use axum::{
    Router,
    middleware as axum_middleware,
    routing::{get, post, put},
};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, services::ServeDir};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

mod common;
mod config;
mod db;
mod docs;
mod handlers;
mod middleware;
mod models;
mod services;
mod sync;

use crate::config::AppState;
use crate::middleware::auth::auth_guard;
use crate::middleware::tenancy::tenant_guard;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt().with_target(false).compact().init();

    // .expect() é bom aqui: se a configuração falhar, a aplicação não deve iniciar.
    let app_state = AppState::new()
        .await
        .expect("Falha ao inicializar o estado da aplicação.");

    // Roda as migrações do SQLx na inicialização
    sqlx::migrate!()
        .run(&app_state.db_pool)
        .await
        .expect("Falha ao rodar as migrações do banco de dados.");

    tracing::info!("✅ Migrações do banco de dados executadas com sucesso!");

    // Rotas públicas de autenticação
    let auth_routes = Router::new()
        .route("/register", post(handlers::auth::register))
        .route("/login", post(handlers::auth::login));

    // Rotas do usuário (protegidas por auth, sem tenant)
    let user_routes = Router::new()
        .route("/me", get(handlers::auth::get_me))
        .route("/me/companies", get(handlers::tenancy::list_my_companies))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    let company_routes = Router::new()
        .route("/", post(handlers::tenancy::create_company))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Preferências persistidas (por utilizador, não por tenant)
    let preference_routes = Router::new()
        .route(
            "/orders-sort",
            get(handlers::preferences::get_orders_sort)
                .put(handlers::preferences::put_orders_sort),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            auth_guard,
        ));

    // Tudo daqui para baixo é isolado por tenant (x-company-id + associação)
    let order_routes = Router::new()
        .route(
            "/",
            post(handlers::orders::create_order).get(handlers::orders::list_orders),
        )
        .route("/view", get(handlers::orders::orders_view))
        .route("/stream", get(handlers::stream::orders_stream))
        .route(
            "/{order_id}",
            get(handlers::orders::get_order)
                .put(handlers::orders::update_order)
                .delete(handlers::orders::delete_order),
        )
        .route("/{order_id}/rating", post(handlers::orders::rate_order))
        .route(
            "/{order_id}/documents",
            post(handlers::documents::upload_document)
                .get(handlers::documents::list_order_documents),
        )
        .route("/{order_id}/pdf", post(handlers::documents::generate_order_pdf))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            tenant_guard,
        ));

    let customer_routes = Router::new()
        .route(
            "/",
            post(handlers::directory::create_customer).get(handlers::directory::list_customers),
        )
        .route(
            "/{customer_id}",
            put(handlers::directory::update_customer)
                .delete(handlers::directory::delete_customer),
        )
        .route(
            "/{customer_id}/rating",
            post(handlers::directory::rate_customer),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            tenant_guard,
        ));

    let carrier_routes = Router::new()
        .route(
            "/",
            post(handlers::directory::create_carrier).get(handlers::directory::list_carriers),
        )
        .route(
            "/{carrier_id}",
            put(handlers::directory::update_carrier).delete(handlers::directory::delete_carrier),
        )
        .route(
            "/{carrier_id}/rating",
            post(handlers::directory::rate_carrier),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            tenant_guard,
        ));

    let location_routes = Router::new()
        .route(
            "/",
            post(handlers::locations::create_location).get(handlers::locations::list_locations),
        )
        .route(
            "/{location_id}",
            axum::routing::delete(handlers::locations::delete_location),
        )
        .route(
            "/{location_id}/usage",
            post(handlers::locations::mark_location_used),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            tenant_guard,
        ));

    let document_routes = Router::new()
        .route("/", get(handlers::documents::list_documents))
        .route(
            "/{document_id}",
            axum::routing::delete(handlers::documents::delete_document),
        )
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            tenant_guard,
        ));

    let stats_routes = Router::new()
        .route("/dispatchers", get(handlers::stats::dispatcher_rollups))
        .layer(axum_middleware::from_fn_with_state(
            app_state.clone(),
            tenant_guard,
        ));

    // Combina tudo no router principal
    let app = Router::new()
        .route("/api/health", get(|| async { "OK" }))
        .nest("/api/auth", auth_routes)
        .nest("/api/users", user_routes)
        .nest("/api/companies", company_routes)
        .nest("/api/preferences", preference_routes)
        .nest("/api/orders", order_routes)
        .nest("/api/customers", customer_routes)
        .nest("/api/carriers", carrier_routes)
        .nest("/api/locations", location_routes)
        .nest("/api/documents", document_routes)
        .nest("/api/stats", stats_routes)
        // Blob store local servido em /files
        .nest_service("/files", ServeDir::new(app_state.storage.root()))
        .merge(
            SwaggerUi::new("/swagger-ui")
                .url("/api-docs/openapi.json", docs::ApiDoc::openapi()),
        )
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // Inicia o servidor
    let addr = "0.0.0.0:3000";
    let listener = TcpListener::bind(addr)
        .await
        .expect("Falha ao iniciar o listener TCP");
    tracing::info!("🚀 Servidor escutando em {}", listener.local_addr().unwrap());
    axum::serve(listener, app)
        .await
        .expect("Erro no servidor Axum");
}
