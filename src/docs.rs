// src/docs.rs

use utoipa::OpenApi;
use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};

use crate::handlers;
use crate::models;

#[derive(OpenApi)]
#[openapi(
    paths(
        // --- Auth ---
        handlers::auth::register,
        handlers::auth::login,
        handlers::auth::get_me,

        // --- Tenancy ---
        handlers::tenancy::create_company,
        handlers::tenancy::list_my_companies,

        // --- Orders ---
        handlers::orders::create_order,
        handlers::orders::list_orders,
        handlers::orders::orders_view,
        handlers::orders::get_order,
        handlers::orders::update_order,
        handlers::orders::delete_order,
        handlers::orders::rate_order,
        handlers::stream::orders_stream,

        // --- Directory ---
        handlers::directory::list_customers,
        handlers::directory::create_customer,
        handlers::directory::update_customer,
        handlers::directory::rate_customer,
        handlers::directory::delete_customer,
        handlers::directory::list_carriers,
        handlers::directory::create_carrier,
        handlers::directory::update_carrier,
        handlers::directory::rate_carrier,
        handlers::directory::delete_carrier,

        // --- Locations ---
        handlers::locations::list_locations,
        handlers::locations::create_location,
        handlers::locations::mark_location_used,
        handlers::locations::delete_location,

        // --- Documents ---
        handlers::documents::upload_document,
        handlers::documents::list_order_documents,
        handlers::documents::list_documents,
        handlers::documents::delete_document,
        handlers::documents::generate_order_pdf,

        // --- Stats ---
        handlers::stats::dispatcher_rollups,

        // --- Preferences ---
        handlers::preferences::get_orders_sort,
        handlers::preferences::put_orders_sort,
    ),
    components(
        schemas(
            // --- Auth ---
            models::auth::User,
            models::auth::RegisterUserPayload,
            models::auth::LoginUserPayload,
            models::auth::AuthResponse,

            // --- Tenancy ---
            models::tenancy::Company,
            models::tenancy::CompanyMember,
            handlers::tenancy::CreateCompanyPayload,

            // --- Orders ---
            models::orders::Order,
            models::orders::OrderDraft,
            models::orders::RouteStop,
            models::orders::GoodsItem,
            models::orders::OrderRating,
            handlers::orders::RateOrderPayload,
            handlers::orders::OrdersViewResponse,

            // --- Directory ---
            models::directory::Customer,
            models::directory::CustomerDraft,
            models::directory::CustomerRating,
            models::directory::Carrier,
            models::directory::CarrierDraft,
            models::directory::CarrierRating,
            handlers::directory::RateCustomerPayload,
            handlers::directory::RateCarrierPayload,

            // --- Locations ---
            models::locations::Location,
            models::locations::LocationKind,
            models::locations::LocationDraft,

            // --- Documents ---
            models::documents::OrderDocument,
            models::documents::DocumentKind,
            handlers::documents::GenerateOrderPdfPayload,
            handlers::documents::GenerateOrderPdfResponse,

            // --- Stats ---
            models::stats::DispatcherRollup,

            // --- Preferences ---
            handlers::preferences::SortPreferences,
        )
    ),
    tags(
        (name = "Auth", description = "Autenticação e Registro"),
        (name = "Users", description = "Dados do Usuário e Perfil"),
        (name = "Tenancy", description = "Gestão de Empresas e Acesso"),
        (name = "Orders", description = "Objednávky de transporte e feed ao vivo"),
        (name = "Directory", description = "Diretório de Clientes e Transportadores"),
        (name = "Locations", description = "Locais de nakládka/vykládka guardados"),
        (name = "Documents", description = "Anexos e geração de PDF"),
        (name = "Stats", description = "Rollups por dispečer"),
        (name = "Preferences", description = "Preferências persistidas do utilizador")
    ),
    modifiers(&SecurityAddon)
)]
pub struct ApiDoc;

struct SecurityAddon;

impl utoipa::Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "api_jwt",
            SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
        );
    }
}
