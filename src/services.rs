pub mod auth;
pub use auth::AuthService;
pub mod tenancy_service;
pub use tenancy_service::TenancyService;
pub mod orders_service;
pub use orders_service::OrdersService;
pub mod directory_service;
pub use directory_service::DirectoryService;
pub mod locations_service;
pub use locations_service::LocationsService;
pub mod documents_service;
pub use documents_service::DocumentsService;
pub mod pdf_service;
pub use pdf_service::PdfService;
pub mod stats_service;
pub use stats_service::StatsService;
pub mod storage;
pub use storage::FileStorage;
