pub mod users_repo;
pub use users_repo::UserRepository;
pub mod tenancy_repo;
pub use tenancy_repo::CompanyRepository;
pub mod orders_repo;
pub use orders_repo::OrdersRepository;
pub mod directory_repo;
pub use directory_repo::DirectoryRepository;
pub mod locations_repo;
pub use locations_repo::LocationsRepository;
pub mod documents_repo;
pub use documents_repo::DocumentsRepository;
pub mod preferences_repo;
pub use preferences_repo::PreferencesRepository;
