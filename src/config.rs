// src/config.rs

use sqlx::{PgPool, postgres::PgPoolOptions};
use std::{env, time::Duration};

use crate::common::i18n::I18nStore;
use crate::db::{
    CompanyRepository, DirectoryRepository, DocumentsRepository, LocationsRepository,
    OrdersRepository, PreferencesRepository, UserRepository,
};
use crate::services::{
    AuthService, DirectoryService, DocumentsService, FileStorage, LocationsService, OrdersService,
    PdfService, StatsService, TenancyService,
};
use crate::sync::ChangeBus;

#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub jwt_secret: String,
    pub i18n_store: I18nStore,
    pub change_bus: ChangeBus,
    pub storage: FileStorage,

    pub users_repo: UserRepository,
    pub company_repo: CompanyRepository,
    pub orders_repo: OrdersRepository,
    pub preferences_repo: PreferencesRepository,

    pub auth_service: AuthService,
    pub tenancy_service: TenancyService,
    pub orders_service: OrdersService,
    pub directory_service: DirectoryService,
    pub locations_service: LocationsService,
    pub documents_service: DocumentsService,
    pub pdf_service: PdfService,
    pub stats_service: StatsService,
}

impl AppState {
    // A assinatura retorna um Result: se a configuração falhar, quem decide
    // é o main.
    pub async fn new() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let database_url = env::var("DATABASE_URL").expect("DATABASE_URL deve ser definida");
        let jwt_secret = env::var("JWT_SECRET").expect("JWT_SECRET deve ser definido");
        let storage_dir = env::var("STORAGE_DIR").unwrap_or_else(|_| "./storage".to_string());

        // Conecta ao banco de dados, usando '?' para propagar erros
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(3))
            .connect(&database_url)
            .await?;

        tracing::info!("✅ Conexão com o banco de dados estabelecida com sucesso!");

        // --- Monta o gráfico de dependências ---
        let i18n_store = I18nStore::new();
        let change_bus = ChangeBus::default();
        let storage = FileStorage::new(&storage_dir, "/files");

        let users_repo = UserRepository::new(db_pool.clone());
        let company_repo = CompanyRepository::new(db_pool.clone());
        let orders_repo = OrdersRepository::new(db_pool.clone());
        let directory_repo = DirectoryRepository::new(db_pool.clone());
        let locations_repo = LocationsRepository::new(db_pool.clone());
        let documents_repo = DocumentsRepository::new(db_pool.clone());
        let preferences_repo = PreferencesRepository::new(db_pool.clone());

        let auth_service =
            AuthService::new(users_repo.clone(), jwt_secret.clone(), db_pool.clone());
        let tenancy_service = TenancyService::new(company_repo.clone(), db_pool.clone());
        let orders_service =
            OrdersService::new(orders_repo.clone(), change_bus.clone(), db_pool.clone());
        let directory_service =
            DirectoryService::new(directory_repo, change_bus.clone(), db_pool.clone());
        let locations_service =
            LocationsService::new(locations_repo, change_bus.clone(), db_pool.clone());
        let documents_service = DocumentsService::new(
            documents_repo,
            orders_repo.clone(),
            storage.clone(),
            change_bus.clone(),
            db_pool.clone(),
        );
        let pdf_service =
            PdfService::new(orders_repo.clone(), i18n_store.clone(), db_pool.clone());
        let stats_service =
            StatsService::new(orders_repo.clone(), users_repo.clone(), db_pool.clone());

        Ok(Self {
            db_pool,
            jwt_secret,
            i18n_store,
            change_bus,
            storage,
            users_repo,
            company_repo,
            orders_repo,
            preferences_repo,
            auth_service,
            tenancy_service,
            orders_service,
            directory_service,
            locations_service,
            documents_service,
            pdf_service,
            stats_service,
        })
    }
}
