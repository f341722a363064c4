//! # Backend Module
//!
//! Everything except the browser page: the domain logic, the record stores it
//! syncs with, and the REST layer exposing it.
//!
//! ## Architecture
//!
//! ```text
//! Browser page
//!     ↓
//! IO Layer (REST API, handlers)
//!     ↓
//! Domain Layer (view-model, table, form, summary, auth gate)
//!     ↓
//! Storage Layer (record stores, staff accounts)
//! ```
//!
//! The store pushes whole-collection snapshots through a channel; one
//! background task applies them to the view-model. Handlers read the
//! view-model and write through the store.

pub mod config;
pub mod domain;
pub mod io;
pub mod storage;

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    http::{HeaderValue, Method},
    routing::{get, post},
    Router,
};
use chrono::NaiveDate;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tracing::{info, warn};

use crate::backend::config::{AppConfig, StorageKind};
use crate::backend::domain::{
    AuthGate, MonthlySummaryService, SaleFormService, SalesService, SalesTableConfig, SalesTableService,
};
use crate::backend::storage::{
    AuthProvider, CsvConnection, CsvRecordStore, MemoryRecordStore, RecordStore, StaffAccountProvider,
};

/// Main application state that holds all services
#[derive(Clone)]
pub struct AppState {
    pub sales_service: SalesService,
    pub sales_table_service: SalesTableService,
    pub sale_form_service: SaleFormService,
    pub summary_service: MonthlySummaryService,
    pub auth_gate: AuthGate,
}

impl AppState {
    pub fn new(store: Arc<dyn RecordStore>, auth: Arc<dyn AuthProvider>, config: &AppConfig) -> Self {
        Self {
            sales_service: SalesService::new(store, config.collection.clone(), config.numeric_input_policy),
            sales_table_service: SalesTableService::with_config(SalesTableConfig {
                date_format: config.date_format,
            }),
            sale_form_service: SaleFormService::new(),
            summary_service: MonthlySummaryService::new(),
            auth_gate: AuthGate::new(auth),
        }
    }
}

/// Today's date on the server's clock
pub fn today() -> NaiveDate {
    chrono::Local::now().date_naive()
}

/// Build the record store named in the configuration
pub fn create_record_store(config: &AppConfig) -> Result<Arc<dyn RecordStore>> {
    match config.storage {
        StorageKind::Memory => {
            info!("Using in-memory record store");
            Ok(Arc::new(MemoryRecordStore::new()))
        }
        StorageKind::Csv => {
            let directory = config.resolve_data_directory();
            let connection = CsvConnection::new(&directory)
                .with_context(|| format!("opening data directory {}", directory.display()))?;
            info!("Using CSV record store in {}", connection.base_directory().display());
            Ok(Arc::new(CsvRecordStore::new(connection)))
        }
    }
}

/// Initialize the backend with all required services and start syncing
pub async fn initialize_backend(config: &AppConfig) -> Result<AppState> {
    info!("Setting up record store");
    let store = create_record_store(config)?;

    let staff = StaffAccountProvider::new(config.staff.clone());
    if staff.account_count() == 0 {
        warn!("No staff accounts configured; nobody can sign in");
    } else {
        info!("{} staff account(s) configured", staff.account_count());
    }
    let auth: Arc<dyn AuthProvider> = Arc::new(staff);

    info!("Setting up domain model");
    let app_state = AppState::new(store, auth, config);
    app_state.sales_service.start_sync().await?;

    Ok(app_state)
}

/// Create the Axum router with all routes configured
pub fn create_router(app_state: AppState, config: &AppConfig) -> Router {
    let mut cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);
    if let Some(origin) = &config.cors_origin {
        match origin.parse::<HeaderValue>() {
            Ok(origin) => cors = cors.allow_origin(origin),
            Err(e) => warn!("Ignoring invalid cors_origin '{}': {}", origin, e),
        }
    }

    let api_routes = Router::new()
        .route("/sales", get(io::list_sales).post(io::create_sale))
        .route("/sales/table", get(io::get_sales_table))
        .route("/sales/totals", get(io::get_sales_totals))
        .route("/sales/summary/monthly", get(io::get_monthly_summary))
        .route("/sales/form", get(io::get_sale_form))
        .route("/sales/form/input", post(io::apply_sale_form_input))
        .route("/sales/edit/begin", post(io::begin_sale_edit))
        .route("/sales/edit/commit", post(io::commit_sale_edit))
        .route("/auth/login", post(io::login))
        .route("/auth/logout", post(io::logout))
        .route("/auth/status", get(io::auth_status))
        .route("/logs", post(io::log_message));

    let router = Router::new().nest("/api", api_routes);
    let router = match &config.static_directory {
        Some(directory) => router.fallback_service(ServeDir::new(directory)),
        None => router,
    };

    router.layer(cors).with_state(app_state)
}
