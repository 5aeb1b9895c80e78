// ============================================================================
// HTTP Layer - actix-web routes for the customer service
// ============================================================================
//
// - routes: handlers for POST /customer, GET /customers, GET /customer/{cpf}
// - schema: request body shape validation
// - error:  error kind → status code mapping
// - server: HttpServer bootstrap
//
// ============================================================================

mod error;
mod routes;
mod schema;
mod server;

use actix_web::web;
use std::sync::Arc;

use crate::domain::customer::{CustomerRepository, CustomerService};
use crate::metrics::{self, Metrics};
use crate::settings::PaginationDefaults;

use error::ApiError;

pub use server::run_server;

/// Shared by every worker
#[derive(Clone)]
pub struct AppState {
    pub service: CustomerService,
    pub metrics: Arc<Metrics>,
    pub pagination: PaginationDefaults,
}

impl AppState {
    pub fn new(
        repository: Arc<dyn CustomerRepository>,
        metrics: Arc<Metrics>,
        pagination: PaginationDefaults,
    ) -> Self {
        Self {
            service: CustomerService::new(repository),
            metrics,
            pagination,
        }
    }
}

/// App data, JSON error handling and every route, for one worker
pub fn configure(state: AppState) -> impl FnOnce(&mut web::ServiceConfig) {
    move |cfg: &mut web::ServiceConfig| {
        let json_config = web::JsonConfig::default().error_handler(|err, _req| {
            tracing::debug!(error = %err, "Rejected unreadable JSON body");
            ApiError::Schema(vec![err.to_string()]).into()
        });

        cfg.app_data(web::Data::from(state.metrics.clone()))
            .app_data(web::Data::new(state))
            .app_data(json_config)
            .configure(routes::configure)
            .configure(metrics::configure);
    }
}
