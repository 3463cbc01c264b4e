pub mod config;
pub mod database;
pub mod dto;
pub mod error;
pub mod extract;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use sqlx::PgPool;

use crate::config::Config;
use crate::services::certificate_service::CertificateService;
use crate::services::exam_bank::ExamBankService;

#[derive(Clone)]
pub struct AppState {
    pub pool: PgPool,
    pub config: Config,
    pub exam_bank: ExamBankService,
    pub certificate_service: CertificateService,
}

impl AppState {
    pub fn new(pool: PgPool, config: Config) -> Self {
        let exam_bank = ExamBankService::new(config.exam_bank_dir.clone());
        let certificate_service = CertificateService::new(
            config.cert_service_url.clone(),
            config.internal_api_secret.clone(),
        );

        Self {
            pool,
            config,
            exam_bank,
            certificate_service,
        }
    }
}
