use std::sync::Arc;

use service::auth::{AuthService, TokenKeys};
use service::catalog::CatalogService;
use service::mail::Mailer;
use service::requests::RequestService;
use service::worker::WorkerService;
use service::Repositories;

/// Shared handler state: the business services plus the admin key.
#[derive(Clone)]
pub struct ServerState {
    pub auth: Arc<AuthService>,
    pub workers: Arc<WorkerService>,
    pub catalog: Arc<CatalogService>,
    pub requests: Arc<RequestService>,
    /// `None` disables the admin routes entirely.
    pub admin_api_key: Option<Arc<str>>,
}

impl ServerState {
    pub fn new(repos: Repositories, mailer: Arc<dyn Mailer>, auth: &configs::AuthConfig, mail: &configs::MailConfig) -> Self {
        let keys = TokenKeys::new(&auth.jwt_secret, auth.token_ttl_hours);
        Self {
            auth: Arc::new(AuthService::new(repos.workers.clone(), mailer.clone(), keys, auth.otp_ttl_minutes)),
            workers: Arc::new(WorkerService::new(repos.workers.clone())),
            catalog: Arc::new(CatalogService::new(repos.catalog.clone())),
            requests: Arc::new(RequestService::new(repos.requests, repos.catalog, mailer, mail.portal_url.clone())),
            admin_api_key: auth.admin_api_key.as_deref().map(Arc::from),
        }
    }
}
