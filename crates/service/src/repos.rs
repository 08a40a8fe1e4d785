use std::sync::Arc;

use sea_orm::DatabaseConnection;

use crate::catalog::repository::{mock::MockCatalogRepository, CatalogRepository};
use crate::catalog::seaorm::SeaOrmCatalogRepository;
use crate::requests::repository::{mock::MockRequestRepository, RequestRepository};
use crate::requests::seaorm::SeaOrmRequestRepository;
use crate::worker::repository::{mock::MockWorkerRepository, WorkerRepository};
use crate::worker::seaorm::SeaOrmWorkerRepository;

/// The repositories the services are built from, behind trait objects.
#[derive(Clone)]
pub struct Repositories {
    pub workers: Arc<dyn WorkerRepository>,
    pub catalog: Arc<dyn CatalogRepository>,
    pub requests: Arc<dyn RequestRepository>,
}

impl Repositories {
    pub fn seaorm(db: DatabaseConnection) -> Self {
        Self {
            workers: Arc::new(SeaOrmWorkerRepository::new(db.clone())),
            catalog: Arc::new(SeaOrmCatalogRepository::new(db.clone())),
            requests: Arc::new(SeaOrmRequestRepository::new(db)),
        }
    }
}

/// In-memory repositories with typed handles kept for seeding and assertions.
#[derive(Clone, Default)]
pub struct InMemory {
    pub workers: Arc<MockWorkerRepository>,
    pub catalog: Arc<MockCatalogRepository>,
    pub requests: Arc<MockRequestRepository>,
}

impl InMemory {
    pub fn repositories(&self) -> Repositories {
        Repositories {
            workers: self.workers.clone(),
            catalog: self.catalog.clone(),
            requests: self.requests.clone(),
        }
    }
}
