use async_trait::async_trait;
use uuid::Uuid;

use super::domain::{NewSubService, ServiceListing, SubService};
use crate::errors::ServiceError;
use models::listing::NewListing;

/// Persistence for listings and sub-services. Inputs arrive validated.
#[async_trait]
pub trait CatalogRepository: Send + Sync {
    async fn create_listing(&self, worker_id: Uuid, new: NewListing) -> Result<ServiceListing, ServiceError>;
    async fn listings_by_worker(&self, worker_id: Uuid) -> Result<Vec<ServiceListing>, ServiceError>;
    /// Distinct categories across the worker's listings.
    async fn categories_for_worker(&self, worker_id: Uuid) -> Result<Vec<String>, ServiceError>;
    async fn approve_listing(&self, id: Uuid) -> Result<Option<ServiceListing>, ServiceError>;

    async fn sub_services(&self) -> Result<Vec<SubService>, ServiceError>;
    async fn create_sub_service(&self, new: NewSubService) -> Result<SubService, ServiceError>;
}

/// Simple in-memory mock repository for tests and doc examples
pub mod mock {
    use super::*;
    use chrono::Utc;
    use std::sync::Mutex;

    #[derive(Default)]
    pub struct MockCatalogRepository {
        listings: Mutex<Vec<ServiceListing>>,
        subs: Mutex<Vec<SubService>>,
    }

    #[async_trait]
    impl CatalogRepository for MockCatalogRepository {
        async fn create_listing(&self, worker_id: Uuid, new: NewListing) -> Result<ServiceListing, ServiceError> {
            let listing = ServiceListing {
                id: Uuid::new_v4(),
                worker_id,
                title: new.title.trim().to_string(),
                category: new.category.trim().to_string(),
                place: new.place.trim().to_string(),
                description: new.description.trim().to_string(),
                images: new.images.iter().map(|u| u.trim().to_string()).collect(),
                price: new.price,
                duration: new.duration.trim().to_string(),
                is_approved: false,
                created_at: Utc::now(),
            };
            self.listings.lock().unwrap().push(listing.clone());
            Ok(listing)
        }

        async fn listings_by_worker(&self, worker_id: Uuid) -> Result<Vec<ServiceListing>, ServiceError> {
            let listings = self.listings.lock().unwrap();
            Ok(listings.iter().filter(|l| l.worker_id == worker_id).cloned().collect())
        }

        async fn categories_for_worker(&self, worker_id: Uuid) -> Result<Vec<String>, ServiceError> {
            let mut cats: Vec<String> = self
                .listings
                .lock()
                .unwrap()
                .iter()
                .filter(|l| l.worker_id == worker_id)
                .map(|l| l.category.clone())
                .collect();
            cats.sort();
            cats.dedup();
            Ok(cats)
        }

        async fn approve_listing(&self, id: Uuid) -> Result<Option<ServiceListing>, ServiceError> {
            let mut listings = self.listings.lock().unwrap();
            let Some(l) = listings.iter_mut().find(|l| l.id == id) else { return Ok(None) };
            l.is_approved = true;
            Ok(Some(l.clone()))
        }

        async fn sub_services(&self) -> Result<Vec<SubService>, ServiceError> {
            Ok(self.subs.lock().unwrap().clone())
        }

        async fn create_sub_service(&self, new: NewSubService) -> Result<SubService, ServiceError> {
            let s = SubService {
                id: Uuid::new_v4(),
                name: new.name.trim().to_string(),
                category: new.category.trim().to_string(),
                price: new.price,
            };
            self.subs.lock().unwrap().push(s.clone());
            Ok(s)
        }
    }
}
