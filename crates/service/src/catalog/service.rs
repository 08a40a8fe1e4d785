use std::sync::Arc;

use tracing::{info, instrument};
use uuid::Uuid;

use super::domain::{NewServiceInput, NewSubService, ServiceListing, SubService};
use super::repository::CatalogRepository;
use crate::errors::ServiceError;

pub struct CatalogService {
    repo: Arc<dyn CatalogRepository>,
}

impl CatalogService {
    pub fn new(repo: Arc<dyn CatalogRepository>) -> Self { Self { repo } }

    #[instrument(skip(self, input), fields(worker_id = %worker_id, category = %input.category))]
    pub async fn add_listing(&self, worker_id: Uuid, input: NewServiceInput) -> Result<ServiceListing, ServiceError> {
        let new: models::listing::NewListing = input.into();
        new.validate()?;
        let created = self.repo.create_listing(worker_id, new).await?;
        info!(service = "catalog", event = "listing_created", listing_id = %created.id);
        Ok(created)
    }

    pub async fn listings_for_worker(&self, worker_id: Uuid) -> Result<Vec<ServiceListing>, ServiceError> {
        self.repo.listings_by_worker(worker_id).await
    }

    pub async fn categories_for_worker(&self, worker_id: Uuid) -> Result<Vec<String>, ServiceError> {
        self.repo.categories_for_worker(worker_id).await
    }

    #[instrument(skip(self))]
    pub async fn approve_listing(&self, id: Uuid) -> Result<ServiceListing, ServiceError> {
        let approved = self.repo.approve_listing(id).await?.ok_or_else(|| ServiceError::not_found("service"))?;
        info!(service = "catalog", event = "listing_approved", listing_id = %id);
        Ok(approved)
    }

    pub async fn sub_services(&self) -> Result<Vec<SubService>, ServiceError> {
        self.repo.sub_services().await
    }

    #[instrument(skip(self, new), fields(name = %new.name))]
    pub async fn add_sub_service(&self, new: NewSubService) -> Result<SubService, ServiceError> {
        models::sub_service::validate(&new.name, &new.category, new.price)?;
        let created = self.repo.create_sub_service(new).await?;
        info!(service = "catalog", event = "sub_service_created", sub_service_id = %created.id);
        Ok(created)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::repository::mock::MockCatalogRepository;

    fn input(category: &str) -> NewServiceInput {
        NewServiceInput {
            title: "Switchboard repair".into(),
            category: category.into(),
            place: "Home".into(),
            description: "Replace faulty switches and sockets".into(),
            images: vec![],
            price: 299.0,
            duration: "1 hour".into(),
        }
    }

    #[tokio::test]
    async fn listings_are_scoped_to_worker_and_start_unapproved() {
        let svc = CatalogService::new(Arc::new(MockCatalogRepository::default()));
        let (a, b) = (Uuid::new_v4(), Uuid::new_v4());
        let l = svc.add_listing(a, input("Electrical")).await.unwrap();
        svc.add_listing(b, input("Plumbing")).await.unwrap();

        assert!(!l.is_approved);
        let mine = svc.listings_for_worker(a).await.unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0].category, "Electrical");
    }

    #[tokio::test]
    async fn categories_are_distinct() {
        let svc = CatalogService::new(Arc::new(MockCatalogRepository::default()));
        let w = Uuid::new_v4();
        for c in ["Electrical", "Plumbing", "Electrical"] {
            svc.add_listing(w, input(c)).await.unwrap();
        }
        assert_eq!(svc.categories_for_worker(w).await.unwrap(), vec!["Electrical", "Plumbing"]);
        assert!(svc.categories_for_worker(Uuid::new_v4()).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn invalid_listing_is_rejected() {
        let svc = CatalogService::new(Arc::new(MockCatalogRepository::default()));
        let mut bad = input("Electrical");
        bad.price = -1.0;
        assert!(matches!(svc.add_listing(Uuid::new_v4(), bad).await, Err(ServiceError::Model(_))));
    }

    #[tokio::test]
    async fn approve_listing() {
        let svc = CatalogService::new(Arc::new(MockCatalogRepository::default()));
        let l = svc.add_listing(Uuid::new_v4(), input("Electrical")).await.unwrap();
        assert!(svc.approve_listing(l.id).await.unwrap().is_approved);
        assert!(matches!(svc.approve_listing(Uuid::new_v4()).await, Err(ServiceError::NotFound(_))));
    }

    #[tokio::test]
    async fn sub_services_are_validated() {
        let svc = CatalogService::new(Arc::new(MockCatalogRepository::default()));
        svc.add_sub_service(NewSubService { name: "Fan install".into(), category: "Electrical".into(), price: 150.0 })
            .await
            .unwrap();
        let too_long = NewSubService { name: "x".repeat(61), category: "Electrical".into(), price: 1.0 };
        assert!(svc.add_sub_service(too_long).await.is_err());
        assert_eq!(svc.sub_services().await.unwrap().len(), 1);
    }
}
