use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceListing {
    pub id: Uuid,
    pub worker_id: Uuid,
    pub title: String,
    pub category: String,
    pub place: String,
    pub description: String,
    pub images: Vec<String>,
    pub price: f64,
    pub duration: String,
    pub is_approved: bool,
    pub created_at: DateTime<Utc>,
}

/// Body of "add service". Listings start unapproved.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewServiceInput {
    pub title: String,
    pub category: String,
    pub place: String,
    pub description: String,
    #[serde(default)]
    pub images: Vec<String>,
    pub price: f64,
    pub duration: String,
}

impl From<NewServiceInput> for models::listing::NewListing {
    fn from(i: NewServiceInput) -> Self {
        Self {
            title: i.title,
            category: i.category,
            place: i.place,
            description: i.description,
            images: i.images,
            price: i.price,
            duration: i.duration,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubService {
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub price: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSubService {
    pub name: String,
    pub category: String,
    pub price: f64,
}

impl From<models::listing::Model> for ServiceListing {
    fn from(m: models::listing::Model) -> Self {
        Self {
            images: models::listing::image_urls(&m.images),
            id: m.id,
            worker_id: m.worker_id,
            title: m.title,
            category: m.category,
            place: m.place,
            description: m.description,
            price: m.price,
            duration: m.duration,
            is_approved: m.is_approved,
            created_at: m.created_at.with_timezone(&Utc),
        }
    }
}

impl From<models::sub_service::Model> for SubService {
    fn from(m: models::sub_service::Model) -> Self {
        Self { id: m.id, name: m.name, category: m.category, price: m.price }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn images_default_to_empty() {
        let input: NewServiceInput = serde_json::from_value(serde_json::json!({
            "title": "Fan repair",
            "category": "Electrical",
            "place": "Home",
            "description": "Ceiling fans",
            "price": 250.0,
            "duration": "1 hour"
        }))
        .unwrap();
        assert!(input.images.is_empty());
    }
}
