//! Worker-listed services (`service` table).
use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::{validate, worker};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "service")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub worker_id: Uuid,
    pub title: String,
    pub category: String,
    pub place: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    /// JSON array of image URLs
    pub images: Json,
    pub price: f64,
    pub duration: String,
    pub is_approved: bool,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation { Worker }

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Worker => Entity::belongs_to(worker::Entity)
                .from(Column::WorkerId)
                .to(worker::Column::Id)
                .into(),
        }
    }
}

impl Related<worker::Entity> for Entity {
    fn to() -> RelationDef { Relation::Worker.def() }
}

impl ActiveModelBehavior for ActiveModel {}

#[derive(Debug, Clone)]
pub struct NewListing {
    pub title: String,
    pub category: String,
    pub place: String,
    pub description: String,
    pub images: Vec<String>,
    pub price: f64,
    pub duration: String,
}

impl NewListing {
    pub fn validate(&self) -> Result<(), ModelError> {
        validate::required("title", &self.title)?;
        validate::max_chars("title", self.title.trim(), 128)?;
        validate::required("category", &self.category)?;
        validate::max_chars("category", self.category.trim(), 64)?;
        validate::required("place", &self.place)?;
        validate::max_chars("place", self.place.trim(), 64)?;
        validate::required("description", &self.description)?;
        validate::required("duration", &self.duration)?;
        validate::max_chars("duration", self.duration.trim(), 64)?;
        validate::price(self.price)?;
        if self.images.iter().any(|url| url.trim().is_empty()) {
            return Err(ModelError::Validation("image urls cannot be empty".into()));
        }
        Ok(())
    }
}

/// Decode the `images` JSON column, skipping anything that is not a string.
pub fn image_urls(images: &Json) -> Vec<String> {
    match images {
        Json::Array(items) => items.iter().filter_map(|v| v.as_str().map(str::to_string)).collect(),
        _ => Vec::new(),
    }
}

pub async fn create<C: ConnectionTrait>(db: &C, worker_id: Uuid, new: NewListing) -> Result<Model, ModelError> {
    new.validate()?;
    let now = Utc::now().into();
    let images = new.images.iter().map(|u| Json::String(u.trim().to_string())).collect();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        worker_id: Set(worker_id),
        title: Set(new.title.trim().to_string()),
        category: Set(new.category.trim().to_string()),
        place: Set(new.place.trim().to_string()),
        description: Set(new.description.trim().to_string()),
        images: Set(Json::Array(images)),
        price: Set(new.price),
        duration: Set(new.duration.trim().to_string()),
        is_approved: Set(false),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await.map_err(ModelError::db)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn listing() -> NewListing {
        NewListing {
            title: "Split AC installation".into(),
            category: "AC Installation".into(),
            place: "Home".into(),
            description: "Wall-mounted split unit, piping up to 3m included".into(),
            images: vec!["https://cdn.example.com/ac.jpg".into()],
            price: 1499.0,
            duration: "2 hours".into(),
        }
    }

    #[test]
    fn valid_listing_passes() {
        assert!(listing().validate().is_ok());
    }

    #[test]
    fn rejects_negative_price_and_blank_fields() {
        let mut l = listing();
        l.price = -10.0;
        assert!(l.validate().is_err());

        let mut l = listing();
        l.category = " ".into();
        assert!(l.validate().is_err());

        let mut l = listing();
        l.images.push("".into());
        assert!(l.validate().is_err());
    }

    #[test]
    fn no_images_is_allowed() {
        let mut l = listing();
        l.images.clear();
        assert!(l.validate().is_ok());
    }

    #[test]
    fn image_urls_ignores_non_strings() {
        let json = serde_json::json!(["a.jpg", 3, null, "b.jpg"]);
        assert_eq!(image_urls(&json), vec!["a.jpg".to_string(), "b.jpg".to_string()]);
        assert!(image_urls(&serde_json::json!({"a": 1})).is_empty());
    }
}
