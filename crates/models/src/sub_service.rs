use sea_orm::{entity::prelude::*, ConnectionTrait, Set};
use uuid::Uuid;
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::ModelError;
use crate::validate;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "sub_service")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    pub category: String,
    pub price: f64,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match *self {}
    }
}

impl ActiveModelBehavior for ActiveModel {}

pub fn validate(name: &str, category: &str, price: f64) -> Result<(), ModelError> {
    validate::required("name", name)?;
    validate::max_chars("name", name.trim(), 60)?;
    validate::required("category", category)?;
    validate::max_chars("category", category.trim(), 40)?;
    validate::price(price)
}

pub async fn create<C: ConnectionTrait>(db: &C, name: &str, category: &str, price: f64) -> Result<Model, ModelError> {
    validate(name, category, price)?;
    let now = Utc::now().into();
    let am = ActiveModel {
        id: Set(Uuid::new_v4()),
        name: Set(name.trim().to_string()),
        category: Set(category.trim().to_string()),
        price: Set(price),
        created_at: Set(now),
        updated_at: Set(now),
    };
    am.insert(db).await.map_err(ModelError::db)
}

#[cfg(test)]
mod tests {
    use super::validate;

    #[test]
    fn name_and_category_limits() {
        assert!(validate("Deep cleaning", "Cleaning", 799.0).is_ok());
        assert!(validate(&"n".repeat(61), "Cleaning", 1.0).is_err());
        assert!(validate("Deep cleaning", &"c".repeat(41), 1.0).is_err());
        assert!(validate("Deep cleaning", "Cleaning", -0.5).is_err());
    }
}
