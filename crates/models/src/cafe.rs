use sea_orm::{entity::prelude::*, ActiveModelTrait, ConnectionTrait, Set};
use serde::{Deserialize, Serialize};

use crate::errors;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "cafe")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub name: String,
    pub map_url: String,
    pub img_url: String,
    pub location: String,
    pub seats: String,
    pub has_toilet: bool,
    pub has_wifi: bool,
    pub has_sockets: bool,
    pub can_take_calls: bool,
    pub coffee_price: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

/// Attributes of a cafe that has not been stored yet.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewCafe {
    pub name: String,
    pub map_url: String,
    pub img_url: String,
    pub location: String,
    pub seats: String,
    pub has_toilet: bool,
    pub has_wifi: bool,
    pub has_sockets: bool,
    pub can_take_calls: bool,
    pub coffee_price: Option<String>,
}

fn required(field: &str, value: &str) -> Result<(), errors::ModelError> {
    if value.trim().is_empty() {
        return Err(errors::ModelError::Validation(format!("{field} is required")));
    }
    Ok(())
}

impl NewCafe {
    /// Text columns must be present; length is not limited and `coffee_price` is free-form.
    pub fn validate(&self) -> Result<(), errors::ModelError> {
        required("name", &self.name)?;
        required("map_url", &self.map_url)?;
        required("img_url", &self.img_url)?;
        required("location", &self.location)?;
        required("seats", &self.seats)
    }

    fn into_active_model(self) -> ActiveModel {
        ActiveModel {
            name: Set(self.name),
            map_url: Set(self.map_url),
            img_url: Set(self.img_url),
            location: Set(self.location),
            seats: Set(self.seats),
            has_toilet: Set(self.has_toilet),
            has_wifi: Set(self.has_wifi),
            has_sockets: Set(self.has_sockets),
            can_take_calls: Set(self.can_take_calls),
            coffee_price: Set(self.coffee_price),
            ..Default::default()
        }
    }
}

/// Validate and insert; the store assigns `id`.
pub async fn create<C: ConnectionTrait>(db: &C, new: NewCafe) -> Result<Model, errors::ModelError> {
    new.validate()?;
    let created = new.into_active_model().insert(db).await?;
    Ok(created)
}

/// Overwrite `coffee_price` only, stored as given. Returns `None` when no row has `id`.
pub async fn set_coffee_price<C: ConnectionTrait>(
    db: &C,
    id: i32,
    price: Option<String>,
) -> Result<Option<Model>, errors::ModelError> {
    let Some(found) = Entity::find_by_id(id).one(db).await? else {
        return Ok(None);
    };
    let mut am: ActiveModel = found.into();
    am.coffee_price = Set(price);
    let updated = am.update(db).await?;
    Ok(Some(updated))
}
