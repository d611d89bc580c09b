use async_trait::async_trait;
use sea_orm::DatabaseConnection;

use models::cafe::{Model as Cafe, NewCafe};

use crate::errors::ServiceError;

#[async_trait]
pub trait CafeRepository: Send + Sync {
    async fn list(&self) -> Result<Vec<Cafe>, ServiceError>;
    async fn find_by_location(&self, location: &str) -> Result<Option<Cafe>, ServiceError>;
    async fn random(&self) -> Result<Cafe, ServiceError>;
    async fn create(&self, new: NewCafe) -> Result<Cafe, ServiceError>;
    async fn update_price(&self, id: i32, price: Option<String>) -> Result<Cafe, ServiceError>;
    async fn delete(&self, id: i32) -> Result<(), ServiceError>;
}

/// SeaORM-backed repository implementation.
#[derive(Clone)]
pub struct SeaOrmCafeRepository {
    pub db: DatabaseConnection,
}

#[async_trait]
impl CafeRepository for SeaOrmCafeRepository {
    async fn list(&self) -> Result<Vec<Cafe>, ServiceError> {
        crate::db::cafe_service::list_cafes(&self.db).await
    }

    async fn find_by_location(&self, location: &str) -> Result<Option<Cafe>, ServiceError> {
        crate::db::cafe_service::find_cafe_by_location(&self.db, location).await
    }

    async fn random(&self) -> Result<Cafe, ServiceError> {
        crate::db::cafe_service::random_cafe(&self.db).await
    }

    async fn create(&self, new: NewCafe) -> Result<Cafe, ServiceError> {
        crate::db::cafe_service::create_cafe(&self.db, new).await
    }

    async fn update_price(&self, id: i32, price: Option<String>) -> Result<Cafe, ServiceError> {
        crate::db::cafe_service::update_cafe_price(&self.db, id, price).await
    }

    async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        crate::db::cafe_service::delete_cafe(&self.db, id).await
    }
}
