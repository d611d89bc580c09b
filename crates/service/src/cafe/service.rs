use std::sync::Arc;
use tracing::{info, instrument, warn};

use models::cafe::{Model as Cafe, NewCafe};

use crate::cafe::repository::CafeRepository;
use crate::errors::ServiceError;

/// Application service over the cafe table.
/// Logs the classified failure; callers decide what the client sees.
pub struct CafeService<R: CafeRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: CafeRepository + ?Sized> Clone for CafeService<R> {
    fn clone(&self) -> Self { Self { repo: Arc::clone(&self.repo) } }
}

impl<R: CafeRepository + ?Sized> CafeService<R> {
    pub fn new(repo: Arc<R>) -> Self { Self { repo } }

    pub async fn list(&self) -> Result<Vec<Cafe>, ServiceError> {
        self.repo.list().await
    }

    pub async fn search(&self, location: &str) -> Result<Option<Cafe>, ServiceError> {
        self.repo.find_by_location(location).await
    }

    pub async fn random(&self) -> Result<Cafe, ServiceError> {
        self.repo.random().await
    }

    #[instrument(skip_all, fields(name = %new.name))]
    pub async fn create(&self, new: NewCafe) -> Result<Cafe, ServiceError> {
        match self.repo.create(new).await {
            Ok(c) => {
                info!(cafe_id = c.id, "cafe_created");
                Ok(c)
            }
            Err(e) => {
                warn!(code = e.code(), err = %e, "cafe_create_failed");
                Err(e)
            }
        }
    }

    #[instrument(skip(self, price))]
    pub async fn update_price(&self, id: i32, price: Option<String>) -> Result<Cafe, ServiceError> {
        let res = self.repo.update_price(id, price).await;
        match &res {
            Ok(c) => info!(cafe_id = c.id, price = ?c.coffee_price, "cafe_price_updated"),
            Err(e) => warn!(code = e.code(), err = %e, "cafe_price_update_failed"),
        }
        res
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i32) -> Result<(), ServiceError> {
        let res = self.repo.delete(id).await;
        match &res {
            Ok(()) => info!("cafe_deleted"),
            Err(e) => warn!(code = e.code(), err = %e, "cafe_delete_failed"),
        }
        res
    }
}
