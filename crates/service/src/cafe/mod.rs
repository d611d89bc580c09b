pub mod repository;
pub mod service;

pub use repository::{CafeRepository, SeaOrmCafeRepository};
pub use service::CafeService;
