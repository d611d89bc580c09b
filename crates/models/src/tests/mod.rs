


use crate::cafe::NewCafe;
use crate::db::{connect_with_config, DatabaseConfig};
use migration::MigratorTrait;
use sea_orm::DatabaseConnection;

/// Fresh in-memory SQLite database with the schema applied.
pub(crate) async fn setup_test_db() -> anyhow::Result<DatabaseConnection> {
    let cfg = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        min_connections: 1,
        ..DatabaseConfig::default()
    };
    let db = connect_with_config(&cfg).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

pub(crate) fn sample(name: &str, location: &str) -> NewCafe {
    NewCafe {
        name: name.to_string(),
        map_url: format!("https://maps.example.com/{name}"),
        img_url: format!("https://img.example.com/{name}.jpg"),
        location: location.to_string(),
        seats: "20-30".to_string(),
        has_toilet: true,
        has_wifi: true,
        has_sockets: false,
        can_take_calls: false,
        coffee_price: Some("£2.40".to_string()),
    }
}
