#![cfg(test)]
use sea_orm::DatabaseConnection;
use migration::MigratorTrait;
use models::cafe::NewCafe;
use models::db::{connect_with_config, DatabaseConfig};

/// Fresh in-memory database per test, migrated up.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    // one connection: every sqlite::memory: connection is its own database
    let cfg = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        min_connections: 1,
        acquire_timeout: std::time::Duration::from_secs(10),
        ..DatabaseConfig::default()
    };
    let db = connect_with_config(&cfg).await?;
    migration::Migrator::up(&db, None).await?;
    Ok(db)
}

pub fn new_cafe(name: &str, location: &str) -> NewCafe {
    NewCafe {
        name: name.to_string(),
        map_url: format!("https://maps.example.com/{name}"),
        img_url: format!("https://img.example.com/{name}.jpg"),
        location: location.to_string(),
        seats: "10-20".to_string(),
        has_toilet: false,
        has_wifi: true,
        has_sockets: true,
        can_take_calls: false,
        coffee_price: Some("$3.00".to_string()),
    }
}
