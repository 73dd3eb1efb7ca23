use migration::{Migrator, MigratorTrait};
use sea_orm::Database;

use crate::prelude::*;

pub struct AppState {
  pub db: DatabaseConnection,
  /// Public origin embedded into generated affiliate links.
  pub base_url: String,
}

impl AppState {
  pub async fn new(db_url: &str, base_url: &str) -> Self {
    let db = Database::connect(db_url)
      .await
      .expect("Failed to connect to database");
    Migrator::up(&db, None).await.expect("Failed to run migrations");

    Self { db, base_url: base_url.trim_end_matches('/').to_string() }
  }
}
