pub use sea_orm_migration::prelude::*;

mod m20260110_000001_create_users;
mod m20260110_000002_create_products;
mod m20260110_000003_create_promotions;
mod m20260110_000004_create_earnings;
mod m20260110_000005_create_event_logs;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
  fn migrations() -> Vec<Box<dyn MigrationTrait>> {
    vec![
      Box::new(m20260110_000001_create_users::Migration),
      Box::new(m20260110_000002_create_products::Migration),
      Box::new(m20260110_000003_create_promotions::Migration),
      Box::new(m20260110_000004_create_earnings::Migration),
      Box::new(m20260110_000005_create_event_logs::Migration),
    ]
  }
}
