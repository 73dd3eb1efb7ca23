use sea_orm_migration::prelude::*;

use super::{
  m20260110_000001_create_users::Users,
  m20260110_000002_create_products::Products,
  m20260110_000003_create_promotions::Promotions,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(ProductViews::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(ProductViews::Id)
              .big_integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(
            ColumnDef::new(ProductViews::ProductId).big_integer().not_null(),
          )
          .col(ColumnDef::new(ProductViews::UserId).big_integer().null())
          .col(ColumnDef::new(ProductViews::CreatedAt).date_time().not_null())
          .foreign_key(
            ForeignKey::create()
              .name("fk_product_views_product")
              .from(ProductViews::Table, ProductViews::ProductId)
              .to(Products::Table, Products::Id)
              .on_delete(ForeignKeyAction::Cascade),
          )
          // Event logs are audit trails: deleting the actor keeps the
          // row and only clears the reference.
          .foreign_key(
            ForeignKey::create()
              .name("fk_product_views_user")
              .from(ProductViews::Table, ProductViews::UserId)
              .to(Users::Table, Users::Id)
              .on_delete(ForeignKeyAction::SetNull),
          )
          .to_owned(),
      )
      .await?;

    manager
      .create_index(
        Index::create()
          .name("idx_product_views_product")
          .table(ProductViews::Table)
          .col(ProductViews::ProductId)
          .to_owned(),
      )
      .await?;

    manager
      .create_table(
        Table::create()
          .table(PromotionClicks::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(PromotionClicks::Id)
              .big_integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(
            ColumnDef::new(PromotionClicks::PromotionId)
              .big_integer()
              .not_null(),
          )
          .col(ColumnDef::new(PromotionClicks::UserId).big_integer().null())
          .col(
            ColumnDef::new(PromotionClicks::IsConversion)
              .boolean()
              .not_null()
              .default(false),
          )
          .col(
            ColumnDef::new(PromotionClicks::Earnings)
              .big_integer()
              .not_null()
              .default(0),
          )
          .col(
            ColumnDef::new(PromotionClicks::CreatedAt).date_time().not_null(),
          )
          .foreign_key(
            ForeignKey::create()
              .name("fk_promotion_clicks_promotion")
              .from(PromotionClicks::Table, PromotionClicks::PromotionId)
              .to(Promotions::Table, Promotions::Id)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .foreign_key(
            ForeignKey::create()
              .name("fk_promotion_clicks_user")
              .from(PromotionClicks::Table, PromotionClicks::UserId)
              .to(Users::Table, Users::Id)
              .on_delete(ForeignKeyAction::SetNull),
          )
          .to_owned(),
      )
      .await?;

    manager
      .create_index(
        Index::create()
          .name("idx_promotion_clicks_promotion")
          .table(PromotionClicks::Table)
          .col(PromotionClicks::PromotionId)
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .drop_table(Table::drop().table(PromotionClicks::Table).to_owned())
      .await?;
    manager
      .drop_table(Table::drop().table(ProductViews::Table).to_owned())
      .await
  }
}

#[derive(DeriveIden)]
pub enum ProductViews {
  Table,
  Id,
  ProductId,
  UserId,
  CreatedAt,
}

#[derive(DeriveIden)]
pub enum PromotionClicks {
  Table,
  Id,
  PromotionId,
  UserId,
  IsConversion,
  Earnings,
  CreatedAt,
}
