use sea_orm_migration::prelude::*;

use super::{
  m20260110_000001_create_users::Users,
  m20260110_000002_create_products::Products,
};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(Promotions::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(Promotions::Id)
              .big_integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(ColumnDef::new(Promotions::ProductId).big_integer().not_null())
          .col(ColumnDef::new(Promotions::PromoterId).big_integer().not_null())
          .col(ColumnDef::new(Promotions::TrackingCode).string().not_null())
          .col(ColumnDef::new(Promotions::AffiliateLink).string().not_null())
          .col(ColumnDef::new(Promotions::Description).text().null())
          .col(ColumnDef::new(Promotions::CommissionRate).double().not_null())
          .col(ColumnDef::new(Promotions::CommissionType).string().not_null())
          .col(
            ColumnDef::new(Promotions::Status)
              .string()
              .not_null()
              .default("active"),
          )
          .col(
            ColumnDef::new(Promotions::Clicks)
              .big_integer()
              .not_null()
              .default(0),
          )
          .col(
            ColumnDef::new(Promotions::Conversions)
              .big_integer()
              .not_null()
              .default(0),
          )
          .col(
            ColumnDef::new(Promotions::Earnings)
              .big_integer()
              .not_null()
              .default(0),
          )
          .col(ColumnDef::new(Promotions::CustomImages).json().null())
          .col(
            ColumnDef::new(Promotions::AutoPostToSocial)
              .boolean()
              .not_null()
              .default(false),
          )
          .col(ColumnDef::new(Promotions::CreatedAt).date_time().not_null())
          .foreign_key(
            ForeignKey::create()
              .name("fk_promotions_product")
              .from(Promotions::Table, Promotions::ProductId)
              .to(Products::Table, Products::Id)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .foreign_key(
            ForeignKey::create()
              .name("fk_promotions_promoter")
              .from(Promotions::Table, Promotions::PromoterId)
              .to(Users::Table, Users::Id)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .to_owned(),
      )
      .await?;

    manager
      .create_index(
        Index::create()
          .name("idx_promotions_tracking_code")
          .table(Promotions::Table)
          .col(Promotions::TrackingCode)
          .unique()
          .to_owned(),
      )
      .await?;

    // Ground truth for the one-promotion-per-product-per-promoter
    // invariant; the application-level check is only a fast path.
    manager
      .create_index(
        Index::create()
          .name("idx_promotions_product_promoter")
          .table(Promotions::Table)
          .col(Promotions::ProductId)
          .col(Promotions::PromoterId)
          .unique()
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager.drop_table(Table::drop().table(Promotions::Table).to_owned()).await
  }
}

#[derive(DeriveIden)]
pub enum Promotions {
  Table,
  Id,
  ProductId,
  PromoterId,
  TrackingCode,
  AffiliateLink,
  Description,
  CommissionRate,
  CommissionType,
  Status,
  Clicks,
  Conversions,
  Earnings,
  CustomImages,
  AutoPostToSocial,
  CreatedAt,
}
