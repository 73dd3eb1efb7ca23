use sea_orm_migration::prelude::*;

use super::m20260110_000001_create_users::Users;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
  async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager
      .create_table(
        Table::create()
          .table(Products::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(Products::Id)
              .big_integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(ColumnDef::new(Products::OwnerId).big_integer().not_null())
          .col(ColumnDef::new(Products::Title).string().not_null())
          .col(ColumnDef::new(Products::Description).text().null())
          .col(ColumnDef::new(Products::Price).big_integer().not_null())
          .col(ColumnDef::new(Products::CommissionRate).double().not_null())
          .col(
            ColumnDef::new(Products::CommissionType)
              .string()
              .not_null()
              .default("percentage"),
          )
          .col(ColumnDef::new(Products::AffiliateLink).string().null())
          .col(ColumnDef::new(Products::Images).json().not_null())
          .col(
            ColumnDef::new(Products::Active).boolean().not_null().default(true),
          )
          .col(ColumnDef::new(Products::CreatedAt).date_time().not_null())
          .foreign_key(
            ForeignKey::create()
              .name("fk_products_owner")
              .from(Products::Table, Products::OwnerId)
              .to(Users::Table, Users::Id)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .to_owned(),
      )
      .await?;

    manager
      .create_index(
        Index::create()
          .name("idx_products_owner")
          .table(Products::Table)
          .col(Products::OwnerId)
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager.drop_table(Table::drop().table(Products::Table).to_owned()).await
  }
}

#[derive(DeriveIden)]
pub enum Products {
  Table,
  Id,
  OwnerId,
  Title,
  Description,
  Price,
  CommissionRate,
  CommissionType,
  AffiliateLink,
  Images,
  Active,
  CreatedAt,
}
