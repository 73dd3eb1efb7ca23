use sea_orm_migration::prelude::*;

use super::{
  m20260110_000001_create_users::Users,
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
          .table(Earnings::Table)
          .if_not_exists()
          .col(
            ColumnDef::new(Earnings::Id)
              .big_integer()
              .not_null()
              .auto_increment()
              .primary_key(),
          )
          .col(ColumnDef::new(Earnings::UserId).big_integer().not_null())
          .col(ColumnDef::new(Earnings::PromotionId).big_integer().not_null())
          .col(ColumnDef::new(Earnings::Amount).big_integer().not_null())
          .col(
            ColumnDef::new(Earnings::EarningsType)
              .string()
              .not_null()
              .default("commission"),
          )
          .col(
            ColumnDef::new(Earnings::Status)
              .string()
              .not_null()
              .default("pending"),
          )
          .col(ColumnDef::new(Earnings::PaymentDate).date_time().null())
          .col(ColumnDef::new(Earnings::Metadata).json().not_null())
          .col(ColumnDef::new(Earnings::CreatedAt).date_time().not_null())
          .foreign_key(
            ForeignKey::create()
              .name("fk_earnings_user")
              .from(Earnings::Table, Earnings::UserId)
              .to(Users::Table, Users::Id)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .foreign_key(
            ForeignKey::create()
              .name("fk_earnings_promotion")
              .from(Earnings::Table, Earnings::PromotionId)
              .to(Promotions::Table, Promotions::Id)
              .on_delete(ForeignKeyAction::Cascade),
          )
          .to_owned(),
      )
      .await?;

    manager
      .create_index(
        Index::create()
          .name("idx_earnings_user")
          .table(Earnings::Table)
          .col(Earnings::UserId)
          .to_owned(),
      )
      .await
  }

  async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
    manager.drop_table(Table::drop().table(Earnings::Table).to_owned()).await
  }
}

#[derive(DeriveIden)]
pub enum Earnings {
  Table,
  Id,
  UserId,
  PromotionId,
  Amount,
  EarningsType,
  Status,
  PaymentDate,
  Metadata,
  CreatedAt,
}
