use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::{promotion, user};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[derive(EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
pub enum EarningsType {
  #[sea_orm(string_value = "commission")]
  #[default]
  Commission,
  #[sea_orm(string_value = "bonus")]
  Bonus,
  #[sea_orm(string_value = "referral")]
  Referral,
}

#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[derive(EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
pub enum EarningsStatus {
  #[sea_orm(string_value = "pending")]
  #[default]
  Pending,
  /// Terminal. `payment_date` is set on this transition.
  #[sea_orm(string_value = "paid")]
  Paid,
  /// Terminal. `payment_date` stays null.
  #[sea_orm(string_value = "cancelled")]
  Cancelled,
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "earnings")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i64,
  pub user_id: i64,
  pub promotion_id: i64,
  /// Amount in cents.
  pub amount: i64,
  pub earnings_type: EarningsType,
  pub status: EarningsStatus,
  pub payment_date: Option<DateTime>,
  /// Opaque snapshot of the commission terms at computation time.
  pub metadata: Json,
  pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(
    belongs_to = "user::Entity",
    from = "Column::UserId",
    to = "user::Column::Id"
  )]
  User,
  #[sea_orm(
    belongs_to = "promotion::Entity",
    from = "Column::PromotionId",
    to = "promotion::Column::Id"
  )]
  Promotion,
}

impl Related<user::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::User.def()
  }
}

impl Related<promotion::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Promotion.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}
