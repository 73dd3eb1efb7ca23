use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::{CommissionType, earnings, product, promotion_click, user};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[derive(EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
pub enum PromotionStatus {
  #[sea_orm(string_value = "active")]
  #[default]
  Active,
  #[sea_orm(string_value = "inactive")]
  Inactive,
  #[sea_orm(string_value = "banned")]
  Banned,
}

/// A promoter's trackable claim on a product. Commission terms are
/// snapshotted from the product at creation time and mutate
/// independently afterwards.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "promotions")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i64,
  pub product_id: i64,
  pub promoter_id: i64,
  /// Public URL-safe token, immutable once assigned.
  #[sea_orm(unique)]
  pub tracking_code: String,
  pub affiliate_link: String,
  pub description: Option<String>,
  pub commission_rate: f64,
  pub commission_type: CommissionType,
  pub status: PromotionStatus,
  pub clicks: i64,
  pub conversions: i64,
  /// Denormalized running total in cents. Pre-seeded with the
  /// computed commission at creation time (legacy behavior).
  pub earnings: i64,
  pub custom_images: Option<Json>,
  pub auto_post_to_social: bool,
  pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(
    belongs_to = "product::Entity",
    from = "Column::ProductId",
    to = "product::Column::Id"
  )]
  Product,
  #[sea_orm(
    belongs_to = "user::Entity",
    from = "Column::PromoterId",
    to = "user::Column::Id"
  )]
  Promoter,
  #[sea_orm(has_many = "earnings::Entity")]
  Earnings,
  #[sea_orm(has_many = "promotion_click::Entity")]
  Clicks,
}

impl Related<product::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Product.def()
  }
}

impl Related<user::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Promoter.def()
  }
}

impl Related<earnings::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Earnings.def()
  }
}

impl Related<promotion_click::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Clicks.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}
