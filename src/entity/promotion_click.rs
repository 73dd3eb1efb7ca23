use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::promotion;

/// Append-only click log. A conversion-flagged click carries the
/// per-click attributed amount in cents.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "promotion_clicks")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i64,
  pub promotion_id: i64,
  pub user_id: Option<i64>,
  pub is_conversion: bool,
  pub earnings: i64,
  pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(
    belongs_to = "promotion::Entity",
    from = "Column::PromotionId",
    to = "promotion::Column::Id"
  )]
  Promotion,
}

impl Related<promotion::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Promotion.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}
