use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::product;

/// Append-only view log. Never updated or deleted; actor deletion
/// only nulls `user_id`.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "product_views")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i64,
  pub product_id: i64,
  pub user_id: Option<i64>,
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
}

impl Related<product::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Product.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}
