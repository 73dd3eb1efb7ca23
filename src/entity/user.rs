use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::{earnings, product, promotion};

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i64,
  pub name: Option<String>,
  pub reg_date: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(has_many = "product::Entity")]
  Products,
  #[sea_orm(has_many = "promotion::Entity")]
  Promotions,
  #[sea_orm(has_many = "earnings::Entity")]
  Earnings,
}

impl Related<product::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Products.def()
  }
}

impl Related<promotion::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Promotions.def()
  }
}

impl Related<earnings::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Earnings.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}
