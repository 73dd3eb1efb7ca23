use std::str::FromStr;

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::{product_view, promotion, user};

#[derive(Debug, Default, Clone, PartialEq, Eq)]
#[derive(EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
pub enum CommissionType {
  /// Commission scales with the sale amount.
  #[sea_orm(string_value = "percentage")]
  #[default]
  Percentage,
  /// Flat commission regardless of the sale amount.
  #[sea_orm(string_value = "fixed")]
  Fixed,
}

impl FromStr for CommissionType {
  type Err = crate::error::Error;

  fn from_str(s: &str) -> Result<Self, Self::Err> {
    match s {
      "percentage" => Ok(Self::Percentage),
      "fixed" => Ok(Self::Fixed),
      other => Err(crate::error::Error::InvalidCommissionType(other.into())),
    }
  }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "products")]
pub struct Model {
  #[sea_orm(primary_key)]
  pub id: i64,
  pub owner_id: i64,
  pub title: String,
  pub description: Option<String>,
  /// Price in cents.
  pub price: i64,
  pub commission_rate: f64,
  pub commission_type: CommissionType,
  pub affiliate_link: Option<String>,
  /// Ordered list of image URLs.
  pub images: Json,
  pub active: bool,
  pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
  #[sea_orm(
    belongs_to = "user::Entity",
    from = "Column::OwnerId",
    to = "user::Column::Id"
  )]
  Owner,
  #[sea_orm(has_many = "promotion::Entity")]
  Promotions,
  #[sea_orm(has_many = "product_view::Entity")]
  Views,
}

impl Related<user::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Owner.def()
  }
}

impl Related<promotion::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Promotions.def()
  }
}

impl Related<product_view::Entity> for Entity {
  fn to() -> RelationDef {
    Relation::Views.def()
  }
}

impl ActiveModelBehavior for ActiveModel {}
