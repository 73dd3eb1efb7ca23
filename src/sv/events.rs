use sea_orm::sea_query::Expr;

use crate::{
  entity::{product, product_view, promotion, promotion_click},
  prelude::*,
};

/// Append-only recorder for view and click events. Rows written here
/// are audit trails and are never updated or deleted.
pub struct Events<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Events<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  pub async fn record_view(
    &self,
    product_id: i64,
    user_id: Option<i64>,
  ) -> Result<product_view::Model> {
    product::Entity::find_by_id(product_id)
      .one(self.db)
      .await?
      .ok_or(Error::ProductNotFound)?;

    let now = Utc::now().naive_utc();
    Ok(
      product_view::ActiveModel {
        id: NotSet,
        product_id: Set(product_id),
        user_id: Set(user_id),
        created_at: Set(now),
      }
      .insert(self.db)
      .await?,
    )
  }

  /// Append a click event. A conversion-flagged click also bumps the
  /// promotion's conversion counter and adds its attributed cents to
  /// the running earnings total, both as storage-level increments.
  /// The plain `clicks` counter belongs to the redirect path
  /// (`Promotions::track_click`), so the two never double-count.
  pub async fn record_click(
    &self,
    promotion_id: i64,
    user_id: Option<i64>,
    is_conversion: bool,
    earnings: i64,
  ) -> Result<promotion_click::Model> {
    promotion::Entity::find_by_id(promotion_id)
      .one(self.db)
      .await?
      .ok_or(Error::PromotionNotFound)?;

    let txn = self.db.begin().await?;

    let now = Utc::now().naive_utc();
    let click = promotion_click::ActiveModel {
      id: NotSet,
      promotion_id: Set(promotion_id),
      user_id: Set(user_id),
      is_conversion: Set(is_conversion),
      earnings: Set(earnings),
      created_at: Set(now),
    }
    .insert(&txn)
    .await?;

    if is_conversion {
      promotion::Entity::update_many()
        .col_expr(
          promotion::Column::Conversions,
          Expr::col(promotion::Column::Conversions).add(1),
        )
        .col_expr(
          promotion::Column::Earnings,
          Expr::col(promotion::Column::Earnings).add(earnings),
        )
        .filter(promotion::Column::Id.eq(promotion_id))
        .exec(&txn)
        .await?;
    }

    txn.commit().await?;
    Ok(click)
  }
}
