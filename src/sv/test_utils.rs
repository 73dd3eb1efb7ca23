//! Shared test utilities for database setup and fixtures

#[cfg(test)]
pub mod test_db {
  use sea_orm::{
    ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbBackend,
    Schema,
  };

  use crate::entity::*;

  /// In-memory SQLite database carrying the full schema.
  ///
  /// The pool is capped at one connection so every handle sees the
  /// same memory database.
  pub async fn setup() -> DatabaseConnection {
    let mut opts = ConnectOptions::new("sqlite::memory:");
    opts.max_connections(1);
    let db = Database::connect(opts).await.unwrap();
    let schema = Schema::new(DbBackend::Sqlite);

    for stmt in [
      schema.create_table_from_entity(user::Entity),
      schema.create_table_from_entity(product::Entity),
      schema.create_table_from_entity(promotion::Entity),
      schema.create_table_from_entity(earnings::Entity),
      schema.create_table_from_entity(product_view::Entity),
      schema.create_table_from_entity(promotion_click::Entity),
    ] {
      db.execute(db.get_database_backend().build(&stmt)).await.unwrap();
    }

    // Schema-from-entity cannot express the composite uniqueness
    // backstop the migrations create, so add it by hand.
    db.execute_unprepared(
      "CREATE UNIQUE INDEX idx_promotions_product_promoter \
       ON promotions (product_id, promoter_id)",
    )
    .await
    .unwrap();

    db
  }
}

#[cfg(test)]
pub mod fixtures {
  use chrono::{NaiveDate, Utc};
  use sea_orm::{ActiveModelTrait, DatabaseConnection, NotSet, Set};

  use crate::entity::*;

  pub async fn user(db: &DatabaseConnection, name: &str) -> user::Model {
    user::ActiveModel {
      id: NotSet,
      name: Set(Some(name.to_string())),
      reg_date: Set(Utc::now().naive_utc()),
    }
    .insert(db)
    .await
    .unwrap()
  }

  pub async fn product(
    db: &DatabaseConnection,
    owner_id: i64,
    price: i64,
    rate: f64,
  ) -> product::Model {
    product::ActiveModel {
      id: NotSet,
      owner_id: Set(owner_id),
      title: Set("Blue Widget".into()),
      description: Set(Some("A very blue widget".into())),
      price: Set(price),
      commission_rate: Set(rate),
      commission_type: Set(CommissionType::Percentage),
      affiliate_link: Set(None),
      images: Set(json::json!(["https://img.example/widget.png"])),
      active: Set(true),
      created_at: Set(Utc::now().naive_utc()),
    }
    .insert(db)
    .await
    .unwrap()
  }

  pub async fn promotion(
    db: &DatabaseConnection,
    product_id: i64,
    promoter_id: i64,
    tracking_code: &str,
  ) -> promotion::Model {
    promotion::ActiveModel {
      id: NotSet,
      product_id: Set(product_id),
      promoter_id: Set(promoter_id),
      tracking_code: Set(tracking_code.to_string()),
      affiliate_link: Set(format!(
        "https://aff.example/promo/{tracking_code}"
      )),
      description: Set(None),
      commission_rate: Set(10.0),
      commission_type: Set(CommissionType::Percentage),
      status: Set(PromotionStatus::Active),
      clicks: Set(0),
      conversions: Set(0),
      earnings: Set(1000),
      custom_images: Set(None),
      auto_post_to_social: Set(false),
      created_at: Set(Utc::now().naive_utc()),
    }
    .insert(db)
    .await
    .unwrap()
  }

  pub async fn view(
    db: &DatabaseConnection,
    product_id: i64,
    on: NaiveDate,
  ) -> product_view::Model {
    product_view::ActiveModel {
      id: NotSet,
      product_id: Set(product_id),
      user_id: Set(None),
      created_at: Set(on.and_hms_opt(10, 0, 0).unwrap()),
    }
    .insert(db)
    .await
    .unwrap()
  }

  pub async fn click(
    db: &DatabaseConnection,
    promotion_id: i64,
    on: NaiveDate,
    is_conversion: bool,
  ) -> promotion_click::Model {
    promotion_click::ActiveModel {
      id: NotSet,
      promotion_id: Set(promotion_id),
      user_id: Set(None),
      is_conversion: Set(is_conversion),
      earnings: Set(0),
      created_at: Set(on.and_hms_opt(10, 0, 0).unwrap()),
    }
    .insert(db)
    .await
    .unwrap()
  }

  pub async fn earnings(
    db: &DatabaseConnection,
    user_id: i64,
    promotion_id: i64,
    amount: i64,
    created_at: Option<chrono::NaiveDateTime>,
  ) -> earnings::Model {
    earnings::ActiveModel {
      id: NotSet,
      user_id: Set(user_id),
      promotion_id: Set(promotion_id),
      amount: Set(amount),
      earnings_type: Set(EarningsType::Commission),
      status: Set(EarningsStatus::Pending),
      payment_date: Set(None),
      metadata: Set(json::json!({})),
      created_at: Set(created_at.unwrap_or_else(|| Utc::now().naive_utc())),
    }
    .insert(db)
    .await
    .unwrap()
  }
}
