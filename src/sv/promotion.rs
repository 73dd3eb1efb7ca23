use json::json;
use sea_orm::sea_query::Expr;
use serde::Deserialize;

use crate::{
  entity::{
    EarningsStatus, EarningsType, PromotionStatus, earnings, product,
    promotion, user,
  },
  prelude::*,
  sv::{Tracking, commission},
};

/// Optional per-promotion overrides accepted at creation time. Unset
/// fields fall back to the product's value or a generated one.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct Overrides {
  pub commission_rate: Option<f64>,
  pub commission_type: Option<String>,
  pub description: Option<String>,
  pub custom_images: Option<Vec<String>>,
  pub tracking_code: Option<String>,
  pub affiliate_link: Option<String>,
  pub auto_post_to_social: Option<bool>,
}

pub struct Promotions<'a> {
  db: &'a DatabaseConnection,
  base_url: &'a str,
}

impl<'a> Promotions<'a> {
  pub fn new(db: &'a DatabaseConnection, base_url: &'a str) -> Self {
    Self { db, base_url }
  }

  /// Create a promotion and its initial pending commission record in
  /// one transaction.
  ///
  /// At most one promotion may exist per (product, promoter) pair.
  /// The early existence query only buys a friendlier error; the
  /// unique index catches whatever races past it.
  pub async fn create(
    &self,
    product_id: i64,
    promoter_id: i64,
    overrides: Overrides,
  ) -> Result<promotion::Model> {
    let txn = self.db.begin().await?;

    let product = product::Entity::find_by_id(product_id)
      .one(&txn)
      .await?
      .ok_or(Error::ProductNotFound)?;

    user::Entity::find_by_id(promoter_id)
      .one(&txn)
      .await?
      .ok_or(Error::UserNotFound)?;

    let existing = promotion::Entity::find()
      .filter(promotion::Column::ProductId.eq(product_id))
      .filter(promotion::Column::PromoterId.eq(promoter_id))
      .one(&txn)
      .await?;
    if existing.is_some() {
      return Err(Error::DuplicatePromotion);
    }

    let rate = overrides.commission_rate.unwrap_or(product.commission_rate);
    let ty = match &overrides.commission_type {
      Some(s) => s.parse()?,
      None => product.commission_type.clone(),
    };
    let amount = commission::compute(product.price, rate, &ty);

    let code = match overrides.tracking_code {
      Some(code) => code,
      None => Tracking::new(&txn).generate().await?,
    };
    let link = overrides
      .affiliate_link
      .or_else(|| product.affiliate_link.clone())
      .unwrap_or_else(|| format!("{}/promo/{}", self.base_url, code));

    let now = Utc::now().naive_utc();
    let promo = promotion::ActiveModel {
      id: NotSet,
      product_id: Set(product_id),
      promoter_id: Set(promoter_id),
      tracking_code: Set(code),
      affiliate_link: Set(link),
      description: Set(
        overrides.description.or_else(|| product.description.clone()),
      ),
      commission_rate: Set(rate),
      commission_type: Set(ty.clone()),
      status: Set(PromotionStatus::Active),
      clicks: Set(0),
      conversions: Set(0),
      // Legacy behavior: the running total starts at the computed
      // commission before any conversion has happened.
      earnings: Set(amount),
      custom_images: Set(overrides.custom_images.map(|urls| json!(urls))),
      auto_post_to_social: Set(overrides.auto_post_to_social.unwrap_or(false)),
      created_at: Set(now),
    }
    .insert(&txn)
    .await
    .map_err(Error::or_duplicate)?;

    earnings::ActiveModel {
      id: NotSet,
      user_id: Set(promoter_id),
      promotion_id: Set(promo.id),
      amount: Set(amount),
      earnings_type: Set(EarningsType::Commission),
      status: Set(EarningsStatus::Pending),
      payment_date: Set(None),
      metadata: Set(json!({
        "commission_type": ty,
        "commission_rate": rate,
      })),
      created_at: Set(now),
    }
    .insert(&txn)
    .await?;

    txn.commit().await?;
    info!("promotion {} created for product {product_id}", promo.id);
    Ok(promo)
  }

  /// Register a click on an affiliate link.
  ///
  /// The counter bump is a storage-level increment; read-modify-write
  /// here would lose updates under concurrent clicks.
  pub async fn track_click(&self, code: &str) -> Result<promotion::Model> {
    let promo = promotion::Entity::find()
      .filter(promotion::Column::TrackingCode.eq(code))
      .one(self.db)
      .await?
      .ok_or(Error::PromotionNotFound)?;

    promotion::Entity::update_many()
      .col_expr(
        promotion::Column::Clicks,
        Expr::col(promotion::Column::Clicks).add(1),
      )
      .filter(promotion::Column::Id.eq(promo.id))
      .exec(self.db)
      .await?;

    promotion::Entity::find_by_id(promo.id)
      .one(self.db)
      .await?
      .ok_or(Error::PromotionNotFound)
  }

  /// Status is the only non-monotonic promotion mutation.
  pub async fn set_status(
    &self,
    promotion_id: i64,
    status: PromotionStatus,
  ) -> Result<promotion::Model> {
    let promo = promotion::Entity::find_by_id(promotion_id)
      .one(self.db)
      .await?
      .ok_or(Error::PromotionNotFound)?;

    Ok(
      promotion::ActiveModel { status: Set(status), ..promo.into() }
        .update(self.db)
        .await?,
    )
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::sv::{
    commission::CENTS,
    test_utils::{fixtures, test_db},
  };

  const BASE_URL: &str = "https://aff.example";

  #[tokio::test]
  async fn create_seeds_promotion_and_pending_earnings() {
    let db = test_db::setup().await;
    let owner = fixtures::user(&db, "owner").await;
    let promoter = fixtures::user(&db, "promoter").await;
    // $200 product with a 15% commission
    let product = fixtures::product(&db, owner.id, 200 * CENTS, 15.0).await;

    let promo = Promotions::new(&db, BASE_URL)
      .create(product.id, promoter.id, Overrides::default())
      .await
      .unwrap();

    assert_eq!(promo.earnings, 30 * CENTS);
    assert_eq!(promo.clicks, 0);
    assert_eq!(promo.conversions, 0);
    assert_eq!(promo.status, PromotionStatus::Active);
    assert!(promo.tracking_code.starts_with("BF-"));
    assert_eq!(
      promo.affiliate_link,
      format!("{BASE_URL}/promo/{}", promo.tracking_code)
    );

    let records = earnings::Entity::find().all(&db).await.unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].user_id, promoter.id);
    assert_eq!(records[0].promotion_id, promo.id);
    assert_eq!(records[0].amount, 30 * CENTS);
    assert_eq!(records[0].status, EarningsStatus::Pending);
    assert_eq!(records[0].earnings_type, EarningsType::Commission);
    assert_eq!(records[0].payment_date, None);
    assert_eq!(records[0].metadata["commission_rate"], json!(15.0));
  }

  #[tokio::test]
  async fn overrides_replace_product_terms() {
    let db = test_db::setup().await;
    let owner = fixtures::user(&db, "owner").await;
    let promoter = fixtures::user(&db, "promoter").await;
    let product = fixtures::product(&db, owner.id, 100 * CENTS, 10.0).await;

    let promo = Promotions::new(&db, BASE_URL)
      .create(product.id, promoter.id, Overrides {
        commission_rate: Some(25.0),
        commission_type: Some("fixed".into()),
        tracking_code: Some("BF-CUSTOM000000".into()),
        affiliate_link: Some("https://short.example/x".into()),
        ..Default::default()
      })
      .await
      .unwrap();

    // Fixed commission ignores the product price
    assert_eq!(promo.earnings, 25 * CENTS);
    assert_eq!(promo.tracking_code, "BF-CUSTOM000000");
    assert_eq!(promo.affiliate_link, "https://short.example/x");
  }

  #[tokio::test]
  async fn unknown_commission_type_is_rejected() {
    let db = test_db::setup().await;
    let owner = fixtures::user(&db, "owner").await;
    let promoter = fixtures::user(&db, "promoter").await;
    let product = fixtures::product(&db, owner.id, 100 * CENTS, 10.0).await;

    let result = Promotions::new(&db, BASE_URL)
      .create(product.id, promoter.id, Overrides {
        commission_type: Some("tiered".into()),
        ..Default::default()
      })
      .await;

    assert!(matches!(result, Err(Error::InvalidCommissionType(ty)) if ty == "tiered"));
  }

  #[tokio::test]
  async fn duplicate_pair_is_rejected() {
    let db = test_db::setup().await;
    let owner = fixtures::user(&db, "owner").await;
    let promoter = fixtures::user(&db, "promoter").await;
    let product = fixtures::product(&db, owner.id, 100 * CENTS, 10.0).await;

    let sv = Promotions::new(&db, BASE_URL);
    sv.create(product.id, promoter.id, Overrides::default()).await.unwrap();

    let result =
      sv.create(product.id, promoter.id, Overrides::default()).await;
    assert!(matches!(result, Err(Error::DuplicatePromotion)));

    assert_eq!(promotion::Entity::find().count(&db).await.unwrap(), 1);
    assert_eq!(earnings::Entity::find().count(&db).await.unwrap(), 1);
  }

  #[tokio::test]
  async fn concurrent_creates_yield_one_winner() {
    let db = test_db::setup().await;
    let owner = fixtures::user(&db, "owner").await;
    let promoter = fixtures::user(&db, "promoter").await;
    let product = fixtures::product(&db, owner.id, 100 * CENTS, 10.0).await;

    let mut handles = Vec::new();
    for _ in 0..4 {
      let db = db.clone();
      let (product_id, promoter_id) = (product.id, promoter.id);
      handles.push(tokio::spawn(async move {
        Promotions::new(&db, BASE_URL)
          .create(product_id, promoter_id, Overrides::default())
          .await
      }));
    }

    let mut ok = 0;
    let mut duplicates = 0;
    for handle in handles {
      match handle.await.unwrap() {
        Ok(_) => ok += 1,
        Err(Error::DuplicatePromotion) => duplicates += 1,
        Err(err) => panic!("unexpected error: {err}"),
      }
    }

    assert_eq!(ok, 1);
    assert_eq!(duplicates, 3);
    assert_eq!(promotion::Entity::find().count(&db).await.unwrap(), 1);
    assert_eq!(earnings::Entity::find().count(&db).await.unwrap(), 1);
  }

  #[tokio::test]
  async fn missing_product_fails() {
    let db = test_db::setup().await;
    let promoter = fixtures::user(&db, "promoter").await;

    let result = Promotions::new(&db, BASE_URL)
      .create(999, promoter.id, Overrides::default())
      .await;
    assert!(matches!(result, Err(Error::ProductNotFound)));
  }

  #[tokio::test]
  async fn track_click_increments_atomically() {
    let db = test_db::setup().await;
    let owner = fixtures::user(&db, "owner").await;
    let promoter = fixtures::user(&db, "promoter").await;
    let product = fixtures::product(&db, owner.id, 100 * CENTS, 10.0).await;

    let promo = Promotions::new(&db, BASE_URL)
      .create(product.id, promoter.id, Overrides::default())
      .await
      .unwrap();

    let mut handles = Vec::new();
    for _ in 0..100 {
      let db = db.clone();
      let code = promo.tracking_code.clone();
      handles.push(tokio::spawn(async move {
        Promotions::new(&db, BASE_URL).track_click(&code).await.unwrap();
      }));
    }
    for handle in handles {
      handle.await.unwrap();
    }

    let promo =
      promotion::Entity::find_by_id(promo.id).one(&db).await.unwrap().unwrap();
    assert_eq!(promo.clicks, 100);
  }

  #[tokio::test]
  async fn track_click_unknown_code_fails() {
    let db = test_db::setup().await;

    let result =
      Promotions::new(&db, BASE_URL).track_click("BF-NOSUCHCODE00").await;
    assert!(matches!(result, Err(Error::PromotionNotFound)));
  }

  #[tokio::test]
  async fn set_status_round_trip() {
    let db = test_db::setup().await;
    let owner = fixtures::user(&db, "owner").await;
    let promoter = fixtures::user(&db, "promoter").await;
    let product = fixtures::product(&db, owner.id, 100 * CENTS, 10.0).await;

    let sv = Promotions::new(&db, BASE_URL);
    let promo =
      sv.create(product.id, promoter.id, Overrides::default()).await.unwrap();

    let promo =
      sv.set_status(promo.id, PromotionStatus::Banned).await.unwrap();
    assert_eq!(promo.status, PromotionStatus::Banned);
  }
}
