use axum::{
  Json,
  extract::{Path, Query, State},
  http::StatusCode,
  response::IntoResponse,
};
use serde::{Deserialize, Serialize};

use crate::{
  entity::{EarningsStatus, earnings, product_view, promotion, promotion_click},
  prelude::*,
  state::AppState,
  sv,
  utils::format_money,
};

pub async fn health() -> &'static str {
  "ok"
}

/// Caller identity for endpoints scoped to a user. Authentication
/// itself lives in front of this service.
#[derive(Deserialize)]
pub struct Caller {
  pub user_id: i64,
}

#[derive(Deserialize)]
pub struct CreatePromotion {
  pub product_id: i64,
  pub promoter_id: i64,
  #[serde(flatten)]
  pub overrides: sv::promotion::Overrides,
}

pub async fn create_promotion(
  State(app): State<Arc<AppState>>,
  Json(req): Json<CreatePromotion>,
) -> Result<impl IntoResponse> {
  let promo = sv::Promotions::new(&app.db, &app.base_url)
    .create(req.product_id, req.promoter_id, req.overrides)
    .await?;
  Ok((StatusCode::CREATED, Json(promo)))
}

pub async fn track_click(
  State(app): State<Arc<AppState>>,
  Path(code): Path<String>,
) -> Result<Json<promotion::Model>> {
  let promo =
    sv::Promotions::new(&app.db, &app.base_url).track_click(&code).await?;
  Ok(Json(promo))
}

#[derive(Deserialize)]
pub struct TrackView {
  pub product_id: i64,
  pub user_id: Option<i64>,
}

pub async fn track_view(
  State(app): State<Arc<AppState>>,
  Json(req): Json<TrackView>,
) -> Result<(StatusCode, Json<product_view::Model>)> {
  let view =
    sv::Events::new(&app.db).record_view(req.product_id, req.user_id).await?;
  Ok((StatusCode::CREATED, Json(view)))
}

#[derive(Deserialize)]
pub struct RecordClick {
  pub user_id: Option<i64>,
  #[serde(default)]
  pub is_conversion: bool,
  /// Attributed amount in cents, only meaningful for conversions.
  #[serde(default)]
  pub earnings: i64,
}

pub async fn record_click(
  State(app): State<Arc<AppState>>,
  Path(promotion_id): Path<i64>,
  Json(req): Json<RecordClick>,
) -> Result<(StatusCode, Json<promotion_click::Model>)> {
  let click = sv::Events::new(&app.db)
    .record_click(promotion_id, req.user_id, req.is_conversion, req.earnings)
    .await?;
  Ok((StatusCode::CREATED, Json(click)))
}

pub async fn product_stats(
  State(app): State<Arc<AppState>>,
  Path((year, month)): Path<(i32, u32)>,
  Query(caller): Query<Caller>,
) -> Result<Json<Vec<sv::weekly::WeeklyViews>>> {
  let buckets =
    sv::Reports::new(&app.db).product_stats(caller.user_id, year, month).await?;
  Ok(Json(buckets))
}

pub async fn promotion_stats(
  State(app): State<Arc<AppState>>,
  Path((year, month)): Path<(i32, u32)>,
  Query(caller): Query<Caller>,
) -> Result<Json<Vec<sv::weekly::WeeklyClicks>>> {
  let buckets = sv::Reports::new(&app.db)
    .promotion_stats(caller.user_id, year, month)
    .await?;
  Ok(Json(buckets))
}

#[derive(Deserialize)]
pub struct UpdateEarningsStatus {
  pub user_id: i64,
  pub status: EarningsStatus,
  pub payment_date: Option<DateTime>,
}

pub async fn update_earnings_status(
  State(app): State<Arc<AppState>>,
  Path(earnings_id): Path<i64>,
  Json(req): Json<UpdateEarningsStatus>,
) -> Result<Json<earnings::Model>> {
  let record = sv::Ledger::new(&app.db)
    .update_status(req.user_id, earnings_id, req.status, req.payment_date)
    .await?;
  Ok(Json(record))
}

#[derive(Serialize)]
pub struct EarningsStats {
  pub pending: i64,
  pub paid: i64,
  pub pending_display: String,
  pub paid_display: String,
  /// Last 30 days vs the 30 days before, as a percent string.
  pub change: String,
  pub weekly: Vec<sv::ledger::WeekTotal>,
}

pub async fn earnings_stats(
  State(app): State<Arc<AppState>>,
  Query(caller): Query<Caller>,
) -> Result<Json<EarningsStats>> {
  let ledger = sv::Ledger::new(&app.db);

  let pending =
    ledger.sum_by_status(caller.user_id, EarningsStatus::Pending).await?;
  let paid = ledger.sum_by_status(caller.user_id, EarningsStatus::Paid).await?;

  let now = Utc::now().naive_utc();
  let window = TimeDelta::days(30);
  let current =
    ledger.sum_in_range(caller.user_id, now - window, now, None).await?;
  let previous = ledger
    .sum_in_range(caller.user_id, now - window - window, now - window, None)
    .await?;
  let weekly =
    ledger.by_calendar_week(caller.user_id, now - window - window, now).await?;

  Ok(Json(EarningsStats {
    pending,
    paid,
    pending_display: format_money(pending),
    paid_display: format_money(paid),
    change: sv::ledger::percent_change(current, previous),
    weekly,
  }))
}
