//! Calendar-week bucketing for the monthly dashboards.
//!
//! Week numbers here are deliberately not ISO-8601: weeks run
//! Sunday-based and anchor on January 1st, matching the numbers the
//! reporting screens have always shown. Do not "fix" this to ISO
//! without migrating the consumers.

use serde::Serialize;

use crate::{
  entity::{product, product_view, promotion, promotion_click},
  prelude::*,
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeeklyClicks {
  pub week: u32,
  pub clicks: u64,
  pub conversions: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WeeklyViews {
  pub week: u32,
  pub views: u64,
}

/// Sunday-based week-in-year:
/// ceil((days since Jan 1 + weekday of Jan 1 + 1) / 7).
pub fn week_of_year(d: NaiveDate) -> i64 {
  let jan1 = NaiveDate::from_ymd_opt(d.year(), 1, 1).unwrap();
  let days = (d - jan1).num_days();
  let weekday = jan1.weekday().num_days_from_sunday() as i64;
  (days + weekday + 1).div_ceil(7)
}

/// How many within-month week buckets the month spans.
pub fn weeks_in_month(year: i32, month: u32) -> u32 {
  let first = first_of_month(year, month);
  let last = last_of_month(year, month);
  (week_of_year(last) - week_of_year(first) + 1) as u32
}

/// Week-in-month relative to the month's first day. Yields 0 at the
/// front edge when the month starts on a Sunday; `week_slot` clamps
/// out-of-range values so no event is ever dropped from the report.
pub fn week_of_month(d: NaiveDate, month_start: NaiveDate) -> i64 {
  let first_day_of_first_week = month_start.day() as i64
    - month_start.weekday().num_days_from_sunday() as i64;
  (d.day() as i64 - first_day_of_first_week).div_ceil(7)
}

fn week_slot(d: NaiveDate, month_start: NaiveDate, weeks: u32) -> usize {
  week_of_month(d, month_start).clamp(1, weeks as i64) as usize - 1
}

fn first_of_month(year: i32, month: u32) -> NaiveDate {
  NaiveDate::from_ymd_opt(year, month, 1).unwrap()
}

fn last_of_month(year: i32, month: u32) -> NaiveDate {
  let (y, m) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
  first_of_month(y, m).pred_opt().unwrap()
}

/// Bucket click events into contiguous week summaries covering
/// `1..=weeks_in_month`, zero-filled for quiet weeks.
pub fn clicks_by_week(
  events: &[promotion_click::Model],
  year: i32,
  month: u32,
) -> Vec<WeeklyClicks> {
  let month_start = first_of_month(year, month);
  let weeks = weeks_in_month(year, month);
  let mut out: Vec<WeeklyClicks> = (1..=weeks)
    .map(|week| WeeklyClicks { week, clicks: 0, conversions: 0 })
    .collect();

  for event in events {
    let slot = week_slot(event.created_at.date(), month_start, weeks);
    out[slot].clicks += 1;
    if event.is_conversion {
      out[slot].conversions += 1;
    }
  }
  out
}

pub fn views_by_week(
  events: &[product_view::Model],
  year: i32,
  month: u32,
) -> Vec<WeeklyViews> {
  let month_start = first_of_month(year, month);
  let weeks = weeks_in_month(year, month);
  let mut out: Vec<WeeklyViews> =
    (1..=weeks).map(|week| WeeklyViews { week, views: 0 }).collect();

  for event in events {
    let slot = week_slot(event.created_at.date(), month_start, weeks);
    out[slot].views += 1;
  }
  out
}

/// Month-scoped stats queries feeding the aggregator.
pub struct Reports<'a> {
  db: &'a DatabaseConnection,
}

impl<'a> Reports<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  /// Weekly view counts across every product the user owns.
  pub async fn product_stats(
    &self,
    owner_id: i64,
    year: i32,
    month: u32,
  ) -> Result<Vec<WeeklyViews>> {
    let (start, end) = month_bounds(year, month)?;

    let product_ids: Vec<i64> = product::Entity::find()
      .filter(product::Column::OwnerId.eq(owner_id))
      .all(self.db)
      .await?
      .into_iter()
      .map(|p| p.id)
      .collect();

    let events = product_view::Entity::find()
      .filter(product_view::Column::ProductId.is_in(product_ids))
      .filter(product_view::Column::CreatedAt.gte(start))
      .filter(product_view::Column::CreatedAt.lt(end))
      .all(self.db)
      .await?;

    Ok(views_by_week(&events, year, month))
  }

  /// Weekly click/conversion counts across every promotion the user
  /// runs.
  pub async fn promotion_stats(
    &self,
    promoter_id: i64,
    year: i32,
    month: u32,
  ) -> Result<Vec<WeeklyClicks>> {
    let (start, end) = month_bounds(year, month)?;

    let promotion_ids: Vec<i64> = promotion::Entity::find()
      .filter(promotion::Column::PromoterId.eq(promoter_id))
      .all(self.db)
      .await?
      .into_iter()
      .map(|p| p.id)
      .collect();

    let events = promotion_click::Entity::find()
      .filter(promotion_click::Column::PromotionId.is_in(promotion_ids))
      .filter(promotion_click::Column::CreatedAt.gte(start))
      .filter(promotion_click::Column::CreatedAt.lt(end))
      .all(self.db)
      .await?;

    Ok(clicks_by_week(&events, year, month))
  }
}

fn month_bounds(year: i32, month: u32) -> Result<(DateTime, DateTime)> {
  if !(1..=12).contains(&month) {
    return Err(Error::InvalidArgs(format!("invalid month: {month}")));
  }
  let start = first_of_month(year, month);
  let end = if month == 12 {
    first_of_month(year + 1, 1)
  } else {
    first_of_month(year, month + 1)
  };
  Ok((
    start.and_hms_opt(0, 0, 0).unwrap(),
    end.and_hms_opt(0, 0, 0).unwrap(),
  ))
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::sv::test_utils::{fixtures, test_db};

  fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
  }

  fn click_on(day: u32, is_conversion: bool) -> promotion_click::Model {
    promotion_click::Model {
      id: 0,
      promotion_id: 1,
      user_id: None,
      is_conversion,
      earnings: 0,
      created_at: date(2026, 3, day).and_hms_opt(12, 30, 0).unwrap(),
    }
  }

  #[test]
  fn week_of_year_is_sunday_based() {
    // Jan 1 2025 is a Wednesday (weekday 3 from Sunday)
    assert_eq!(week_of_year(date(2025, 1, 1)), 1);
    assert_eq!(week_of_year(date(2025, 1, 4)), 1);
    // Sunday Jan 5 opens week 2
    assert_eq!(week_of_year(date(2025, 1, 5)), 2);
    assert_eq!(week_of_year(date(2025, 1, 11)), 2);
  }

  #[test]
  fn weeks_in_month_spans() {
    // March 2026 starts on a Sunday and covers 5 buckets
    assert_eq!(weeks_in_month(2026, 3), 5);
    // August 2026 starts on a Saturday and stretches to 6
    assert_eq!(weeks_in_month(2026, 8), 6);
    assert_eq!(weeks_in_month(2026, 2), 4);
  }

  #[test]
  fn week_of_month_front_edge_yields_zero() {
    // March 1 2026 is a Sunday: the formula puts it in "week 0"
    let start = date(2026, 3, 1);
    assert_eq!(week_of_month(start, start), 0);
    assert_eq!(week_of_month(date(2026, 3, 2), start), 1);
    assert_eq!(week_of_month(date(2026, 3, 31), start), 5);
  }

  #[test]
  fn buckets_are_contiguous_and_total_preserving() {
    let events: Vec<_> = [1, 1, 2, 9, 15, 22, 30, 31]
      .into_iter()
      .map(|day| click_on(day, false))
      .collect();

    let buckets = clicks_by_week(&events, 2026, 3);

    assert_eq!(buckets.len(), weeks_in_month(2026, 3) as usize);
    for (i, bucket) in buckets.iter().enumerate() {
      assert_eq!(bucket.week, i as u32 + 1);
    }
    let total: u64 = buckets.iter().map(|b| b.clicks).sum();
    assert_eq!(total, events.len() as u64);
    // Day-1 events clamp into week 1 instead of vanishing
    assert_eq!(buckets[0].clicks, 3);
  }

  #[test]
  fn conversions_are_counted_separately() {
    let events =
      vec![click_on(3, true), click_on(4, false), click_on(10, true)];

    let buckets = clicks_by_week(&events, 2026, 3);
    assert_eq!(buckets[0].clicks, 2);
    assert_eq!(buckets[0].conversions, 1);
    assert_eq!(buckets[1].clicks, 1);
    assert_eq!(buckets[1].conversions, 1);
  }

  #[test]
  fn empty_month_is_zero_filled() {
    let buckets = views_by_week(&[], 2026, 2);
    assert_eq!(buckets.len(), 4);
    assert!(buckets.iter().all(|b| b.views == 0));
  }

  #[tokio::test]
  async fn product_stats_scopes_to_owner_and_month() {
    let db = test_db::setup().await;
    let owner = fixtures::user(&db, "owner").await;
    let rival = fixtures::user(&db, "rival").await;
    let product = fixtures::product(&db, owner.id, 10_000, 10.0).await;
    let other = fixtures::product(&db, rival.id, 10_000, 10.0).await;

    for day in [2, 3, 10] {
      fixtures::view(&db, product.id, date(2026, 3, day)).await;
    }
    // Noise: someone else's product, and an out-of-month view
    fixtures::view(&db, other.id, date(2026, 3, 2)).await;
    fixtures::view(&db, product.id, date(2026, 4, 1)).await;

    let buckets =
      Reports::new(&db).product_stats(owner.id, 2026, 3).await.unwrap();

    assert_eq!(buckets.len(), 5);
    let total: u64 = buckets.iter().map(|b| b.views).sum();
    assert_eq!(total, 3);
    assert_eq!(buckets[0].views, 2);
    assert_eq!(buckets[1].views, 1);
  }

  #[tokio::test]
  async fn promotion_stats_counts_clicks_and_conversions() {
    let db = test_db::setup().await;
    let owner = fixtures::user(&db, "owner").await;
    let promoter = fixtures::user(&db, "promoter").await;
    let product = fixtures::product(&db, owner.id, 10_000, 10.0).await;
    let promo =
      fixtures::promotion(&db, product.id, promoter.id, "BF-STATS0000000")
        .await;

    fixtures::click(&db, promo.id, date(2026, 3, 2), false).await;
    fixtures::click(&db, promo.id, date(2026, 3, 9), true).await;

    let buckets =
      Reports::new(&db).promotion_stats(promoter.id, 2026, 3).await.unwrap();

    assert_eq!(buckets.len(), 5);
    assert_eq!(buckets[0].clicks, 1);
    assert_eq!(buckets[0].conversions, 0);
    assert_eq!(buckets[1].clicks, 1);
    assert_eq!(buckets[1].conversions, 1);
  }

  #[tokio::test]
  async fn invalid_month_is_rejected() {
    let db = test_db::setup().await;
    let result = Reports::new(&db).product_stats(1, 2026, 13).await;
    assert!(matches!(result, Err(Error::InvalidArgs(_))));
  }
}
