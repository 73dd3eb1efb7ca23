use json::json;
use sea_orm::{FromQueryResult, Statement, sea_query::Expr};
use serde::Serialize;

use crate::{
  entity::{EarningsStatus, EarningsType, earnings, promotion},
  prelude::*,
};

/// Commission ledger: the pending → paid / cancelled state machine
/// plus the reporting sums the earnings dashboard runs on.
pub struct Ledger<'a> {
  db: &'a DatabaseConnection,
}

#[derive(Debug, Clone, FromQueryResult, Serialize)]
pub struct WeekTotal {
  pub week_start: String,
  pub total: i64,
}

impl<'a> Ledger<'a> {
  pub fn new(db: &'a DatabaseConnection) -> Self {
    Self { db }
  }

  /// Move a record to a new status. `paid` and `cancelled` are
  /// terminal: once settled, a record cannot move again. Paying
  /// without an explicit payment date stamps "now"; cancelling leaves
  /// the payment date null.
  pub async fn update_status(
    &self,
    user_id: i64,
    earnings_id: i64,
    status: EarningsStatus,
    payment_date: Option<DateTime>,
  ) -> Result<earnings::Model> {
    let record = earnings::Entity::find_by_id(earnings_id)
      .filter(earnings::Column::UserId.eq(user_id))
      .one(self.db)
      .await?
      .ok_or(Error::EarningsNotFound)?;

    if record.status != EarningsStatus::Pending {
      return Err(Error::InvalidArgs(
        "earnings record is already settled".into(),
      ));
    }

    let payment_date = match status {
      EarningsStatus::Paid => {
        Some(payment_date.unwrap_or_else(|| Utc::now().naive_utc()))
      }
      _ => None,
    };

    Ok(
      earnings::ActiveModel {
        status: Set(status),
        payment_date: Set(payment_date),
        ..record.into()
      }
      .update(self.db)
      .await?,
    )
  }

  /// Ad hoc bonus / referral entry outside the automatic commission
  /// created with a promotion.
  pub async fn record_bonus(
    &self,
    user_id: i64,
    promotion_id: i64,
    amount: i64,
    earnings_type: EarningsType,
  ) -> Result<earnings::Model> {
    if amount <= 0 {
      return Err(Error::InvalidArgs("bonus amount must be positive".into()));
    }

    promotion::Entity::find_by_id(promotion_id)
      .one(self.db)
      .await?
      .ok_or(Error::PromotionNotFound)?;

    let now = Utc::now().naive_utc();
    Ok(
      earnings::ActiveModel {
        id: NotSet,
        user_id: Set(user_id),
        promotion_id: Set(promotion_id),
        amount: Set(amount),
        earnings_type: Set(earnings_type),
        status: Set(EarningsStatus::Pending),
        payment_date: Set(None),
        metadata: Set(json!({})),
        created_at: Set(now),
      }
      .insert(self.db)
      .await?,
    )
  }

  pub async fn sum_by_status(
    &self,
    user_id: i64,
    status: EarningsStatus,
  ) -> Result<i64> {
    let total: Option<Option<i64>> = earnings::Entity::find()
      .select_only()
      .column_as(Expr::col(earnings::Column::Amount).sum(), "total")
      .filter(earnings::Column::UserId.eq(user_id))
      .filter(earnings::Column::Status.eq(status))
      .into_tuple()
      .one(self.db)
      .await?;
    Ok(total.flatten().unwrap_or(0))
  }

  pub async fn sum_in_range(
    &self,
    user_id: i64,
    start: DateTime,
    end: DateTime,
    status: Option<EarningsStatus>,
  ) -> Result<i64> {
    let mut query = earnings::Entity::find()
      .select_only()
      .column_as(Expr::col(earnings::Column::Amount).sum(), "total")
      .filter(earnings::Column::UserId.eq(user_id))
      .filter(earnings::Column::CreatedAt.gte(start))
      .filter(earnings::Column::CreatedAt.lt(end));

    if let Some(status) = status {
      query = query.filter(earnings::Column::Status.eq(status));
    }

    let total: Option<Option<i64>> = query.into_tuple().one(self.db).await?;
    Ok(total.flatten().unwrap_or(0))
  }

  /// Per-week totals using the store's own date truncation. Weeks
  /// start on Sunday, matching the aggregator's numbering.
  pub async fn by_calendar_week(
    &self,
    user_id: i64,
    start: DateTime,
    end: DateTime,
  ) -> Result<Vec<WeekTotal>> {
    let rows = WeekTotal::find_by_statement(Statement::from_sql_and_values(
      self.db.get_database_backend(),
      "SELECT date(created_at, '-6 days', 'weekday 0') AS week_start, \
              SUM(amount) AS total \
       FROM earnings \
       WHERE user_id = ? AND created_at >= ? AND created_at < ? \
       GROUP BY week_start \
       ORDER BY week_start",
      [user_id.into(), start.into(), end.into()],
    ))
    .all(self.db)
    .await?;
    Ok(rows)
  }
}

/// Period-over-period delta formatted for display. The dashboard has
/// always shown the literal "100" when there is no previous value.
pub fn percent_change(current: i64, previous: i64) -> String {
  if previous > 0 {
    format!("{:.2}", (current - previous) as f64 / previous as f64 * 100.0)
  } else {
    "100".to_string()
  }
}
