pub use std::{sync::Arc, time::Duration};

pub use chrono::{
  Datelike, NaiveDate, NaiveDateTime as DateTime, TimeDelta, Utc,
};
pub use sea_orm::{
  ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection,
  EntityTrait, NotSet, PaginatorTrait, QueryFilter, QuerySelect, Set,
  TransactionTrait,
};
pub use tracing::{debug, error, info, trace, warn};

pub use crate::error::{Error, Result};
