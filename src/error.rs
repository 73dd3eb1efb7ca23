use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use sea_orm::{DbErr, SqlErr};
use serde::Serialize;
use tracing::error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
  #[error("user not found")]
  UserNotFound,
  #[error("product not found")]
  ProductNotFound,
  #[error("promotion not found")]
  PromotionNotFound,
  #[error("earnings record not found")]
  EarningsNotFound,
  #[error("a promotion for this product and promoter already exists")]
  DuplicatePromotion,
  #[error("unknown commission type: {0}")]
  InvalidCommissionType(String),
  #[error("tracking code generation exhausted after {0} attempts")]
  CodeGenerationExhausted(u32),
  #[error("{0}")]
  InvalidArgs(String),
  #[error(transparent)]
  Db(#[from] DbErr),
}

impl Error {
  /// The unique index on promotions (product_id, promoter_id) is the
  /// ground truth for the uniqueness invariant; a violation surfacing
  /// from the insert is the same logical error as the fast-path check.
  pub fn or_duplicate(err: DbErr) -> Self {
    match err.sql_err() {
      Some(SqlErr::UniqueConstraintViolation(_)) => Error::DuplicatePromotion,
      _ => Error::Db(err),
    }
  }

  fn status(&self) -> StatusCode {
    match self {
      Error::UserNotFound
      | Error::ProductNotFound
      | Error::PromotionNotFound
      | Error::EarningsNotFound => StatusCode::NOT_FOUND,
      Error::DuplicatePromotion => StatusCode::CONFLICT,
      Error::InvalidCommissionType(_) | Error::InvalidArgs(_) => {
        StatusCode::BAD_REQUEST
      }
      Error::CodeGenerationExhausted(_) | Error::Db(_) => {
        StatusCode::INTERNAL_SERVER_ERROR
      }
    }
  }
}

#[derive(Serialize)]
struct ErrorBody {
  success: bool,
  msg: String,
}

impl IntoResponse for Error {
  fn into_response(self) -> Response {
    let status = self.status();
    let msg = if status == StatusCode::INTERNAL_SERVER_ERROR {
      error!("internal error: {self}");
      "internal error".to_string()
    } else {
      self.to_string()
    };
    (status, Json(ErrorBody { success: false, msg })).into_response()
  }
}
