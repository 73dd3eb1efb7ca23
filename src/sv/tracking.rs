use rand::{Rng, distributions::Alphanumeric};

use crate::{entity::promotion, prelude::*};

pub const CODE_PREFIX: &str = "BF-";
pub const CODE_LEN: usize = 12;
pub const MAX_ATTEMPTS: u32 = 10;

/// Mints tracking codes no existing promotion uses. Generic over the
/// connection so promotion creation can run it inside its own
/// transaction.
pub struct Tracking<'a, C: ConnectionTrait> {
  db: &'a C,
}

impl<'a, C: ConnectionTrait> Tracking<'a, C> {
  pub fn new(db: &'a C) -> Self {
    Self { db }
  }

  /// Generate a unique tracking code.
  ///
  /// Codes end up as public affiliate-link path segments, so the
  /// alphabet is plain alphanumerics. Each attempt only reads the
  /// promotion store; collisions regenerate up to `MAX_ATTEMPTS`
  /// times before giving up.
  pub async fn generate(&self) -> Result<String> {
    self.generate_with(random_code).await
  }

  async fn generate_with(
    &self,
    mut next: impl FnMut() -> String,
  ) -> Result<String> {
    for _ in 0..MAX_ATTEMPTS {
      let code = next();
      let taken = promotion::Entity::find()
        .filter(promotion::Column::TrackingCode.eq(&code))
        .one(self.db)
        .await?
        .is_some();
      if !taken {
        return Ok(code);
      }
      debug!("tracking code collision on {code}, regenerating");
    }
    Err(Error::CodeGenerationExhausted(MAX_ATTEMPTS))
  }
}

fn random_code() -> String {
  let token: String = rand::thread_rng()
    .sample_iter(&Alphanumeric)
    .take(CODE_LEN)
    .map(char::from)
    .collect();
  format!("{CODE_PREFIX}{token}")
}
