//! Pure commission math. Every monetary amount in the system is an
//! integer number of cents.

use crate::entity::CommissionType;

/// 1 currency unit = 100 cents.
pub const CENTS: i64 = 100;

/// Commission owed on a `base` amount under the given terms, rounded
/// to whole cents.
///
/// A percentage commission scales with the base; a fixed commission
/// is the rate itself read as whole currency units and the base is
/// ignored, so it does not grow with the product price.
pub fn compute(base: i64, rate: f64, ty: &CommissionType) -> i64 {
  match ty {
    CommissionType::Percentage => (base as f64 * rate / 100.0).round() as i64,
    CommissionType::Fixed => (rate * CENTS as f64).round() as i64,
  }
}
