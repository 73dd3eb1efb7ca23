pub mod earnings;
pub mod product;
pub mod product_view;
pub mod promotion;
pub mod promotion_click;
pub mod user;

pub use earnings::{EarningsStatus, EarningsType};
pub use product::CommissionType;
pub use promotion::PromotionStatus;
