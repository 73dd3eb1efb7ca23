pub mod commission;
pub mod events;
pub mod ledger;
pub mod promotion;
#[cfg(test)]
pub mod test_utils;
pub mod tracking;
pub mod weekly;

pub use events::Events;
pub use ledger::Ledger;
pub use promotion::Promotions;
pub use tracking::Tracking;
pub use weekly::Reports;
