pub mod change;
pub mod daily;
pub mod rolling;
pub mod weekly;

pub use change::{percentage_change, ZERO_BASE_GROWTH_PCT};
pub use daily::{aggregate_daily, build_daily};
pub use rolling::rolling_average;
pub use weekly::aggregate_weekly;
