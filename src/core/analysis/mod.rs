pub mod period;

pub use period::{gcd, lcm, lcm_all, BranchPeriod, PeriodAnalyzer};
