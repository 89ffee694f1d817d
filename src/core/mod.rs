//! Core calculators

pub mod cashback;
pub mod matched;
pub mod validation;

// Re-export commonly used types
pub use cashback::calculate_cashback;
pub use matched::{
    compute_optimal_lay_stake, evaluate_outcomes, resolve, risk_sweep, MatchedBetInput,
    MatchedBetResult, SweepPoint, Verdict,
};
pub use validation::CalcError;
