pub mod config;
pub mod factors;
pub mod engine;
pub mod validation;

pub use config::*;
pub use factors::{parse_card_count, parse_count, Counter, ScoreType};
pub use engine::{
    calculate_hand, calculate_line_score, hand_delta, HandResult, LineCounters, LineScore,
};
pub use validation::validate_scoring;
