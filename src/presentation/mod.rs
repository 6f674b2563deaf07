pub mod ranking;
pub mod report;

pub use ranking::{MAX_RANKING_ROWS, RankingRow, StyleTier, present, present_with_limit};
pub use report::RunReport;
