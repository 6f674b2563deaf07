use crate::aggregation::ClassStat;
use crate::aggregation::class_stat::serialize_confidence;
use serde::Serialize;

/// Number of rows shown in the ranking panel.
pub const MAX_RANKING_ROWS: usize = 10;

/// Styling band of a ranking row, derived from its rank alone.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleTier {
    First,
    Second,
    Third,
    Default,
}

impl StyleTier {
    pub fn from_rank(rank: usize) -> Self {
        match rank {
            1 => StyleTier::First,
            2 => StyleTier::Second,
            3 => StyleTier::Third,
            _ => StyleTier::Default,
        }
    }

    /// 0 for rank 1, up to 3 for rank 4 and below.
    pub fn index(self) -> usize {
        match self {
            StyleTier::First => 0,
            StyleTier::Second => 1,
            StyleTier::Third => 2,
            StyleTier::Default => 3,
        }
    }

    /// Row background used by the ranking panel.
    pub fn background_hex(self) -> &'static str {
        match self {
            StyleTier::First => "#e8f5e8",
            StyleTier::Second => "#e8f0ff",
            StyleTier::Third => "#fff8e8",
            StyleTier::Default => "#f8f8f8",
        }
    }
}

/// One line of the ranking panel.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RankingRow {
    pub rank: usize,
    pub class_name: String,
    pub count: usize,
    #[serde(serialize_with = "serialize_confidence")]
    pub confidence: f32,
    pub tier: StyleTier,
}

impl RankingRow {
    pub fn class_text(&self) -> String {
        format!("{} (x{})", self.class_name, self.count)
    }

    pub fn confidence_text(&self) -> String {
        format!("{:.3}", self.confidence)
    }

    /// Progress bar value out of 100.
    pub fn progress(&self) -> f32 {
        self.confidence * 100.0
    }
}

/// Maps confidence-sorted class stats to at most [`MAX_RANKING_ROWS`] display rows.
pub fn present(stats: &[ClassStat]) -> Vec<RankingRow> {
    present_with_limit(stats, MAX_RANKING_ROWS)
}

/// Like [`present`] with a caller-chosen row cap.
pub fn present_with_limit(stats: &[ClassStat], limit: usize) -> Vec<RankingRow> {
    stats
        .iter()
        .take(limit)
        .enumerate()
        .map(|(position, stat)| {
            let rank = position + 1;
            RankingRow {
                rank,
                class_name: stat.class_name.clone(),
                count: stat.count,
                confidence: stat.best_confidence,
                tier: StyleTier::from_rank(rank),
            }
        })
        .collect()
}
