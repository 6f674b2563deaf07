use crate::aggregation::TopDetection;
use crate::presentation::ranking::RankingRow;
use itertools::Itertools;
use serde::Serialize;
use std::fmt;

/// The textual part of a run's result, as shown in the statistics and ranking panels.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RunReport {
    pub total_objects: usize,
    pub detection_time_seconds: f64,
    pub top_detection: Option<TopDetection>,
    pub ranking: Vec<RankingRow>,
}

impl RunReport {
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

impl fmt::Display for RunReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total Objects: {}", self.total_objects)?;
        writeln!(f, "Detection Time: {:.2}s", self.detection_time_seconds)?;
        match &self.top_detection {
            Some(top) => {
                writeln!(f, "Top Detection: {} (x{})", top.class_name, top.count)?;
                writeln!(f, "Confidence: {:.3}", top.confidence)?;
            }
            None => {
                writeln!(f, "Top Detection: No objects detected")?;
                writeln!(f, "Confidence: -")?;
            }
        }
        if !self.ranking.is_empty() {
            writeln!(f, "Top Detections:")?;
            let lines = self
                .ranking
                .iter()
                .map(|row| format!("{:>3}  {:<24} {}", row.rank, row.class_text(), row.confidence_text()))
                .join("\n");
            writeln!(f, "{}", lines)?;
        }
        Ok(())
    }
}
