use crate::annotations::detection::Detection;
use serde::{Serialize, Serializer};
use std::collections::HashMap;

/// Count and best confidence of one class within a detection set.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ClassStat {
    pub class_name: String,
    pub count: usize,
    #[serde(serialize_with = "serialize_confidence")]
    pub best_confidence: f32,
}

/// The result of reducing one detection set.
///
/// `stats` is ordered by best confidence, highest first. Classes with equal best confidence keep
/// the order in which they first appeared in the detection set.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Aggregation {
    pub total_count: usize,
    pub stats: Vec<ClassStat>,
}

/// The highest ranked class of a run.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct TopDetection {
    pub class_name: String,
    pub count: usize,
    #[serde(serialize_with = "serialize_confidence")]
    pub confidence: f32,
}

/// Serializes an `f32` score as the `f64` with the same shortest decimal form, so 0.9 stays 0.9.
pub(crate) fn serialize_confidence<S: Serializer>(value: &f32, serializer: S) -> Result<S::Ok, S::Error> {
    let widened = value.to_string().parse::<f64>().unwrap_or(f64::from(*value));
    serializer.serialize_f64(widened)
}

impl Aggregation {
    /// `None` when nothing was detected.
    pub fn top_detection(&self) -> Option<TopDetection> {
        self.stats.first().map(|stat| TopDetection {
            class_name: stat.class_name.clone(),
            count: stat.count,
            confidence: stat.best_confidence,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.total_count == 0
    }
}

/// Reduces a detection set into per-class statistics keyed by class name.
///
/// An empty set is a valid "no objects" result and yields a zero count with no stats.
pub fn aggregate(detections: &[Detection]) -> Aggregation {
    // Position of each class in `stats`, which is kept in first-seen order until the final sort.
    let mut index_by_name: HashMap<&str, usize> = HashMap::new();
    let mut stats: Vec<ClassStat> = Vec::new();

    for detection in detections {
        let class_name = detection.class_name();
        match index_by_name.get(class_name) {
            Some(&index) => {
                let stat = &mut stats[index];
                stat.count += 1;
                stat.best_confidence = stat.best_confidence.max(detection.confidence);
            }
            None => {
                index_by_name.insert(class_name, stats.len());
                stats.push(ClassStat {
                    class_name: class_name.to_string(),
                    count: 1,
                    best_confidence: detection.confidence,
                });
            }
        }
    }

    // sort_by is stable, which gives the first-seen tie-break.
    stats.sort_by(|a, b| b.best_confidence.total_cmp(&a.best_confidence));

    Aggregation {
        total_count: detections.len(),
        stats,
    }
}
