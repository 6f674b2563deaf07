pub mod class_stat;

pub use class_stat::{Aggregation, ClassStat, TopDetection, aggregate};
