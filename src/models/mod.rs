pub mod manager;

pub use manager::{Manager, MetricKey, Metrics, SavedBoard, SavedManager, Standing};
