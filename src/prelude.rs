pub use crate::ds::{Bucket, BucketChain, SlotArena, SlotId};

#[cfg(feature = "concurrency")]
pub use crate::concurrent::ConcurrentFrequencyTracker;
#[cfg(feature = "metrics")]
pub use crate::metrics::exporter::PrometheusTextExporter;
#[cfg(feature = "metrics")]
pub use crate::metrics::snapshot::TrackerMetricsSnapshot;
#[cfg(feature = "metrics")]
pub use crate::metrics::traits::{MetricsExporter, MetricsSnapshotProvider};
pub use crate::builder::TrackerBuilder;
pub use crate::error::InvariantError;
pub use crate::tracker::{BucketKeys, FrequencyTracker, Iter};
