use std::io::Write;
use std::sync::Mutex;

use crate::metrics::snapshot::TrackerMetricsSnapshot;
use crate::metrics::traits::MetricsExporter;

/// Prometheus text exporter for tracker metrics snapshots.
///
/// Writes the Prometheus text exposition format so the output can be scraped
/// directly or forwarded to an OpenTelemetry collector.
#[derive(Debug)]
pub struct PrometheusTextExporter<W: Write + Send> {
    prefix: String,
    writer: Mutex<W>,
}

impl<W: Write + Send> PrometheusTextExporter<W> {
    pub fn new(prefix: impl Into<String>, writer: W) -> Self {
        Self {
            prefix: prefix.into(),
            writer: Mutex::new(writer),
        }
    }

    /// Returns the underlying writer.
    pub fn into_inner(self) -> W {
        self.writer
            .into_inner()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn write_metric(&self, kind: &str, suffix: &str, value: u64) {
        let name = self.metric_name(suffix);
        let mut writer = self
            .writer
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        let _ = writeln!(writer, "# TYPE {} {}", name, kind);
        let _ = writeln!(writer, "{} {}", name, value);
    }

    fn write_counter(&self, suffix: &str, value: u64) {
        self.write_metric("counter", suffix, value);
    }

    fn write_gauge(&self, suffix: &str, value: u64) {
        self.write_metric("gauge", suffix, value);
    }

    fn metric_name(&self, suffix: &str) -> String {
        if self.prefix.is_empty() {
            suffix.to_string()
        } else {
            format!("{}_{}", self.prefix, suffix)
        }
    }
}

impl<W: Write + Send> MetricsExporter<TrackerMetricsSnapshot> for PrometheusTextExporter<W> {
    fn export(&self, snapshot: &TrackerMetricsSnapshot) {
        self.write_counter("increment_calls_total", snapshot.increment_calls);
        self.write_counter("increment_new_keys_total", snapshot.increment_new_keys);
        self.write_counter("increment_saturated_total", snapshot.increment_saturated);
        self.write_counter("decrement_calls_total", snapshot.decrement_calls);
        self.write_counter("decrement_untracked_total", snapshot.decrement_untracked);
        self.write_counter(
            "decrement_removed_keys_total",
            snapshot.decrement_removed_keys,
        );
        self.write_counter("buckets_created_total", snapshot.buckets_created);
        self.write_counter("buckets_destroyed_total", snapshot.buckets_destroyed);
        self.write_counter("max_key_calls_total", snapshot.max_key_calls);
        self.write_counter("max_key_found_total", snapshot.max_key_found);
        self.write_counter("min_key_calls_total", snapshot.min_key_calls);
        self.write_counter("min_key_found_total", snapshot.min_key_found);
        self.write_counter("clear_calls_total", snapshot.clear_calls);
        self.write_gauge("tracked_keys", snapshot.tracked_keys as u64);
        self.write_gauge("live_buckets", snapshot.live_buckets as u64);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exporter_writes_prefixed_counters_and_gauges() {
        let exporter = PrometheusTextExporter::new("freqtrack", Vec::new());
        let snapshot = TrackerMetricsSnapshot {
            increment_calls: 7,
            tracked_keys: 3,
            ..Default::default()
        };
        exporter.export(&snapshot);

        let text = String::from_utf8(exporter.into_inner()).unwrap();
        assert!(text.contains("# TYPE freqtrack_increment_calls_total counter"));
        assert!(text.contains("freqtrack_increment_calls_total 7"));
        assert!(text.contains("# TYPE freqtrack_tracked_keys gauge"));
        assert!(text.contains("freqtrack_tracked_keys 3"));
    }

    #[test]
    fn exporter_without_prefix_uses_bare_names() {
        let exporter = PrometheusTextExporter::new("", Vec::new());
        exporter.export(&TrackerMetricsSnapshot::default());
        let text = String::from_utf8(exporter.into_inner()).unwrap();
        assert!(text.contains("\nlive_buckets 0\n"));
    }
}
