//! Counter registry for the envelope router.
//!
//! Labels are flattened into sorted key vectors so the same label set always
//! maps to the same counter regardless of argument order.

use dashmap::DashMap;
use std::fmt::Write;
use std::sync::atomic::{AtomicU64, Ordering};

/// Helper to escape label values.
fn escape_label(v: &str) -> String {
    v.replace('\\', "\\\\").replace('"', "\\\"").replace('\n', "\\n")
}

fn label_key(labels: &[(&str, &str)]) -> Vec<(String, String)> {
    let mut key: Vec<(String, String)> = labels
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    key.sort();
    key
}

#[derive(Default)]
pub struct CounterVec {
    map: DashMap<Vec<(String, String)>, AtomicU64>,
}

impl CounterVec {
    /// Increment by 1.
    pub fn inc(&self, labels: &[(&str, &str)]) {
        self.add(labels, 1);
    }

    /// Increment by an arbitrary value.
    pub fn add(&self, labels: &[(&str, &str)], v: u64) {
        let counter = self
            .map
            .entry(label_key(labels))
            .or_insert_with(|| AtomicU64::new(0));
        counter.fetch_add(v, Ordering::Relaxed);
    }

    /// Current value (0 when the label set was never seen).
    pub fn get(&self, labels: &[(&str, &str)]) -> u64 {
        self.map
            .get(&label_key(labels))
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    /// Render in Prometheus text exposition format.
    fn render(&self, name: &str, out: &mut String) {
        let _ = writeln!(out, "# TYPE {} counter", name);
        for r in self.map.iter() {
            let label_str = r
                .key()
                .iter()
                .map(|(k, v)| format!("{}=\"{}\"", k, escape_label(v)))
                .collect::<Vec<_>>()
                .join(",");
            let _ = writeln!(out, "{}{{{}}} {}", name, label_str, r.value().load(Ordering::Relaxed));
        }
    }
}

/// Per-kind outcome counters of [`crate::router::EnvelopeRouter`].
#[derive(Default)]
pub struct RouterMetrics {
    /// Envelopes turned into an event.
    pub routed: CounterVec,
    /// Envelopes filtered out (soft non-match, unknown kind).
    pub skipped: CounterVec,
    /// Envelopes whose payload failed to decode.
    pub failed: CounterVec,
}

impl RouterMetrics {
    pub fn render(&self) -> String {
        let mut out = String::new();
        self.routed.render("pubwire_envelopes_routed_total", &mut out);
        self.skipped.render("pubwire_envelopes_skipped_total", &mut out);
        self.failed.render("pubwire_envelopes_failed_total", &mut out);
        out
    }
}
