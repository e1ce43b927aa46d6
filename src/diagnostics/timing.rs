use serde::Serialize;
use std::time::Instant;

/// Elapsed time of one stage of the vertex search.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTiming {
    pub label: String,
    pub elapsed_ms: f64,
}

impl StageTiming {
    pub fn new(label: impl Into<String>, elapsed_ms: f64) -> Self {
        Self {
            label: label.into(),
            elapsed_ms,
        }
    }
}

/// Aggregated timing trace for one search.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingBreakdown {
    pub total_ms: f64,
    pub stages: Vec<StageTiming>,
}

impl TimingBreakdown {
    pub fn push(&mut self, label: impl Into<String>, elapsed_ms: f64) {
        self.stages.push(StageTiming::new(label, elapsed_ms));
    }

    /// Records the time elapsed since `start` under `label` and returns it.
    pub fn record_since(&mut self, label: impl Into<String>, start: Instant) -> f64 {
        let elapsed_ms = elapsed_ms(start);
        self.push(label, elapsed_ms);
        elapsed_ms
    }

    pub fn stage_ms(&self, label: &str) -> Option<f64> {
        self.stages
            .iter()
            .find(|s| s.label == label)
            .map(|s| s.elapsed_ms)
    }
}

#[inline]
pub fn elapsed_ms(start: Instant) -> f64 {
    start.elapsed().as_secs_f64() * 1000.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stages_are_recorded_in_order() {
        let mut timing = TimingBreakdown::default();
        timing.push("coarse", 2.5);
        let ms = timing.record_since("zoom", Instant::now());
        assert!(ms >= 0.0);
        assert_eq!(timing.stages.len(), 2);
        assert_eq!(timing.stage_ms("coarse"), Some(2.5));
        assert_eq!(timing.stage_ms("missing"), None);
    }
}
