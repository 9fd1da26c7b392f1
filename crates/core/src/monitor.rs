use std::collections::VecDeque;
use std::time::Instant;

use serde::{Deserialize, Serialize};

/// Frame budget for 60 fps, in milliseconds.
const FRAME_BUDGET_60FPS_MS: f64 = 16.7;
/// Render-time budget inside one frame, in milliseconds.
const RENDER_BUDGET_MS: f64 = 5.0;

/// Monitor construction options.
#[derive(Debug, Clone, Copy)]
pub struct MonitorOptions {
    /// Log every recorded frame at debug level.
    pub debug_logging: bool,
    /// Ring buffer capacity; oldest samples are evicted beyond this.
    pub max_samples: usize,
}

impl Default for MonitorOptions {
    fn default() -> Self {
        Self {
            debug_logging: false,
            max_samples: 30,
        }
    }
}

/// One frame's timing report, as supplied by the owning render loop.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FrameSample {
    pub dpr: f64,
    /// Time spent inside the draw calls, milliseconds.
    pub render_time_ms: f64,
    /// Wall time of the whole frame, milliseconds.
    pub frame_time_ms: f64,
    /// Quality-reduction factor in effect when the frame was drawn.
    pub quality: f64,
    /// Whether advanced effects were enabled, if the renderer tracks it.
    pub effects: Option<bool>,
}

/// Aggregate of the current sample window, recomputed on read.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PerformanceMetrics {
    pub sample_count: usize,
    pub avg_render_time_ms: f64,
    pub avg_frame_time_ms: f64,
    /// dpr of the most recent sample (1.0 when no samples yet).
    pub dpr: f64,
}

/// Bounded FIFO of recent frame timings for one canvas instance.
///
/// Exclusively owned by its canvas — nothing else writes to it, so there is
/// no locking. `start` must be called before frames are recorded; calling
/// `record_frame` on a monitor that was never started is programmer misuse
/// and trips a debug assertion.
#[derive(Debug)]
pub struct PerformanceMonitor {
    options: MonitorOptions,
    samples: VecDeque<FrameSample>,
    started_at: Option<Instant>,
}

impl PerformanceMonitor {
    pub fn new(options: MonitorOptions) -> Self {
        Self {
            options,
            samples: VecDeque::with_capacity(options.max_samples),
            started_at: None,
        }
    }

    /// Begin a measurement session: reset the clock reference and drop any
    /// samples from a previous session so averages never mix sessions.
    pub fn start(&mut self) {
        self.started_at = Some(Instant::now());
        self.samples.clear();
    }

    pub fn is_started(&self) -> bool {
        self.started_at.is_some()
    }

    /// Milliseconds since `start`, or 0 if never started.
    pub fn elapsed_ms(&self) -> f64 {
        self.started_at
            .map(|t| t.elapsed().as_secs_f64() * 1000.0)
            .unwrap_or(0.0)
    }

    /// Push a frame sample, evicting the oldest beyond `max_samples`.
    pub fn record_frame(&mut self, sample: FrameSample) {
        debug_assert!(
            self.started_at.is_some(),
            "record_frame called on a monitor that was never started"
        );
        if self.options.debug_logging {
            log::debug!(
                "frame: render={:.2}ms frame={:.2}ms dpr={} quality={:.2}",
                sample.render_time_ms,
                sample.frame_time_ms,
                sample.dpr,
                sample.quality
            );
        }
        self.samples.push_back(sample);
        while self.samples.len() > self.options.max_samples {
            self.samples.pop_front();
        }
    }

    /// Recompute the aggregate over the current window.
    pub fn metrics(&self) -> PerformanceMetrics {
        let n = self.samples.len();
        if n == 0 {
            return PerformanceMetrics {
                sample_count: 0,
                avg_render_time_ms: 0.0,
                avg_frame_time_ms: 0.0,
                dpr: 1.0,
            };
        }
        let render_sum: f64 = self.samples.iter().map(|s| s.render_time_ms).sum();
        let frame_sum: f64 = self.samples.iter().map(|s| s.frame_time_ms).sum();
        let dpr = self.samples.back().map(|s| s.dpr).unwrap_or(1.0);
        PerformanceMetrics {
            sample_count: n,
            avg_render_time_ms: render_sum / n as f64,
            avg_frame_time_ms: frame_sum / n as f64,
            dpr,
        }
    }

    /// Render/frame time series over the current window, oldest first.
    /// Convenience feed for [`analyze_performance`].
    pub fn timings(&self) -> (Vec<f64>, Vec<f64>) {
        (
            self.samples.iter().map(|s| s.render_time_ms).collect(),
            self.samples.iter().map(|s| s.frame_time_ms).collect(),
        )
    }
}

/// Performance classification, best to worst, with an explicit
/// not-enough-data state so empty windows are never reported as healthy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PerformanceLevel {
    InsufficientData,
    Excellent,
    Good,
    Degraded,
    Poor,
}

/// Result of classifying a timing window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerformanceReport {
    pub level: PerformanceLevel,
    pub description: String,
    pub recommendations: Vec<String>,
}

/// Classify average render/frame times against the 60 fps budget.
///
/// Pure: no clocks, no state. `Excellent` needs both averages inside budget
/// (render ≤ 5 ms, frame ≤ 16.7 ms); `Poor` means roughly 3× over budget on
/// either axis. Recommendations are empty at `Excellent` and grow more
/// specific as the level worsens.
pub fn analyze_performance(render_times_ms: &[f64], frame_times_ms: &[f64]) -> PerformanceReport {
    if render_times_ms.is_empty() || frame_times_ms.is_empty() {
        return PerformanceReport {
            level: PerformanceLevel::InsufficientData,
            description: "not enough frame samples to classify performance".into(),
            recommendations: vec!["record more frames before adjusting quality".into()],
        };
    }

    let avg = |xs: &[f64]| xs.iter().sum::<f64>() / xs.len() as f64;
    let avg_render = avg(render_times_ms);
    let avg_frame = avg(frame_times_ms);

    let (level, description) = if avg_render <= RENDER_BUDGET_MS
        && avg_frame <= FRAME_BUDGET_60FPS_MS
    {
        (
            PerformanceLevel::Excellent,
            format!("within 60fps budget (render {avg_render:.1}ms, frame {avg_frame:.1}ms)"),
        )
    } else if avg_render <= 2.0 * RENDER_BUDGET_MS && avg_frame <= 2.0 * FRAME_BUDGET_60FPS_MS {
        (
            PerformanceLevel::Good,
            format!("near budget (render {avg_render:.1}ms, frame {avg_frame:.1}ms)"),
        )
    } else if avg_render <= 3.0 * RENDER_BUDGET_MS && avg_frame <= 3.0 * FRAME_BUDGET_60FPS_MS {
        (
            PerformanceLevel::Degraded,
            format!("over budget (render {avg_render:.1}ms, frame {avg_frame:.1}ms)"),
        )
    } else {
        (
            PerformanceLevel::Poor,
            format!("far over budget (render {avg_render:.1}ms, frame {avg_frame:.1}ms)"),
        )
    };

    let recommendations = match level {
        PerformanceLevel::Excellent => Vec::new(),
        PerformanceLevel::Good => vec!["consider disabling advanced effects".into()],
        PerformanceLevel::Degraded => vec![
            "disable advanced effects".into(),
            "raise quality reduction toward the 0.8 floor".into(),
        ],
        PerformanceLevel::Poor => vec![
            "disable advanced effects and anti-aliasing".into(),
            "raise quality reduction to the 0.8 floor".into(),
            "increase frame skip to 2".into(),
            "cap the backing-store scale below the display dpr".into(),
        ],
        PerformanceLevel::InsufficientData => unreachable!("handled above"),
    };

    PerformanceReport {
        level,
        description,
        recommendations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(render: f64, frame: f64) -> FrameSample {
        FrameSample {
            dpr: 2.0,
            render_time_ms: render,
            frame_time_ms: frame,
            quality: 1.0,
            effects: None,
        }
    }

    #[test]
    fn buffer_is_bounded_and_keeps_most_recent() {
        let mut m = PerformanceMonitor::new(MonitorOptions {
            debug_logging: false,
            max_samples: 5,
        });
        m.start();
        for i in 0..20 {
            m.record_frame(sample(i as f64, i as f64 * 2.0));
        }
        let metrics = m.metrics();
        assert_eq!(metrics.sample_count, 5);
        // last five render times are 15..=19, average 17
        assert!((metrics.avg_render_time_ms - 17.0).abs() < 1e-9);
    }

    #[test]
    fn metrics_on_empty_monitor_are_zeroed() {
        let mut m = PerformanceMonitor::new(MonitorOptions::default());
        m.start();
        let metrics = m.metrics();
        assert_eq!(metrics.sample_count, 0);
        assert_eq!(metrics.dpr, 1.0);
    }

    #[test]
    fn start_clears_previous_session() {
        let mut m = PerformanceMonitor::new(MonitorOptions::default());
        m.start();
        m.record_frame(sample(3.0, 12.0));
        m.start();
        assert_eq!(m.metrics().sample_count, 0);
        assert!(m.is_started());
    }

    #[test]
    fn metrics_report_latest_dpr() {
        let mut m = PerformanceMonitor::new(MonitorOptions::default());
        m.start();
        m.record_frame(FrameSample { dpr: 1.0, ..sample(2.0, 10.0) });
        m.record_frame(FrameSample { dpr: 3.0, ..sample(2.0, 10.0) });
        assert_eq!(m.metrics().dpr, 3.0);
    }

    #[test]
    fn excellent_within_budget() {
        let report = analyze_performance(&[3.0, 5.0, 7.0], &[12.0, 14.0, 16.0]);
        assert_eq!(report.level, PerformanceLevel::Excellent);
        assert!(report.recommendations.is_empty());
    }

    #[test]
    fn poor_far_over_budget() {
        let report = analyze_performance(&[25.0, 30.0, 35.0], &[60.0, 70.0, 80.0]);
        assert_eq!(report.level, PerformanceLevel::Poor);
        assert!(!report.recommendations.is_empty());
    }

    #[test]
    fn empty_input_is_insufficient_not_excellent() {
        let report = analyze_performance(&[], &[]);
        assert_eq!(report.level, PerformanceLevel::InsufficientData);
        let half_empty = analyze_performance(&[1.0], &[]);
        assert_eq!(half_empty.level, PerformanceLevel::InsufficientData);
    }

    #[test]
    fn recommendations_grow_as_level_worsens() {
        let excellent = analyze_performance(&[2.0], &[10.0]);
        let good = analyze_performance(&[8.0], &[20.0]);
        let degraded = analyze_performance(&[14.0], &[45.0]);
        let poor = analyze_performance(&[40.0], &[90.0]);
        assert!(excellent.recommendations.len() < good.recommendations.len());
        assert!(good.recommendations.len() < degraded.recommendations.len());
        assert!(degraded.recommendations.len() < poor.recommendations.len());
    }

    #[test]
    fn timings_feed_matches_buffer() {
        let mut m = PerformanceMonitor::new(MonitorOptions::default());
        m.start();
        m.record_frame(sample(2.0, 9.0));
        m.record_frame(sample(4.0, 11.0));
        let (render, frame) = m.timings();
        assert_eq!(render, vec![2.0, 4.0]);
        assert_eq!(frame, vec![9.0, 11.0]);
    }

    #[test]
    fn metrics_serialize_to_json() {
        let mut m = PerformanceMonitor::new(MonitorOptions::default());
        m.start();
        m.record_frame(sample(2.0, 9.0));
        let json = serde_json::to_string(&m.metrics()).unwrap_or_default();
        assert!(json.contains("\"sample_count\":1"));
    }
}
