//! Conversion funnel metrics.
//!
//! Count-based funnels are ordered by volume (visitors, then conversions,
//! both descending) before any ratio is taken, so stage labels never drive
//! the order. Rate-only funnels keep file order and carry no drop-off.

use std::cmp::Reverse;

use novamart_domain::{FunnelInput, StageCounts, StageRate};
use serde::{Deserialize, Serialize};

/// Derived metrics for one stage. `None` marks an undefined ratio.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunnelStageMetrics {
    pub stage: String,
    pub visitors: Option<i64>,
    pub conversions: Option<i64>,
    pub conversion_rate_pct: Option<f64>,
    pub drop_off_pct: Option<f64>,
    /// Visitors as a percentage of the top stage's visitors.
    pub pct_of_initial: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunnelReport {
    pub stages: Vec<FunnelStageMetrics>,
    /// False for rate-only funnels, which have no conversions to compare.
    pub drop_off_available: bool,
}

impl FunnelReport {
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

#[allow(clippy::cast_precision_loss)]
fn percent(numerator: i64, denominator: i64) -> Option<f64> {
    (denominator != 0).then(|| round2(numerator as f64 / denominator as f64 * 100.0))
}

fn by_counts(stages: &[StageCounts], rate_reported: bool) -> FunnelReport {
    let mut ordered: Vec<&StageCounts> = stages.iter().collect();
    ordered.sort_by_key(|s| (Reverse(s.visitors), Reverse(s.conversions)));

    let initial = ordered.first().map(|s| s.visitors);
    let mut out = Vec::with_capacity(ordered.len());
    let mut previous: Option<&StageCounts> = None;

    for stage in ordered {
        if stage.visitors == 0 {
            tracing::warn!(stage = %stage.stage, "Funnel stage has zero visitors");
        }
        let conversion_rate_pct = if rate_reported {
            stage.reported_rate
        } else {
            percent(stage.conversions, stage.visitors)
        };
        let drop_off_pct = previous.and_then(|prev| {
            if prev.conversions == 0 {
                tracing::warn!(
                    stage = %stage.stage,
                    previous = %prev.stage,
                    "Drop-off undefined after a zero-conversion stage"
                );
            }
            percent(prev.conversions - stage.conversions, prev.conversions)
        });

        out.push(FunnelStageMetrics {
            stage: stage.stage.clone(),
            visitors: Some(stage.visitors),
            conversions: Some(stage.conversions),
            conversion_rate_pct,
            drop_off_pct,
            pct_of_initial: initial.and_then(|first| percent(stage.visitors, first)),
        });
        previous = Some(stage);
    }

    FunnelReport {
        stages: out,
        drop_off_available: true,
    }
}

fn by_rate(stages: &[StageRate]) -> FunnelReport {
    FunnelReport {
        stages: stages
            .iter()
            .map(|s| FunnelStageMetrics {
                stage: s.stage.clone(),
                visitors: None,
                conversions: None,
                conversion_rate_pct: s.conversion_rate,
                drop_off_pct: None,
                pct_of_initial: None,
            })
            .collect(),
        drop_off_available: false,
    }
}

/// Conversion rate, drop-off and percent-of-initial per stage.
///
/// The rate comes from the file's `conversion_rate` column when it has one
/// (non-numeric cells stay undefined), otherwise `conversions / visitors`.
/// Drop-off at stage `i` is the share of stage `i - 1` conversions lost,
/// rounded to two decimals; the top stage has none.
#[must_use]
pub fn compute_funnel(input: &FunnelInput) -> FunnelReport {
    match input {
        FunnelInput::ByCounts {
            stages,
            rate_reported,
        } => by_counts(stages, *rate_reported),
        FunnelInput::ByRate(stages) => by_rate(stages),
    }
}
