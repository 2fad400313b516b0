//! # Classifier Evaluation
//!
//! Threshold-dependent metrics for the precomputed lead-scoring run:
//! confusion matrix, ROC and precision-recall curves, and a fixed-step
//! threshold sweep.
//!
//! A lead is predicted positive when its probability is at or above the
//! threshold. Curves sweep every distinct probability, highest first, so
//! tied scores enter together and the curves stay monotone.

use novamart_domain::LeadRecord;
use serde::{Deserialize, Serialize};

use crate::error::{AnalyticsError, Result};

// =============================================================================
// TYPES
// =============================================================================

/// Outcome counts at one threshold.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfusionMatrix {
    pub tp: usize,
    pub tn: usize,
    pub fp: usize,
    #[serde(rename = "fn")]
    pub fn_: usize,
}

/// Scores derived from a single [`ConfusionMatrix`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassificationMetrics {
    pub accuracy: f64,
    /// 0 when nothing is predicted positive.
    pub precision: f64,
    /// 0 when there are no positive labels.
    pub recall: f64,
    /// 0 when precision and recall are both 0.
    pub f1: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RocPoint {
    /// `None` for the origin, where nothing is predicted positive.
    pub threshold: Option<f64>,
    pub fpr: f64,
    pub tpr: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RocCurve {
    pub points: Vec<RocPoint>,
    pub auc: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PrPoint {
    pub threshold: Option<f64>,
    pub recall: f64,
    /// Undefined at the recall-0 origin.
    pub precision: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PrCurve {
    pub points: Vec<PrPoint>,
    pub average_precision: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThresholdMetrics {
    pub threshold: f64,
    pub confusion: ConfusionMatrix,
    pub metrics: ClassificationMetrics,
}

impl ConfusionMatrix {
    #[must_use]
    pub const fn total(&self) -> usize {
        self.tp + self.tn + self.fp + self.fn_
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn metrics(&self) -> ClassificationMetrics {
        let ratio = |num: usize, den: usize| {
            if den == 0 {
                0.0
            } else {
                num as f64 / den as f64
            }
        };
        let accuracy = ratio(self.tp + self.tn, self.total());
        let precision = ratio(self.tp, self.tp + self.fp);
        let recall = ratio(self.tp, self.tp + self.fn_);
        let f1 = if precision + recall == 0.0 {
            0.0
        } else {
            2.0 * precision * recall / (precision + recall)
        };
        ClassificationMetrics {
            accuracy,
            precision,
            recall,
            f1,
        }
    }
}

// =============================================================================
// VALIDATION
// =============================================================================

fn validate(labels: &[i64], probabilities: &[f64]) -> Result<()> {
    if labels.is_empty() {
        return Err(AnalyticsError::EmptyInput);
    }
    if labels.len() != probabilities.len() {
        return Err(AnalyticsError::LengthMismatch {
            labels: labels.len(),
            probabilities: probabilities.len(),
        });
    }
    if let Some((index, &label)) = labels.iter().enumerate().find(|(_, l)| !matches!(l, 0 | 1)) {
        return Err(AnalyticsError::LabelDomain { index, label });
    }
    if let Some(index) = probabilities.iter().position(|p| p.is_nan()) {
        return Err(AnalyticsError::InvalidParameter(format!(
            "probability at index {index} is NaN"
        )));
    }
    Ok(())
}

/// Positive and negative label counts; fails unless both are non-zero.
fn class_counts(labels: &[i64]) -> Result<(usize, usize)> {
    let positives = labels.iter().filter(|&&l| l == 1).count();
    let negatives = labels.len() - positives;
    if positives == 0 || negatives == 0 {
        return Err(AnalyticsError::DegenerateLabels);
    }
    Ok((positives, negatives))
}

// =============================================================================
// OPERATIONS
// =============================================================================

/// Confusion matrix at `threshold`, clamped into [0, 1].
///
/// # Errors
///
/// `EmptyInput`, `LengthMismatch`, `LabelDomain`, or `InvalidParameter`
/// for a NaN threshold or probability.
pub fn confusion_at(
    labels: &[i64],
    probabilities: &[f64],
    threshold: f64,
) -> Result<ConfusionMatrix> {
    if threshold.is_nan() {
        return Err(AnalyticsError::InvalidParameter("threshold is NaN".to_string()));
    }
    validate(labels, probabilities)?;
    let threshold = threshold.clamp(0.0, 1.0);

    let mut cm = ConfusionMatrix::default();
    for (&label, &p) in labels.iter().zip(probabilities) {
        match (label == 1, p >= threshold) {
            (true, true) => cm.tp += 1,
            (true, false) => cm.fn_ += 1,
            (false, true) => cm.fp += 1,
            (false, false) => cm.tn += 1,
        }
    }
    Ok(cm)
}

/// Cumulative (threshold, tp, fp) after admitting each distinct score,
/// highest first.
fn sweep(labels: &[i64], probabilities: &[f64]) -> Vec<(f64, usize, usize)> {
    let mut order: Vec<usize> = (0..labels.len()).collect();
    order.sort_by(|&a, &b| probabilities[b].total_cmp(&probabilities[a]));

    let mut steps: Vec<(f64, usize, usize)> = Vec::new();
    let (mut tp, mut fp) = (0, 0);
    for (pos, &i) in order.iter().enumerate() {
        if labels[i] == 1 {
            tp += 1;
        } else {
            fp += 1;
        }
        let next_differs = order
            .get(pos + 1)
            .is_none_or(|&j| probabilities[j] != probabilities[i]);
        if next_differs {
            steps.push((probabilities[i], tp, fp));
        }
    }
    steps
}

/// ROC curve over every distinct score, from (0, 0) to (1, 1), with its
/// trapezoidal AUC.
///
/// # Errors
///
/// As [`confusion_at`], plus `DegenerateLabels` when only one class is
/// present.
#[allow(clippy::cast_precision_loss)]
pub fn roc_curve(labels: &[i64], probabilities: &[f64]) -> Result<RocCurve> {
    validate(labels, probabilities)?;
    let (positives, negatives) = class_counts(labels)?;

    let mut points = vec![RocPoint {
        threshold: None,
        fpr: 0.0,
        tpr: 0.0,
    }];
    points.extend(
        sweep(labels, probabilities)
            .into_iter()
            .map(|(threshold, tp, fp)| RocPoint {
                threshold: Some(threshold),
                fpr: fp as f64 / negatives as f64,
                tpr: tp as f64 / positives as f64,
            }),
    );

    let auc: f64 = points
        .windows(2)
        .map(|w| (w[1].fpr - w[0].fpr) * (w[0].tpr + w[1].tpr) / 2.0)
        .sum();

    tracing::debug!(points = points.len(), auc, "ROC curve computed");
    Ok(RocCurve { points, auc })
}

/// Precision-recall curve over the same sweep as [`roc_curve`].
///
/// The first point is recall 0 with undefined precision. Average
/// precision is the recall-weighted mean of precision, `Σ (Rn − Rn−1)·Pn`.
///
/// # Errors
///
/// As [`roc_curve`].
#[allow(clippy::cast_precision_loss)]
pub fn precision_recall_curve(labels: &[i64], probabilities: &[f64]) -> Result<PrCurve> {
    validate(labels, probabilities)?;
    let (positives, _) = class_counts(labels)?;

    let mut points = vec![PrPoint {
        threshold: None,
        recall: 0.0,
        precision: None,
    }];
    let mut average_precision = 0.0;
    let mut last_recall = 0.0;
    for (threshold, tp, fp) in sweep(labels, probabilities) {
        let recall = tp as f64 / positives as f64;
        let precision = tp as f64 / (tp + fp) as f64;
        average_precision += (recall - last_recall) * precision;
        last_recall = recall;
        points.push(PrPoint {
            threshold: Some(threshold),
            recall,
            precision: Some(precision),
        });
    }

    Ok(PrCurve {
        points,
        average_precision,
    })
}

/// Finest slider step [`threshold_sweep`] accepts.
pub const MIN_THRESHOLD_STEP: f64 = 1e-4;

/// Drop the float noise of `k·step` so a threshold equals its decimal
/// literal (`3 × 0.05` is exactly `0.15`).
fn snap(threshold: f64) -> f64 {
    (threshold * 1e9).round() / 1e9
}

/// Metrics at 0, `step`, `2·step`, … up to and including 1.
///
/// # Errors
///
/// `InvalidParameter` unless `MIN_THRESHOLD_STEP <= step <= 1`; otherwise
/// as [`confusion_at`].
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn threshold_sweep(
    labels: &[i64],
    probabilities: &[f64],
    step: f64,
) -> Result<Vec<ThresholdMetrics>> {
    if !(MIN_THRESHOLD_STEP..=1.0).contains(&step) {
        return Err(AnalyticsError::InvalidParameter(format!(
            "threshold step must lie in [{MIN_THRESHOLD_STEP}, 1], got {step}"
        )));
    }
    validate(labels, probabilities)?;

    let whole_steps = (1.0 / step + 1e-9).floor() as u32;
    let mut thresholds: Vec<f64> = (0..=whole_steps)
        .map(|k| snap(f64::from(k) * step).min(1.0))
        .collect();
    if thresholds.last().is_some_and(|&t| t < 1.0) {
        thresholds.push(1.0);
    }

    thresholds
        .into_iter()
        .map(|threshold| {
            let confusion = confusion_at(labels, probabilities, threshold)?;
            Ok(ThresholdMetrics {
                threshold,
                confusion,
                metrics: confusion.metrics(),
            })
        })
        .collect()
}

/// `None` in place of `DegenerateLabels`, for views that stay useful
/// without the curves.
pub(crate) fn unless_single_class<T>(result: Result<T>) -> Result<Option<T>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(AnalyticsError::DegenerateLabels) => Ok(None),
        Err(e) => Err(e),
    }
}

/// Split scored leads into label and probability columns.
#[must_use]
pub fn lead_columns(leads: &[LeadRecord]) -> (Vec<i64>, Vec<f64>) {
    leads
        .iter()
        .map(|l| (l.actual_converted, l.predicted_probability))
        .unzip()
}
