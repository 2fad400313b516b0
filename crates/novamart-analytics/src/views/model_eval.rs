//! Lead-scoring model evaluation page.

use novamart_domain::LearningCurvePoint;
use serde::{Deserialize, Serialize};

use crate::classification::{
    confusion_at, lead_columns, precision_recall_curve, roc_curve, threshold_sweep,
    unless_single_class, ClassificationMetrics, ConfusionMatrix, PrCurve, RocCurve,
    ThresholdMetrics,
};
use crate::engine::DashboardEngine;
use crate::error::Result;

/// Feature importance bar with optional error bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatureBar {
    pub feature: String,
    pub importance: f64,
    pub error: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelEvaluation {
    pub threshold: f64,
    pub confusion: ConfusionMatrix,
    pub metrics: ClassificationMetrics,
    /// `None` when every lead carries the same label.
    pub roc: Option<RocCurve>,
    pub precision_recall: Option<PrCurve>,
    pub sweep: Vec<ThresholdMetrics>,
    pub feature_importance: Vec<FeatureBar>,
    pub learning_curve: Vec<LearningCurvePoint>,
}

impl DashboardEngine {
    /// Confusion matrix and derived scores; `threshold` defaults to the
    /// configured value.
    ///
    /// # Errors
    ///
    /// See [`confusion_at`].
    pub fn confusion(
        &self,
        threshold: Option<f64>,
    ) -> Result<(ConfusionMatrix, ClassificationMetrics)> {
        let (labels, probabilities) = lead_columns(&self.bundle.leads);
        let cm = confusion_at(
            &labels,
            &probabilities,
            threshold.unwrap_or(self.config.default_threshold),
        )?;
        Ok((cm, cm.metrics()))
    }

    /// # Errors
    ///
    /// See [`roc_curve`].
    pub fn roc(&self) -> Result<RocCurve> {
        let (labels, probabilities) = lead_columns(&self.bundle.leads);
        roc_curve(&labels, &probabilities)
    }

    /// # Errors
    ///
    /// See [`precision_recall_curve`].
    pub fn precision_recall(&self) -> Result<PrCurve> {
        let (labels, probabilities) = lead_columns(&self.bundle.leads);
        precision_recall_curve(&labels, &probabilities)
    }

    /// Metrics at every configured slider step.
    ///
    /// # Errors
    ///
    /// See [`threshold_sweep`].
    pub fn threshold_sweep(&self) -> Result<Vec<ThresholdMetrics>> {
        let (labels, probabilities) = lead_columns(&self.bundle.leads);
        threshold_sweep(&labels, &probabilities, self.config.threshold_step)
    }

    /// Features by importance, smallest first.
    #[must_use]
    pub fn feature_importance(&self) -> Vec<FeatureBar> {
        let mut bars: Vec<FeatureBar> = self
            .bundle
            .feature_importance
            .iter()
            .map(|f| FeatureBar {
                feature: f.feature.clone(),
                importance: f.importance,
                error: f.importance_std,
            })
            .collect();
        bars.sort_by(|a, b| a.importance.total_cmp(&b.importance));
        bars
    }

    #[must_use]
    pub fn learning_curve(&self) -> &[LearningCurvePoint] {
        &self.bundle.learning_curve
    }

    /// Everything on the model evaluation page. A single-class lead table
    /// still gets its confusion matrix, sweep and feature charts; only the
    /// curves are absent.
    ///
    /// # Errors
    ///
    /// Propagates classification errors other than `DegenerateLabels`.
    pub fn model_evaluation(&self, threshold: Option<f64>) -> Result<ModelEvaluation> {
        let (confusion, metrics) = self.confusion(threshold)?;
        let evaluation = ModelEvaluation {
            threshold: threshold
                .unwrap_or(self.config.default_threshold)
                .clamp(0.0, 1.0),
            confusion,
            metrics,
            roc: unless_single_class(self.roc())?,
            precision_recall: unless_single_class(self.precision_recall())?,
            sweep: self.threshold_sweep()?,
            feature_importance: self.feature_importance(),
            learning_curve: self.learning_curve().to_vec(),
        };
        tracing::debug!(
            threshold = evaluation.threshold,
            accuracy = evaluation.metrics.accuracy,
            auc = ?evaluation.roc.as_ref().map(|r| r.auc),
            "Model evaluation computed"
        );
        Ok(evaluation)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalyticsError;
    use crate::sample;
    use novamart_domain::LeadRecord;
    use std::sync::Arc;

    #[test]
    fn test_default_threshold_scenario() {
        let (cm, metrics) = sample::engine().confusion(None).unwrap();
        assert_eq!((cm.tp, cm.fn_, cm.fp, cm.tn), (1, 1, 0, 2));
        assert_eq!(metrics.accuracy, 0.75);
        assert_eq!(metrics.precision, 1.0);
        assert_eq!(metrics.recall, 0.5);
    }

    #[test]
    fn test_feature_importance_ascending() {
        let bars = sample::engine().feature_importance();
        let names: Vec<&str> = bars.iter().map(|b| b.feature.as_str()).collect();
        assert_eq!(names, ["email_opens", "website_visits", "engagement_score"]);
        assert_eq!(bars[0].error, None);
        assert_eq!(bars[2].error, Some(0.04));
    }

    #[test]
    fn test_model_evaluation() {
        let eval = sample::engine().model_evaluation(Some(0.35)).unwrap();
        assert_eq!(eval.threshold, 0.35);
        assert_eq!(eval.confusion.tp, 2);
        assert_eq!(eval.confusion.fp, 0);
        assert!((eval.roc.unwrap().auc - 1.0).abs() < 1e-12);
        assert!(eval.precision_recall.is_some());
        assert_eq!(eval.sweep.len(), 21);
        assert_eq!(eval.learning_curve.len(), 3);
    }

    #[test]
    fn test_single_class_leads_keep_the_rest_of_the_page() {
        let mut bundle = sample::bundle();
        bundle.leads = vec![
            LeadRecord {
                actual_converted: 1,
                predicted_probability: 0.9,
            },
            LeadRecord {
                actual_converted: 1,
                predicted_probability: 0.2,
            },
        ];
        let engine = DashboardEngine::new(Arc::new(bundle), sample::config());
        assert!(matches!(engine.roc(), Err(AnalyticsError::DegenerateLabels)));

        let eval = engine.model_evaluation(None).unwrap();
        assert_eq!((eval.confusion.tp, eval.confusion.fn_), (1, 1));
        assert_eq!(eval.metrics.recall, 0.5);
        assert!(eval.roc.is_none());
        assert!(eval.precision_recall.is_none());
        assert_eq!(eval.sweep.len(), 21);
        assert_eq!(eval.feature_importance.len(), 3);
        assert_eq!(eval.learning_curve.len(), 3);
    }
}
