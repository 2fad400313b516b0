//! Report generation for dashboard snapshots.

use std::fmt::Write as _;

use novamart_domain::AttributionModel;
use serde::{Deserialize, Serialize};

use crate::attribution::ChannelCredit;
use crate::classification::{unless_single_class, ClassificationMetrics, ConfusionMatrix};
use crate::engine::DashboardEngine;
use crate::error::Result;
use crate::funnel::FunnelReport;
use crate::views::{ChannelMetric, ChannelTotal, Kpis};

/// Point-in-time summary across the dashboard pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardReport {
    pub generated_at: String,
    pub source: String,
    pub kpis: Kpis,
    pub channel_revenue: Vec<ChannelTotal>,
    pub attribution_model: AttributionModel,
    pub attribution: Vec<ChannelCredit>,
    pub funnel: FunnelReport,
    pub threshold: f64,
    pub confusion: ConfusionMatrix,
    pub metrics: ClassificationMetrics,
    /// `None` when the leads hold a single class.
    pub auc: Option<f64>,
}

fn or_na(value: Option<f64>, suffix: &str) -> String {
    value.map_or_else(|| "n/a".to_string(), |v| format!("{v:.2}{suffix}"))
}

impl DashboardReport {
    /// Pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// `Serialization` if encoding fails.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Markdown tables; undefined values print as `n/a`.
    #[must_use]
    pub fn to_markdown(&self) -> String {
        let mut md = String::new();
        md.push_str("# NovaMart Marketing Analytics Report\n\n");
        let _ = writeln!(md, "**Generated:** {}  ", self.generated_at);
        let _ = writeln!(md, "**Source:** {}\n", self.source);

        md.push_str("## Key Metrics\n\n");
        md.push_str("| Metric | Value |\n");
        md.push_str("|--------|-------|\n");
        let _ = writeln!(md, "| Total Revenue | {:.2} |", self.kpis.total_revenue);
        let _ = writeln!(md, "| Total Conversions | {} |", self.kpis.total_conversions);
        let _ = writeln!(md, "| Average ROAS | {} |", or_na(self.kpis.average_roas, "x"));
        let _ = writeln!(md, "| Total Customers | {} |", self.kpis.total_customers);
        md.push('\n');

        if !self.channel_revenue.is_empty() {
            md.push_str("## Revenue by Channel\n\n");
            md.push_str("| Channel | Revenue |\n");
            md.push_str("|---------|---------|\n");
            for total in &self.channel_revenue {
                let _ = writeln!(md, "| {} | {:.2} |", total.channel, total.value);
            }
            md.push('\n');
        }

        if !self.attribution.is_empty() {
            let _ = writeln!(md, "## Attribution ({})\n", self.attribution_model.label());
            md.push_str("| Channel | Credit |\n");
            md.push_str("|---------|--------|\n");
            for credit in &self.attribution {
                let _ = writeln!(md, "| {} | {:.2} |", credit.channel, credit.credit);
            }
            md.push('\n');
        }

        if !self.funnel.is_empty() {
            md.push_str("## Conversion Funnel\n\n");
            md.push_str("| Stage | Conversions | Conversion Rate | Drop-off | % of Initial |\n");
            md.push_str("|-------|-------------|-----------------|----------|--------------|\n");
            for stage in &self.funnel.stages {
                let conversions = stage
                    .conversions
                    .map_or_else(|| "n/a".to_string(), |c| c.to_string());
                let _ = writeln!(
                    md,
                    "| {} | {} | {} | {} | {} |",
                    stage.stage,
                    conversions,
                    or_na(stage.conversion_rate_pct, "%"),
                    or_na(stage.drop_off_pct, "%"),
                    or_na(stage.pct_of_initial, "%"),
                );
            }
            md.push('\n');
        }

        let _ = writeln!(md, "## Lead Scoring (threshold {:.2})\n", self.threshold);
        md.push_str("| Metric | Value |\n");
        md.push_str("|--------|-------|\n");
        let c = &self.confusion;
        let _ = writeln!(md, "| TP / FP / TN / FN | {} / {} / {} / {} |", c.tp, c.fp, c.tn, c.fn_);
        let _ = writeln!(md, "| Accuracy | {:.3} |", self.metrics.accuracy);
        let _ = writeln!(md, "| Precision | {:.3} |", self.metrics.precision);
        let _ = writeln!(md, "| Recall | {:.3} |", self.metrics.recall);
        let _ = writeln!(md, "| F1 Score | {:.3} |", self.metrics.f1);
        let _ = writeln!(md, "| ROC AUC | {} |", or_na(self.auc, ""));
        md
    }
}

impl DashboardEngine {
    /// Snapshot for `model_name` at `threshold` (configured default when
    /// `None`).
    ///
    /// # Errors
    ///
    /// `InvalidModel` for an unknown model; classification errors other
    /// than a single-class label set.
    pub fn generate_report(
        &self,
        model_name: &str,
        threshold: Option<f64>,
    ) -> Result<DashboardReport> {
        let attribution_model: AttributionModel = model_name.parse()?;
        let threshold = threshold
            .unwrap_or(self.config.default_threshold)
            .clamp(0.0, 1.0);
        let (confusion, metrics) = self.confusion(Some(threshold))?;
        let auc = unless_single_class(self.roc())?.map(|roc| roc.auc);

        Ok(DashboardReport {
            generated_at: chrono::Utc::now().to_rfc3339(),
            source: self.bundle.source.display().to_string(),
            kpis: self.kpis(),
            channel_revenue: self.channel_totals(ChannelMetric::Revenue)?,
            attribution_model,
            attribution: self.attribution(model_name)?,
            funnel: self.funnel(),
            threshold,
            confusion,
            metrics,
            auc,
        })
    }

    /// Generate report as JSON string.
    ///
    /// # Errors
    ///
    /// As [`DashboardEngine::generate_report`], plus `Serialization`.
    pub fn generate_report_json(&self, model_name: &str, threshold: Option<f64>) -> Result<String> {
        self.generate_report(model_name, threshold)?.to_json()
    }

    /// Generate Markdown report.
    ///
    /// # Errors
    ///
    /// As [`DashboardEngine::generate_report`].
    pub fn generate_report_markdown(
        &self,
        model_name: &str,
        threshold: Option<f64>,
    ) -> Result<String> {
        Ok(self.generate_report(model_name, threshold)?.to_markdown())
    }
}
