//! Attribution and funnel page.

use novamart_domain::{AttributionModel, CorrelationMatrix};
use serde::{Deserialize, Serialize};

use crate::attribution::{select_model, ChannelCredit};
use crate::correlation::CorrelationProvider;
use crate::engine::DashboardEngine;
use crate::error::Result;
use crate::funnel::{compute_funnel, FunnelReport};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttributionFunnelView {
    pub model: AttributionModel,
    pub credits: Vec<ChannelCredit>,
    pub funnel: FunnelReport,
    pub correlation: CorrelationMatrix,
}

impl DashboardEngine {
    /// Channel credit under the model named `model_name`.
    ///
    /// # Errors
    ///
    /// `InvalidModel` for an unknown model name.
    pub fn attribution(&self, model_name: &str) -> Result<Vec<ChannelCredit>> {
        select_model(&self.bundle.attribution, model_name)
    }

    #[must_use]
    pub fn funnel(&self) -> FunnelReport {
        compute_funnel(&self.bundle.funnel)
    }

    #[must_use]
    pub fn correlation(&self) -> &CorrelationMatrix {
        CorrelationProvider::get(&self.bundle.correlation)
    }

    /// Everything on the attribution and funnel page.
    ///
    /// # Errors
    ///
    /// `InvalidModel` for an unknown model name.
    pub fn attribution_funnel_view(&self, model_name: &str) -> Result<AttributionFunnelView> {
        let model: AttributionModel = model_name.parse()?;
        Ok(AttributionFunnelView {
            model,
            credits: self.attribution(model_name)?,
            funnel: self.funnel(),
            correlation: self.correlation().clone(),
        })
    }
}
