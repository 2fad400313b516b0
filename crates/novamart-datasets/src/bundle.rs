//! The full set of typed tables the dashboard runs on.

use std::path::{Path, PathBuf};
use std::time::Instant;

use serde::Serialize;

use novamart_domain::{
    AttributionRecord, CampaignRecord, CorrelationMatrix, CustomerRecord, FeatureImportanceRecord,
    FunnelInput, GeoRecord, JourneyTable, LeadRecord, LearningCurvePoint, ProductRecord,
};

use crate::error::Result;
use crate::reader::CsvReader;
use crate::tables;

/// Immutable, typed copy of all eleven tables from one source directory.
/// Serializes as one object keyed by table, for hosts that ship raw tables
/// to the front end.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetBundle {
    pub source: PathBuf,
    pub campaigns: Vec<CampaignRecord>,
    pub customers: Vec<CustomerRecord>,
    pub products: Vec<ProductRecord>,
    pub leads: Vec<LeadRecord>,
    pub feature_importance: Vec<FeatureImportanceRecord>,
    pub learning_curve: Vec<LearningCurvePoint>,
    pub geographic: Vec<GeoRecord>,
    pub attribution: Vec<AttributionRecord>,
    pub funnel: FunnelInput,
    pub journey: JourneyTable,
    pub correlation: CorrelationMatrix,
}

impl DatasetBundle {
    /// Read and validate every table in `dir`, bypassing any cache.
    ///
    /// # Errors
    ///
    /// Returns the first [`LoadError`](crate::LoadError) hit; no partial bundle
    /// is ever produced.
    pub fn read_dir(dir: &Path) -> Result<Self> {
        let started = Instant::now();
        let reader = CsvReader::open_in_memory()?;

        let bundle = Self {
            source: dir.to_path_buf(),
            campaigns: tables::campaigns(&reader, dir)?,
            customers: tables::customers(&reader, dir)?,
            products: tables::products(&reader, dir)?,
            leads: tables::leads(&reader, dir)?,
            feature_importance: tables::feature_importance(&reader, dir)?,
            learning_curve: tables::learning_curve(&reader, dir)?,
            geographic: tables::geographic(&reader, dir)?,
            attribution: tables::attribution(&reader, dir)?,
            funnel: tables::funnel(&reader, dir)?,
            journey: tables::journey(&reader, dir)?,
            correlation: tables::correlation(&reader, dir)?,
        };

        tracing::info!(
            source = %dir.display(),
            campaigns = bundle.campaigns.len(),
            customers = bundle.customers.len(),
            products = bundle.products.len(),
            leads = bundle.leads.len(),
            geographic = bundle.geographic.len(),
            funnel_stages = bundle.funnel.len(),
            journey = bundle.journey.rows.len(),
            dur_ms = started.elapsed().as_millis(),
            "Dataset bundle loaded"
        );
        Ok(bundle)
    }
}
