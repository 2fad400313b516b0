//! Product performance page.

use std::str::FromStr;

use novamart_domain::ProductRecord;
use serde::{Deserialize, Serialize};

use crate::aggregate::{aggregate, AggregateSpec, Reducer};
use crate::engine::DashboardEngine;
use crate::error::{AnalyticsError, Result};

/// Node of the category → subcategory → product sales tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductNode {
    pub name: String,
    pub sales: f64,
    pub units_sold: i64,
    /// Sales-weighted mean margin of the products below; `None` when they
    /// sold nothing.
    pub profit_margin: Option<f64>,
    pub children: Vec<ProductNode>,
}

impl ProductNode {
    fn branch(name: &str) -> Self {
        Self {
            name: name.to_string(),
            sales: 0.0,
            units_sold: 0,
            profit_margin: None,
            children: Vec::new(),
        }
    }

    fn product(p: &ProductRecord) -> Self {
        Self {
            name: p.product_name.clone(),
            sales: p.sales,
            units_sold: p.units_sold,
            profit_margin: Some(p.profit_margin),
            children: Vec::new(),
        }
    }

    fn child_mut(&mut self, name: &str) -> &mut Self {
        let idx = match self.children.iter().position(|c| c.name == name) {
            Some(idx) => idx,
            None => {
                self.children.push(Self::branch(name));
                self.children.len() - 1
            }
        };
        &mut self.children[idx]
    }

    /// Fill branch margins bottom-up; returns Σ sales·margin of the subtree.
    fn weigh_margins(&mut self) -> f64 {
        if self.children.is_empty() {
            return self.profit_margin.map_or(0.0, |m| m * self.sales);
        }
        let weighted: f64 = self.children.iter_mut().map(Self::weigh_margins).sum();
        self.profit_margin = (self.sales != 0.0).then(|| weighted / self.sales);
        weighted
    }
}

/// Treemap colour choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductMetric {
    ProfitMargin,
    Sales,
    UnitsSold,
}

impl ProductMetric {
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub const fn of(&self, node: &ProductNode) -> Option<f64> {
        match self {
            Self::ProfitMargin => node.profit_margin,
            Self::Sales => Some(node.sales),
            Self::UnitsSold => Some(node.units_sold as f64),
        }
    }
}

impl FromStr for ProductMetric {
    type Err = AnalyticsError;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "profit_margin" => Ok(Self::ProfitMargin),
            "sales" => Ok(Self::Sales),
            "units_sold" => Ok(Self::UnitsSold),
            _ => Err(AnalyticsError::InvalidParameter(format!(
                "unknown product metric: {s}"
            ))),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryRegion {
    pub category: String,
    pub region: String,
    pub sales: f64,
    pub avg_profit_margin: Option<f64>,
    pub units_sold: f64,
}

impl DashboardEngine {
    /// Sales and units rolled up by category and subcategory, first-seen
    /// order, with margins weighted by sales.
    #[must_use]
    pub fn product_tree(&self) -> Vec<ProductNode> {
        let mut root = ProductNode::branch("");
        for p in &self.bundle.products {
            root.sales += p.sales;
            root.units_sold += p.units_sold;
            let category = root.child_mut(&p.category);
            category.sales += p.sales;
            category.units_sold += p.units_sold;
            let subcategory = category.child_mut(&p.subcategory);
            subcategory.sales += p.sales;
            subcategory.units_sold += p.units_sold;
            subcategory.children.push(ProductNode::product(p));
        }
        root.weigh_margins();
        root.children
    }

    /// Sales sum, margin mean and units sum per (category, region).
    ///
    /// # Errors
    ///
    /// Propagates aggregation errors.
    pub fn category_region(&self) -> Result<Vec<CategoryRegion>> {
        let table = aggregate(
            &self.bundle.products,
            &AggregateSpec::by(["category", "region"])
                .reduce(Reducer::sum("sales"))
                .reduce(Reducer::mean("profit_margin"))
                .reduce(Reducer::sum("units_sold")),
        )?;
        Ok(table
            .rows
            .into_iter()
            .map(|row| CategoryRegion {
                category: row.keys[0].to_string(),
                region: row.keys[1].to_string(),
                sales: row.values[0].unwrap_or_default(),
                avg_profit_margin: row.values[1],
                units_sold: row.values[2].unwrap_or_default(),
            })
            .collect())
    }

    /// Best sellers, highest sales first; `n` defaults to the configured
    /// table size.
    #[must_use]
    pub fn top_products(&self, n: Option<usize>) -> Vec<ProductRecord> {
        let mut ranked: Vec<&ProductRecord> = self.bundle.products.iter().collect();
        ranked.sort_by(|a, b| b.sales.total_cmp(&a.sales));
        ranked
            .into_iter()
            .take(n.unwrap_or(self.config.top_products))
            .cloned()
            .collect()
    }
}
