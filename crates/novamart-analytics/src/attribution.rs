//! Attribution model selection.

use novamart_domain::{AttributionModel, AttributionRecord};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// Credit assigned to one channel under the selected model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChannelCredit {
    pub channel: String,
    pub credit: f64,
}

/// Per-channel credit for `model`, in input channel order.
///
/// Credits are taken as-is; the attribution table is normalized upstream.
#[must_use]
pub fn credits(table: &[AttributionRecord], model: AttributionModel) -> Vec<ChannelCredit> {
    table
        .iter()
        .map(|row| ChannelCredit {
            channel: row.channel.clone(),
            credit: row.credit(model),
        })
        .collect()
}

/// Like [`credits`], selecting the model by its column name.
///
/// # Errors
///
/// `InvalidModel` unless `model_name` is one of `first_touch`,
/// `last_touch`, `linear`, `time_decay` or `position_based`.
pub fn select_model(table: &[AttributionRecord], model_name: &str) -> Result<Vec<ChannelCredit>> {
    let model: AttributionModel = model_name.parse()?;
    tracing::debug!(model = %model, channels = table.len(), "Attribution model selected");
    Ok(credits(table, model))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AnalyticsError;

    fn table() -> Vec<AttributionRecord> {
        vec![
            AttributionRecord {
                channel: "Search".to_string(),
                first_touch: 40.0,
                last_touch: 30.0,
                linear: 35.0,
                time_decay: 33.0,
                position_based: 36.0,
            },
            AttributionRecord {
                channel: "Email".to_string(),
                first_touch: 10.0,
                last_touch: 25.0,
                linear: 20.0,
                time_decay: 22.0,
                position_based: 18.0,
            },
            AttributionRecord {
                channel: "Social".to_string(),
                first_touch: 50.0,
                last_touch: 45.0,
                linear: 45.0,
                time_decay: 45.0,
                position_based: 46.0,
            },
        ]
    }

    #[test]
    fn test_select_preserves_channel_order() {
        let out = select_model(&table(), "last_touch").unwrap();
        let channels: Vec<&str> = out.iter().map(|c| c.channel.as_str()).collect();
        assert_eq!(channels, ["Search", "Email", "Social"]);
        assert_eq!(out[1].credit, 25.0);
    }

    #[test]
    fn test_credits_are_not_renormalized() {
        for model in AttributionModel::ALL {
            let total: f64 = credits(&table(), model).iter().map(|c| c.credit).sum();
            assert!((total - 100.0).abs() < 1e-9, "{model} sums to {total}");
        }
    }

    #[test]
    fn test_unknown_model_rejected() {
        let err = select_model(&table(), "u_shaped").unwrap_err();
        assert!(matches!(err, AnalyticsError::InvalidModel(name) if name == "u_shaped"));
    }

    #[test]
    fn test_empty_table() {
        assert!(select_model(&[], "linear").unwrap().is_empty());
    }
}
