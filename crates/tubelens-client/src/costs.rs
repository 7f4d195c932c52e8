//! Token-cost accounting endpoints.

use std::fmt;

use serde::Deserialize;

use crate::api::ApiClient;
use crate::error::Result;
use crate::types::{CostSummary, TokenUsage};

/// Reporting window for cost queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CostPeriod {
    Today,
    Week,
    #[default]
    Month,
    All,
}

impl CostPeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            CostPeriod::Today => "today",
            CostPeriod::Week => "week",
            CostPeriod::Month => "month",
            CostPeriod::All => "all",
        }
    }
}

impl fmt::Display for CostPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Deserialize)]
struct UsageBody {
    #[serde(default)]
    usage: Vec<TokenUsage>,
}

impl ApiClient {
    pub async fn cost_summary(&self, period: CostPeriod) -> Result<CostSummary> {
        self.get_json("/costs/summary", &[("period", period.as_str().to_string())])
            .await
    }

    pub async fn cost_usage(&self, period: CostPeriod) -> Result<Vec<TokenUsage>> {
        let body: UsageBody = self
            .get_json("/costs/usage", &[("period", period.as_str().to_string())])
            .await?;
        Ok(body.usage)
    }

    pub async fn video_usage(&self, video_id: &str) -> Result<Vec<TokenUsage>> {
        let body: UsageBody = self
            .get_json(&format!("/costs/videos/{video_id}/usage"), &[])
            .await?;
        Ok(body.usage)
    }
}
