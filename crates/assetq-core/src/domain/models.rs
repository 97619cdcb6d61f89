use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::{AssetId, UtcDateTime, ValidationError};

/// Analyst consensus rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ConsensusRating {
    #[serde(rename = "Strong Buy")]
    StrongBuy,
    #[serde(rename = "Buy")]
    Buy,
    #[serde(rename = "Hold")]
    Hold,
    #[serde(rename = "Sell")]
    Sell,
    #[serde(rename = "Strong Sell")]
    StrongSell,
}

impl ConsensusRating {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StrongBuy => "Strong Buy",
            Self::Buy => "Buy",
            Self::Hold => "Hold",
            Self::Sell => "Sell",
            Self::StrongSell => "Strong Sell",
        }
    }
}

impl Display for ConsensusRating {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Current price snapshot of a single asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceSnapshot {
    pub current_price: f64,
    pub previous_close: f64,
    pub change_percent: f64,
    pub volume: u64,
    pub last_updated: UtcDateTime,
}

impl PriceSnapshot {
    pub fn new(
        current_price: f64,
        previous_close: f64,
        change_percent: f64,
        volume: u64,
        last_updated: UtcDateTime,
    ) -> Result<Self, ValidationError> {
        let snapshot = Self {
            current_price,
            previous_close,
            change_percent,
            volume,
            last_updated,
        };
        snapshot.validate()?;
        Ok(snapshot)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_non_negative("currentPrice", self.current_price)?;
        validate_non_negative("previousClose", self.previous_close)?;
        validate_finite("changePercent", self.change_percent)
    }
}

/// Sector/industry/size classification of a single asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Classification {
    pub sector: String,
    pub industry: String,
    /// Size bucket such as `Large Cap`, `Mid Cap` or `Small Cap`.
    pub market_cap: String,
    pub geography: String,
    pub asset_type: String,
}

impl Classification {
    pub fn new(
        sector: impl Into<String>,
        industry: impl Into<String>,
        market_cap: impl Into<String>,
        geography: impl Into<String>,
        asset_type: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let classification = Self {
            sector: sector.into(),
            industry: industry.into(),
            market_cap: market_cap.into(),
            geography: geography.into(),
            asset_type: asset_type.into(),
        };
        classification.validate()?;
        Ok(classification)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_not_blank("sector", &self.sector)?;
        validate_not_blank("industry", &self.industry)?;
        validate_not_blank("marketCap", &self.market_cap)?;
        validate_not_blank("geography", &self.geography)?;
        validate_not_blank("assetType", &self.asset_type)
    }
}

/// Fundamentals and analyst consensus for a single asset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResearchInfo {
    /// Price/earnings ratio; negative for loss-making companies.
    pub pe_ratio: f64,
    /// Year-over-year revenue growth in percent.
    pub revenue_growth: f64,
    /// Profit margin in percent.
    pub profit_margin: f64,
    pub consensus_rating: ConsensusRating,
    pub analyst_count: u32,
    pub target_price: f64,
    #[serde(default)]
    pub risk_factors: Vec<String>,
}

impl ResearchInfo {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        pe_ratio: f64,
        revenue_growth: f64,
        profit_margin: f64,
        consensus_rating: ConsensusRating,
        analyst_count: u32,
        target_price: f64,
        risk_factors: Vec<String>,
    ) -> Result<Self, ValidationError> {
        let research = Self {
            pe_ratio,
            revenue_growth,
            profit_margin,
            consensus_rating,
            analyst_count,
            target_price,
            risk_factors,
        };
        research.validate()?;
        Ok(research)
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        validate_finite("peRatio", self.pe_ratio)?;
        validate_finite("revenueGrowth", self.revenue_growth)?;
        validate_finite("profitMargin", self.profit_margin)?;
        validate_non_negative("targetPrice", self.target_price)
    }
}

/// One tradable instrument as held in a universe snapshot.
///
/// Sub-structures are optional so that partially ingested records can be
/// represented; basket search excludes a record from any criterion it
/// cannot evaluate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetRecord {
    pub asset_id: AssetId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<PriceSnapshot>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification: Option<Classification>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub research: Option<ResearchInfo>,
}

impl AssetRecord {
    pub fn new(asset_id: AssetId) -> Self {
        Self {
            asset_id,
            price: None,
            classification: None,
            research: None,
        }
    }

    pub fn with_price(mut self, price: PriceSnapshot) -> Self {
        self.price = Some(price);
        self
    }

    pub fn with_classification(mut self, classification: Classification) -> Self {
        self.classification = Some(classification);
        self
    }

    pub fn with_research(mut self, research: ResearchInfo) -> Self {
        self.research = Some(research);
        self
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if let Some(price) = &self.price {
            price.validate()?;
        }
        if let Some(classification) = &self.classification {
            classification.validate()?;
        }
        if let Some(research) = &self.research {
            research.validate()?;
        }
        Ok(())
    }
}

fn validate_finite(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    Ok(())
}

fn validate_non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    validate_finite(field, value)?;
    if value < 0.0 {
        return Err(ValidationError::NegativeValue { field });
    }
    Ok(())
}

fn validate_not_blank(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::BlankField { field });
    }
    Ok(())
}
