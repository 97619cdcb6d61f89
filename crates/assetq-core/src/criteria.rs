//! Basket criteria, the price-range grammar and criteria compilation.
//!
//! A [`BasketCriteria`] is the raw optional-field query object received on
//! the wire. [`BasketCriteria::compile`] validates every populated field and
//! turns it into a list of [`Criterion`] values that basket search evaluates
//! conjunctively.

use std::fmt::{Display, Formatter};
use std::ops::Bound;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{AssetRecord, QueryError};

/// Optional-field basket query. An absent field places no constraint.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BasketCriteria {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sector: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub industry: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market_cap: Option<String>,
    /// String-encoded price bound, see [`PriceRange`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price_range: Option<String>,
    /// Lower bound on `research.revenueGrowth`, in percent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_growth: Option<f64>,
}

impl BasketCriteria {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_sector(mut self, sector: impl Into<String>) -> Self {
        self.sector = Some(sector.into());
        self
    }

    pub fn with_industry(mut self, industry: impl Into<String>) -> Self {
        self.industry = Some(industry.into());
        self
    }

    pub fn with_market_cap(mut self, market_cap: impl Into<String>) -> Self {
        self.market_cap = Some(market_cap.into());
        self
    }

    pub fn with_price_range(mut self, price_range: impl Into<String>) -> Self {
        self.price_range = Some(price_range.into());
        self
    }

    pub fn with_min_growth(mut self, min_growth: f64) -> Self {
        self.min_growth = Some(min_growth);
        self
    }

    /// True when no field is populated; such criteria match the whole universe.
    pub fn is_empty(&self) -> bool {
        self.sector.is_none()
            && self.industry.is_none()
            && self.market_cap.is_none()
            && self.price_range.is_none()
            && self.min_growth.is_none()
    }

    /// Validate every populated field and compile it into a [`Criterion`].
    pub fn compile(&self, policy: &CriteriaPolicy) -> Result<CompiledCriteria, CriteriaError> {
        let mut criteria = Vec::with_capacity(5);

        if let Some(sector) = &self.sector {
            criteria.push(Criterion::Sector(non_blank("sector", sector)?));
        }
        if let Some(industry) = &self.industry {
            criteria.push(Criterion::Industry(non_blank("industry", industry)?));
        }
        if let Some(market_cap) = &self.market_cap {
            criteria.push(Criterion::MarketCap(non_blank("marketCap", market_cap)?));
        }
        if let Some(price_range) = &self.price_range {
            criteria.push(Criterion::Price(price_range.parse()?));
        }
        if let Some(min_growth) = self.min_growth {
            if !min_growth.is_finite() {
                return Err(CriteriaError::NonFiniteMinGrowth);
            }
            if min_growth < 0.0 && !policy.allow_negative_min_growth {
                return Err(CriteriaError::NegativeMinGrowth { value: min_growth });
            }
            criteria.push(Criterion::MinGrowth(min_growth));
        }

        Ok(CompiledCriteria { criteria })
    }
}

/// Tunable rules for criteria the wire contract leaves open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CriteriaPolicy {
    /// Revenue growth is signed, so "at least -5%" is a meaningful bound.
    pub allow_negative_min_growth: bool,
}

impl Default for CriteriaPolicy {
    fn default() -> Self {
        Self {
            allow_negative_min_growth: true,
        }
    }
}

/// Criteria validation failures. All map to `query.invalid_criteria`.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CriteriaError {
    #[error("criteria field '{field}' cannot be blank")]
    BlankField { field: &'static str },

    #[error("priceRange cannot be empty")]
    EmptyPriceRange,
    #[error("priceRange '{value}' is malformed, expected LOW-HIGH, <X, <=X, >X or >=X")]
    MalformedPriceRange { value: String },
    #[error("priceRange bound '{value}' must be a finite non-negative number")]
    InvalidPriceBound { value: String },
    #[error("priceRange low {low} is greater than high {high}")]
    InvertedPriceRange { low: f64, high: f64 },

    #[error("minGrowth must be finite")]
    NonFiniteMinGrowth,
    #[error("minGrowth {value} is negative and negative growth bounds are disabled")]
    NegativeMinGrowth { value: f64 },
}

impl From<CriteriaError> for QueryError {
    fn from(error: CriteriaError) -> Self {
        QueryError::invalid_criteria(error.to_string())
    }
}

/// Numeric interval over `price.currentPrice`.
///
/// Accepted encodings:
///
/// | Input | Interval |
/// |-------|----------|
/// | `50-200` | `[50, 200]` |
/// | `<100` | `[0, 100)` |
/// | `<=100` | `[0, 100]` |
/// | `>500` | `(500, ∞)` |
/// | `>=500` | `[500, ∞)` |
///
/// Bounds may carry a leading `$`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceRange {
    lower: Bound<f64>,
    upper: Bound<f64>,
}

impl PriceRange {
    pub fn between(low: f64, high: f64) -> Result<Self, CriteriaError> {
        check_bound(low)?;
        check_bound(high)?;
        if low > high {
            return Err(CriteriaError::InvertedPriceRange { low, high });
        }
        Ok(Self {
            lower: Bound::Included(low),
            upper: Bound::Included(high),
        })
    }

    pub const fn lower(&self) -> Bound<f64> {
        self.lower
    }

    pub const fn upper(&self) -> Bound<f64> {
        self.upper
    }

    pub fn contains(&self, price: f64) -> bool {
        let above_lower = match self.lower {
            Bound::Included(low) => price >= low,
            Bound::Excluded(low) => price > low,
            Bound::Unbounded => true,
        };
        let below_upper = match self.upper {
            Bound::Included(high) => price <= high,
            Bound::Excluded(high) => price < high,
            Bound::Unbounded => true,
        };
        above_lower && below_upper
    }
}

impl FromStr for PriceRange {
    type Err = CriteriaError;

    fn from_str(input: &str) -> Result<Self, Self::Err> {
        let value = input.trim();
        if value.is_empty() {
            return Err(CriteriaError::EmptyPriceRange);
        }

        let one_sided = [
            ("<=", true, true),
            (">=", false, true),
            ("<", true, false),
            (">", false, false),
        ];
        for (prefix, is_upper, inclusive) in one_sided {
            if let Some(rest) = value.strip_prefix(prefix) {
                let bound = parse_bound(rest)?;
                let bound = if inclusive {
                    Bound::Included(bound)
                } else {
                    Bound::Excluded(bound)
                };
                return Ok(if is_upper {
                    Self {
                        lower: Bound::Unbounded,
                        upper: bound,
                    }
                } else {
                    Self {
                        lower: bound,
                        upper: Bound::Unbounded,
                    }
                });
            }
        }

        let malformed = || CriteriaError::MalformedPriceRange {
            value: value.to_owned(),
        };
        let (low, high) = value.split_once('-').ok_or_else(malformed)?;
        if low.trim().is_empty() || high.trim().is_empty() || high.contains('-') {
            return Err(malformed());
        }

        Self::between(parse_bound(low)?, parse_bound(high)?)
    }
}

impl Display for PriceRange {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match (self.lower, self.upper) {
            (Bound::Included(low), Bound::Included(high)) => write!(f, "{low}-{high}"),
            (Bound::Unbounded, Bound::Included(high)) => write!(f, "<={high}"),
            (Bound::Unbounded, Bound::Excluded(high)) => write!(f, "<{high}"),
            (Bound::Included(low), Bound::Unbounded) => write!(f, ">={low}"),
            (Bound::Excluded(low), Bound::Unbounded) => write!(f, ">{low}"),
            (lower, upper) => write!(f, "{lower:?}..{upper:?}"),
        }
    }
}

fn parse_bound(raw: &str) -> Result<f64, CriteriaError> {
    let trimmed = raw.trim();
    let digits = trimmed.strip_prefix('$').unwrap_or(trimmed).trim();
    let value = digits
        .parse::<f64>()
        .map_err(|_| CriteriaError::InvalidPriceBound {
            value: trimmed.to_owned(),
        })?;
    check_bound(value)?;
    Ok(value)
}

fn check_bound(value: f64) -> Result<(), CriteriaError> {
    if !value.is_finite() || value < 0.0 {
        return Err(CriteriaError::InvalidPriceBound {
            value: value.to_string(),
        });
    }
    Ok(())
}

fn non_blank(field: &'static str, value: &str) -> Result<String, CriteriaError> {
    if value.trim().is_empty() {
        return Err(CriteriaError::BlankField { field });
    }
    Ok(value.to_owned())
}

/// A single validated criterion.
#[derive(Debug, Clone, PartialEq)]
pub enum Criterion {
    Sector(String),
    Industry(String),
    MarketCap(String),
    Price(PriceRange),
    MinGrowth(f64),
}

impl Criterion {
    pub const fn field(&self) -> &'static str {
        match self {
            Self::Sector(_) => "sector",
            Self::Industry(_) => "industry",
            Self::MarketCap(_) => "marketCap",
            Self::Price(_) => "priceRange",
            Self::MinGrowth(_) => "minGrowth",
        }
    }

    /// Evaluate against one record. A record lacking the block this
    /// criterion reads never matches.
    pub fn matches(&self, record: &AssetRecord) -> bool {
        match self {
            Self::Sector(sector) => record
                .classification
                .as_ref()
                .is_some_and(|c| c.sector == *sector),
            Self::Industry(industry) => record
                .classification
                .as_ref()
                .is_some_and(|c| c.industry == *industry),
            Self::MarketCap(market_cap) => record
                .classification
                .as_ref()
                .is_some_and(|c| c.market_cap == *market_cap),
            Self::Price(range) => record
                .price
                .as_ref()
                .is_some_and(|p| range.contains(p.current_price)),
            Self::MinGrowth(min_growth) => record
                .research
                .as_ref()
                .is_some_and(|r| r.revenue_growth >= *min_growth),
        }
    }
}

/// Validated criteria, evaluated with AND semantics.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CompiledCriteria {
    criteria: Vec<Criterion>,
}

impl CompiledCriteria {
    pub fn criteria(&self) -> &[Criterion] {
        &self.criteria
    }

    pub fn matches(&self, record: &AssetRecord) -> bool {
        self.criteria.iter().all(|criterion| criterion.matches(record))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(input: &str) -> PriceRange {
        input.parse().expect("price range should parse")
    }

    #[test]
    fn parses_closed_interval_inclusively() {
        let parsed = range("0-100");
        assert!(parsed.contains(0.0));
        assert!(parsed.contains(100.0));
        assert!(!parsed.contains(100.01));
    }

    #[test]
    fn parses_one_sided_bounds() {
        assert!(!range("<100").contains(100.0));
        assert!(range("<=100").contains(100.0));
        assert!(!range(">500").contains(500.0));
        assert!(range(">=500").contains(500.0));
        assert!(range(">500").contains(1_000_000.0));
    }

    #[test]
    fn accepts_dollar_signs_and_whitespace() {
        let parsed = range(" $50 - $200 ");
        assert_eq!(parsed.lower(), Bound::Included(50.0));
        assert_eq!(parsed.upper(), Bound::Included(200.0));
    }

    #[test]
    fn rejects_inverted_range() {
        let err = "200-100".parse::<PriceRange>().expect_err("must fail");
        assert_eq!(err, CriteriaError::InvertedPriceRange { low: 200.0, high: 100.0 });
    }

    #[test]
    fn rejects_malformed_ranges() {
        for input in ["", "  ", "abc", "10-", "-10", "-5-10", "1-2-3", "<", ">=x", "10..20", "NaN-5"] {
            assert!(input.parse::<PriceRange>().is_err(), "'{input}' should be rejected");
        }
    }

    #[test]
    fn displays_canonical_form() {
        assert_eq!(range("$10-20").to_string(), "10-20");
        assert_eq!(range(" < 5").to_string(), "<5");
    }

    #[test]
    fn empty_criteria_compile_to_identity() {
        let compiled = BasketCriteria::new()
            .compile(&CriteriaPolicy::default())
            .expect("compiles");
        assert!(compiled.criteria().is_empty());
    }

    #[test]
    fn compiled_criteria_name_their_wire_fields() {
        let compiled = BasketCriteria::new()
            .with_min_growth(5.0)
            .with_sector("Energy")
            .with_price_range("<100")
            .compile(&CriteriaPolicy::default())
            .expect("compiles");
        let fields: Vec<&str> = compiled.criteria().iter().map(Criterion::field).collect();
        assert_eq!(fields, ["sector", "priceRange", "minGrowth"]);
    }

    #[test]
    fn rejects_blank_string_criteria() {
        let err = BasketCriteria::new()
            .with_industry("   ")
            .compile(&CriteriaPolicy::default())
            .expect_err("must fail");
        assert_eq!(err, CriteriaError::BlankField { field: "industry" });
    }

    #[test]
    fn negative_min_growth_follows_policy() {
        let criteria = BasketCriteria::new().with_min_growth(-5.0);
        criteria
            .compile(&CriteriaPolicy::default())
            .expect("allowed by default");

        let strict = CriteriaPolicy {
            allow_negative_min_growth: false,
        };
        let err = criteria.compile(&strict).expect_err("must fail");
        assert!(matches!(err, CriteriaError::NegativeMinGrowth { .. }));
    }

    #[test]
    fn rejects_non_finite_min_growth() {
        let err = BasketCriteria::new()
            .with_min_growth(f64::INFINITY)
            .compile(&CriteriaPolicy::default())
            .expect_err("must fail");
        assert_eq!(err, CriteriaError::NonFiniteMinGrowth);
    }

    #[test]
    fn criteria_error_maps_to_invalid_criteria() {
        let error: QueryError = CriteriaError::EmptyPriceRange.into();
        assert_eq!(error.code(), "query.invalid_criteria");
    }

    #[test]
    fn decodes_wire_criteria() {
        let criteria: BasketCriteria = serde_json::from_str(
            r#"{"sector":"Technology","marketCap":"Large Cap","minGrowth":20}"#,
        )
        .expect("decodes");
        assert_eq!(criteria.market_cap.as_deref(), Some("Large Cap"));
        assert_eq!(criteria.min_growth, Some(20.0));
        assert!(criteria.price_range.is_none());
    }

    #[test]
    fn rejects_unknown_wire_keys() {
        for input in [r#"{"sectr":"Energy"}"#, r#"{"min_growth":1000}"#] {
            assert!(serde_json::from_str::<BasketCriteria>(input).is_err(), "{input}");
        }
    }
}
