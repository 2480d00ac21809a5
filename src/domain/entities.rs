use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Commission tier of a listing. Anything the marketplace does not tag as
/// premium settles at the standard commission rate.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ListingTier {
    Standard,
    Premium,
    #[default]
    #[serde(other)]
    Unspecified,
}

/// Logistics path a listing ships through.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FulfillmentType {
    /// Stocked and shipped from the marketplace's own warehouse.
    MarketplaceFulfilled,
    CrossDock,
    DropOff,
    #[default]
    #[serde(other)]
    Unspecified,
}

impl FulfillmentType {
    pub fn is_marketplace_fulfilled(&self) -> bool {
        matches!(self, Self::MarketplaceFulfilled)
    }
}

/// One listing as the sync layer hands it over: commercial facts, traffic
/// counters, and lifecycle metadata. Every field except `price` may be
/// missing in the store, so the serde defaults keep sparse rows loadable.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ListingRecord {
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub price: f64,
    #[serde(default)]
    pub units_sold_30d: u32,
    #[serde(default)]
    pub visits_30d: u32,
    #[serde(default)]
    pub units_sold_prev_30d: u32,
    /// `None` means the seller has not entered a cost yet; distinct from a
    /// genuine zero cost, and surfaced as `cost_price_known` downstream.
    #[serde(default)]
    pub cost_price: Option<f64>,
    #[serde(default)]
    pub tier: ListingTier,
    /// Seller-configured tax rate. May arrive percent-like (6) or as a
    /// fraction (0.06); resolution happens in the calculator.
    #[serde(default)]
    pub custom_tax_rate: Option<f64>,
    #[serde(default)]
    pub average_shipping_cost: Option<f64>,
    #[serde(default)]
    pub fulfillment: FulfillmentType,
    /// Marketplace data-quality score in 0.0..=1.0; 0 or missing means unknown.
    #[serde(default)]
    pub health_score: Option<f64>,
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub created_at: Option<OffsetDateTime>,
}

impl ListingRecord {
    /// Commercial facts feeding the unit-economics calculator.
    pub fn financial_facts(&self) -> FinancialFacts {
        FinancialFacts {
            price: self.price,
            units_sold_30d: self.units_sold_30d,
            visits_30d: self.visits_30d,
            cost_price: self.cost_price,
            tier: self.tier,
            custom_tax_rate: self.custom_tax_rate,
            average_shipping_cost: self.average_shipping_cost,
        }
    }

    /// Traffic and lifecycle facts feeding the diagnosis engine. The margin
    /// comes out of the calculator, not the raw record.
    pub fn diagnosis_facts(&self, margin_percent: f64) -> DiagnosisFacts {
        DiagnosisFacts {
            price: self.price,
            visits_30d: self.visits_30d,
            units_sold_30d: self.units_sold_30d,
            units_sold_prev_30d: self.units_sold_prev_30d,
            margin_percent,
            created_at: self.created_at,
            fulfillment: self.fulfillment,
            health_score: self.health_score,
        }
    }
}

/// Input to the unit-economics calculator.
#[derive(Clone, Debug, PartialEq)]
pub struct FinancialFacts {
    pub price: f64,
    pub units_sold_30d: u32,
    pub visits_30d: u32,
    pub cost_price: Option<f64>,
    pub tier: ListingTier,
    pub custom_tax_rate: Option<f64>,
    pub average_shipping_cost: Option<f64>,
}

/// Per-unit revenue, fee, and margin breakdown for one listing over the
/// trailing 30-day window.
#[derive(Clone, Debug, PartialEq)]
pub struct UnitEconomics {
    pub revenue: f64,
    pub marketplace_fee: f64,
    pub fixed_fee: f64,
    pub tax_amount: f64,
    pub shipping_cost: f64,
    pub total_cost_per_unit: f64,
    pub margin_per_unit: f64,
    /// 0 when the price is 0; never NaN.
    pub margin_percent: f64,
    pub total_margin: f64,
    /// The tax rate actually applied, as a percentage, for display/audit.
    pub effective_tax_rate_percent: f64,
    /// False when the seller never entered a cost and the calculator fell
    /// back to zero; margins are then optimistic.
    pub cost_price_known: bool,
}

/// Input to the diagnosis engine.
#[derive(Clone, Debug, PartialEq)]
pub struct DiagnosisFacts {
    pub price: f64,
    pub visits_30d: u32,
    pub units_sold_30d: u32,
    pub units_sold_prev_30d: u32,
    pub margin_percent: f64,
    pub created_at: Option<OffsetDateTime>,
    pub fulfillment: FulfillmentType,
    pub health_score: Option<f64>,
}

/// Merchandising classification of a listing. The identifiers are the
/// stable contract with the presentation layer; labels and icons on top of
/// them are its concern.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosisCategory {
    CriticalHealth,
    Declining,
    Dormant,
    LowMargin,
    LowConversion,
    HighPotential,
    LogisticsBottleneck,
    Growing,
    Stable,
}

impl DiagnosisCategory {
    pub fn label(&self) -> &'static str {
        match self {
            Self::CriticalHealth => "Critical Health",
            Self::Declining => "Declining",
            Self::Dormant => "Dormant",
            Self::LowMargin => "Low Margin",
            Self::LowConversion => "Low Conversion",
            Self::HighPotential => "High Potential",
            Self::LogisticsBottleneck => "Logistics Bottleneck",
            Self::Growing => "Growing",
            Self::Stable => "Stable",
        }
    }

    pub fn recommended_action(&self) -> &'static str {
        match self {
            Self::CriticalHealth => "Fix listing data",
            Self::Declining => "Review price",
            Self::Dormant => "Pause or relist",
            Self::LowMargin => "Raise price",
            Self::LowConversion => "Improve photos",
            Self::HighPotential => "Activate ads",
            Self::LogisticsBottleneck => "Move to managed fulfillment",
            Self::Growing => "Restock inventory",
            Self::Stable => "Monitor",
        }
    }

    pub fn severity(&self) -> Severity {
        match self {
            Self::CriticalHealth | Self::Declining => Severity::Critical,
            Self::LowMargin | Self::LowConversion => Severity::Warning,
            Self::HighPotential | Self::Growing => Severity::Positive,
            Self::LogisticsBottleneck => Severity::Info,
            Self::Dormant | Self::Stable => Severity::Neutral,
        }
    }
}

/// Display tint for a diagnosis badge.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Critical,
    Warning,
    Neutral,
    Positive,
    Info,
}

/// Result of the diagnosis engine: one category, its paired action, and the
/// severity tint, all derived from the category.
#[derive(Clone, Debug, PartialEq)]
pub struct Diagnosis {
    pub category: DiagnosisCategory,
    pub action: &'static str,
    pub severity: Severity,
}

impl Diagnosis {
    pub fn new(category: DiagnosisCategory) -> Self {
        Self {
            category,
            action: category.recommended_action(),
            severity: category.severity(),
        }
    }
}

/// Marketplace fee constants injected into the calculator. A fee revision
/// is a configuration change, not an algorithm change.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeeSchedule {
    /// Commission rate for standard (and untagged) listings, as a fraction.
    pub commission_standard: f64,
    /// Commission rate for premium listings, as a fraction.
    pub commission_premium: f64,
    /// Listings priced below this threshold pay the flat fixed fee.
    pub fixed_fee_threshold: f64,
    pub fixed_fee_amount: f64,
    /// Tax estimate used when the seller configured no rate, as a fraction.
    pub fallback_tax_rate: f64,
}

impl Default for FeeSchedule {
    fn default() -> Self {
        Self {
            commission_standard: 0.12,
            commission_premium: 0.18,
            fixed_fee_threshold: 79.0,
            fixed_fee_amount: 6.0,
            fallback_tax_rate: 0.06,
        }
    }
}

impl FeeSchedule {
    /// Only the premium tier carries the higher rate; everything else,
    /// including untagged listings, pays the standard one.
    pub fn commission_rate(&self, tier: ListingTier) -> f64 {
        match tier {
            ListingTier::Premium => self.commission_premium,
            ListingTier::Standard | ListingTier::Unspecified => self.commission_standard,
        }
    }
}
