//! Financial metrics and diagnosis engine for marketplace seller
//! dashboards.
//!
//! Given the raw facts the sync layer stores per listing (price, traffic,
//! sales, cost, tier, logistics, health), the crate derives unit economics
//! (fees, taxes, margin) and a rule-based merchandising diagnosis with a
//! recommended action. Everything is pure and synchronous; fetching the
//! facts and rendering the results belong to the caller.

pub mod domain;
pub mod util;

pub use domain::{
    compute_unit_economics, conversion_percent, diagnose, diagnose_at, evaluate_listing,
    evaluate_listing_at, growth_percent, summarize_listings, summarize_listings_at,
    DashboardSummary, Diagnosis, DiagnosisCategory, DiagnosisFacts, FeeSchedule, FinancialFacts,
    FulfillmentType, ListingInsight, ListingRecord, ListingTier, Severity, UnitEconomics,
};
