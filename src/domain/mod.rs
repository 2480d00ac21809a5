//! Domain logic for listing metrics and diagnosis lives here.

pub mod diagnosis;
pub mod economics;
pub mod entities;
pub mod summary;

pub use diagnosis::{diagnose, diagnose_at, growth_percent};
pub use economics::{compute_unit_economics, conversion_percent};
pub use entities::{
    Diagnosis, DiagnosisCategory, DiagnosisFacts, FeeSchedule, FinancialFacts, FulfillmentType,
    ListingRecord, ListingTier, Severity, UnitEconomics,
};
pub use summary::{
    evaluate_listing, evaluate_listing_at, summarize_listings, summarize_listings_at,
    DashboardSummary, ListingInsight,
};
