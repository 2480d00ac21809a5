//! Whole-dashboard evaluation: run the economics and diagnosis pipeline
//! over every listing and accumulate the overview totals.

use time::OffsetDateTime;

use super::diagnosis::diagnose_at;
use super::economics::compute_unit_economics;
use super::entities::{Diagnosis, FeeSchedule, ListingRecord, UnitEconomics};

/// Economics and diagnosis for one listing, as rendered per table row.
#[derive(Clone, Debug, PartialEq)]
pub struct ListingInsight {
    pub economics: UnitEconomics,
    pub diagnosis: Diagnosis,
}

/// Aggregated numbers for the overview cards, plus the per-listing
/// insights keyed by listing id.
#[derive(Clone, Debug, PartialEq)]
pub struct DashboardSummary {
    pub total_revenue: f64,
    pub total_margin: f64,
    pub total_units_sold: u64,
    pub total_visits: u64,
    /// Conversion across all listings combined; 0 without any visits.
    pub overall_conversion_percent: f64,
    /// Mean margin over listings with a price; 0 when there are none.
    pub average_margin_percent: f64,
    pub items: Vec<(String, ListingInsight)>,
}

/// Runs the full pipeline for one listing against the wall clock.
pub fn evaluate_listing(record: &ListingRecord, fees: &FeeSchedule) -> ListingInsight {
    evaluate_listing_at(record, fees, OffsetDateTime::now_utc())
}

/// Deterministic form of [`evaluate_listing`]: the margin from the
/// calculator feeds the diagnosis, evaluated relative to `now`.
pub fn evaluate_listing_at(
    record: &ListingRecord,
    fees: &FeeSchedule,
    now: OffsetDateTime,
) -> ListingInsight {
    let economics = compute_unit_economics(&record.financial_facts(), fees);
    let diagnosis = diagnose_at(&record.diagnosis_facts(economics.margin_percent), now);

    ListingInsight {
        economics,
        diagnosis,
    }
}

/// Evaluates every listing against the wall clock.
pub fn summarize_listings(records: &[ListingRecord], fees: &FeeSchedule) -> DashboardSummary {
    summarize_listings_at(records, fees, OffsetDateTime::now_utc())
}

pub fn summarize_listings_at(
    records: &[ListingRecord],
    fees: &FeeSchedule,
    now: OffsetDateTime,
) -> DashboardSummary {
    let mut items = Vec::with_capacity(records.len());
    let mut total_revenue = 0.0;
    let mut total_margin = 0.0;
    let mut total_units_sold = 0u64;
    let mut total_visits = 0u64;
    let mut margin_sum = 0.0;
    let mut priced = 0usize;

    for record in records {
        let insight = evaluate_listing_at(record, fees, now);

        total_revenue += insight.economics.revenue;
        total_margin += insight.economics.total_margin;
        total_units_sold += u64::from(record.units_sold_30d);
        total_visits += u64::from(record.visits_30d);
        if record.price > 0.0 {
            margin_sum += insight.economics.margin_percent;
            priced += 1;
        }

        items.push((record.id.clone(), insight));
    }

    let overall_conversion_percent = if total_visits > 0 {
        (total_units_sold as f64 / total_visits as f64) * 100.0
    } else {
        0.0
    };
    let average_margin_percent = if priced == 0 {
        0.0
    } else {
        margin_sum / priced as f64
    };

    DashboardSummary {
        total_revenue,
        total_margin,
        total_units_sold,
        total_visits,
        overall_conversion_percent,
        average_margin_percent,
        items,
    }
}
