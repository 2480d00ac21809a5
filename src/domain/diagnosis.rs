//! Rule-based merchandising diagnosis for a listing.
//!
//! The rules form an ordered list scanned top to bottom; the first match
//! wins. Several predicates overlap on purpose (a listing can be both
//! growing and critically unhealthy), so the order is the tie-break and
//! must not be rearranged.

use time::OffsetDateTime;

use super::economics::conversion_percent;
use super::entities::{Diagnosis, DiagnosisCategory, DiagnosisFacts, FulfillmentType};

const HEALTH_CRITICAL_BELOW: f64 = 0.60;
const DECLINE_MIN_PREV_UNITS: u32 = 5;
const DECLINE_GROWTH_BELOW: f64 = -40.0;
const DORMANT_MIN_DAYS: i64 = 60;
const DORMANT_MIN_VISITS: u32 = 30;
const LOW_MARGIN_BELOW: f64 = 8.0;
const LOW_CONVERSION_MIN_VISITS: u32 = 300;
const LOW_CONVERSION_BELOW: f64 = 0.5;
const HIGH_POTENTIAL_MIN_CONVERSION: f64 = 2.0;
const HIGH_POTENTIAL_MAX_VISITS: u32 = 400;
const BOTTLENECK_MIN_UNITS: u32 = 15;
const GROWING_MIN_GROWTH: f64 = 20.0;
const GROWING_MIN_UNITS: u32 = 5;

/// Classifies a listing against the wall clock.
pub fn diagnose(facts: &DiagnosisFacts) -> Diagnosis {
    diagnose_at(facts, OffsetDateTime::now_utc())
}

/// Classifies a listing relative to the given `now`, for deterministic
/// evaluation of age-dependent rules.
pub fn diagnose_at(facts: &DiagnosisFacts, now: OffsetDateTime) -> Diagnosis {
    let ctx = RuleContext::from_facts(facts, now);

    let category = RULES
        .iter()
        .find(|(applies, _)| applies(&ctx))
        .map(|(_, category)| *category)
        .unwrap_or(DiagnosisCategory::Stable);

    Diagnosis::new(category)
}

/// Month-over-month sales growth as a percentage.
///
/// With no prior-period baseline, any current sales are reported as +100%
/// and none as 0. The +100% convention is deliberate: a listing that just
/// started selling counts as growing.
pub fn growth_percent(units_sold: u32, units_sold_prev: u32) -> f64 {
    if units_sold_prev > 0 {
        let current = units_sold as f64;
        let previous = units_sold_prev as f64;
        ((current - previous) / previous) * 100.0
    } else if units_sold > 0 {
        100.0
    } else {
        0.0
    }
}

/// Signals derived once per diagnosis and shared by every predicate.
struct RuleContext {
    health: f64,
    units_sold: u32,
    units_sold_prev: u32,
    visits: u32,
    margin_percent: f64,
    conversion: f64,
    growth: f64,
    days_active: i64,
    fulfillment: FulfillmentType,
}

impl RuleContext {
    fn from_facts(facts: &DiagnosisFacts, now: OffsetDateTime) -> Self {
        let days_active = facts
            .created_at
            .map(|created| (now - created).whole_days())
            .unwrap_or(0);

        Self {
            health: facts.health_score.unwrap_or(0.0),
            units_sold: facts.units_sold_30d,
            units_sold_prev: facts.units_sold_prev_30d,
            visits: facts.visits_30d,
            margin_percent: facts.margin_percent,
            conversion: conversion_percent(facts.units_sold_30d, facts.visits_30d),
            growth: growth_percent(facts.units_sold_30d, facts.units_sold_prev_30d),
            days_active,
            fulfillment: facts.fulfillment,
        }
    }
}

type Rule = (fn(&RuleContext) -> bool, DiagnosisCategory);

// Priority order is the contract. `Stable` is the total fallback when
// nothing matches.
const RULES: &[Rule] = &[
    (critical_health, DiagnosisCategory::CriticalHealth),
    (sharp_decline, DiagnosisCategory::Declining),
    (dormant_with_traffic, DiagnosisCategory::Dormant),
    (selling_below_margin_floor, DiagnosisCategory::LowMargin),
    (traffic_not_converting, DiagnosisCategory::LowConversion),
    (converting_on_thin_traffic, DiagnosisCategory::HighPotential),
    (volume_outside_managed_fulfillment, DiagnosisCategory::LogisticsBottleneck),
    (accelerating_sales, DiagnosisCategory::Growing),
];

// A health score of exactly 0 means "unknown" and skips this rule.
fn critical_health(ctx: &RuleContext) -> bool {
    ctx.health > 0.0 && ctx.health < HEALTH_CRITICAL_BELOW
}

fn sharp_decline(ctx: &RuleContext) -> bool {
    ctx.units_sold_prev > DECLINE_MIN_PREV_UNITS && ctx.growth < DECLINE_GROWTH_BELOW
}

fn dormant_with_traffic(ctx: &RuleContext) -> bool {
    ctx.days_active > DORMANT_MIN_DAYS && ctx.visits > DORMANT_MIN_VISITS && ctx.units_sold == 0
}

// Only flagged while the listing is actually selling, so parked listings
// don't all light up as margin problems.
fn selling_below_margin_floor(ctx: &RuleContext) -> bool {
    ctx.units_sold > 0 && ctx.margin_percent < LOW_MARGIN_BELOW
}

fn traffic_not_converting(ctx: &RuleContext) -> bool {
    ctx.visits > LOW_CONVERSION_MIN_VISITS && ctx.conversion < LOW_CONVERSION_BELOW
}

fn converting_on_thin_traffic(ctx: &RuleContext) -> bool {
    ctx.conversion > HIGH_POTENTIAL_MIN_CONVERSION
        && ctx.visits < HIGH_POTENTIAL_MAX_VISITS
        && ctx.units_sold > 0
}

fn volume_outside_managed_fulfillment(ctx: &RuleContext) -> bool {
    ctx.units_sold > BOTTLENECK_MIN_UNITS && !ctx.fulfillment.is_marketplace_fulfilled()
}

fn accelerating_sales(ctx: &RuleContext) -> bool {
    ctx.growth > GROWING_MIN_GROWTH && ctx.units_sold > GROWING_MIN_UNITS
}
