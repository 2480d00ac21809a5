//! Unit economics for a single listing: revenue, fee breakdown, and margin.

use super::entities::{FeeSchedule, FinancialFacts, UnitEconomics};

/// Computes the per-unit cost/margin breakdown for one listing over the
/// trailing 30-day window.
///
/// Total over its whole input domain: absent, negative, or non-finite
/// amounts collapse to 0 and the result is always displayable. A missing
/// cost price is treated as zero cost, with `cost_price_known` left false
/// so the caller can flag the resulting margin as optimistic.
pub fn compute_unit_economics(facts: &FinancialFacts, fees: &FeeSchedule) -> UnitEconomics {
    let price = sanitize_amount(facts.price);
    let units_sold = facts.units_sold_30d as f64;
    let cost_price = facts.cost_price.map(sanitize_amount);
    let shipping_cost = facts
        .average_shipping_cost
        .map(sanitize_amount)
        .unwrap_or(0.0);

    let revenue = price * units_sold;

    let marketplace_fee = price * fees.commission_rate(facts.tier);

    // Small-ticket listings pay a flat fee on top of the commission.
    let fixed_fee = if price < fees.fixed_fee_threshold {
        fees.fixed_fee_amount
    } else {
        0.0
    };

    let tax_rate = resolve_tax_rate(facts.custom_tax_rate, fees.fallback_tax_rate);
    let tax_amount = price * tax_rate;

    let total_cost_per_unit =
        cost_price.unwrap_or(0.0) + marketplace_fee + fixed_fee + tax_amount + shipping_cost;
    let margin_per_unit = price - total_cost_per_unit;
    let total_margin = margin_per_unit * units_sold;

    let margin_percent = if price > 0.0 {
        (margin_per_unit / price) * 100.0
    } else {
        0.0
    };

    UnitEconomics {
        revenue,
        marketplace_fee,
        fixed_fee,
        tax_amount,
        shipping_cost,
        total_cost_per_unit,
        margin_per_unit,
        margin_percent,
        total_margin,
        effective_tax_rate_percent: tax_rate * 100.0,
        cost_price_known: cost_price.is_some(),
    }
}

/// Share of visits that turned into sales, as a percentage. 0 when there
/// were no visits.
pub fn conversion_percent(units_sold: u32, visits: u32) -> f64 {
    if visits == 0 {
        return 0.0;
    }
    (units_sold as f64 / visits as f64) * 100.0
}

fn sanitize_amount(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Resolves the seller-configured tax rate to a fraction.
///
/// Values above 1 are read as percentages (6 means 6%), values in (0, 1]
/// as fractions already (0.06 means 6%). Unset or non-positive rates fall
/// back to the schedule's flat estimate. The threshold misreads a genuine
/// sub-1% fraction; kept as-is until the product decides otherwise.
fn resolve_tax_rate(custom: Option<f64>, fallback: f64) -> f64 {
    match custom.filter(|rate| rate.is_finite() && *rate > 0.0) {
        Some(rate) if rate > 1.0 => rate / 100.0,
        Some(rate) => rate,
        None => fallback,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::domain::entities::ListingTier;

    fn facts(price: f64) -> FinancialFacts {
        FinancialFacts {
            price,
            units_sold_30d: 0,
            visits_30d: 0,
            cost_price: None,
            tier: ListingTier::Standard,
            custom_tax_rate: None,
            average_shipping_cost: None,
        }
    }

    #[test]
    fn commission_rate_follows_tier() {
        let fees = FeeSchedule::default();
        let premium = FinancialFacts {
            tier: ListingTier::Premium,
            ..facts(100.0)
        };
        let standard = FinancialFacts {
            tier: ListingTier::Standard,
            ..facts(100.0)
        };
        let untagged = FinancialFacts {
            tier: ListingTier::Unspecified,
            ..facts(100.0)
        };

        assert_eq!(compute_unit_economics(&premium, &fees).marketplace_fee, 18.0);
        assert_eq!(
            compute_unit_economics(&standard, &fees).marketplace_fee,
            12.0
        );
        assert_eq!(
            compute_unit_economics(&untagged, &fees).marketplace_fee,
            12.0
        );
    }

    #[test]
    fn fixed_fee_applies_below_threshold_only() {
        let fees = FeeSchedule::default();
        assert_eq!(compute_unit_economics(&facts(78.99), &fees).fixed_fee, 6.0);
        assert_eq!(compute_unit_economics(&facts(79.0), &fees).fixed_fee, 0.0);
    }

    #[test]
    fn tax_rate_normalizes_percent_and_fraction_inputs() {
        let fees = FeeSchedule::default();

        let percent_like = FinancialFacts {
            custom_tax_rate: Some(6.0),
            ..facts(100.0)
        };
        let fraction_like = FinancialFacts {
            custom_tax_rate: Some(0.06),
            ..facts(100.0)
        };

        let from_percent = compute_unit_economics(&percent_like, &fees);
        let from_fraction = compute_unit_economics(&fraction_like, &fees);
        assert_eq!(from_percent.tax_amount, 6.0);
        assert_eq!(from_fraction.tax_amount, 6.0);
        assert_eq!(from_percent.effective_tax_rate_percent, 6.0);
        assert_eq!(from_fraction.effective_tax_rate_percent, 6.0);
    }

    #[test]
    fn tax_rate_falls_back_when_unset_or_zero() {
        let fees = FeeSchedule::default();

        let unset = compute_unit_economics(&facts(100.0), &fees);
        assert_eq!(unset.tax_amount, 6.0);
        assert_eq!(unset.effective_tax_rate_percent, 6.0);

        let zeroed = FinancialFacts {
            custom_tax_rate: Some(0.0),
            ..facts(100.0)
        };
        assert_eq!(compute_unit_economics(&zeroed, &fees).tax_amount, 6.0);

        let negative = FinancialFacts {
            custom_tax_rate: Some(-3.0),
            ..facts(100.0)
        };
        assert_eq!(compute_unit_economics(&negative, &fees).tax_amount, 6.0);
    }

    #[test]
    fn zero_price_yields_zero_margin_percent() {
        let fees = FeeSchedule::default();
        let result = compute_unit_economics(&facts(0.0), &fees);
        assert_eq!(result.margin_percent, 0.0);
        assert!(result.margin_percent.is_finite());
    }

    #[test]
    fn negative_and_non_finite_amounts_collapse_to_zero() {
        let fees = FeeSchedule::default();

        let negative_price = compute_unit_economics(&facts(-50.0), &fees);
        assert_eq!(negative_price.revenue, 0.0);
        assert_eq!(negative_price.margin_percent, 0.0);

        let poisoned = FinancialFacts {
            cost_price: Some(f64::NAN),
            average_shipping_cost: Some(f64::INFINITY),
            ..facts(100.0)
        };
        let result = compute_unit_economics(&poisoned, &fees);
        assert_eq!(result.shipping_cost, 0.0);
        assert!(result.total_cost_per_unit.is_finite());
    }

    #[test]
    fn missing_cost_is_zero_but_flagged() {
        let fees = FeeSchedule::default();

        let unknown = compute_unit_economics(&facts(100.0), &fees);
        assert!(!unknown.cost_price_known);
        // 12% commission + 6% tax fallback, no fixed fee at this price.
        assert_eq!(unknown.total_cost_per_unit, 18.0);

        let known = FinancialFacts {
            cost_price: Some(40.0),
            ..facts(100.0)
        };
        let result = compute_unit_economics(&known, &fees);
        assert!(result.cost_price_known);
        assert_eq!(result.total_cost_per_unit, 58.0);
    }

    #[test]
    fn shipping_cost_reduces_margin() {
        let fees = FeeSchedule::default();
        let free_shipping = FinancialFacts {
            average_shipping_cost: Some(20.0),
            ..facts(100.0)
        };
        let result = compute_unit_economics(&free_shipping, &fees);
        assert_eq!(result.shipping_cost, 20.0);
        assert_eq!(result.margin_per_unit, 100.0 - 12.0 - 6.0 - 20.0);
    }

    #[test]
    fn period_totals_scale_with_units_sold() {
        let fees = FeeSchedule::default();
        let selling = FinancialFacts {
            units_sold_30d: 10,
            cost_price: Some(40.0),
            ..facts(100.0)
        };
        let result = compute_unit_economics(&selling, &fees);
        assert_eq!(result.revenue, 1000.0);
        assert_eq!(result.margin_per_unit, 42.0);
        assert_eq!(result.total_margin, 420.0);
        assert_eq!(result.margin_percent, 42.0);
    }

    #[test]
    fn conversion_guards_against_zero_visits() {
        assert_eq!(conversion_percent(5, 0), 0.0);
        assert_eq!(conversion_percent(10, 1000), 1.0);
        assert_eq!(conversion_percent(0, 50), 0.0);
    }
}
