//! Cost-based pricing
//!
//! Works out a per-unit cost breakdown (materials, labour, overhead,
//! shipping) and projects price, fees and profit for a handful of markup
//! bands. All amounts are per unit; "net" excludes VAT, "gross" includes it.
//! Everything here is a pure function of its inputs.

pub mod marketplace;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::value_objects::{bounded, fraction, uplift};
pub use marketplace::{Marketplace, MarketplaceFeeProfile};

/// Markup percentages every report is projected for.
pub const DEFAULT_MARKUP_BANDS: [u32; 3] = [30, 50, 100];

/// Ceiling for any single money figure (materials line, rate, shipping).
pub const MAX_AMOUNT: i64 = 1_000_000;
/// Ceiling for labour minutes per unit.
pub const MAX_LABOUR_MINUTES: i64 = 1_000_000;
/// Ceiling for overhead, shipping overhead and VAT percentages.
pub const MAX_PERCENTAGE: i64 = 1_000;
/// Ceiling for a single markup band.
pub const MAX_MARKUP: u32 = 10_000;

const MONEY_DP: u32 = 4;
const MINUTES_DP: u32 = 2;

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillOfMaterialsLine {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub cost_per_unit_net: Decimal,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PricingInputs {
    pub materials: Vec<BillOfMaterialsLine>,
    pub labour_minutes: Decimal,
    pub labour_rate_per_hour: Decimal,
    pub overhead_percentage: Decimal,
    /// Net cost from the shipping advisor; wins over the manual figure.
    pub advised_shipping_cost: Option<Decimal>,
    pub manual_shipping_cost: Decimal,
    pub shipping_overhead_percentage: Decimal,
    pub marketplace: Marketplace,
    pub vat_percentage: Decimal,
}

impl Default for PricingInputs {
    fn default() -> Self {
        Self {
            materials: vec![],
            labour_minutes: Decimal::ZERO,
            labour_rate_per_hour: Decimal::from(25),
            overhead_percentage: Decimal::from(20),
            advised_shipping_cost: None,
            manual_shipping_cost: Decimal::ZERO,
            shipping_overhead_percentage: Decimal::ZERO,
            marketplace: Marketplace::default(),
            vat_percentage: Decimal::from(20),
        }
    }
}

impl PricingInputs {
    /// Negative figures from the form are read as 0, oversized ones are
    /// capped, and everything is rounded to a working precision. Within these
    /// bounds no step of the calculation can overflow a `Decimal`.
    pub fn clamped(mut self) -> Self {
        let amount = |v| bounded(v, Decimal::from(MAX_AMOUNT), MONEY_DP);
        let percentage = |v| bounded(v, Decimal::from(MAX_PERCENTAGE), MONEY_DP);
        for line in &mut self.materials {
            line.cost_per_unit_net = amount(line.cost_per_unit_net);
        }
        self.labour_minutes = bounded(self.labour_minutes, Decimal::from(MAX_LABOUR_MINUTES), MINUTES_DP);
        self.labour_rate_per_hour = amount(self.labour_rate_per_hour);
        self.overhead_percentage = percentage(self.overhead_percentage);
        self.advised_shipping_cost = self.advised_shipping_cost.map(amount);
        self.manual_shipping_cost = amount(self.manual_shipping_cost);
        self.shipping_overhead_percentage = percentage(self.shipping_overhead_percentage);
        self.vat_percentage = percentage(self.vat_percentage);
        self
    }

    pub fn actual_shipping_cost_net(&self) -> Decimal {
        self.advised_shipping_cost.unwrap_or(self.manual_shipping_cost)
    }

    fn labour_hours(&self) -> Decimal { self.labour_minutes / Decimal::from(60) }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CostBreakdown {
    pub total_materials_cost_net: Decimal,
    pub labour_cost_per_unit_net: Decimal,
    pub overhead_cost_per_unit_net: Decimal,
    pub actual_shipping_cost_net: Decimal,
    pub shipping_overhead_amount: Decimal,
    pub suggested_shipping_charge_net: Decimal,
    pub suggested_shipping_charge_gross: Decimal,
    pub base_cost_per_unit_net: Decimal,
}

impl CostBreakdown {
    pub fn compute(inputs: &PricingInputs) -> Self {
        let total_materials_cost_net: Decimal = inputs.materials.iter().map(|l| l.cost_per_unit_net).sum();
        let labour_cost_per_unit_net = inputs.labour_hours() * inputs.labour_rate_per_hour;
        let overhead_cost_per_unit_net =
            (total_materials_cost_net + labour_cost_per_unit_net) * fraction(inputs.overhead_percentage);

        let actual_shipping_cost_net = inputs.actual_shipping_cost_net();
        let shipping_overhead_amount = actual_shipping_cost_net * fraction(inputs.shipping_overhead_percentage);
        let suggested_shipping_charge_net = actual_shipping_cost_net + shipping_overhead_amount;
        let suggested_shipping_charge_gross = suggested_shipping_charge_net * uplift(inputs.vat_percentage);

        let base_cost_per_unit_net = total_materials_cost_net
            + labour_cost_per_unit_net
            + overhead_cost_per_unit_net
            + actual_shipping_cost_net;

        Self {
            total_materials_cost_net,
            labour_cost_per_unit_net,
            overhead_cost_per_unit_net,
            actual_shipping_cost_net,
            shipping_overhead_amount,
            suggested_shipping_charge_net,
            suggested_shipping_charge_gross,
            base_cost_per_unit_net,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingResult {
    pub markup_percentage: u32,
    pub net_item_price: Decimal,
    pub gross_item_price: Decimal,
    pub rounded_gross_price: Decimal,
    pub net_revenue: Decimal,
    pub gross_revenue: Decimal,
    pub marketplace_fees_gross: Decimal,
    pub marketplace_fees_net: Decimal,
    pub profit_net: Decimal,
    pub effective_margin_percent: Decimal,
    pub profit_per_hour: Decimal,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricingReport {
    pub breakdown: CostBreakdown,
    pub fee_profile: MarketplaceFeeProfile,
    pub results: Vec<PricingResult>,
}

/// `ceil(price - 0.05) + 0.95`: lifts a gross price onto a ".95" price point.
pub fn round_to_95(gross_price: Decimal) -> Decimal {
    (gross_price - Decimal::new(5, 2)).ceil() + Decimal::new(95, 2)
}

/// Projects one markup band against an already computed breakdown.
pub fn price_for_markup(
    inputs: &PricingInputs,
    breakdown: &CostBreakdown,
    fee_profile: &MarketplaceFeeProfile,
    markup_percentage: u32,
) -> PricingResult {
    let vat = uplift(inputs.vat_percentage);
    let base = breakdown.base_cost_per_unit_net;

    let net_item_price = base * uplift(Decimal::from(markup_percentage));
    let gross_item_price = net_item_price * vat;

    let net_revenue = net_item_price + breakdown.suggested_shipping_charge_net;
    let gross_revenue = gross_item_price + breakdown.suggested_shipping_charge_gross;

    let marketplace_fees_gross = fee_profile.fees_on(gross_revenue);
    let marketplace_fees_net = marketplace_fees_gross / vat;

    let profit_net = net_revenue - base - marketplace_fees_net;

    let effective_margin_percent = if net_revenue > Decimal::ZERO {
        profit_net / net_revenue * Decimal::ONE_HUNDRED
    } else {
        Decimal::ZERO
    };
    let labour_hours = inputs.labour_hours();
    let profit_per_hour = if labour_hours > Decimal::ZERO {
        profit_net / labour_hours
    } else {
        Decimal::ZERO
    };

    PricingResult {
        markup_percentage,
        net_item_price,
        gross_item_price,
        rounded_gross_price: round_to_95(gross_item_price),
        net_revenue,
        gross_revenue,
        marketplace_fees_gross,
        marketplace_fees_net,
        profit_net,
        effective_margin_percent,
        profit_per_hour,
    }
}

/// Quotes every band. Inputs are clamped first and bands are capped at
/// [`MAX_MARKUP`], so any input produces a report.
pub fn quote_with_bands(inputs: &PricingInputs, bands: &[u32]) -> PricingReport {
    let inputs = inputs.clone().clamped();
    let breakdown = CostBreakdown::compute(&inputs);
    let fee_profile = inputs.marketplace.fee_profile();
    let results = bands
        .iter()
        .map(|&m| price_for_markup(&inputs, &breakdown, &fee_profile, m.min(MAX_MARKUP)))
        .collect();
    PricingReport { breakdown, fee_profile, results }
}

pub fn quote(inputs: &PricingInputs) -> PricingReport {
    quote_with_bands(inputs, &DEFAULT_MARKUP_BANDS)
}
