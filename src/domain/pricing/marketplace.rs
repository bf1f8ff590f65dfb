//! Marketplace fee table
//!
//! Approximate 2025 UK rates. Amazon Handmade charges its referral fee on the
//! whole sale (item + shipping); Etsy's figure folds transaction and payment
//! processing together; WooCommerce uses Stripe's international card rate.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Marketplace {
    #[default]
    #[serde(rename = "all-worst-case")]
    AllWorstCase,
    #[serde(rename = "etsy")]
    Etsy,
    #[serde(rename = "woocommerce")]
    WooCommerce,
    #[serde(rename = "amazon-handmade")]
    AmazonHandmade,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketplaceFeeProfile {
    pub marketplace: Marketplace,
    pub name: &'static str,
    pub percentage_fee: Decimal,
    pub fixed_fee: Decimal,
    pub notes: &'static str,
}

impl MarketplaceFeeProfile {
    /// Fee charged on a gross (VAT-inclusive) sale amount.
    pub fn fees_on(&self, gross_amount: Decimal) -> Decimal {
        gross_amount * self.percentage_fee / Decimal::ONE_HUNDRED + self.fixed_fee
    }
}

impl Marketplace {
    pub const ALL: [Marketplace; 4] = [
        Marketplace::AllWorstCase,
        Marketplace::Etsy,
        Marketplace::WooCommerce,
        Marketplace::AmazonHandmade,
    ];

    pub fn fee_profile(self) -> MarketplaceFeeProfile {
        let (name, percentage_fee, fixed_fee, notes) = match self {
            Marketplace::AllWorstCase => (
                "All (worst case)",
                Decimal::from(15),
                Decimal::new(25, 2),
                "Highest percentage (Amazon) and highest fixed fee (Etsy) across all channels",
            ),
            Marketplace::Etsy => (
                "Etsy",
                Decimal::new(95, 1),
                Decimal::new(25, 2),
                "6.5% transaction fee plus 3% + £0.25 payment processing",
            ),
            Marketplace::WooCommerce => (
                "WooCommerce (Stripe)",
                Decimal::new(325, 2),
                Decimal::new(20, 2),
                "Stripe UK international card rate, 3.25% + £0.20",
            ),
            Marketplace::AmazonHandmade => (
                "Amazon Handmade",
                Decimal::from(15),
                Decimal::ZERO,
                "15% referral fee on item + shipping, no separate processing fee",
            ),
        };
        MarketplaceFeeProfile { marketplace: self, name, percentage_fee, fixed_fee, notes }
    }

    pub fn fee_table() -> Vec<MarketplaceFeeProfile> {
        Self::ALL.iter().map(|m| m.fee_profile()).collect()
    }
}
