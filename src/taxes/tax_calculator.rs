use chrono::NaiveDate;
use num_traits::Zero;
use rust_decimal::Decimal;

use crate::constants::{LONG_TERM_DISCOUNT, LONG_TERM_HOLDING_DAYS, SHORT_HOLDING_MAX_DAYS};

/// Which of the two sale-tax regimes applies, keyed purely by holding days.
///
/// Short-held sales are taxed like ordinary income on the sale proceeds;
/// everything else is taxed as a capital gain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HoldingCategory {
    /// Held for at most 30 days.
    ShortHolding,
    /// Standard capital-gains treatment, with the long-term discount when
    /// held for more than a year.
    Standard,
}

impl HoldingCategory {
    pub fn classify(held_days: i64) -> Self {
        if held_days <= SHORT_HOLDING_MAX_DAYS {
            HoldingCategory::ShortHolding
        } else {
            HoldingCategory::Standard
        }
    }
}

/// Whole calendar days between a vest and the sale against it.
pub fn holding_days(vest_date: NaiveDate, sale_date: NaiveDate) -> i64 {
    (sale_date - vest_date).num_days()
}

/// Ordinary-income tax on a vesting event: shares × price × rate.
///
/// Defined for any non-negative inputs; zero inputs produce zero tax.
pub fn tax_at_vest(shares: u32, price: Decimal, rate: Decimal) -> Decimal {
    Decimal::from(shares) * price * rate
}

/// Capital gain (or loss, when negative) realized by a sale.
pub fn capital_gain(sale_price: Decimal, vest_price: Decimal, shares_sold: u32) -> Decimal {
    (sale_price - vest_price) * Decimal::from(shares_sold)
}

/// Capital-gains tax: losses are untaxed, gains are taxed at `rate`, and the
/// tax is halved when the shares were held for more than a year.
pub fn capital_gains_tax(
    sale_price: Decimal,
    vest_price: Decimal,
    shares_sold: u32,
    rate: Decimal,
    held_over_year: bool,
) -> Decimal {
    let gain = capital_gain(sale_price, vest_price, shares_sold);
    if gain <= Decimal::zero() {
        return Decimal::zero();
    }
    let mut tax = gain * rate;
    if held_over_year {
        tax *= LONG_TERM_DISCOUNT;
    }
    tax
}

/// The tax actually owed on a sale.
///
/// Sales held for at most 30 days are taxed like ordinary income: the
/// vest-tax formula applied to the sale price. Longer holdings pay
/// capital-gains tax, halved past the one-year mark.
pub fn effective_sale_tax(
    sale_price: Decimal,
    vest_price: Decimal,
    shares_sold: u32,
    rate: Decimal,
    held_days: i64,
) -> Decimal {
    match HoldingCategory::classify(held_days) {
        HoldingCategory::ShortHolding => tax_at_vest(shares_sold, sale_price, rate),
        HoldingCategory::Standard => capital_gains_tax(
            sale_price,
            vest_price,
            shares_sold,
            rate,
            held_days > LONG_TERM_HOLDING_DAYS,
        ),
    }
}
