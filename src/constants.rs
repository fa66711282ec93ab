//! Tax-policy constants and the category labels emitted by the reports engine.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Holding periods of at most this many days are taxed as ordinary income
/// on the sale proceeds instead of as a capital gain.
pub const SHORT_HOLDING_MAX_DAYS: i64 = 30;

/// Holding periods strictly longer than this qualify for the long-term
/// capital-gains discount.
pub const LONG_TERM_HOLDING_DAYS: i64 = 365;

/// Long-term discount factor applied to the capital-gains tax.
pub const LONG_TERM_DISCOUNT: Decimal = dec!(0.5);

// Category labels. These are part of the presentation contract and must be
// emitted verbatim by the aggregation views.
pub const VESTING_TAX: &str = "Vesting Tax";
pub const TAX_AT_SALE: &str = "Tax at Sale";
pub const GAIN: &str = "Gain";
pub const LOSS: &str = "Loss";
pub const NET_GAIN: &str = "Net Gain";
pub const TAXES_PAID: &str = "Taxes Paid";
pub const VEST_PRICE: &str = "Vest Price";
pub const SALE_PRICE: &str = "Sale Price";
