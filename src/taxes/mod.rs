//! Pure tax formulas and financial-year bucketing.

mod financial_year;
mod tax_calculator;


pub use financial_year::FinancialYear;
pub use tax_calculator::{
    capital_gain, capital_gains_tax, effective_sale_tax, holding_days, tax_at_vest,
    HoldingCategory,
};
