use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::taxes::FinancialYear;

/// One taxable event (a vest or a sale) with its tax figure.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxBreakdownRow {
    pub tax_year: FinancialYear,
    /// `"Vesting Tax"` or `"Tax at Sale"`.
    pub tax_type: &'static str,
    pub amount: Decimal,
    pub grant_id: String,
    pub event_id: String,
}

/// One sale's realized gain or loss.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CapitalGainsRow {
    pub tax_year: FinancialYear,
    /// `"Gain"` when the amount is non-negative, `"Loss"` otherwise.
    pub category: &'static str,
    pub amount: Decimal,
    pub grant_id: String,
    pub sale_id: String,
}

/// One sale's net gain or total taxes paid.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NetGainsRow {
    pub tax_year: FinancialYear,
    /// `"Net Gain"` or `"Taxes Paid"`.
    pub category: &'static str,
    pub amount: Decimal,
    pub grant_id: String,
    pub sale_id: String,
}

/// Amounts summed by (financial year, category), for chart consumption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearCategoryTotal {
    pub tax_year: FinancialYear,
    pub category: &'static str,
    pub amount: Decimal,
}

/// One point of the vest-price-vs-sale-price trend series.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StockPerformanceRow {
    pub grant_id: String,
    pub vest_id: String,
    pub price: Decimal,
    /// `"Vest Price"` or `"Sale Price"`.
    pub price_type: &'static str,
}

/// Full reconciliation row for one (grant, vest, sale) triple.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SummaryRow {
    pub grant_id: String,
    pub grant_date: NaiveDate,
    pub vest_id: String,
    pub vest_date: NaiveDate,
    pub vest_price: Decimal,
    pub tax_rate_vest: Decimal,
    /// Vest price × shares sold.
    pub vest_proceeds: Decimal,
    pub tax_at_vest: Decimal,
    pub vest_proceeds_after_tax: Decimal,
    pub sale_id: String,
    pub sale_date: NaiveDate,
    pub shares_sold: u32,
    pub sale_price: Decimal,
    pub tax_rate_sale: Decimal,
    /// Sale price × shares sold.
    pub sale_proceeds: Decimal,
    /// Effective sale tax (short-holding override applied when due).
    pub tax_at_sale: Decimal,
    pub sale_proceeds_after_tax: Decimal,
    /// (vest proceeds − vest tax) + (sale proceeds − effective sale tax).
    pub net_gain: Decimal,
}

/// Total vesting tax and effective sale tax across a set of events.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TaxTotals {
    pub tax_at_vest: Decimal,
    pub tax_at_sale: Decimal,
}

/// Per-grant tax totals.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrantTaxTotals {
    pub grant_id: String,
    pub totals: TaxTotals,
}

/// A row that can be folded into (financial year, category) sums.
pub trait AmountRow {
    fn tax_year(&self) -> FinancialYear;
    fn category(&self) -> &'static str;
    fn amount(&self) -> Decimal;
}

impl AmountRow for TaxBreakdownRow {
    fn tax_year(&self) -> FinancialYear {
        self.tax_year
    }
    fn category(&self) -> &'static str {
        self.tax_type
    }
    fn amount(&self) -> Decimal {
        self.amount
    }
}

impl AmountRow for CapitalGainsRow {
    fn tax_year(&self) -> FinancialYear {
        self.tax_year
    }
    fn category(&self) -> &'static str {
        self.category
    }
    fn amount(&self) -> Decimal {
        self.amount
    }
}

impl AmountRow for NetGainsRow {
    fn tax_year(&self) -> FinancialYear {
        self.tax_year
    }
    fn category(&self) -> &'static str {
        self.category
    }
    fn amount(&self) -> Decimal {
        self.amount
    }
}
