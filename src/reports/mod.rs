//! Aggregation engine: year-bucketed reporting views over the entity graph.

mod reports_model;
mod reports_service;


pub use reports_model::{
    AmountRow, CapitalGainsRow, GrantTaxTotals, NetGainsRow, StockPerformanceRow, SummaryRow,
    TaxBreakdownRow, TaxTotals, YearCategoryTotal,
};
pub use reports_service::{group_and_sum, ReportsService};
