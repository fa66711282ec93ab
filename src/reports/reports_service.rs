use std::collections::BTreeMap;

use log::warn;
use num_traits::Zero;
use rust_decimal::Decimal;

use crate::constants::{
    GAIN, LOSS, NET_GAIN, SALE_PRICE, TAXES_PAID, TAX_AT_SALE, VESTING_TAX, VEST_PRICE,
};
use crate::grants::{Grant, GrantStore, Sale, Vest};
use crate::reports::reports_model::*;
use crate::taxes::{
    capital_gain, effective_sale_tax, holding_days, tax_at_vest, FinancialYear,
};

/// Derives the year-bucketed reporting views from the entity graph.
///
/// Every figure is computed from source fields through the tax calculator, so
/// the views agree with a fresh reconciliation pass by construction. Sales
/// whose vest reference does not resolve are excluded from every view.
#[derive(Debug, Clone, Default)]
pub struct ReportsService {}

impl ReportsService {
    pub fn new() -> Self {
        ReportsService {}
    }

    /// One row per vest ("Vesting Tax") and per sale ("Tax at Sale"),
    /// labelled by financial year.
    pub fn tax_breakdown(&self, store: &GrantStore) -> Vec<TaxBreakdownRow> {
        let mut rows = Vec::new();
        for grant in store.grants() {
            for vest in &grant.vests {
                rows.push(TaxBreakdownRow {
                    tax_year: FinancialYear::of(vest.vest_date),
                    tax_type: VESTING_TAX,
                    amount: tax_at_vest(vest.shares_vested, vest.vest_price, vest.tax_rate_vest),
                    grant_id: grant.grant_id.clone(),
                    event_id: format!("Vest: {}", vest.vest_id),
                });
            }
            for (sale, vest) in resolved_sales(grant) {
                rows.push(TaxBreakdownRow {
                    tax_year: FinancialYear::of(sale.sale_date),
                    tax_type: TAX_AT_SALE,
                    amount: sale_tax(sale, vest),
                    grant_id: grant.grant_id.clone(),
                    event_id: format!("Sale: {}", sale.sale_id),
                });
            }
        }
        rows
    }

    /// One row per sale with its gain or loss, labelled by financial year.
    pub fn capital_gains(&self, store: &GrantStore) -> Vec<CapitalGainsRow> {
        let mut rows = Vec::new();
        for grant in store.grants() {
            for (sale, vest) in resolved_sales(grant) {
                let amount = capital_gain(sale.sale_price, vest.vest_price, sale.shares_sold);
                rows.push(CapitalGainsRow {
                    tax_year: FinancialYear::of(sale.sale_date),
                    category: if amount >= Decimal::zero() { GAIN } else { LOSS },
                    amount,
                    grant_id: grant.grant_id.clone(),
                    sale_id: sale.sale_id.clone(),
                });
            }
        }
        rows
    }

    /// Per sale: net gain (sale proceeds minus effective tax) and taxes paid
    /// (effective tax plus the originating vest's tax).
    pub fn net_gains(&self, store: &GrantStore) -> Vec<NetGainsRow> {
        let mut rows = Vec::new();
        for grant in store.grants() {
            for (sale, vest) in resolved_sales(grant) {
                let tax_year = FinancialYear::of(sale.sale_date);
                let tax = sale_tax(sale, vest);
                let proceeds = sale.sale_price * Decimal::from(sale.shares_sold);
                rows.push(NetGainsRow {
                    tax_year,
                    category: NET_GAIN,
                    amount: proceeds - tax,
                    grant_id: grant.grant_id.clone(),
                    sale_id: sale.sale_id.clone(),
                });
                rows.push(NetGainsRow {
                    tax_year,
                    category: TAXES_PAID,
                    amount: tax + vest_tax(vest),
                    grant_id: grant.grant_id.clone(),
                    sale_id: sale.sale_id.clone(),
                });
            }
        }
        rows
    }

    /// Net gains and taxes paid summed by (financial year, category).
    pub fn net_gains_by_year(&self, store: &GrantStore) -> Vec<YearCategoryTotal> {
        group_and_sum(&self.net_gains(store))
    }

    /// Flat series pairing each vest's price with the prices of sales
    /// against it.
    pub fn stock_performance(&self, store: &GrantStore) -> Vec<StockPerformanceRow> {
        let mut rows = Vec::new();
        for grant in store.grants() {
            for vest in &grant.vests {
                rows.push(StockPerformanceRow {
                    grant_id: grant.grant_id.clone(),
                    vest_id: vest.vest_id.clone(),
                    price: vest.vest_price,
                    price_type: VEST_PRICE,
                });
                for sale in grant.sales.iter().filter(|s| s.vest_id == vest.vest_id) {
                    rows.push(StockPerformanceRow {
                        grant_id: grant.grant_id.clone(),
                        vest_id: vest.vest_id.clone(),
                        price: sale.sale_price,
                        price_type: SALE_PRICE,
                    });
                }
            }
        }
        rows
    }

    /// Full reconciliation table: one row per (grant, vest, sale) triple.
    pub fn summary(&self, store: &GrantStore) -> Vec<SummaryRow> {
        let mut rows = Vec::new();
        for grant in store.grants() {
            for (sale, vest) in resolved_sales(grant) {
                let shares = Decimal::from(sale.shares_sold);
                let vest_proceeds = vest.vest_price * shares;
                let tax_vest = vest_tax(vest);
                let sale_proceeds = sale.sale_price * shares;
                let tax_sale = sale_tax(sale, vest);
                rows.push(SummaryRow {
                    grant_id: grant.grant_id.clone(),
                    grant_date: grant.grant_date,
                    vest_id: vest.vest_id.clone(),
                    vest_date: vest.vest_date,
                    vest_price: vest.vest_price,
                    tax_rate_vest: vest.tax_rate_vest,
                    vest_proceeds,
                    tax_at_vest: tax_vest,
                    vest_proceeds_after_tax: vest_proceeds - tax_vest,
                    sale_id: sale.sale_id.clone(),
                    sale_date: sale.sale_date,
                    shares_sold: sale.shares_sold,
                    sale_price: sale.sale_price,
                    tax_rate_sale: sale.tax_rate_sale,
                    sale_proceeds,
                    tax_at_sale: tax_sale,
                    sale_proceeds_after_tax: sale_proceeds - tax_sale,
                    net_gain: (vest_proceeds - tax_vest) + (sale_proceeds - tax_sale),
                });
            }
        }
        rows
    }

    /// Overall vesting-tax and sale-tax totals.
    pub fn totals(&self, store: &GrantStore) -> TaxTotals {
        let mut totals = TaxTotals::default();
        for grant in store.grants() {
            let grant_totals = grant_totals(grant);
            totals.tax_at_vest += grant_totals.tax_at_vest;
            totals.tax_at_sale += grant_totals.tax_at_sale;
        }
        totals
    }

    /// Tax totals broken down per grant.
    pub fn totals_by_grant(&self, store: &GrantStore) -> Vec<GrantTaxTotals> {
        store
            .grants()
            .iter()
            .map(|grant| GrantTaxTotals {
                grant_id: grant.grant_id.clone(),
                totals: grant_totals(grant),
            })
            .collect()
    }
}

/// Sums amount rows by (financial year, category), ordered by year then
/// category label.
pub fn group_and_sum<R: AmountRow>(rows: &[R]) -> Vec<YearCategoryTotal> {
    let mut sums: BTreeMap<(FinancialYear, &'static str), Decimal> = BTreeMap::new();
    for row in rows {
        *sums
            .entry((row.tax_year(), row.category()))
            .or_insert_with(Decimal::zero) += row.amount();
    }
    sums.into_iter()
        .map(|((tax_year, category), amount)| YearCategoryTotal {
            tax_year,
            category,
            amount,
        })
        .collect()
}

/// Sales of a grant paired with their resolved vest. Dangling references and
/// sales dated before their vest are logged and skipped; they never reach a
/// view.
fn resolved_sales<'a>(grant: &'a Grant) -> impl Iterator<Item = (&'a Sale, &'a Vest)> {
    grant.sales.iter().filter_map(move |sale| {
        match grant.find_vest(&sale.vest_id) {
            Some(vest) if sale.sale_date < vest.vest_date => {
                warn!(
                    "Skipping sale {} in grant {}: dated before vest {}",
                    sale.sale_id, grant.grant_id, sale.vest_id
                );
                None
            }
            Some(vest) => Some((sale, vest)),
            None => {
                warn!(
                    "Skipping sale {} in grant {}: unknown vest {}",
                    sale.sale_id, grant.grant_id, sale.vest_id
                );
                None
            }
        }
    })
}

fn vest_tax(vest: &Vest) -> Decimal {
    tax_at_vest(vest.shares_vested, vest.vest_price, vest.tax_rate_vest)
}

fn sale_tax(sale: &Sale, vest: &Vest) -> Decimal {
    effective_sale_tax(
        sale.sale_price,
        vest.vest_price,
        sale.shares_sold,
        sale.tax_rate_sale,
        holding_days(vest.vest_date, sale.sale_date),
    )
}

fn grant_totals(grant: &Grant) -> TaxTotals {
    let mut totals = TaxTotals::default();
    for vest in &grant.vests {
        totals.tax_at_vest += vest_tax(vest);
    }
    for (sale, vest) in resolved_sales(grant) {
        totals.tax_at_sale += sale_tax(sale, vest);
    }
    totals
}
