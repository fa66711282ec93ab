use std::collections::HashMap;

use chrono::NaiveDate;
use log::{debug, warn};
use rust_decimal::Decimal;

use crate::grants::GrantStore;
use crate::taxes::{capital_gain, effective_sale_tax, holding_days, tax_at_vest};

/// A record that could not be reconciled. Issues never abort the run; the
/// offending record is skipped and everything else is processed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReconciliationIssue {
    /// A sale whose vest reference does not resolve within its grant.
    DanglingVestReference {
        grant_id: String,
        sale_id: String,
        vest_id: String,
    },
    /// A sale dated before the vest it references. The store rejects edits
    /// that would produce this, so it only shows up in corrupted data.
    SaleBeforeVest {
        grant_id: String,
        sale_id: String,
        vest_id: String,
    },
}

/// Outcome of one reconciliation pass.
#[derive(Debug, Default)]
pub struct ReconciliationReport {
    /// Number of cached derived fields actually written. A repeat pass over
    /// an unchanged store writes nothing, so this reads 0 the second time.
    pub updated: usize,
    pub issues: Vec<ReconciliationIssue>,
}

impl ReconciliationReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Fills in every derived field across the store, lazily and idempotently.
///
/// Derived values are recomputed from source fields alone, never from other
/// cached values, and written only when absent or stale. Safe to run before
/// every read; mutates nothing but the caches.
#[derive(Debug, Clone, Default)]
pub struct ReconciliationService {}

impl ReconciliationService {
    pub fn new() -> Self {
        ReconciliationService {}
    }

    pub fn reconcile(&self, store: &mut GrantStore) -> ReconciliationReport {
        let mut report = ReconciliationReport::default();

        for grant in store.grants_mut() {
            let mut vest_sources: HashMap<String, (NaiveDate, Decimal)> = HashMap::new();

            for vest in &mut grant.vests {
                let fresh = tax_at_vest(vest.shares_vested, vest.vest_price, vest.tax_rate_vest);
                if vest.tax_at_vest != Some(fresh) {
                    vest.tax_at_vest = Some(fresh);
                    report.updated += 1;
                }
                vest_sources.insert(vest.vest_id.clone(), (vest.vest_date, vest.vest_price));
            }

            for sale in &mut grant.sales {
                let Some(&(vest_date, vest_price)) = vest_sources.get(&sale.vest_id) else {
                    warn!(
                        "Sale {} in grant {} references unknown vest {}; excluding it",
                        sale.sale_id, grant.grant_id, sale.vest_id
                    );
                    if sale.capital_gains.is_some() || sale.tax_at_sale.is_some() {
                        sale.clear_derived();
                        report.updated += 1;
                    }
                    report.issues.push(ReconciliationIssue::DanglingVestReference {
                        grant_id: grant.grant_id.clone(),
                        sale_id: sale.sale_id.clone(),
                        vest_id: sale.vest_id.clone(),
                    });
                    continue;
                };

                let held = holding_days(vest_date, sale.sale_date);
                if held < 0 {
                    warn!(
                        "Sale {} in grant {} predates vest {}; excluding it",
                        sale.sale_id, grant.grant_id, sale.vest_id
                    );
                    if sale.capital_gains.is_some() || sale.tax_at_sale.is_some() {
                        sale.clear_derived();
                        report.updated += 1;
                    }
                    report.issues.push(ReconciliationIssue::SaleBeforeVest {
                        grant_id: grant.grant_id.clone(),
                        sale_id: sale.sale_id.clone(),
                        vest_id: sale.vest_id.clone(),
                    });
                    continue;
                }

                let gain = capital_gain(sale.sale_price, vest_price, sale.shares_sold);
                let tax = effective_sale_tax(
                    sale.sale_price,
                    vest_price,
                    sale.shares_sold,
                    sale.tax_rate_sale,
                    held,
                );
                if sale.capital_gains != Some(gain) || sale.tax_at_sale != Some(tax) {
                    sale.capital_gains = Some(gain);
                    sale.tax_at_sale = Some(tax);
                    report.updated += 1;
                }
            }
        }

        debug!(
            "Reconciliation pass wrote {} derived fields, {} issues",
            report.updated,
            report.issues.len()
        );
        report
    }
}
