use chrono::NaiveDate;
use num_traits::Zero;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::grants::grants_errors::GrantError;

/// An award of a fixed number of shares, vesting over time.
///
/// Owns its vests and sales; sales reference a vest by id rather than being
/// nested under it. Field names double as the wire contract for import/export.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Grant {
    pub grant_id: String,
    pub grant_date: NaiveDate,
    pub symbol: String,
    pub num_stocks: u32,
    #[serde(default)]
    pub vests: Vec<Vest>,
    #[serde(default)]
    pub sales: Vec<Sale>,
}

/// A tranche of a grant's shares becoming owned, taxed as ordinary income.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Vest {
    pub vest_id: String,
    pub vest_date: NaiveDate,
    pub shares_vested: u32,
    pub vest_price: Decimal,
    /// Fraction in [0, 1]; percentages are converted at the form boundary.
    pub tax_rate_vest: Decimal,
    /// Derived cache, recomputable from the source fields above.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_at_vest: Option<Decimal>,
}

/// Disposal of previously vested shares, taxed on the gain relative to the
/// vesting price.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sale {
    pub sale_id: String,
    /// Reference to a vest within the same grant.
    pub vest_id: String,
    pub sale_date: NaiveDate,
    pub shares_sold: u32,
    pub sale_price: Decimal,
    /// Fraction in [0, 1].
    pub tax_rate_sale: Decimal,
    /// Derived cache: (sale price − vest price) × shares sold.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capital_gains: Option<Decimal>,
    /// Derived cache: the *effective* tax for this sale, i.e. the
    /// short-holding override when applicable, otherwise capital-gains tax.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tax_at_sale: Option<Decimal>,
}

impl Grant {
    pub fn find_vest(&self, vest_id: &str) -> Option<&Vest> {
        self.vests.iter().find(|v| v.vest_id == vest_id)
    }

    pub fn find_sale(&self, sale_id: &str) -> Option<&Sale> {
        self.sales.iter().find(|s| s.sale_id == sale_id)
    }
}

impl Vest {
    pub fn clear_derived(&mut self) {
        self.tax_at_vest = None;
    }
}

impl Sale {
    pub fn clear_derived(&mut self) {
        self.capital_gains = None;
        self.tax_at_sale = None;
    }
}

// === Input models ===
//
// Update types carry no writable identity fields: their ids locate the record
// to edit, so an identifier change is unrepresentable by construction.

/// Input model for creating a new grant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewGrant {
    pub grant_id: String,
    pub grant_date: NaiveDate,
    pub symbol: String,
    pub num_stocks: u32,
}

impl NewGrant {
    pub fn validate(&self) -> Result<(), GrantError> {
        validate_id("Grant ID", &self.grant_id)?;
        if self.symbol.trim().is_empty() {
            return Err(GrantError::InvalidData(
                "Stock symbol cannot be empty".to_string(),
            ));
        }
        validate_share_count("Number of stocks", self.num_stocks)
    }
}

/// Input model for updating an existing grant's non-identity fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GrantUpdate {
    pub grant_id: String,
    pub grant_date: NaiveDate,
    pub symbol: String,
    pub num_stocks: u32,
}

impl GrantUpdate {
    pub fn validate(&self) -> Result<(), GrantError> {
        validate_id("Grant ID", &self.grant_id)?;
        if self.symbol.trim().is_empty() {
            return Err(GrantError::InvalidData(
                "Stock symbol cannot be empty".to_string(),
            ));
        }
        validate_share_count("Number of stocks", self.num_stocks)
    }
}

/// Input model for creating a new vest under an existing grant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewVest {
    pub grant_id: String,
    pub vest_id: String,
    pub vest_date: NaiveDate,
    pub shares_vested: u32,
    pub vest_price: Decimal,
    pub tax_rate_vest: Decimal,
}

impl NewVest {
    pub fn validate(&self) -> Result<(), GrantError> {
        validate_id("Grant ID", &self.grant_id)?;
        validate_id("Vest ID", &self.vest_id)?;
        validate_share_count("Shares vested", self.shares_vested)?;
        validate_price("Vest price", self.vest_price)?;
        validate_rate("Tax rate at vest", self.tax_rate_vest)
    }
}

/// Input model for updating an existing vest's non-identity fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VestUpdate {
    pub grant_id: String,
    pub vest_id: String,
    pub vest_date: NaiveDate,
    pub shares_vested: u32,
    pub vest_price: Decimal,
    pub tax_rate_vest: Decimal,
}

impl VestUpdate {
    pub fn validate(&self) -> Result<(), GrantError> {
        validate_id("Grant ID", &self.grant_id)?;
        validate_id("Vest ID", &self.vest_id)?;
        validate_share_count("Shares vested", self.shares_vested)?;
        validate_price("Vest price", self.vest_price)?;
        validate_rate("Tax rate at vest", self.tax_rate_vest)
    }
}

/// Input model for creating a new sale against a vest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewSale {
    pub grant_id: String,
    pub sale_id: String,
    pub vest_id: String,
    pub sale_date: NaiveDate,
    pub shares_sold: u32,
    pub sale_price: Decimal,
    pub tax_rate_sale: Decimal,
}

impl NewSale {
    pub fn validate(&self) -> Result<(), GrantError> {
        validate_id("Grant ID", &self.grant_id)?;
        validate_id("Sale ID", &self.sale_id)?;
        validate_id("Vest ID", &self.vest_id)?;
        validate_share_count("Shares sold", self.shares_sold)?;
        validate_price("Sale price", self.sale_price)?;
        validate_rate("Tax rate at sale", self.tax_rate_sale)
    }
}

/// Input model for updating an existing sale's non-identity fields.
///
/// The vest reference is part of the sale's identity chain and is not
/// editable; repoint a sale by deleting and re-creating it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleUpdate {
    pub grant_id: String,
    pub sale_id: String,
    pub sale_date: NaiveDate,
    pub shares_sold: u32,
    pub sale_price: Decimal,
    pub tax_rate_sale: Decimal,
}

impl SaleUpdate {
    pub fn validate(&self) -> Result<(), GrantError> {
        validate_id("Grant ID", &self.grant_id)?;
        validate_id("Sale ID", &self.sale_id)?;
        validate_share_count("Shares sold", self.shares_sold)?;
        validate_price("Sale price", self.sale_price)?;
        validate_rate("Tax rate at sale", self.tax_rate_sale)
    }
}

// === Field validators ===

fn validate_id(field: &str, value: &str) -> Result<(), GrantError> {
    if value.trim().is_empty() {
        return Err(GrantError::InvalidData(format!("{} cannot be empty", field)));
    }
    Ok(())
}

fn validate_share_count(field: &str, value: u32) -> Result<(), GrantError> {
    if value == 0 {
        return Err(GrantError::InvalidData(format!(
            "{} must be at least 1",
            field
        )));
    }
    Ok(())
}

fn validate_price(field: &str, value: Decimal) -> Result<(), GrantError> {
    if value < Decimal::zero() {
        return Err(GrantError::InvalidData(format!(
            "{} cannot be negative",
            field
        )));
    }
    Ok(())
}

fn validate_rate(field: &str, value: Decimal) -> Result<(), GrantError> {
    if value < Decimal::zero() || value > Decimal::ONE {
        return Err(GrantError::InvalidData(format!(
            "{} must be a fraction between 0 and 1",
            field
        )));
    }
    Ok(())
}
