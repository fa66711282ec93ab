use log::debug;

use crate::grants::grants_errors::GrantError;
use crate::grants::grants_model::*;
use crate::Result;

/// In-memory working set of grants, vests, and sales.
///
/// The store is the single owner of the entity graph: every mutation goes
/// through this API, which enforces identifier uniqueness, numeric bounds,
/// and referential validity at the edit boundary. Grants keep their insertion
/// order, matching the export contract.
#[derive(Debug, Clone, Default)]
pub struct GrantStore {
    grants: Vec<Grant>,
}

impl GrantStore {
    pub fn new() -> Self {
        Self { grants: Vec::new() }
    }

    /// Builds a store from an already-deserialized grant list, validating the
    /// whole graph. Dangling sale→vest references are allowed here; they are
    /// flagged during reconciliation instead of rejected.
    pub fn from_grants(grants: Vec<Grant>) -> Result<Self> {
        for (i, grant) in grants.iter().enumerate() {
            validate_grant_record(grant)?;
            if grants[..i].iter().any(|g| g.grant_id == grant.grant_id) {
                return Err(GrantError::DuplicateId(grant.grant_id.clone()).into());
            }
        }
        Ok(Self { grants })
    }

    pub fn len(&self) -> usize {
        self.grants.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grants.is_empty()
    }

    pub fn grants(&self) -> &[Grant] {
        &self.grants
    }

    pub(crate) fn grants_mut(&mut self) -> &mut [Grant] {
        &mut self.grants
    }

    pub fn get_grant(&self, grant_id: &str) -> Option<&Grant> {
        self.grants.iter().find(|g| g.grant_id == grant_id)
    }

    pub fn get_vest(&self, grant_id: &str, vest_id: &str) -> Option<&Vest> {
        self.get_grant(grant_id).and_then(|g| g.find_vest(vest_id))
    }

    pub fn get_sale(&self, grant_id: &str, sale_id: &str) -> Option<&Sale> {
        self.get_grant(grant_id).and_then(|g| g.find_sale(sale_id))
    }

    // === Grant mutations ===

    pub fn add_grant(&mut self, new_grant: NewGrant) -> Result<()> {
        new_grant.validate()?;
        if self.get_grant(&new_grant.grant_id).is_some() {
            return Err(GrantError::DuplicateId(new_grant.grant_id).into());
        }
        debug!("Adding grant {}", new_grant.grant_id);
        self.grants.push(Grant {
            grant_id: new_grant.grant_id,
            grant_date: new_grant.grant_date,
            symbol: new_grant.symbol,
            num_stocks: new_grant.num_stocks,
            vests: Vec::new(),
            sales: Vec::new(),
        });
        Ok(())
    }

    pub fn update_grant(&mut self, update: GrantUpdate) -> Result<()> {
        update.validate()?;
        let idx = self.grant_index(&update.grant_id)?;
        apply_grant_update(&mut self.grants[idx], &update);
        Ok(())
    }

    /// Removes a grant together with all of its vests and sales.
    pub fn delete_grant(&mut self, grant_id: &str) -> Result<Grant> {
        let idx = self.grant_index(grant_id)?;
        debug!("Deleting grant {}", grant_id);
        Ok(self.grants.remove(idx))
    }

    // === Vest mutations ===

    pub fn add_vest(&mut self, new_vest: NewVest) -> Result<()> {
        new_vest.validate()?;
        let idx = self.grant_index(&new_vest.grant_id)?;
        let grant = &mut self.grants[idx];
        if grant.find_vest(&new_vest.vest_id).is_some() {
            return Err(GrantError::DuplicateId(new_vest.vest_id).into());
        }
        // A re-created vest id may already have sales priced against it.
        if let Some(sale) = grant
            .sales
            .iter()
            .find(|s| s.vest_id == new_vest.vest_id && s.sale_date < new_vest.vest_date)
        {
            return Err(GrantError::SaleBeforeVest {
                sale_id: sale.sale_id.clone(),
                sale_date: sale.sale_date,
                vest_id: new_vest.vest_id.clone(),
                vest_date: new_vest.vest_date,
            }
            .into());
        }
        debug!("Adding vest {} to grant {}", new_vest.vest_id, grant.grant_id);
        grant.vests.push(Vest {
            vest_id: new_vest.vest_id,
            vest_date: new_vest.vest_date,
            shares_vested: new_vest.shares_vested,
            vest_price: new_vest.vest_price,
            tax_rate_vest: new_vest.tax_rate_vest,
            tax_at_vest: None,
        });
        Ok(())
    }

    pub fn update_vest(&mut self, update: VestUpdate) -> Result<()> {
        update.validate()?;
        let idx = self.grant_index(&update.grant_id)?;
        self.validate_vest_update(idx, &update)?;
        apply_vest_update(&mut self.grants[idx], &update);
        Ok(())
    }

    /// Removes a vest. Sales referencing it are left in place: keeping the
    /// graph consistent on vest removal is the caller's responsibility, and
    /// reconciliation flags any sale left dangling.
    pub fn delete_vest(&mut self, grant_id: &str, vest_id: &str) -> Result<Vest> {
        let idx = self.grant_index(grant_id)?;
        let vidx = self.vest_index(idx, vest_id)?;
        debug!("Deleting vest {} from grant {}", vest_id, grant_id);
        Ok(self.grants[idx].vests.remove(vidx))
    }

    // === Sale mutations ===

    pub fn add_sale(&mut self, new_sale: NewSale) -> Result<()> {
        new_sale.validate()?;
        let idx = self.grant_index(&new_sale.grant_id)?;
        let grant = &mut self.grants[idx];
        if grant.find_sale(&new_sale.sale_id).is_some() {
            return Err(GrantError::DuplicateId(new_sale.sale_id).into());
        }
        let vest = grant.find_vest(&new_sale.vest_id).ok_or_else(|| {
            GrantError::DanglingVestReference {
                grant_id: new_sale.grant_id.clone(),
                sale_id: new_sale.sale_id.clone(),
                vest_id: new_sale.vest_id.clone(),
            }
        })?;
        if new_sale.sale_date < vest.vest_date {
            return Err(GrantError::SaleBeforeVest {
                sale_id: new_sale.sale_id,
                sale_date: new_sale.sale_date,
                vest_id: vest.vest_id.clone(),
                vest_date: vest.vest_date,
            }
            .into());
        }
        debug!("Adding sale {} to grant {}", new_sale.sale_id, grant.grant_id);
        grant.sales.push(Sale {
            sale_id: new_sale.sale_id,
            vest_id: new_sale.vest_id,
            sale_date: new_sale.sale_date,
            shares_sold: new_sale.shares_sold,
            sale_price: new_sale.sale_price,
            tax_rate_sale: new_sale.tax_rate_sale,
            capital_gains: None,
            tax_at_sale: None,
        });
        Ok(())
    }

    pub fn update_sale(&mut self, update: SaleUpdate) -> Result<()> {
        update.validate()?;
        let idx = self.grant_index(&update.grant_id)?;
        self.validate_sale_update(idx, &update)?;
        apply_sale_update(&mut self.grants[idx], &update);
        Ok(())
    }

    pub fn delete_sale(&mut self, grant_id: &str, sale_id: &str) -> Result<Sale> {
        let idx = self.grant_index(grant_id)?;
        let sidx = self
            .grants[idx]
            .sales
            .iter()
            .position(|s| s.sale_id == sale_id)
            .ok_or_else(|| GrantError::NotFound(format!("Sale '{}'", sale_id)))?;
        debug!("Deleting sale {} from grant {}", sale_id, grant_id);
        Ok(self.grants[idx].sales.remove(sidx))
    }

    // === Batch updates ===
    //
    // Table-style edits arrive as a batch of update rows. Every row is
    // validated before any row is applied, so a single bad row rejects the
    // whole batch and the store never ends up partially edited.

    pub fn apply_grant_updates(&mut self, updates: Vec<GrantUpdate>) -> Result<()> {
        for update in &updates {
            update.validate()?;
            self.grant_index(&update.grant_id)?;
        }
        for update in &updates {
            let idx = self.grant_index(&update.grant_id)?;
            apply_grant_update(&mut self.grants[idx], update);
        }
        Ok(())
    }

    pub fn apply_vest_updates(&mut self, updates: Vec<VestUpdate>) -> Result<()> {
        for update in &updates {
            update.validate()?;
            let idx = self.grant_index(&update.grant_id)?;
            self.validate_vest_update(idx, update)?;
        }
        for update in &updates {
            let idx = self.grant_index(&update.grant_id)?;
            apply_vest_update(&mut self.grants[idx], update);
        }
        Ok(())
    }

    pub fn apply_sale_updates(&mut self, updates: Vec<SaleUpdate>) -> Result<()> {
        for update in &updates {
            update.validate()?;
            let idx = self.grant_index(&update.grant_id)?;
            self.validate_sale_update(idx, update)?;
        }
        for update in &updates {
            let idx = self.grant_index(&update.grant_id)?;
            apply_sale_update(&mut self.grants[idx], update);
        }
        Ok(())
    }

    // === Lookups ===

    fn grant_index(&self, grant_id: &str) -> Result<usize> {
        self.grants
            .iter()
            .position(|g| g.grant_id == grant_id)
            .ok_or_else(|| GrantError::NotFound(format!("Grant '{}'", grant_id)).into())
    }

    fn vest_index(&self, grant_idx: usize, vest_id: &str) -> Result<usize> {
        self.grants[grant_idx]
            .vests
            .iter()
            .position(|v| v.vest_id == vest_id)
            .ok_or_else(|| GrantError::NotFound(format!("Vest '{}'", vest_id)).into())
    }

    /// Checks a vest update against the existing record and the sales priced
    /// against it, without mutating anything. Moving a vest date past a
    /// dependent sale's date would strand that sale before its vest.
    fn validate_vest_update(&self, grant_idx: usize, update: &VestUpdate) -> Result<()> {
        self.vest_index(grant_idx, &update.vest_id)?;
        let grant = &self.grants[grant_idx];
        if let Some(sale) = grant
            .sales
            .iter()
            .find(|s| s.vest_id == update.vest_id && s.sale_date < update.vest_date)
        {
            return Err(GrantError::SaleBeforeVest {
                sale_id: sale.sale_id.clone(),
                sale_date: sale.sale_date,
                vest_id: update.vest_id.clone(),
                vest_date: update.vest_date,
            }
            .into());
        }
        Ok(())
    }

    /// Checks a sale update against the existing record and its referenced
    /// vest, without mutating anything.
    fn validate_sale_update(&self, grant_idx: usize, update: &SaleUpdate) -> Result<()> {
        let grant = &self.grants[grant_idx];
        let sale = grant
            .find_sale(&update.sale_id)
            .ok_or_else(|| GrantError::NotFound(format!("Sale '{}'", update.sale_id)))?;
        if let Some(vest) = grant.find_vest(&sale.vest_id) {
            if update.sale_date < vest.vest_date {
                return Err(GrantError::SaleBeforeVest {
                    sale_id: update.sale_id.clone(),
                    sale_date: update.sale_date,
                    vest_id: vest.vest_id.clone(),
                    vest_date: vest.vest_date,
                }
                .into());
            }
        }
        Ok(())
    }
}

fn apply_grant_update(grant: &mut Grant, update: &GrantUpdate) {
    grant.grant_date = update.grant_date;
    grant.symbol = update.symbol.clone();
    grant.num_stocks = update.num_stocks;
}

fn apply_vest_update(grant: &mut Grant, update: &VestUpdate) {
    if let Some(vest) = grant.vests.iter_mut().find(|v| v.vest_id == update.vest_id) {
        vest.vest_date = update.vest_date;
        vest.shares_vested = update.shares_vested;
        vest.vest_price = update.vest_price;
        vest.tax_rate_vest = update.tax_rate_vest;
        vest.clear_derived();
    }
    // Sales priced against this vest hold stale caches now.
    let vest_id = update.vest_id.clone();
    for sale in grant.sales.iter_mut().filter(|s| s.vest_id == vest_id) {
        sale.clear_derived();
    }
}

fn apply_sale_update(grant: &mut Grant, update: &SaleUpdate) {
    if let Some(sale) = grant.sales.iter_mut().find(|s| s.sale_id == update.sale_id) {
        sale.sale_date = update.sale_date;
        sale.shares_sold = update.shares_sold;
        sale.sale_price = update.sale_price;
        sale.tax_rate_sale = update.tax_rate_sale;
        sale.clear_derived();
    }
}

/// Validates one deserialized grant record: field bounds, id uniqueness
/// within the grant, and sale-before-vest ordering where the vest resolves.
fn validate_grant_record(grant: &Grant) -> Result<()> {
    NewGrant {
        grant_id: grant.grant_id.clone(),
        grant_date: grant.grant_date,
        symbol: grant.symbol.clone(),
        num_stocks: grant.num_stocks,
    }
    .validate()?;

    for (i, vest) in grant.vests.iter().enumerate() {
        NewVest {
            grant_id: grant.grant_id.clone(),
            vest_id: vest.vest_id.clone(),
            vest_date: vest.vest_date,
            shares_vested: vest.shares_vested,
            vest_price: vest.vest_price,
            tax_rate_vest: vest.tax_rate_vest,
        }
        .validate()?;
        if grant.vests[..i].iter().any(|v| v.vest_id == vest.vest_id) {
            return Err(GrantError::DuplicateId(vest.vest_id.clone()).into());
        }
    }

    for (i, sale) in grant.sales.iter().enumerate() {
        NewSale {
            grant_id: grant.grant_id.clone(),
            sale_id: sale.sale_id.clone(),
            vest_id: sale.vest_id.clone(),
            sale_date: sale.sale_date,
            shares_sold: sale.shares_sold,
            sale_price: sale.sale_price,
            tax_rate_sale: sale.tax_rate_sale,
        }
        .validate()?;
        if grant.sales[..i].iter().any(|s| s.sale_id == sale.sale_id) {
            return Err(GrantError::DuplicateId(sale.sale_id.clone()).into());
        }
        if let Some(vest) = grant.find_vest(&sale.vest_id) {
            if sale.sale_date < vest.vest_date {
                return Err(GrantError::SaleBeforeVest {
                    sale_id: sale.sale_id.clone(),
                    sale_date: sale.sale_date,
                    vest_id: vest.vest_id.clone(),
                    vest_date: vest.vest_date,
                }
                .into());
            }
        }
    }

    Ok(())
}
