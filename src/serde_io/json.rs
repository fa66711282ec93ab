use log::error;

use crate::grants::{Grant, GrantStore};
use crate::Result;

/// Serializes the store as an ordered, pretty-printed JSON array of grants.
///
/// Dates go out as ISO `YYYY-MM-DD`, rates as fractions. Cached derived
/// fields are included when present; importers strip them regardless.
pub fn export_json(store: &GrantStore) -> Result<String> {
    Ok(serde_json::to_string_pretty(store.grants())?)
}

/// Parses an exported payload back into a store.
///
/// The payload is parsed wholesale: a malformed document is rejected with a
/// validation error and nothing is imported. Any cached derived fields in the
/// payload are stripped; the next reconciliation pass recomputes them from
/// the source fields.
pub fn import_json(payload: &str) -> Result<GrantStore> {
    let mut grants: Vec<Grant> = serde_json::from_str(payload).map_err(|err| {
        error!("Rejecting import: {}", err);
        err
    })?;

    for grant in &mut grants {
        for vest in &mut grant.vests {
            vest.clear_derived();
        }
        for sale in &mut grant.sales {
            sale.clear_derived();
        }
    }

    GrantStore::from_grants(grants)
}
