//! Entity graph: grant/vest/sale models, their invariants, and the store.

mod grants_errors;
mod grants_model;
mod grants_store;

#[cfg(test)]
mod grants_model_tests;


pub use grants_errors::GrantError;
pub use grants_model::{
    Grant, GrantUpdate, NewGrant, NewSale, NewVest, Sale, SaleUpdate, Vest, VestUpdate,
};
pub use grants_store::GrantStore;
