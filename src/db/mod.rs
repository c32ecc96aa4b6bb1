//! Embedded document store for the catalog, carts and orders.
//!
//! Documents are JSON values in fjall partitions, one partition per
//! entity kind. Monetary amounts in every stored document are in the
//! configured base currency.

pub mod carts;
pub mod orders;
pub mod products;

use anyhow::{Context, Result};
use fjall::{Keyspace, PartitionCreateOptions, PartitionHandle};
use std::path::Path;

pub struct DocumentStore {
    _keyspace: Keyspace,
    pub(crate) products: PartitionHandle,
    pub(crate) carts: PartitionHandle,
    pub(crate) orders: PartitionHandle,
}

impl DocumentStore {
    pub fn open(path: &Path) -> Result<Self> {
        std::fs::create_dir_all(path)
            .with_context(|| format!("Failed to create data directory: {}", path.display()))?;

        let keyspace = fjall::Config::new(path)
            .open()
            .with_context(|| format!("Failed to open document store at {}", path.display()))?;

        let products =
            keyspace.open_partition("products", PartitionCreateOptions::default())?;
        let carts = keyspace.open_partition("carts", PartitionCreateOptions::default())?;
        let orders = keyspace.open_partition("orders", PartitionCreateOptions::default())?;

        Ok(DocumentStore {
            _keyspace: keyspace,
            products,
            carts,
            orders,
        })
    }
}
