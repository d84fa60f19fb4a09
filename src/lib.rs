//! tuxdex core: the data and state layer behind the catalog and compare views.
//!
//! - **`storage`** / **`cache`**: key-value storage backends and the TTL dataset
//!   cache plus the stored compare selection on top of them.
//! - **`data`** / **`loader`**: distribution records, the bundled snapshot and
//!   the network → cache → bundled resolution with provenance.
//! - **`query`**: fuzzy search, category filters, sort orders and badges.
//! - **`compare`**: the bounded compare selection and its `ids` query form.
//! - **`controller`**: catalog and compare page state, emitting view events.
//!
//! The `tuxdex` binary is a terminal front end over these modules.

pub mod cache;
pub mod cli;
pub mod compare;
pub mod config;
pub mod controller;
pub mod data;
pub mod loader;
pub mod logger;
pub mod logo;
pub mod query;
pub mod storage;
