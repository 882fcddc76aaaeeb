//! # Shop Graph
//!
//! Neo4j integration for the purchase graph.
//!
//! Records `(:Customer)-[:PLACED]->(:Order)-[:CONTAINS]->(:Product)` paths
//! with `MERGE`, so repeated submissions never duplicate nodes or edges.

pub mod client;
pub mod purchases;
pub mod schema;
mod store;

pub use client::{GraphClient, GraphConfig};
pub use schema::initialize_schema;
