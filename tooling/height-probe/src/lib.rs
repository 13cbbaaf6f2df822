//! Block height stall probe.
//!
//! Each invocation asks a node for `eth_blockNumber`, parses the hex quantity and feeds it
//! to a [`detector::StalenessDetector`] that grades how long the chain has been stuck.

pub mod check;
pub mod collector;
pub mod config;
pub mod detector;
pub mod hex;
pub mod models;
pub mod server;

pub const PLUGIN_NAME: &str = "ethereum-block-height";
