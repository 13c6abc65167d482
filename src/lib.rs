//! Sensor datapoint configuration and value processing
//!
//! - [`datasource`]: the acquisition variants (web, TTN v3, MQTT) and their
//!   tolerant column decoding
//! - [`processing`]: scaling laws and the per-reading transform
//! - [`datapoint`]: the validated datapoint descriptor tying both together
//! - [`interfaces`]: messages for the publishing transport

pub mod columns;
pub mod constants;
pub mod datapoint;
pub mod datasource;
pub mod helpers;
pub mod interfaces;
pub mod lenient;
pub mod processing;
