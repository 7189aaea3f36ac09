//! Core functionality for the mint gateway
//!
//! This module contains the batch runner, the chain client seam, and the
//! event streaming protocol.

pub mod batch;
pub mod chain;
pub mod events;
