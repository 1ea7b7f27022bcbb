//! services/dashboard/src/lib.rs
//!
//! The LegalVision dashboard service: demo sign-in over a single-slot session
//! store, and the simulated document analyzer served over a WebSocket.

pub mod adapters;
pub mod config;
pub mod error;
pub mod web;
