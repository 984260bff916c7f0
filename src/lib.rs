//! Attendance verification, payroll and performance engine
//!
//! This crate classifies check-in/check-out events against trusted networks
//! and approved devices, pairs attendance events into work sessions, computes
//! period payroll with per-session overtime, scores attendance performance
//! and extrapolates next month's leave usage.
//!
//! Every calculation is a pure function over already-fetched rows. Day
//! boundaries are UTC calendar days throughout.

#![warn(missing_docs)]

pub mod api;
pub mod calculation;
pub mod config;
pub mod error;
pub mod models;
