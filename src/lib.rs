//! Eligibility Planner - Adaptive benefit eligibility interviews
//!
//! This crate evaluates AND/OR requirement trees over interview answers and
//! plans which question to ask next, either greedily or by compiling the
//! catalog into a decision tree.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
