//! CLI infrastructure for the noughts toolkit
//!
//! This module provides the command-line interface for training tabular
//! agents, evaluating learned policies, and querying the exact solver.

pub mod commands;
