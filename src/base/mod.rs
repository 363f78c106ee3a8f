//! Core components, types, and utilities for the issue-labeler.
//!
//! This module contains fundamental building blocks used throughout the application:
//! - Configuration handling and environment variables.
//! - The explicit event context for a run.
//! - Common types and result handling.
//! - Workflow-command output for recorded failures.

pub mod config;
pub mod context;
pub mod types;
pub mod workflow;
