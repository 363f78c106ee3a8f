//! Service integrations for external APIs and clients.
//!
//! The issue-labeler talks to exactly one external service, the issue tracker.
//! The tracker module defines both the generic trait and the GitHub
//! implementation, allowing for extensibility and easy testing.

pub mod tracker;
