//! Rule core for multi-step legal case workflows.
//!
//! Three pieces drive the case-progress surface: static requirement catalogs
//! describing which supporting documents each case type needs, a resolver
//! that selects and composes catalogs from a case's type attributes, and a
//! completion matcher that scans loosely-typed case records for uploaded
//! documents. A fourth piece, the step-assignment service, records the
//! responsible person and due date per workflow step and emits a
//! notification when the responsible changes.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
