// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

#![warn(missing_docs)]
//! A DNS-01 challenge solver that publishes ACME validation records as TXT
//! records in AliDNS. The host controller drives it through the `Solver`
//! trait; credentials come from the per-issuer configuration, either inline
//! or from a Kubernetes secret.

/// Challenges sent by the host and their per-issuer configuration.
pub mod challenge;
pub use challenge::*;

/// Types common to multiple modules.
pub mod common;
pub use common::*;

/// Access key resolution and the per-key client cache.
pub mod credentials;
pub use credentials::*;

/// A wrapper which provides access to AliDNS and authoritative zone lookup.
pub mod dns;
pub use dns::*;

/// Thread-safe logging.
pub mod log;
pub use log::*;

/// Macros used with `serde` serialization and deserialization.
pub mod serde_utils;

/// The solver.
pub mod solver;
pub use solver::*;
