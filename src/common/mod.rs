// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

mod config;
/// An enum that encapsulates a variety of error types.
mod error;
/// Identifiers shared by the provider client and the solver.
mod ids;

pub use self::config::{AliDnsSettings, SolverSettings, SolverSettingsBuilder};
pub use self::error::Error;
pub use self::ids::{AccessKeyId, DomainId, RecordId};
