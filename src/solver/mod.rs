// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

/// DNS-01 solver backed by AliDNS.
mod alidns_solver;
/// The contract between the host and a solver.
mod contract;

pub use self::alidns_solver::AliDnsSolver;
pub use self::contract::{ClusterAccess, Solver};
