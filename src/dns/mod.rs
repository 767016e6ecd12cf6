// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

/// Support for the AliDNS RPC API.
mod alidns;
/// Provider API trait and types.
mod api;
/// In-memory provider and zone finder for tests.
#[cfg(test)]
pub(crate) mod fake_alidns;
/// Record names relative to a zone.
mod record_name;
/// Request signing.
mod signature;
/// Authoritative zone discovery.
mod zone;

pub use self::alidns::{AliDnsClient, AliDnsClientFactory};
pub use self::api::{AliDnsApi, DnsRecord, Domain, DomainPage, RecordType};
pub use self::record_name::{extract_record_name, un_fqdn};
#[cfg(feature = "resolver")]
pub use self::zone::HickoryZoneFinder;
pub use self::zone::{get_hosted_zone, DomainPages, ZoneFinder};
