// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

use hyper::StatusCode;
use std::fmt::{Display, Formatter};

#[derive(Debug)]
/// An enum that encapsulates the ways a challenge can fail.
///
/// # Example
///
/// Error::Provider(StatusCode::FAILED_DEPENDENCY, format!("AddDomainRecord: {message}"))
pub enum Error {
    /// The per-request solver configuration is not valid JSON for `ProviderConfig`.
    ConfigDecode(serde_json::Error),
    /// The access key secret could not be resolved (inline or from the secret store).
    CredentialResolution(String),
    /// The provider API (or the network on the way to it) failed.
    Provider(StatusCode, String),
    /// The authoritative zone of a name could not be determined.
    Resolve(String),
    /// String error.
    String(String),
    /// No domain managed by the provider matches the authoritative zone.
    ZoneNotFound {
        /// Authoritative zone, as found by the SOA walk.
        auth_zone: String,
        /// The validation zone named by the challenge.
        zone: String,
    },
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> Result<(), std::fmt::Error> {
        match self {
            Error::ConfigDecode(e) => Display::fmt(&format!("error decoding solver config: {e}"), f),
            Error::CredentialResolution(s) => Display::fmt(&format!("credentials: {s}"), f),
            Error::Provider(status_code, mesg) => {
                Display::fmt(&format!("alidns: {status_code}: {mesg}"), f)
            }
            Error::Resolve(s) => Display::fmt(&format!("resolve: {s}"), f),
            Error::String(s) => Display::fmt(&s, f),
            Error::ZoneNotFound { auth_zone, zone } => Display::fmt(
                &format!("zone {auth_zone} not found in AliDNS for domain {zone}"),
                f,
            ),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Error::ConfigDecode(e) => Some(e),
            _ => None,
        }
    }
}
