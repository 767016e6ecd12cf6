// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

/// Per-request solver configuration.
mod config;
/// The challenge sent by the host.
mod request;

pub use self::config::{ProviderConfig, SecretKeySelector};
pub use self::request::ChallengeRequest;
