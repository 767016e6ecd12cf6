// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: AGPL-3.0-or-later

/// Cache of provider clients by access key.
mod cache;
/// In-memory secret store and client factory for tests.
#[cfg(test)]
pub(crate) mod fake_secrets;
/// Secret lookup.
mod secret_store;

pub use self::cache::{resolve_access_key_secret, ClientFactory, CredentialCache};
#[cfg(feature = "k8s")]
pub use self::secret_store::KubeSecretStore;
pub use self::secret_store::SecretStore;
