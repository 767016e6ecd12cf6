// SPDX-FileCopyrightText: 2024 Softbear, Inc.
// SPDX-License-Identifier: LGPL-3.0-or-later

#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
/// The public half of an AliDNS access key. Credentials are cached under it.
pub struct AccessKeyId(pub String);
crate::impl_wrapper_str!(AccessKeyId);
crate::serde_transparent_tuple!(AccessKeyId);

#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
/// AliDNS internal id of a domain (zone).
pub struct DomainId(pub String);
crate::impl_wrapper_str!(DomainId);
crate::serde_transparent_tuple!(DomainId);

#[derive(Clone, Debug, Default, Eq, Hash, PartialEq)]
/// AliDNS internal id of a record.
pub struct RecordId(pub String);
crate::impl_wrapper_str!(RecordId);
crate::serde_transparent_tuple!(RecordId);
