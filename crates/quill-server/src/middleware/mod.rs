// SPDX-License-Identifier: Apache-2.0

pub(crate) mod auth;
pub(crate) mod request_log;
