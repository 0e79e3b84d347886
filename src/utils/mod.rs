//! Crate-internal helpers that are not cryptographic algorithms themselves.

pub(crate) mod ct;
