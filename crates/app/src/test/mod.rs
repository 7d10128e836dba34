//! Shared test fixtures for view tests.

mod helpers;

pub(crate) use helpers::*;
