//! Integration suite, compiled as a single binary so the whole crate is
//! exercised through its public surface.

mod helpers;
mod integration;
mod unit;
