// Aggregator for the property tests.
// Usage: cargo test --test all
#![cfg(test)]
#[path = "prop_tests/mod.rs"]
mod prop_tests;
