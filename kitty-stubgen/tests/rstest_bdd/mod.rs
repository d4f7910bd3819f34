//! `rstest-bdd` behavioural tests for `kitty-stubgen`.
//!
//! Fixtures, step implementations, and the scenario bindings live in the
//! sibling modules.

mod fixtures;
mod scenarios;
mod steps;
