//! Shared test harness modules for the `neowatch` CLI.

use super::*;

mod helpers;
mod inspect_steps;
