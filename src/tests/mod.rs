// Copyright (c) 2026 Ripple Contributors. Licensed under AGPLv3.
pub mod state_tests;
pub mod envelope_tests;
pub mod snapshot_tests;
