//! Test utilities for handler tests.
