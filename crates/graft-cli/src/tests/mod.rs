//! Unit tests for the CLI runtime and patch sessions.

mod support;
