//! Test suites for graft-syntax.

mod behaviour;
