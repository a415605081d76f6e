//! Test suites for graft-manifest.
