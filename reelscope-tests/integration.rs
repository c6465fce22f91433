//! Integration tests for Reelscope
//!
//! Drive the real HTTP client and movie store against a local server that
//! speaks the OMDb wire format.

#[path = "integration/support.rs"]
mod support;

#[path = "integration/browse_flow.rs"]
mod browse_flow;
#[path = "integration/detail_lookup.rs"]
mod detail_lookup;
#[path = "integration/transport_failures.rs"]
mod transport_failures;
