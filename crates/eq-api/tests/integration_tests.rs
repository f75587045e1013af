//! Integration tests for the Equilibrar site server.
//!
//! The content API and the pages are exercised through the full router.
//! Hydration tests also run a real server on an ephemeral port.

mod integration;
