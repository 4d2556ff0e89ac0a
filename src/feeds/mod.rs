//! RSS/Atom feed discovery.
//!
//! An independent pipeline from article capture, driven by the `feedscan`
//! binary:
//!
//! 1. **Scanning** ([`scanner`]): depth-bounded breadth traversal of
//!    outbound links from a seed page, with visited-set termination
//! 2. **Probing** ([`finder`]): per-page detection of syndication feeds by
//!    markup, never by brute-force path guessing
//!
//! Discovered feeds are written to the store one batch per scanned page.

pub mod finder;
pub mod scanner;
