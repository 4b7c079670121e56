//! # Pricer Models (L2: Business Logic)
//!
//! Vanilla option vocabulary and closed-form reference prices.
//!
//! This crate provides:
//! - Option kind and exercise style definitions ([`instruments`])
//! - Black-Scholes-Merton European prices with dividend yield ([`analytical`])
//!
//! The binomial lattice engine lives one layer up in `pricer_pricing`.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod analytical;
pub mod instruments;
