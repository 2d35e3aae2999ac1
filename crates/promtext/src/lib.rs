//! Top-level facade crate for promtext.
//!
//! Re-exports the core model and the HTTP adapter so users can depend on a
//! single crate.

pub mod core {
    pub use promtext_core::*;
}

pub mod http {
    pub use promtext_http::*;
}
