//! Database backend integrations.
//!
//! Fragment generation is backend independent; the modules here bind the
//! generated parameters and run the one-time store setup.

#[cfg(feature = "postgres")]
pub mod postgres;
