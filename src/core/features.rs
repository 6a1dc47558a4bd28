//! Form features
//!
//! The translator form is the only feature; it owns the state and
//! orchestrates the catalog, speech, clipboard and notification modules.

pub mod translator;
