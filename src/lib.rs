#![doc(test(attr(deny(warnings))))]

//! Zepto Core projects recurring income and expenses into upcoming and due transactions
//! for the Zepto personal-finance tracker.

pub mod config;
pub mod errors;
pub mod schedule;
pub mod time;
pub mod utils;

use std::sync::Once;

static INIT_TRACING: Once = Once::new();

/// Initializes global tracing and emits a startup info log.
pub fn init() {
    INIT_TRACING.call_once(|| {
        utils::init_tracing();
        tracing::info!("Zepto Core tracing initialized.");
    });
}
