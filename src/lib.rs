//! Sends per-cell webcam statistics (RGB averages, brightness, contrast,
//! dominant color) as OSC bundles over UDP.

use std::sync::atomic::{AtomicBool, Ordering};

pub mod cell;
pub mod config;
pub mod error;
pub mod general;
pub mod remote;

pub use cell::{CellData, CellValue};
pub use config::{AppConfig, OscConfig};
pub use error::{Error, Result};
pub use remote::osc_sender::{GridOscPublisher, Transport, UdpTransport};

// Global debug flag (off by default, toggled from config.json or the console)
pub static DEBUG_ENABLED: AtomicBool = AtomicBool::new(false);

pub fn is_debug_enabled() -> bool {
    DEBUG_ENABLED.load(Ordering::SeqCst)
}

pub fn set_debug_enabled(enabled: bool) {
    DEBUG_ENABLED.store(enabled, Ordering::SeqCst);
}
