//! Full-screen terminal interface

mod app;
mod rendering;

pub use app::{App, Message, MessageStyle, Popup, run_tui};
