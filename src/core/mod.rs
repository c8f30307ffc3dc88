//! Core logic layer
//!
//! The theme selector state machine and the app state that routes input to it.
//! NO imports from frontend/ or rendering code.
//! Core updates the page document, frontends read and render it.

pub mod app_core;
pub mod input_result;
pub mod menu_actions;
pub mod theme_selector;

pub use app_core::AppCore;
