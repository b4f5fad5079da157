//! Layered tile-grid editor: session state, command scripts, config and text rendering.
#![forbid(unsafe_code)]

pub mod config;
pub mod render;
pub mod script;
pub mod session;
mod session_tests;

pub use config::EditorConfig;
pub use render::{RenderOptions, Viewport, render_layer};
pub use script::{ScriptError, parse_script};
pub use session::{Command, EditorSession, Outcome, SessionError};
