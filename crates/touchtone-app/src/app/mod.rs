//! Application state shared with the renderer

pub mod state;
