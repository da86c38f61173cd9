//! Courtside core - fixed-tick paddle game against a computer opponent

pub mod debug;
pub mod error;
pub mod game;
pub mod match_state;
pub mod opponent;
pub mod physics;
pub mod session;
pub mod theme;
pub mod types;
pub mod viewport;

// WASM bridge module - only compiled when wasm feature is enabled
#[cfg(feature = "wasm")]
pub mod wasm;

pub use debug::DebugReadout;
pub use error::{Result, SimError};
pub use game::{step, Game, SimulationState};
pub use match_state::MatchState;
pub use session::{AudioSink, NullAudio, NullRenderer, Renderer, Session};
pub use theme::Theme;
pub use types::*;
pub use viewport::{CellRect, Viewport};
