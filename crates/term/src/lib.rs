//! Terminal rendering for the arcade.
//!
//! A small, game-oriented rendering layer: views draw into a plain framebuffer,
//! and the renderer flushes only the glyphs that changed since the last frame.
//! No widget toolkit, so cell aspect ratio (2 columns per grid cell) stays under
//! our control.
//!
//! - [`fb`]: styled glyph framebuffer
//! - [`view`]: HUD and minigame frame layout (pure, testable)
//! - [`renderer`]: crossterm diff renderer
//! - [`throttle`]: redraw pacing while the screen is static

pub mod fb;
pub mod renderer;
pub mod throttle;
pub mod view;

pub use puzzle_arcade_core as core;
pub use puzzle_arcade_types as types;

pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
pub use throttle::{fingerprint, RenderThrottle};
pub use view::{ArcadeView, Hud, Viewport};
