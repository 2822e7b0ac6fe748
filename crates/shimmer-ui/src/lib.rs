//! Immediate-mode UI host for shimmer.
//!
//! This crate connects an external immediate-mode toolkit to an engine:
//! - [`ImUiContext`] subscribes to [`EngineEvents`] and drives the frame lifecycle
//! - [`UiIo`] carries translated keyboard, mouse and text input
//! - [`Renderer`] forwards toolkit draw lists to a [`Graphics`] sink

// Graphics code intentionally uses casts for indices, sizes, and coordinates
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_truncation)]
// Documentation lints - internal functions don't need exhaustive panic/error docs
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::must_use_candidate)]
// Signal handlers receive their payloads by value
#![allow(clippy::needless_pass_by_value)]

pub mod context;
pub mod draw;
pub mod events;
pub mod io;
pub mod keys;
pub mod render;
pub mod toolkit;

pub use context::{FrameInfo, ImUiContext};
pub use draw::{
    buffer_capacity, projection, DrawCallback, DrawCmd, DrawData, DrawIdx, DrawList, DrawVert,
    IntRect, TextureId,
};
pub use events::{
    BeginFrame, EngineEvents, InputState, KeyEvent, Qualifiers, ScreenMode, TextInput,
};
pub use io::{UiIo, MOUSE_ABSENT};
pub use keys::{KeyMap, MouseButton, NavKey, Qualifier, Scancode};
pub use render::{
    select_shaders, BlendMode, CompareMode, CullMode, DrawRange, FillMode, Graphics, PixelShader,
    Renderer, UiRenderState, VertexShader,
};
pub use toolkit::{FontAtlas, Toolkit};
