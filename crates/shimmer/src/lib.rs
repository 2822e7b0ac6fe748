//! shimmer: signal/slot event dispatch and an immediate-mode UI host.
//!
//! A [`Signal`] keeps an ordered list of callables and invokes them on
//! [`Signal::emit`]. Handlers can be free functions, methods bound to shared
//! objects, or other signals. [`VetoSignal`] turns the list into a veto chain
//! that stops at the first handler returning `false`.
//!
//! # Quick Start
//!
//! ```
//! use std::cell::RefCell;
//! use std::rc::Rc;
//! use shimmer::*;
//!
//! struct Hud {
//!     visible: bool,
//! }
//!
//! impl Hud {
//!     fn toggle(&mut self, (): ()) {
//!         self.visible = !self.visible;
//!     }
//! }
//!
//! let hud = Rc::new(RefCell::new(Hud { visible: false }));
//! let mut on_toggle: Signal<()> = Signal::new();
//! on_toggle.connect_method(&hud, Hud::toggle);
//! on_toggle.emit(());
//! assert!(hud.borrow().visible);
//!
//! on_toggle.disconnect(SlotId::method(&hud, Hud::toggle));
//! assert!(on_toggle.is_empty());
//! ```
//!
//! # UI host
//!
//! [`ImUiContext`] plugs an immediate-mode [`Toolkit`] into an engine. The
//! engine emits [`EngineEvents`]; the context translates input, lets UI code
//! declare widgets from its `render_requested` signal and forwards the
//! resulting geometry to a [`Graphics`] sink. See [`attach_host`].

mod init;

pub use init::{attach_host, init};

// Re-export core types
pub use shimmer_core::{
    error::{Result, ShimmerError},
    options::Options,
    signal::{Broadcast, Emission, Signal, Slot, SlotId, Veto, VetoSignal},
    IVec2, Mat4, UVec2, Vec2, Vec4,
};

// Re-export the UI host
pub use shimmer_ui::{
    BeginFrame, DrawCmd, DrawData, DrawList, DrawRange, DrawVert, EngineEvents, FontAtlas,
    FrameInfo, Graphics, ImUiContext, InputState, IntRect, KeyEvent, MouseButton, PixelShader,
    Qualifier, Qualifiers, Renderer, Scancode, ScreenMode, TextInput, TextureId, Toolkit, UiIo,
    UiRenderState, VertexShader,
};
