//! The UI host: glues a [`Toolkit`] to the engine's events and graphics.

use std::cell::{RefCell, RefMut};
use std::rc::Rc;

use glam::Vec2;
use shimmer_core::{Options, Result, ShimmerError, Signal, SlotId, VetoSignal};

use crate::draw::TextureId;
use crate::events::{BeginFrame, EngineEvents, InputState, KeyEvent, ScreenMode, TextInput};
use crate::io::{UiIo, MOUSE_ABSENT};
use crate::keys::{MouseButton, Qualifier};
use crate::render::{Graphics, Renderer};
use crate::toolkit::Toolkit;

/// Per-frame information passed to UI handlers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameInfo {
    /// Frames started since the host was created, starting at 1.
    pub frame: u64,
    pub time_step: f32,
    pub display_size: Vec2,
}

fn borrow_graphics(
    graphics: &RefCell<dyn Graphics>,
) -> Result<RefMut<'_, dyn Graphics + 'static>> {
    graphics
        .try_borrow_mut()
        .map_err(|_| ShimmerError::DeviceUnavailable)
}

/// Hosts an immediate-mode toolkit inside the engine.
///
/// Every context owns its own toolkit, input block and renderer, so several
/// hosts can live side by side. Once [attached](ImUiContext::attach) it
/// translates engine input each frame and submits the toolkit's geometry
/// after scene rendering.
///
/// UI code connects to [`ImUiContext::render_requested`] and declares its
/// widgets there. Those handlers run while the context is borrowed and must
/// reach the toolkit through their own handle.
pub struct ImUiContext {
    toolkit: Box<dyn Toolkit>,
    graphics: Rc<RefCell<dyn Graphics>>,
    input: Rc<dyn InputState>,
    options: Options,
    io: UiIo,
    renderer: Renderer,
    font_texture: Option<TextureId>,
    initialized: bool,
    shut_down: bool,
    attached: bool,
    frame: u64,
    /// Emitted after input has been gathered, before the toolkit frame starts.
    pub frame_started: Signal<FrameInfo>,
    /// Emitted when the UI should be declared for the current frame.
    pub render_requested: Signal<FrameInfo>,
    /// Any handler returning `false` keeps a key event from the toolkit.
    pub key_filter: VetoSignal<KeyEvent>,
}

impl ImUiContext {
    /// Creates a host and initializes it if graphics is already available.
    pub fn new(
        toolkit: Box<dyn Toolkit>,
        graphics: Rc<RefCell<dyn Graphics>>,
        input: Rc<dyn InputState>,
        options: Options,
    ) -> Self {
        let mut context = Self {
            toolkit,
            graphics,
            input,
            io: UiIo::new(options.key_capacity),
            renderer: Renderer::new(&options),
            options,
            font_texture: None,
            initialized: false,
            shut_down: false,
            attached: false,
            frame: 0,
            frame_started: Signal::new(),
            render_requested: Signal::new(),
            key_filter: VetoSignal::new(),
        };
        if let Err(err) = context.initialize() {
            log::error!("failed to initialize ui host: {err}");
        }
        context
    }

    /// Uploads the font atlas and records the screen size.
    ///
    /// Returns `Ok(false)` when graphics is not ready yet; initialization is
    /// then retried on the next screen mode or frame. Calling this on an
    /// initialized host does nothing. A host that was shut down stays down and
    /// always returns `Ok(false)`.
    pub fn initialize(&mut self) -> Result<bool> {
        if self.shut_down {
            log::debug!("ui host already shut down, not initializing");
            return Ok(false);
        }
        if self.initialized {
            return Ok(true);
        }

        let graphics = Rc::clone(&self.graphics);
        let mut graphics = borrow_graphics(&graphics)?;
        if !graphics.is_initialized() {
            log::debug!("graphics not ready, deferring ui host initialization");
            return Ok(false);
        }

        let size = graphics.size();
        self.io.display_size = size.as_vec2();

        let atlas = self.toolkit.font_atlas()?;
        let texture = graphics.create_texture(&atlas)?;
        self.toolkit.set_font_texture(Some(texture));
        self.toolkit.show_debug_menu_bar(self.options.debug_menu);
        self.font_texture = Some(texture);
        self.initialized = true;

        log::info!(
            "ui host initialized ({}x{}, font atlas {}x{})",
            size.x,
            size.y,
            atlas.width,
            atlas.height
        );
        Ok(true)
    }

    /// Connects the host's handlers to `events`.
    ///
    /// The handlers hold the host weakly: dropping the last `Rc` silences
    /// them even without [`ImUiContext::detach`].
    pub fn attach(this: &Rc<RefCell<Self>>, events: &mut EngineEvents) -> Result<()> {
        {
            let mut context = this.borrow_mut();
            if context.attached {
                return Err(ShimmerError::AlreadyAttached);
            }
            context.attached = true;
        }

        let host = Rc::downgrade(this);
        events.screen_mode.connect_tracked(&host, Self::handle_screen_mode);
        events.begin_frame.connect_tracked(&host, Self::handle_begin_frame);
        events
            .end_rendering
            .connect_tracked(&host, Self::handle_end_rendering);
        events.key_down.connect_tracked(&host, Self::handle_key_down);
        events.key_up.connect_tracked(&host, Self::handle_key_up);
        events.text_input.connect_tracked(&host, Self::handle_text_input);
        log::debug!("ui host attached to engine events");
        Ok(())
    }

    /// Disconnects the host's handlers from `events`.
    ///
    /// Returns whether any handler was connected.
    pub fn detach(this: &Rc<RefCell<Self>>, events: &mut EngineEvents) -> bool {
        let removed = [
            events
                .screen_mode
                .disconnect(SlotId::method(this, Self::handle_screen_mode)),
            events
                .begin_frame
                .disconnect(SlotId::method(this, Self::handle_begin_frame)),
            events
                .end_rendering
                .disconnect(SlotId::method(this, Self::handle_end_rendering)),
            events
                .key_down
                .disconnect(SlotId::method(this, Self::handle_key_down)),
            events
                .key_up
                .disconnect(SlotId::method(this, Self::handle_key_up)),
            events
                .text_input
                .disconnect(SlotId::method(this, Self::handle_text_input)),
        ];
        this.borrow_mut().attached = false;

        let any = removed.contains(&true);
        if any {
            log::debug!("ui host detached from engine events");
        }
        any
    }

    /// Initializes on the first screen mode, afterwards tracks the new size.
    pub fn handle_screen_mode(&mut self, mode: ScreenMode) {
        if self.initialized {
            self.io.display_size = Vec2::new(mode.width as f32, mode.height as f32);
            log::debug!("ui display resized to {}x{}", mode.width, mode.height);
        } else if let Err(err) = self.initialize() {
            log::error!("failed to initialize ui host: {err}");
        }
    }

    /// Feeds engine input to the toolkit and starts a toolkit frame.
    pub fn handle_begin_frame(&mut self, event: BeginFrame) {
        match self.initialize() {
            Ok(true) => {}
            Ok(false) => return,
            Err(err) => {
                log::error!("failed to initialize ui host: {err}");
                return;
            }
        }

        if let Ok(graphics) = self.graphics.try_borrow() {
            self.io.display_size = graphics.size().as_vec2();
        }
        self.io.delta_time = if event.time_step > 0.0 {
            event.time_step
        } else {
            self.options.default_time_step
        };

        let input = Rc::clone(&self.input);
        self.io.mouse_pos = if input.is_mouse_visible() || !self.options.mouse_visible_required {
            input.mouse_position().as_vec2()
        } else {
            MOUSE_ABSENT
        };
        self.io.key_ctrl = input.qualifier_down(Qualifier::Ctrl);
        self.io.key_shift = input.qualifier_down(Qualifier::Shift);
        self.io.key_alt = input.qualifier_down(Qualifier::Alt);
        for button in MouseButton::ALL {
            self.io.mouse_down[button as usize] = input.mouse_button_down(button);
        }
        self.io.mouse_wheel = input.mouse_wheel() as f32;

        self.frame += 1;
        let info = self.frame_info();
        self.frame_started.emit(info);
        self.toolkit.new_frame(&mut self.io);
    }

    /// Lets UI code declare its widgets, then draws the toolkit's output.
    pub fn handle_end_rendering(&mut self, (): ()) {
        if !self.initialized {
            return;
        }

        self.render_requested.emit(self.frame_info());
        match self.render_frame() {
            Ok(()) => {}
            Err(ShimmerError::DeviceUnavailable) => {
                log::debug!("graphics device unavailable, ui frame dropped");
            }
            Err(err) => log::error!("failed to render ui: {err}"),
        }
    }

    /// Ends the toolkit frame and submits its draw lists.
    pub fn render_frame(&mut self) -> Result<()> {
        if !self.initialized {
            return Err(ShimmerError::NotInitialized);
        }

        let data = self.toolkit.render();
        let graphics = Rc::clone(&self.graphics);
        let mut graphics = borrow_graphics(&graphics)?;
        self.renderer.render_draw_lists(&data, &mut *graphics)
    }

    pub fn handle_key_down(&mut self, event: KeyEvent) {
        self.handle_key(event, true);
    }

    pub fn handle_key_up(&mut self, event: KeyEvent) {
        self.handle_key(event, false);
    }

    fn handle_key(&mut self, event: KeyEvent, down: bool) {
        if !self.key_filter.emit(event) {
            log::trace!("{} vetoed by key filter", event.scancode);
            return;
        }
        self.io.set_key_down(event.scancode, down);
    }

    pub fn handle_text_input(&mut self, event: TextInput) {
        self.io.add_input_characters(&event.text);
    }

    /// Shows or hides the toolkit's debug menu bar.
    pub fn set_debug_menu(&mut self, enabled: bool) {
        self.options.debug_menu = enabled;
        if !self.shut_down {
            self.toolkit.show_debug_menu_bar(enabled);
        }
    }

    /// Releases the font texture and shuts the toolkit down.
    ///
    /// Also runs on drop. The host never initializes again afterwards, and
    /// later calls do nothing.
    pub fn shutdown(&mut self) {
        if self.shut_down {
            return;
        }
        self.shut_down = true;
        if !self.initialized {
            return;
        }

        if let Some(texture) = self.font_texture.take() {
            match self.graphics.try_borrow_mut() {
                Ok(mut graphics) => graphics.release_texture(texture),
                Err(_) => log::warn!("graphics busy during shutdown, leaking font texture"),
            }
        }
        self.toolkit.set_font_texture(None);
        self.toolkit.shutdown();
        self.initialized = false;
        log::info!("ui host shut down");
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn is_shut_down(&self) -> bool {
        self.shut_down
    }

    pub fn is_attached(&self) -> bool {
        self.attached
    }

    pub fn io(&self) -> &UiIo {
        &self.io
    }

    pub fn io_mut(&mut self) -> &mut UiIo {
        &mut self.io
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    pub fn font_texture(&self) -> Option<TextureId> {
        self.font_texture
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// Number of frames started so far.
    pub fn frame_count(&self) -> u64 {
        self.frame
    }

    fn frame_info(&self) -> FrameInfo {
        FrameInfo {
            frame: self.frame,
            time_step: self.io.delta_time,
            display_size: self.io.display_size,
        }
    }
}

impl Drop for ImUiContext {
    fn drop(&mut self) {
        self.shutdown();
    }
}
