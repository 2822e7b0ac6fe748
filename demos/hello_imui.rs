//! Headless walkthrough of the UI host.
//!
//! A tiny stand-in toolkit lays widgets out as colored quads, UI code
//! declares a window from the host's render signal, and a graphics sink logs
//! every call it receives. Run with `RUST_LOG=debug` to see the traffic.

use std::cell::RefCell;
use std::rc::Rc;

use shimmer::*;

/// Widgets declared during the current frame.
#[derive(Default)]
struct Layout {
    rows: Vec<String>,
    debug_menu: bool,
}

impl Layout {
    fn text(&mut self, label: &str) {
        self.rows.push(label.to_string());
    }

    fn button(&mut self, label: &str) {
        self.rows.push(format!("[{label}]"));
    }
}

/// Turns each declared row into one quad.
struct QuadToolkit {
    layout: Rc<RefCell<Layout>>,
    font: Option<TextureId>,
}

impl Toolkit for QuadToolkit {
    fn font_atlas(&mut self) -> Result<FontAtlas> {
        FontAtlas::new(16, 16, vec![0xFF; 16 * 16 * 4])
    }

    fn set_font_texture(&mut self, texture: Option<TextureId>) {
        self.font = texture;
    }

    fn new_frame(&mut self, io: &mut UiIo) {
        let typed = io.take_input_characters();
        if !typed.is_empty() {
            log::info!("typed: {typed}");
        }
        self.layout.borrow_mut().rows.clear();
    }

    fn render(&mut self) -> DrawData {
        let layout = self.layout.borrow();
        let mut list = DrawList::default();
        for (row, label) in layout.rows.iter().enumerate() {
            let top = 20.0 * row as f32;
            let base = list.vertices.len() as u16;
            for (x, y) in [(0.0, top), (200.0, top), (200.0, top + 18.0), (0.0, top + 18.0)] {
                list.vertices.push(DrawVert {
                    pos: [x, y],
                    uv: [0.0, 0.0],
                    col: 0xFFFF_FFFF,
                });
            }
            list.indices
                .extend([base, base + 1, base + 2, base, base + 2, base + 3]);
            list.commands
                .push(DrawCmd::new(6, [0.0, top, 200.0, top + 18.0], self.font));
            log::debug!("row {row}: {label}");
        }
        if layout.debug_menu {
            list.commands.push(DrawCmd::with_callback(|list, _| {
                log::info!("debug overlay over {} vertices", list.vertices.len());
            }));
        }
        DrawData { lists: vec![list] }
    }

    fn show_debug_menu_bar(&mut self, enabled: bool) {
        self.layout.borrow_mut().debug_menu = enabled;
    }

    fn shutdown(&mut self) {
        log::info!("toolkit shut down");
    }
}

/// Application UI, declared once per frame.
struct HelloUi {
    layout: Rc<RefCell<Layout>>,
    builds: u32,
}

impl HelloUi {
    fn build(&mut self, frame: FrameInfo) {
        let mut layout = self.layout.borrow_mut();
        layout.text("Hello world!");
        layout.button("test");
        layout.text(&format!("frame {} ({:.1} ms)", frame.frame, frame.time_step * 1000.0));
        self.builds += 1;
    }
}

/// Graphics sink that only logs.
#[derive(Default)]
struct LoggingGraphics {
    next_texture: u64,
}

impl Graphics for LoggingGraphics {
    fn is_initialized(&self) -> bool {
        true
    }

    fn is_device_lost(&self) -> bool {
        false
    }

    fn size(&self) -> UVec2 {
        UVec2::new(1280, 720)
    }

    fn create_texture(&mut self, atlas: &FontAtlas) -> Result<TextureId> {
        self.next_texture += 1;
        log::info!(
            "texture {} created ({}x{})",
            self.next_texture,
            atlas.width,
            atlas.height
        );
        Ok(TextureId(self.next_texture))
    }

    fn release_texture(&mut self, texture: TextureId) {
        log::info!("texture {} released", texture.0);
    }

    fn is_alpha_texture(&self, _texture: TextureId) -> bool {
        false
    }

    fn set_render_state(&mut self, state: &UiRenderState) {
        log::trace!("render state {state:?}");
    }

    fn resize_buffers(&mut self, vertices: usize, indices: usize) {
        log::debug!("buffers resized to {vertices} vertices, {indices} indices");
    }

    fn upload(&mut self, vertices: &[u8], indices: &[u8]) {
        log::trace!("uploaded {} + {} bytes", vertices.len(), indices.len());
    }

    fn set_shaders(&mut self, vertex: VertexShader, pixel: PixelShader) {
        log::trace!("shaders {vertex:?}/{pixel:?}");
    }

    fn set_view_proj(&mut self, _view_proj: Mat4) {}

    fn set_scissor(&mut self, rect: IntRect) {
        log::trace!("scissor {rect:?}");
    }

    fn set_texture(&mut self, _texture: Option<TextureId>) {}

    fn draw(&mut self, range: DrawRange) {
        log::debug!("draw {range:?}");
    }
}

struct IdleInput;

impl InputState for IdleInput {
    fn is_mouse_visible(&self) -> bool {
        true
    }

    fn mouse_position(&self) -> IVec2 {
        IVec2::new(640, 360)
    }

    fn qualifier_down(&self, _qualifier: Qualifier) -> bool {
        false
    }

    fn mouse_button_down(&self, _button: MouseButton) -> bool {
        false
    }

    fn mouse_wheel(&self) -> i32 {
        0
    }
}

fn main() -> Result<()> {
    init();

    let options = match std::env::args().nth(1) {
        Some(path) => Options::load(path)?,
        None => Options::default(),
    };

    let layout = Rc::new(RefCell::new(Layout::default()));
    let graphics: Rc<RefCell<dyn Graphics>> = Rc::new(RefCell::new(LoggingGraphics::default()));
    let mut events = EngineEvents::new();

    let host = attach_host(
        Box::new(QuadToolkit {
            layout: Rc::clone(&layout),
            font: None,
        }),
        graphics,
        Rc::new(IdleInput),
        options,
        &mut events,
    )?;

    let ui = Rc::new(RefCell::new(HelloUi {
        layout: Rc::clone(&layout),
        builds: 0,
    }));
    {
        let mut host = host.borrow_mut();
        host.render_requested.connect_method(&ui, HelloUi::build);
        host.set_debug_menu(true);
    }

    events.screen_mode.emit(ScreenMode {
        width: 1280,
        height: 720,
    });
    events.text_input.emit(TextInput {
        text: "hi".to_string(),
    });
    for _ in 0..3 {
        events.begin_frame.emit(BeginFrame {
            time_step: 1.0 / 60.0,
        });
        events.end_rendering.emit(());
    }

    log::info!(
        "built the ui {} times over {} frames",
        ui.borrow().builds,
        host.borrow().frame_count()
    );

    ImUiContext::detach(&host, &mut events);
    host.borrow_mut().shutdown();
    Ok(())
}
