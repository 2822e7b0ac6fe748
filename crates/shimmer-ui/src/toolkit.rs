//! The immediate-mode toolkit driven by the host.

use shimmer_core::{Result, ShimmerError};

use crate::draw::{DrawData, TextureId};
use crate::io::UiIo;

/// RGBA32 pixels of the toolkit's font atlas.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FontAtlas {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<u8>,
}

impl FontAtlas {
    /// Creates an atlas, checking that `pixels` holds `width * height` RGBA texels.
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Result<Self> {
        let expected = width as usize * height as usize * 4;
        if pixels.len() != expected {
            return Err(ShimmerError::InvalidFontAtlas {
                expected,
                actual: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
        })
    }
}

/// An immediate-mode UI library.
///
/// The host feeds it input each frame through [`Toolkit::new_frame`] and
/// collects geometry through [`Toolkit::render`]. Widgets are declared by
/// handlers of the host's render signal between those two calls.
pub trait Toolkit {
    /// Builds the font atlas. Called once, during initialization.
    fn font_atlas(&mut self) -> Result<FontAtlas>;

    /// Stores the engine texture holding the font atlas.
    fn set_font_texture(&mut self, texture: Option<TextureId>);

    /// Starts a frame with the given input.
    ///
    /// Implementations consume queued text with [`UiIo::take_input_characters`].
    fn new_frame(&mut self, io: &mut UiIo);

    /// Finishes the frame and returns its draw lists.
    fn render(&mut self) -> DrawData;

    /// Toggles the toolkit's built-in debug menu bar.
    fn show_debug_menu_bar(&mut self, enabled: bool);

    /// Releases toolkit-side resources.
    fn shutdown(&mut self);
}
