//! Drawing surface contract
//!
//! The window/GPU backend implements `DrawSurface`. `RecordingSurface` keeps
//! the calls in memory instead of drawing them.

use thiserror::Error;

use crate::assets::{FontId, TextureId};
use crate::sim::Rect;

/// RGBA, 0-255 per channel
pub type Color = [u8; 4];

pub const WHITE: Color = [255, 255, 255, 255];

/// Non-fatal drawing failure; the frame continues without that call
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RenderError {
    #[error("text rendering failed: {0}")]
    Text(String),
    #[error("blit failed: {0}")]
    Blit(String),
    #[error("present failed: {0}")]
    Present(String),
}

impl RenderError {
    /// Short category used to log each kind of failure once
    pub fn kind(&self) -> &'static str {
        match self {
            RenderError::Text(_) => "text",
            RenderError::Blit(_) => "blit",
            RenderError::Present(_) => "present",
        }
    }
}

/// A texture produced from text for the current frame only
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TextTexture {
    pub texture: TextureId,
    pub width: i32,
    pub height: i32,
}

pub trait DrawSurface {
    fn clear(&mut self) -> Result<(), RenderError>;
    /// Copy a whole texture into `dest`, or the full screen when `None`
    fn blit(&mut self, texture: TextureId, dest: Option<Rect>) -> Result<(), RenderError>;
    /// Like `blit`, rotated clockwise by `angle` degrees about the rect center
    fn blit_rotated(&mut self, texture: TextureId, dest: Rect, angle: f32) -> Result<(), RenderError>;
    fn render_text(&mut self, font: FontId, text: &str, color: Color) -> Result<TextTexture, RenderError>;
    fn release_text(&mut self, text: TextTexture);
    fn present(&mut self) -> Result<(), RenderError>;
}

/// One recorded surface call
#[derive(Debug, Clone, PartialEq)]
pub enum SurfaceCall {
    Clear,
    Blit { texture: TextureId, dest: Option<Rect> },
    BlitRotated { texture: TextureId, dest: Rect, angle: f32 },
    RenderText { font: FontId, text: String, color: Color },
    ReleaseText(TextureId),
    Present,
}

/// Surface that records calls instead of drawing.
///
/// Text is "rasterized" at a fixed glyph size so layout is predictable.
#[derive(Debug)]
pub struct RecordingSurface {
    /// Calls since the last present
    pub pending: Vec<SurfaceCall>,
    /// Calls of the last presented frame
    pub last_frame: Vec<SurfaceCall>,
    pub frames_presented: u64,
    pub glyph_size: (i32, i32),
    /// Make every `render_text` fail
    pub fail_text: bool,
    next_text_id: u32,
}

/// Text textures get ids far away from loaded assets
const TEXT_ID_BASE: u32 = 1 << 24;

impl Default for RecordingSurface {
    fn default() -> Self {
        Self {
            pending: Vec::new(),
            last_frame: Vec::new(),
            frames_presented: 0,
            glyph_size: (15, 30),
            fail_text: false,
            next_text_id: TEXT_ID_BASE,
        }
    }
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Surface whose text rendering always fails
    pub fn failing_text() -> Self {
        Self {
            fail_text: true,
            ..Self::default()
        }
    }
}

impl DrawSurface for RecordingSurface {
    fn clear(&mut self) -> Result<(), RenderError> {
        self.pending.push(SurfaceCall::Clear);
        Ok(())
    }

    fn blit(&mut self, texture: TextureId, dest: Option<Rect>) -> Result<(), RenderError> {
        self.pending.push(SurfaceCall::Blit { texture, dest });
        Ok(())
    }

    fn blit_rotated(&mut self, texture: TextureId, dest: Rect, angle: f32) -> Result<(), RenderError> {
        self.pending.push(SurfaceCall::BlitRotated { texture, dest, angle });
        Ok(())
    }

    fn render_text(&mut self, font: FontId, text: &str, color: Color) -> Result<TextTexture, RenderError> {
        if self.fail_text {
            return Err(RenderError::Text(format!("cannot render '{text}'")));
        }
        self.pending.push(SurfaceCall::RenderText {
            font,
            text: text.to_string(),
            color,
        });
        // Ids are recycled every frame
        self.next_text_id += 1;
        Ok(TextTexture {
            texture: TextureId(self.next_text_id),
            width: self.glyph_size.0 * text.chars().count() as i32,
            height: self.glyph_size.1,
        })
    }

    fn release_text(&mut self, text: TextTexture) {
        self.pending.push(SurfaceCall::ReleaseText(text.texture));
    }

    fn present(&mut self) -> Result<(), RenderError> {
        self.pending.push(SurfaceCall::Present);
        self.last_frame = std::mem::take(&mut self.pending);
        self.frames_presented += 1;
        self.next_text_id = TEXT_ID_BASE;
        Ok(())
    }
}
