//! Plays composed frames onto a drawing surface

use std::collections::HashSet;

use super::surface::{DrawSurface, RenderError};
use super::{DrawCommand, Frame};
use crate::sim::Rect;

/// Executes frames and keeps the "warn once" bookkeeping.
///
/// Missing resources and surface failures are logged the first time they
/// happen and silently skipped after that.
#[derive(Debug, Default)]
pub struct Presenter {
    warned: HashSet<String>,
}

impl Presenter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Draw `frame` onto `surface`, skipping anything that fails
    pub fn present(&mut self, frame: &Frame, surface: &mut dyn DrawSurface) {
        for (kind, name) in &frame.missing {
            self.warn_once(format!("{kind}:{name}"), || format!("{kind} not found: {name}"));
        }

        for command in &frame.commands {
            if let Err(err) = execute(command, surface) {
                self.warn_once(format!("error:{}", err.kind()), || format!("Render error: {err}"));
            }
        }
    }

    /// Distinct problems reported so far
    pub fn warning_count(&self) -> usize {
        self.warned.len()
    }

    fn warn_once(&mut self, key: String, message: impl FnOnce() -> String) {
        if self.warned.insert(key) {
            log::warn!("{}", message());
        }
    }
}

fn execute(command: &DrawCommand, surface: &mut dyn DrawSurface) -> Result<(), RenderError> {
    match command {
        DrawCommand::Clear => surface.clear(),
        DrawCommand::Blit { texture, dest } => surface.blit(*texture, *dest),
        DrawCommand::BlitRotated { texture, dest, angle } => surface.blit_rotated(*texture, *dest, *angle),
        DrawCommand::Text {
            font,
            text,
            color,
            x,
            y,
        } => {
            let rendered = surface.render_text(*font, text, *color)?;
            let dest = Rect::new(*x, *y, rendered.width, rendered.height);
            let result = surface.blit(rendered.texture, Some(dest));
            surface.release_text(rendered);
            result
        }
        DrawCommand::Present => surface.present(),
    }
}
