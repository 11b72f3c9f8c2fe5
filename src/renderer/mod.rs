//! Frame presenter
//!
//! `compose` turns the world into an ordered list of draw commands without
//! touching any backend; `Presenter` plays that list onto a `DrawSurface`.
//! Missing resources drop the affected command and are reported, never fatal.

pub mod presenter;
pub mod surface;

pub use presenter::Presenter;
pub use surface::{Color, DrawSurface, RecordingSurface, RenderError, SurfaceCall, TextTexture, WHITE};

use crate::assets::{AssetKind, FontId, ResourceProvider, TextureId, obstacle_texture};
use crate::consts::{SCORE_TEXT_X, SCORE_TEXT_Y};
use crate::sim::{GamePhase, Rect, World};

/// One drawing step
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    Clear,
    /// Whole texture into `dest` (`None` = full screen)
    Blit { texture: TextureId, dest: Option<Rect> },
    BlitRotated { texture: TextureId, dest: Rect, angle: f32 },
    /// Rasterize `text` and blit it at its natural size with top-left (x, y)
    Text {
        font: FontId,
        text: String,
        color: Color,
        x: i32,
        y: i32,
    },
    Present,
}

/// A composed frame plus anything that could not be resolved
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Frame {
    pub commands: Vec<DrawCommand>,
    /// Resource names that were missing, in draw order
    pub missing: Vec<(AssetKind, String)>,
}

impl Frame {
    fn texture(&mut self, resources: &dyn ResourceProvider, name: &str) -> Option<TextureId> {
        let id = resources.texture(name);
        if id.is_none() {
            self.missing.push((AssetKind::Texture, name.to_string()));
        }
        id
    }

    fn blit(&mut self, resources: &dyn ResourceProvider, name: &str, dest: Option<Rect>) {
        if let Some(texture) = self.texture(resources, name) {
            self.commands.push(DrawCommand::Blit { texture, dest });
        }
    }
}

/// Score line shown during a round
pub fn score_text(score: u32) -> String {
    format!("Bounce #{score}")
}

/// Build the draw list for the current world. Pure: the same inputs always
/// give the same frame.
pub fn compose(world: &World, resources: &dyn ResourceProvider) -> Frame {
    let mut frame = Frame::default();
    frame.commands.push(DrawCommand::Clear);

    match world.phase {
        GamePhase::StartScreen => frame.blit(resources, "startScreen", None),
        GamePhase::Running => compose_course(&mut frame, world, resources),
        GamePhase::Completed => frame.blit(resources, "comScreen", None),
        GamePhase::Exit => {}
    }

    frame.commands.push(DrawCommand::Present);
    frame
}

fn compose_course(frame: &mut Frame, world: &World, resources: &dyn ResourceProvider) {
    frame.blit(resources, "background", None);

    for (i, obstacle) in world.obstacles.iter().enumerate() {
        frame.blit(resources, &obstacle_texture(i), Some(*obstacle));
    }

    frame.blit(resources, "hole", Some(world.hole));
    frame.blit(resources, "ball", Some(world.ball.rect));

    if let Some(aim) = world.aim {
        if let Some(texture) = frame.texture(resources, "arrow") {
            frame.commands.push(DrawCommand::BlitRotated {
                texture,
                dest: aim.rect,
                angle: aim.angle,
            });
        }
    }

    match resources.font("font") {
        Some(font) => frame.commands.push(DrawCommand::Text {
            font,
            text: score_text(world.score),
            color: WHITE,
            x: SCORE_TEXT_X,
            y: SCORE_TEXT_Y,
        }),
        None => frame.missing.push((AssetKind::Font, "font".to_string())),
    }
}
