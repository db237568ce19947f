//! Drawing the board onto an immediate-mode 2D surface.
//!
//! The core never talks to a concrete canvas. Everything goes through [`DrawSurface`], which
//! mirrors the handful of canvas primitives the board needs. [`DrawCommand`] is the value form of
//! the shapes that get drawn, and [`RecordingSurface`] records every primitive for inspection.

mod field_renderer;
mod recording;
mod renderer;

use std::fmt;

pub use field_renderer::{FieldRender, FieldRenderer};
pub use recording::{FilledRect, RecordingSurface, StrokedLine, SurfaceCall, TextRun};
pub use renderer::Renderer;

use crate::geometry::Position;

/// Colors used on the board.
#[derive(Clone, Copy, Debug, Hash, PartialEq, Eq)]
pub enum Color {
    Grey,
    White,
    Blue,
    Red,
    Black,
}

impl Color {
    /// The CSS color name.
    pub fn as_str(self) -> &'static str {
        match self {
            Color::Grey => "grey",
            Color::White => "white",
            Color::Blue => "blue",
            Color::Red => "red",
            Color::Black => "black",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
pub enum TextAlign {
    #[default]
    Start,
    Left,
    Center,
    Right,
}

#[derive(Clone, Copy, Debug, Default, Hash, PartialEq, Eq)]
pub enum TextBaseline {
    #[default]
    Alphabetic,
    Top,
    Middle,
    Bottom,
}

/// An immediate-mode 2D drawing surface, shaped after the HTML canvas context.
pub trait DrawSurface {
    fn begin_path(&mut self);

    fn move_to(&mut self, x: f32, y: f32);

    fn line_to(&mut self, x: f32, y: f32);

    fn stroke(&mut self);

    fn set_fill_style(&mut self, color: Color);

    /// Adds a rectangle to the current path.
    fn rect(&mut self, x: f32, y: f32, width: f32, height: f32);

    fn fill(&mut self);

    fn set_font(&mut self, font: &str);

    fn set_text_align(&mut self, align: TextAlign);

    fn set_text_baseline(&mut self, baseline: TextBaseline);

    fn fill_text(&mut self, text: &str, x: f32, y: f32);
}

impl<T: DrawSurface + ?Sized> DrawSurface for &mut T {
    fn begin_path(&mut self) {
        (**self).begin_path()
    }

    fn move_to(&mut self, x: f32, y: f32) {
        (**self).move_to(x, y)
    }

    fn line_to(&mut self, x: f32, y: f32) {
        (**self).line_to(x, y)
    }

    fn stroke(&mut self) {
        (**self).stroke()
    }

    fn set_fill_style(&mut self, color: Color) {
        (**self).set_fill_style(color)
    }

    fn rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        (**self).rect(x, y, width, height)
    }

    fn fill(&mut self) {
        (**self).fill()
    }

    fn set_font(&mut self, font: &str) {
        (**self).set_font(font)
    }

    fn set_text_align(&mut self, align: TextAlign) {
        (**self).set_text_align(align)
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        (**self).set_text_baseline(baseline)
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32) {
        (**self).fill_text(text, x, y)
    }
}

/// A single shape, ready to be issued to a [`DrawSurface`].
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// A stroked straight line.
    Line { start: Position, end: Position },
    /// A filled axis-aligned rectangle.
    Rect {
        left_upper: Position,
        right_lower: Position,
        color: Color,
    },
    /// Text centered on `center`.
    Text {
        text: String,
        center: Position,
        color: Color,
        font: String,
    },
}

impl DrawCommand {
    /// Issues the primitive calls for this command.
    pub fn draw(&self, surface: &mut (impl DrawSurface + ?Sized)) {
        match self {
            DrawCommand::Line { start, end } => {
                surface.begin_path();
                surface.move_to(start.x, start.y);
                surface.line_to(end.x, end.y);
                surface.stroke();
            }
            DrawCommand::Rect {
                left_upper,
                right_lower,
                color,
            } => {
                surface.begin_path();
                surface.set_fill_style(*color);
                surface.rect(
                    left_upper.x,
                    left_upper.y,
                    left_upper.horizontal_distance_to(*right_lower),
                    left_upper.vertical_distance_to(*right_lower),
                );
                surface.fill();
            }
            DrawCommand::Text {
                text,
                center,
                color,
                font,
            } => {
                surface.set_fill_style(*color);
                surface.set_font(font);
                surface.set_text_align(TextAlign::Center);
                surface.set_text_baseline(TextBaseline::Middle);
                surface.fill_text(text, center.x, center.y);
            }
        }
    }
}
