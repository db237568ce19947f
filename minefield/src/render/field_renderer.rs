use crate::{field::FieldState, geometry::Position};

use super::{Color, DrawCommand, DrawSurface};

/// Receives the display state of a field during [`Field::render_on_field`].
///
/// Implemented for any `FnMut(FieldState)`, which is handy when only the state is of interest.
///
/// [`Field::render_on_field`]: crate::field::Field::render_on_field
pub trait FieldRender {
    fn render(&mut self, state: FieldState);
}

impl<F: FnMut(FieldState)> FieldRender for F {
    fn render(&mut self, state: FieldState) {
        self(state)
    }
}

/// Draws a single field into a fixed pixel rectangle of a [`DrawSurface`].
pub struct FieldRenderer<'a, S: DrawSurface + ?Sized> {
    surface: &'a mut S,
    left_upper: Position,
    right_lower: Position,
    mines_around: usize,
    font: &'a str,
}

impl<'a, S: DrawSurface + ?Sized> FieldRenderer<'a, S> {
    /// `mines_around` is only shown once the field is unveiled.
    pub fn new(
        surface: &'a mut S,
        left_upper: Position,
        right_lower: Position,
        mines_around: usize,
        font: &'a str,
    ) -> Self {
        Self {
            surface,
            left_upper,
            right_lower,
            mines_around,
            font,
        }
    }

    /// The fill color of a field in the given state.
    pub fn fill_color(state: FieldState) -> Color {
        match state {
            FieldState::Hidden => Color::Grey,
            FieldState::Unveiled => Color::White,
            FieldState::Flagged => Color::Blue,
            FieldState::Detonated => Color::Red,
        }
    }

    /// The draw commands for a field in the given state.
    ///
    /// Only unveiled fields get the count overlay. Unveiled mines are [`FieldState::Detonated`]
    /// and never show a count.
    pub fn commands(&self, state: FieldState) -> Vec<DrawCommand> {
        let mut commands = vec![DrawCommand::Rect {
            left_upper: self.left_upper,
            right_lower: self.right_lower,
            color: Self::fill_color(state),
        }];
        if state == FieldState::Unveiled {
            commands.push(DrawCommand::Text {
                text: self.mines_around.to_string(),
                center: self.left_upper.midpoint(self.right_lower),
                color: Color::Black,
                font: self.font.to_owned(),
            });
        }
        commands
    }
}

impl<S: DrawSurface + ?Sized> FieldRender for FieldRenderer<'_, S> {
    fn render(&mut self, state: FieldState) {
        for command in self.commands(state) {
            command.draw(&mut *self.surface);
        }
    }
}
