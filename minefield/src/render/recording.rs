use crate::geometry::Position;

use super::{Color, DrawSurface, TextAlign, TextBaseline};

/// A single primitive call made on a [`RecordingSurface`].
#[derive(Clone, Debug, PartialEq)]
pub enum SurfaceCall {
    BeginPath,
    MoveTo { x: f32, y: f32 },
    LineTo { x: f32, y: f32 },
    Stroke,
    SetFillStyle(Color),
    Rect { x: f32, y: f32, width: f32, height: f32 },
    Fill,
    SetFont(String),
    SetTextAlign(TextAlign),
    SetTextBaseline(TextBaseline),
    FillText { text: String, x: f32, y: f32 },
}

/// A line segment that was stroked.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokedLine {
    pub start: Position,
    pub end: Position,
}

impl StrokedLine {
    pub fn is_vertical(&self) -> bool {
        self.start.x == self.end.x
    }

    pub fn is_horizontal(&self) -> bool {
        self.start.y == self.end.y
    }
}

/// A rectangle that was filled, with the fill style active at the time.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FilledRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
    pub color: Color,
}

/// Text that was drawn, with the text settings active at the time.
#[derive(Clone, Debug, PartialEq)]
pub struct TextRun {
    pub text: String,
    pub x: f32,
    pub y: f32,
    pub color: Color,
    pub font: String,
    pub align: TextAlign,
    pub baseline: TextBaseline,
}

/// A [`DrawSurface`] that draws nothing but remembers everything.
///
/// Besides the raw call log it keeps track of path and style state the way a canvas does, so the
/// resulting strokes, fills and text runs can be inspected directly.
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    calls: Vec<SurfaceCall>,
    strokes: Vec<StrokedLine>,
    fills: Vec<FilledRect>,
    texts: Vec<TextRun>,
    // current path
    cursor: Option<Position>,
    segments: Vec<StrokedLine>,
    rects: Vec<(f32, f32, f32, f32)>,
    // current style
    fill_style: Option<Color>,
    font: Option<String>,
    align: TextAlign,
    baseline: TextBaseline,
}

impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> &[SurfaceCall] {
        &self.calls
    }

    pub fn strokes(&self) -> &[StrokedLine] {
        &self.strokes
    }

    pub fn fills(&self) -> &[FilledRect] {
        &self.fills
    }

    pub fn texts(&self) -> &[TextRun] {
        &self.texts
    }

    /// Forgets all recorded calls and resets the surface state.
    pub fn clear(&mut self) {
        *self = Self::default();
    }

    fn fill_style(&self) -> Color {
        // canvas default
        self.fill_style.unwrap_or(Color::Black)
    }
}

impl DrawSurface for RecordingSurface {
    fn begin_path(&mut self) {
        self.calls.push(SurfaceCall::BeginPath);
        self.cursor = None;
        self.segments.clear();
        self.rects.clear();
    }

    fn move_to(&mut self, x: f32, y: f32) {
        self.calls.push(SurfaceCall::MoveTo { x, y });
        self.cursor = Some(Position::new(x, y));
    }

    fn line_to(&mut self, x: f32, y: f32) {
        self.calls.push(SurfaceCall::LineTo { x, y });
        let end = Position::new(x, y);
        // a line without a starting point only moves the cursor
        if let Some(start) = self.cursor {
            self.segments.push(StrokedLine { start, end });
        }
        self.cursor = Some(end);
    }

    fn stroke(&mut self) {
        self.calls.push(SurfaceCall::Stroke);
        self.strokes.extend_from_slice(&self.segments);
    }

    fn set_fill_style(&mut self, color: Color) {
        self.calls.push(SurfaceCall::SetFillStyle(color));
        self.fill_style = Some(color);
    }

    fn rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.calls.push(SurfaceCall::Rect {
            x,
            y,
            width,
            height,
        });
        self.rects.push((x, y, width, height));
    }

    fn fill(&mut self) {
        self.calls.push(SurfaceCall::Fill);
        let color = self.fill_style();
        self.fills
            .extend(self.rects.iter().map(|&(x, y, width, height)| FilledRect {
                x,
                y,
                width,
                height,
                color,
            }));
    }

    fn set_font(&mut self, font: &str) {
        self.calls.push(SurfaceCall::SetFont(font.to_owned()));
        self.font = Some(font.to_owned());
    }

    fn set_text_align(&mut self, align: TextAlign) {
        self.calls.push(SurfaceCall::SetTextAlign(align));
        self.align = align;
    }

    fn set_text_baseline(&mut self, baseline: TextBaseline) {
        self.calls.push(SurfaceCall::SetTextBaseline(baseline));
        self.baseline = baseline;
    }

    fn fill_text(&mut self, text: &str, x: f32, y: f32) {
        self.calls.push(SurfaceCall::FillText {
            text: text.to_owned(),
            x,
            y,
        });
        let color = self.fill_style();
        self.texts.push(TextRun {
            text: text.to_owned(),
            x,
            y,
            color,
            font: self.font.clone().unwrap_or_else(|| "10px sans-serif".to_owned()),
            align: self.align,
            baseline: self.baseline,
        });
    }
}
