use tracing::debug;

use crate::{
    config::{ConfigError, GameConfig, RenderConfig},
    geometry::{Hitbox, Position},
    grid::{Grid, GridError, GridPos},
};

use super::{Color, DrawCommand, DrawSurface, FieldRenderer};

/// Lays out a [`Grid`] in pixel space and draws it.
///
/// The board is a square of `field_pixel_size` pixels, split evenly into `field_size` fields per
/// side. Every render pass also hands each field the hitbox it was drawn into.
#[derive(Clone, Debug, PartialEq)]
pub struct Renderer {
    config: GameConfig,
    render_config: RenderConfig,
}

impl Renderer {
    pub fn new(config: GameConfig, render_config: RenderConfig) -> Result<Self, ConfigError> {
        render_config.validate()?;
        debug!(
            field_size = config.field_size(),
            field_pixel_size = render_config.field_pixel_size,
            "created renderer"
        );
        Ok(Self {
            config,
            render_config,
        })
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn field_pixel_size(&self) -> f32 {
        self.render_config.field_pixel_size
    }

    /// Changes the size of the whole board.
    ///
    /// Hitboxes of already rendered fields are only updated by the next render pass.
    pub fn set_field_pixel_size(&mut self, field_pixel_size: f32) -> Result<(), ConfigError> {
        let render_config = RenderConfig {
            field_pixel_size,
            ..self.render_config.clone()
        };
        render_config.validate()?;
        debug!(field_pixel_size, "resized board");
        self.render_config = render_config;
        Ok(())
    }

    /// Width and height of a single field in pixels.
    pub fn single_field_pixel(&self) -> f32 {
        self.field_pixel_size() / self.config.field_size() as f32
    }

    /// The left upper and right lower corner of the field at `pos`.
    pub fn cell_corners(&self, pos: GridPos) -> (Position, Position) {
        let single_field_pixel = self.single_field_pixel();
        let left_upper = Position::new(
            pos.col as f32 * single_field_pixel,
            pos.row as f32 * single_field_pixel,
        );
        let right_lower = left_upper
            .move_x(single_field_pixel)
            .move_y(single_field_pixel);
        (left_upper, right_lower)
    }

    /// The field below the given pixel, if it lies on the board.
    ///
    /// Points on a border between fields belong to the upper left field, the same one a click on
    /// that point hits.
    pub fn field_at(&self, point: Position) -> Option<GridPos> {
        let extent = 0.0..=self.field_pixel_size();
        if !extent.contains(&point.x) || !extent.contains(&point.y) {
            return None;
        }
        Some(GridPos::new(
            self.to_grid_coord(point.x),
            self.to_grid_coord(point.y),
        ))
    }

    fn to_grid_coord(&self, pixel: f32) -> usize {
        // `as` saturates, so negative values end up at 0
        ((pixel / self.single_field_pixel()).ceil() as usize)
            .saturating_sub(1)
            .min(self.config.field_size() - 1)
    }

    /// Draws all fields, followed by the grid lines on top of them.
    pub fn render(
        &self,
        grid: &mut Grid,
        surface: &mut (impl DrawSurface + ?Sized),
    ) -> Result<(), GridError> {
        self.render_fields(grid, surface)?;
        self.draw_grid(surface);
        Ok(())
    }

    /// Draws every field in row-major order and assigns it its hitbox.
    ///
    /// Fails without drawing anything if `grid` has a different size than this renderer was
    /// configured with.
    pub fn render_fields(
        &self,
        grid: &mut Grid,
        surface: &mut (impl DrawSurface + ?Sized),
    ) -> Result<(), GridError> {
        if grid.field_size() != self.config.field_size() {
            return Err(GridError::SizeMismatch {
                expected: self.config.field_size(),
                actual: grid.field_size(),
            });
        }
        debug!(
            field_size = self.config.field_size(),
            single_field_pixel = self.single_field_pixel(),
            "rendering fields"
        );

        let font = self.render_config.font.as_str();
        for pos in grid.positions() {
            let (left_upper, right_lower) = self.cell_corners(pos);
            let mines_around = self.mines_around(grid, left_upper, right_lower);
            let mut field_renderer =
                FieldRenderer::new(&mut *surface, left_upper, right_lower, mines_around, font);
            grid.field_mut(pos)
                .expect("grid positions should have fields")
                .render_on_field(&mut field_renderer, Hitbox::new(left_upper, right_lower));
        }
        Ok(())
    }

    /// Draws `field_size + 1` vertical and horizontal lines across the whole board.
    pub fn draw_grid(&self, surface: &mut (impl DrawSurface + ?Sized)) {
        let gap = self.single_field_pixel();
        let extent = self.field_pixel_size();
        let lines = self.config.field_size() + 1;

        for i in 0..lines {
            let start = Position::ORIGIN.move_x(gap * i as f32);
            self.draw_line(surface, start, start.move_y(extent));
        }
        for i in 0..lines {
            let start = Position::ORIGIN.move_y(gap * i as f32);
            self.draw_line(surface, start, start.move_x(extent));
        }
    }

    /// Counts the mines around the field covering the given pixel rectangle.
    ///
    /// The rectangle is mapped back to a field through its center. The field itself is not
    /// counted, so a field without any surrounding mines yields `0`.
    pub fn mines_around(&self, grid: &Grid, left_upper: Position, right_lower: Position) -> usize {
        let center = left_upper.midpoint(right_lower);
        let pos = GridPos::new(self.to_grid_coord(center.x), self.to_grid_coord(center.y));
        grid.adjacent_mines(pos)
    }

    pub fn draw_line(
        &self,
        surface: &mut (impl DrawSurface + ?Sized),
        start: Position,
        end: Position,
    ) {
        DrawCommand::Line { start, end }.draw(surface);
    }

    pub fn draw_rect(
        &self,
        surface: &mut (impl DrawSurface + ?Sized),
        left_upper: Position,
        right_lower: Position,
        color: Color,
    ) {
        DrawCommand::Rect {
            left_upper,
            right_lower,
            color,
        }
        .draw(surface);
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;

    use crate::{mine_map::MineMap, render::RecordingSurface};

    use super::*;

    fn renderer(field_size: usize, field_pixel_size: f32) -> Renderer {
        Renderer::new(
            GameConfig::new(field_size).unwrap(),
            RenderConfig::new(field_pixel_size).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn rejects_bad_pixel_size() {
        let render_config = RenderConfig {
            field_pixel_size: 0.0,
            ..Default::default()
        };
        assert_matches!(
            Renderer::new(GameConfig::default(), render_config),
            Err(ConfigError::InvalidPixelSize(_))
        );

        let mut renderer = renderer(8, 400.0);
        assert_matches!(
            renderer.set_field_pixel_size(-1.0),
            Err(ConfigError::InvalidPixelSize(_))
        );
        assert_eq!(renderer.field_pixel_size(), 400.0);
    }

    #[test]
    fn cell_corners_follow_grid() {
        let renderer = renderer(8, 400.0);

        assert_eq!(renderer.single_field_pixel(), 50.0);
        assert_eq!(
            renderer.cell_corners(GridPos::new(0, 0)),
            (Position::new(0.0, 0.0), Position::new(50.0, 50.0))
        );
        assert_eq!(
            renderer.cell_corners(GridPos::new(3, 1)),
            (Position::new(150.0, 50.0), Position::new(200.0, 100.0))
        );
        assert_eq!(
            renderer.cell_corners(GridPos::new(7, 7)),
            (Position::new(350.0, 350.0), Position::new(400.0, 400.0))
        );
    }

    #[test]
    fn maps_pixels_to_fields() {
        let renderer = renderer(8, 400.0);

        assert_eq!(renderer.field_at(Position::new(0.0, 0.0)), Some(GridPos::new(0, 0)));
        assert_eq!(renderer.field_at(Position::new(75.0, 160.0)), Some(GridPos::new(1, 3)));
        assert_eq!(renderer.field_at(Position::new(50.0, 50.0)), Some(GridPos::new(0, 0)));
        assert_eq!(renderer.field_at(Position::new(50.5, 50.0)), Some(GridPos::new(1, 0)));
        assert_eq!(renderer.field_at(Position::new(400.0, 400.0)), Some(GridPos::new(7, 7)));
        assert_eq!(renderer.field_at(Position::new(400.5, 10.0)), None);
        assert_eq!(renderer.field_at(Position::new(10.0, -0.5)), None);
    }

    #[test]
    fn mines_around_starts_at_zero() {
        let renderer = renderer(4, 100.0);
        let config = *renderer.config();
        let (left_upper, right_lower) = renderer.cell_corners(GridPos::new(1, 1));

        let empty = Grid::new(config);
        assert_eq!(renderer.mines_around(&empty, left_upper, right_lower), 0);

        let mut mine_map = MineMap::new(&config);
        mine_map.place_mine(GridPos::new(0, 0));
        mine_map.place_mine(GridPos::new(2, 2));
        mine_map.place_mine(GridPos::new(3, 3));
        let grid = Grid::from_mine_map(config, &mine_map).unwrap();
        assert_eq!(renderer.mines_around(&grid, left_upper, right_lower), 2);

        let (left_upper, right_lower) = renderer.cell_corners(GridPos::new(3, 0));
        assert_eq!(renderer.mines_around(&grid, left_upper, right_lower), 0);
    }

    #[test]
    fn resizing_moves_hitboxes_on_next_render() {
        let mut renderer = renderer(2, 100.0);
        let mut grid = Grid::new(*renderer.config());
        let mut surface = RecordingSurface::new();

        renderer.render(&mut grid, &mut surface).unwrap();
        assert_eq!(grid.click(Position::new(150.0, 150.0), false), None);

        renderer.set_field_pixel_size(200.0).unwrap();
        renderer.render(&mut grid, &mut surface).unwrap();
        assert_eq!(
            grid.click(Position::new(150.0, 150.0), false),
            Some(GridPos::new(1, 1))
        );
    }

    #[test]
    fn border_pixels_match_clicked_field() {
        let renderer = renderer(8, 400.0);
        let mut surface = RecordingSurface::new();
        let points = [
            Position::new(50.0, 50.0),
            Position::new(100.0, 25.0),
            Position::new(25.0, 350.0),
            Position::new(0.0, 200.0),
            Position::new(400.0, 0.0),
            Position::new(123.0, 321.0),
        ];
        for point in points {
            let mut grid = Grid::new(*renderer.config());
            renderer.render(&mut grid, &mut surface).unwrap();
            assert_eq!(
                renderer.field_at(point),
                grid.click(point, true),
                "{point:?}"
            );
        }
    }

    #[test]
    fn rendering_rejects_grid_of_other_size() {
        let renderer = renderer(8, 400.0);
        let mut grid = Grid::new(GameConfig::new(4).unwrap());
        let mut surface = RecordingSurface::new();

        assert_eq!(
            renderer.render(&mut grid, &mut surface),
            Err(GridError::SizeMismatch {
                expected: 8,
                actual: 4
            })
        );
        assert!(surface.calls().is_empty());
    }

    #[test]
    fn draw_rect_fills_rectangle() {
        let renderer = renderer(8, 400.0);
        let mut surface = RecordingSurface::new();
        renderer.draw_rect(
            &mut surface,
            Position::new(10.0, 20.0),
            Position::new(40.0, 25.0),
            Color::Red,
        );

        let [rect] = surface.fills() else {
            panic!("expected exactly one filled rectangle");
        };
        assert_eq!(
            (rect.x, rect.y, rect.width, rect.height, rect.color),
            (10.0, 20.0, 30.0, 5.0, Color::Red)
        );
    }
}
