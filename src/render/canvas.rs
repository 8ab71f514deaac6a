//! Drawing surface contract: the scene is painted with nothing but clears and
//! whole-cell fills.

use crate::game::{CELL_SIZE, Cell, GameState};

/// What occupies a painted cell
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Paint {
    Body,
    Head,
    Target,
    Obstacle,
}

pub trait Canvas {
    fn clear(&mut self);
    fn fill_cell(&mut self, cell: Cell, paint: Paint);
}

/// Which parts of the scene are shown this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SceneView {
    pub body: bool,
    pub target: bool,
}

/// Paint the full scene: snake, then target, then obstacles
pub fn draw_scene(canvas: &mut impl Canvas, state: &GameState, view: SceneView) {
    canvas.clear();

    if view.body {
        let head = state.snake.len() - 1;
        for (i, segment) in state.snake.body.iter().enumerate() {
            let paint = if i == head { Paint::Head } else { Paint::Body };
            canvas.fill_cell(*segment, paint);
        }
    }

    if view.target {
        canvas.fill_cell(state.target, Paint::Target);
    }

    for obstacle in &state.obstacles {
        canvas.fill_cell(*obstacle, Paint::Obstacle);
    }
}

/// In-memory canvas holding one paint slot per grid cell
#[derive(Debug, Clone, PartialEq)]
pub struct GridCanvas {
    side: usize,
    cells: Vec<Option<Paint>>,
}

impl GridCanvas {
    /// Canvas for a square board of `extent` units
    pub fn new(extent: i32) -> Self {
        let side = (extent / CELL_SIZE).max(0) as usize;
        Self {
            side,
            cells: vec![None; side * side],
        }
    }

    /// Cells per side
    pub fn side(&self) -> usize {
        self.side
    }

    pub fn get(&self, column: usize, row: usize) -> Option<Paint> {
        if column >= self.side || row >= self.side {
            return None;
        }
        self.cells[row * self.side + column]
    }

    /// Rows of paint slots, top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Option<Paint>]> {
        self.cells.chunks(self.side.max(1))
    }
}

impl Canvas for GridCanvas {
    fn clear(&mut self) {
        self.cells.fill(None);
    }

    fn fill_cell(&mut self, cell: Cell, paint: Paint) {
        let (column, row) = cell.grid_index();
        if column < 0 || row < 0 || column as usize >= self.side || row as usize >= self.side {
            return;
        }
        self.cells[row as usize * self.side + column as usize] = Some(paint);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Direction, Snake};

    #[derive(Default)]
    struct Recording {
        ops: Vec<Option<(Cell, Paint)>>,
    }

    impl Canvas for Recording {
        fn clear(&mut self) {
            self.ops.push(None);
        }

        fn fill_cell(&mut self, cell: Cell, paint: Paint) {
            self.ops.push(Some((cell, paint)));
        }
    }

    fn state() -> GameState {
        let mut state = GameState::new(
            Snake::new(Cell::new(40, 60), Direction::Down, 2),
            Cell::new(100, 100),
            200,
        );
        state.obstacles.push(Cell::new(0, 180));
        state
    }

    #[test]
    fn test_scene_draw_order() {
        let mut canvas = Recording::default();
        draw_scene(
            &mut canvas,
            &state(),
            SceneView {
                body: true,
                target: true,
            },
        );

        assert_eq!(
            canvas.ops,
            vec![
                None,
                Some((Cell::new(40, 40), Paint::Body)),
                Some((Cell::new(40, 60), Paint::Head)),
                Some((Cell::new(100, 100), Paint::Target)),
                Some((Cell::new(0, 180), Paint::Obstacle)),
            ]
        );
    }

    #[test]
    fn test_hidden_parts_are_skipped() {
        let mut canvas = Recording::default();
        draw_scene(
            &mut canvas,
            &state(),
            SceneView {
                body: false,
                target: false,
            },
        );

        assert_eq!(
            canvas.ops,
            vec![None, Some((Cell::new(0, 180), Paint::Obstacle))]
        );
    }

    #[test]
    fn test_grid_canvas_paints_cells() {
        let mut canvas = GridCanvas::new(200);
        draw_scene(
            &mut canvas,
            &state(),
            SceneView {
                body: true,
                target: true,
            },
        );

        assert_eq!(canvas.side(), 10);
        assert_eq!(canvas.get(2, 3), Some(Paint::Head));
        assert_eq!(canvas.get(2, 2), Some(Paint::Body));
        assert_eq!(canvas.get(5, 5), Some(Paint::Target));
        assert_eq!(canvas.get(0, 9), Some(Paint::Obstacle));
        assert_eq!(canvas.get(9, 9), None);
        assert_eq!(canvas.rows().count(), 10);

        canvas.clear();
        assert!(canvas.rows().flatten().all(Option::is_none));
    }

    #[test]
    fn test_grid_canvas_ignores_off_board_cells() {
        let mut canvas = GridCanvas::new(200);
        canvas.fill_cell(Cell::new(-20, 0), Paint::Head);
        canvas.fill_cell(Cell::new(200, 0), Paint::Head);
        assert!(canvas.rows().flatten().all(Option::is_none));
    }
}
