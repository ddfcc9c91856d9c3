use crate::domain::{GridDims, GridPos};

/// Camera maps between screen pixels and board cells
pub struct Camera {
    pub offset_x: f32,
    pub offset_y: f32,
    pub zoom: f32,  // 1.0 = normal, 2.0 = 2x zoomed in
    pub cell_size: f32,
}

impl Camera {
    pub fn new(cell_size: f32) -> Self {
        Self {
            offset_x: 0.0,
            offset_y: 0.0,
            zoom: 1.0,
            cell_size,
        }
    }

    /// On-screen size of one cell
    pub fn scaled_cell(&self) -> f32 {
        self.cell_size * self.zoom
    }

    /// Zoom in by factor
    pub fn zoom_in(&mut self, factor: f32) {
        self.zoom = (self.zoom * factor).clamp(0.25, 4.0);
    }

    /// Zoom out by factor
    pub fn zoom_out(&mut self, factor: f32) {
        self.zoom = (self.zoom / factor).clamp(0.25, 4.0);
    }

    /// Place the board in the middle of a viewport
    pub fn center_on(&mut self, dims: GridDims, viewport_width: f32, viewport_height: f32) {
        let cell = self.scaled_cell();
        self.offset_x = (viewport_width - dims.size_x() as f32 * cell) / 2.0;
        self.offset_y = (viewport_height - dims.size_y() as f32 * cell) / 2.0;
    }

    /// Cell under a screen point, if it is on the board
    pub fn screen_to_grid(&self, screen_x: f32, screen_y: f32, dims: GridDims) -> Option<GridPos> {
        let cell = self.scaled_cell();
        let grid_x = ((screen_x - self.offset_x) / cell).floor();
        let grid_y = ((screen_y - self.offset_y) / cell).floor();
        if grid_x < 0.0 || grid_y < 0.0 {
            return None;
        }
        let pos = GridPos::new(grid_x as usize, grid_y as usize);
        dims.contains(pos).then_some(pos)
    }

    /// Top-left screen corner of a cell, accepting fractional cell coordinates
    pub fn grid_to_screen(&self, grid_x: f32, grid_y: f32) -> (f32, f32) {
        let cell = self.scaled_cell();
        (grid_x * cell + self.offset_x, grid_y * cell + self.offset_y)
    }

    /// Reset zoom and offsets
    pub fn reset(&mut self) {
        self.offset_x = 0.0;
        self.offset_y = 0.0;
        self.zoom = 1.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dims() -> GridDims {
        GridDims::new(10, 10).unwrap()
    }

    #[test]
    fn test_screen_to_grid_inside_board() {
        let mut camera = Camera::new(20.0);
        camera.offset_x = 100.0;
        camera.offset_y = 50.0;
        assert_eq!(camera.screen_to_grid(105.0, 55.0, dims()), Some(GridPos::new(0, 0)));
        assert_eq!(camera.screen_to_grid(145.0, 95.0, dims()), Some(GridPos::new(2, 2)));
    }

    #[test]
    fn test_screen_to_grid_outside_board() {
        let mut camera = Camera::new(20.0);
        camera.offset_x = 100.0;
        camera.offset_y = 50.0;
        assert_eq!(camera.screen_to_grid(99.0, 60.0, dims()), None);
        assert_eq!(camera.screen_to_grid(300.0, 60.0, dims()), None);
    }

    #[test]
    fn test_center_on_viewport() {
        let mut camera = Camera::new(20.0);
        camera.center_on(dims(), 400.0, 300.0);
        assert_eq!(camera.grid_to_screen(0.0, 0.0), (100.0, 50.0));
        assert_eq!(camera.screen_to_grid(200.0, 150.0, dims()), Some(GridPos::new(5, 5)));
    }

    #[test]
    fn test_zoom_is_clamped() {
        let mut camera = Camera::new(20.0);
        for _ in 0..50 {
            camera.zoom_in(1.5);
        }
        assert_eq!(camera.zoom, 4.0);
        camera.reset();
        assert_eq!(camera.zoom, 1.0);
    }
}
