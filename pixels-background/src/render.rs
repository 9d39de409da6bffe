use life_grid::{GridCell, World};

/// Pixel dimensions of a frame showing `world` with square cells.
pub fn frame_size(world: &impl World, cell_pixel_width: u32) -> (u32, u32) {
    (
        world.width() * cell_pixel_width,
        world.height() * cell_pixel_width,
    )
}

/// Paints every cell of `world` as a `cell_pixel_width` square into an RGBA
/// frame laid out row by row.
pub fn draw_world(world: &impl World, cell_pixel_width: u32, frame: &mut [u8]) {
    assert!(cell_pixel_width > 0);
    let (frame_width, frame_height) = frame_size(world, cell_pixel_width);
    assert_eq!(
        frame.len(),
        4 * frame_width as usize * frame_height as usize,
        "frame is not {}x{} RGBA",
        frame_width,
        frame_height
    );

    let cell_width = cell_pixel_width as usize;
    let row_bytes = 4 * frame_width as usize;
    let world_width = world.width() as usize;
    for (index, cell) in world.cells_iter().enumerate() {
        let (row, col) = (index / world_width, index % world_width);
        let color = cell.color_rgba();
        for pixel_row in row * cell_width..(row + 1) * cell_width {
            let start = pixel_row * row_bytes + 4 * col * cell_width;
            for pixel in frame[start..start + 4 * cell_width].chunks_exact_mut(4) {
                pixel.copy_from_slice(&color);
            }
        }
    }
}
