#![deny(clippy::all)]
#![forbid(unsafe_code)]

//! Fixed-size cell grids and the Game of Life automaton that runs on them.
//!
//! A [`Grid`] holds one generation. [`Grid::step`] never mutates its input:
//! it reads the current generation and returns the next one as a new grid.
//! How cells on the outer border see their neighbours is chosen by an
//! [`EdgeStrategy`].

mod error;
mod life;

pub use error::GridError;
pub use life::{
    count_live_neighbors, step, LifeCell, LifeWorld, Pattern, SeedPolicy, DEFAULT_SEED,
    ORIGINAL_RANDOM_DENSITY,
};

use rand::prelude::*;
use rand::rngs::SmallRng;
use rand::SeedableRng;
use rayon::prelude::*;
use std::ops::{Index, IndexMut};

pub trait World {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
    fn num_cells(&self) -> usize;
    fn cells_iter(&self) -> impl DoubleEndedIterator<Item = &impl GridCell> + Clone;
    fn update(&mut self);
}

pub trait GridCell
where
    Self: Copy + Default + Send + Sync,
{
    fn color_rgba(&self) -> [u8; 4];

    /// The state this cell takes in the next generation.
    fn next(&self, neighborhood: &Neighborhood<Self>) -> Self;
}

/// One generation of cells, stored row-major in a flat vector.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid<C>
where
    C: GridCell,
{
    cells: Vec<C>,
    width: u32,
    height: u32,
}

impl<C> Grid<C>
where
    C: GridCell,
{
    /// Creates a grid with every cell in its default state.
    pub fn new(width: u32, height: u32) -> Self {
        assert!(width != 0 && height != 0);
        Self {
            cells: vec![C::default(); width as usize * height as usize],
            width,
            height,
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn num_cells(&self) -> usize {
        self.cells.len()
    }

    pub fn cells_iter(&self) -> impl DoubleEndedIterator<Item = &C> + Clone {
        self.cells.iter()
    }

    pub fn cells_iter_mut(&mut self) -> impl DoubleEndedIterator<Item = &mut C> {
        self.cells.iter_mut()
    }

    pub fn contains(&self, loc: Loc) -> bool {
        loc.grid_index(self.width, self.height).is_some()
    }

    pub fn get(&self, loc: Loc) -> Option<&C> {
        loc.grid_index(self.width, self.height)
            .map(|index| &self.cells[index])
    }

    fn get_mut(&mut self, loc: Loc) -> Option<&mut C> {
        loc.grid_index(self.width, self.height)
            .map(|index| &mut self.cells[index])
    }

    /// Panics if `loc` is outside the grid.
    pub fn set(&mut self, loc: Loc, cell: C) {
        self[loc] = cell;
    }

    /// Computes the next generation. `self` is left untouched.
    pub fn step(&self, edges: EdgeStrategy) -> Self {
        let cells = (0..self.cells.len())
            .into_par_iter()
            .map(|index| {
                let loc = self.loc_of(index);
                self.cells[index].next(&Neighborhood::new(self, loc, edges))
            })
            .collect();
        Self {
            cells,
            width: self.width,
            height: self.height,
        }
    }

    fn loc_of(&self, index: usize) -> Loc {
        let width = self.width as usize;
        Loc::new((index / width) as u32, (index % width) as u32)
    }
}

impl<C> Index<Loc> for Grid<C>
where
    C: GridCell,
{
    type Output = C;

    fn index(&self, loc: Loc) -> &Self::Output {
        let (width, height) = (self.width, self.height);
        self.get(loc).unwrap_or_else(|| {
            panic!(
                "Index indices {}, {} out of bounds for {}x{} grid",
                loc.row, loc.col, width, height
            )
        })
    }
}

impl<C> IndexMut<Loc> for Grid<C>
where
    C: GridCell,
{
    fn index_mut(&mut self, loc: Loc) -> &mut Self::Output {
        let (width, height) = (self.width, self.height);
        self.get_mut(loc).unwrap_or_else(|| {
            panic!(
                "Index_mut indices {}, {} out of bounds for {}x{} grid",
                loc.row, loc.col, width, height
            )
        })
    }
}

/// How a cell's Moore neighbourhood is formed at the edges of the grid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EdgeStrategy {
    /// Cells on the outer border have no neighbours at all, so they always
    /// count zero live neighbours.
    #[default]
    ClampedZero,
    /// Opposite edges are joined (torus).
    Wrap,
    /// Positions off the grid are treated as dead; border cells still see
    /// their in-grid neighbours.
    TrueBoundary,
}

impl EdgeStrategy {
    fn has_neighbors(self, center: Loc, width: u32, height: u32) -> bool {
        match self {
            EdgeStrategy::ClampedZero => {
                center.row > 0
                    && center.col > 0
                    && center.row < height - 1
                    && center.col < width - 1
            }
            EdgeStrategy::Wrap | EdgeStrategy::TrueBoundary => true,
        }
    }

    fn neighbor_loc(self, center: Loc, offset: (i64, i64), width: u32, height: u32) -> Option<Loc> {
        let row = center.row as i64 + offset.0;
        let col = center.col as i64 + offset.1;
        match self {
            EdgeStrategy::Wrap => Some(Loc::new(modulo(row, height), modulo(col, width))),
            EdgeStrategy::ClampedZero | EdgeStrategy::TrueBoundary => {
                if (0..height as i64).contains(&row) && (0..width as i64).contains(&col) {
                    Some(Loc::new(row as u32, col as u32))
                } else {
                    None
                }
            }
        }
    }
}

fn modulo(val: i64, max: u32) -> u32 {
    val.rem_euclid(max as i64) as u32
}

const NEIGHBOR_OFFSETS: [(i64, i64); 8] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// The eight cells around `center`, as seen under an [`EdgeStrategy`].
pub struct Neighborhood<'a, C>
where
    C: GridCell,
{
    cells: &'a Grid<C>,
    center: Loc,
    edges: EdgeStrategy,
}

impl<'a, C> Neighborhood<'a, C>
where
    C: GridCell,
{
    pub fn new(cells: &'a Grid<C>, center: Loc, edges: EdgeStrategy) -> Self {
        assert!(
            cells.contains(center),
            "Neighborhood center {}, {} out of bounds",
            center.row,
            center.col
        );
        Self {
            cells,
            center,
            edges,
        }
    }

    /// Calls `f` once per neighbour in play. The center cell is never visited.
    pub fn for_neighbor_cells<F>(&self, mut f: F)
    where
        F: FnMut(&C),
    {
        let (width, height) = (self.cells.width(), self.cells.height());
        if !self.edges.has_neighbors(self.center, width, height) {
            return;
        }
        for offset in NEIGHBOR_OFFSETS {
            if let Some(loc) = self.edges.neighbor_loc(self.center, offset, width, height) {
                f(&self.cells[loc]);
            }
        }
    }
}

/// A cell address. `row` is the y coordinate, `col` the x coordinate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Loc {
    pub row: u32,
    pub col: u32,
}

impl Loc {
    pub fn new(row: u32, col: u32) -> Self {
        Self { row, col }
    }

    pub fn grid_index(&self, width: u32, height: u32) -> Option<usize> {
        if self.row < height && self.col < width {
            Some(self.row as usize * width as usize + self.col as usize)
        } else {
            None
        }
    }
}

#[derive(Debug)]
pub struct Random {
    rng: SmallRng,
}

impl Random {
    pub fn new() -> Self {
        Self {
            rng: SmallRng::from_rng(&mut rand::rng()),
        }
    }

    pub fn from_seed(seed: u64) -> Self {
        Self {
            rng: SmallRng::seed_from_u64(seed),
        }
    }

    /// `p` must be in `[0, 1]`.
    pub fn next_bool(&mut self, p: f64) -> bool {
        self.rng.random_bool(p)
    }
}

impl Default for Random {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
    struct Counter(u32);

    impl GridCell for Counter {
        fn color_rgba(&self) -> [u8; 4] {
            [0, 0, 0, 0xff]
        }

        fn next(&self, neighborhood: &Neighborhood<Counter>) -> Self {
            let mut sum = 0;
            neighborhood.for_neighbor_cells(|neighbor| sum += neighbor.0);
            Counter(sum)
        }
    }

    fn ones(width: u32, height: u32) -> Grid<Counter> {
        let mut grid = Grid::new(width, height);
        grid.cells_iter_mut().for_each(|cell| *cell = Counter(1));
        grid
    }

    #[test]
    fn test_new_grid_is_default() {
        let grid: Grid<Counter> = Grid::new(4, 3);
        assert_eq!(grid.width(), 4);
        assert_eq!(grid.height(), 3);
        assert_eq!(grid.num_cells(), 12);
        assert!(grid.cells_iter().all(|cell| *cell == Counter(0)));
    }

    #[test]
    #[should_panic]
    fn test_new_grid_rejects_zero_width() {
        let _grid: Grid<Counter> = Grid::new(0, 3);
    }

    #[test]
    fn test_set_and_get() {
        let mut grid = Grid::new(4, 3);
        grid.set(Loc::new(2, 3), Counter(7));
        assert_eq!(grid.get(Loc::new(2, 3)), Some(&Counter(7)));
        assert_eq!(grid[Loc::new(2, 3)], Counter(7));
        assert_eq!(grid[Loc::new(0, 0)], Counter(0));
    }

    #[test]
    fn test_get_out_of_bounds_is_none() {
        let grid: Grid<Counter> = Grid::new(4, 3);
        assert_eq!(grid.get(Loc::new(3, 0)), None);
        assert_eq!(grid.get(Loc::new(0, 4)), None);
    }

    #[test]
    #[should_panic(expected = "out of bounds")]
    fn test_set_out_of_bounds_panics() {
        let mut grid = Grid::new(4, 3);
        grid.set(Loc::new(0, 4), Counter(1));
    }

    #[test]
    fn test_grid_index_is_row_major() {
        assert_eq!(Loc::new(0, 0).grid_index(4, 3), Some(0));
        assert_eq!(Loc::new(1, 2).grid_index(4, 3), Some(6));
        assert_eq!(Loc::new(2, 3).grid_index(4, 3), Some(11));
        assert_eq!(Loc::new(3, 0).grid_index(4, 3), None);
    }

    #[test]
    fn test_clamped_zero_edges() {
        let next = ones(5, 4).step(EdgeStrategy::ClampedZero);
        assert_eq!(next[Loc::new(1, 1)], Counter(8));
        assert_eq!(next[Loc::new(2, 3)], Counter(8));
        assert_eq!(next[Loc::new(0, 2)], Counter(0));
        assert_eq!(next[Loc::new(3, 2)], Counter(0));
        assert_eq!(next[Loc::new(2, 0)], Counter(0));
        assert_eq!(next[Loc::new(1, 4)], Counter(0));
    }

    #[test]
    fn test_true_boundary_edges() {
        let next = ones(5, 4).step(EdgeStrategy::TrueBoundary);
        assert_eq!(next[Loc::new(1, 1)], Counter(8));
        assert_eq!(next[Loc::new(0, 0)], Counter(3));
        assert_eq!(next[Loc::new(0, 2)], Counter(5));
        assert_eq!(next[Loc::new(3, 4)], Counter(3));
    }

    #[test]
    fn test_wrap_edges() {
        let mut grid = Grid::new(5, 4);
        grid.set(Loc::new(3, 4), Counter(1));
        let next = grid.step(EdgeStrategy::Wrap);
        assert_eq!(next[Loc::new(0, 0)], Counter(1));
        assert_eq!(next[Loc::new(2, 3)], Counter(1));
        assert_eq!(next[Loc::new(1, 1)], Counter(0));
        assert_eq!(next[Loc::new(3, 4)], Counter(0));
    }

    #[test]
    fn test_neighborhood_skips_center() {
        let mut grid = Grid::new(3, 3);
        grid.set(Loc::new(1, 1), Counter(100));
        let mut visited = 0;
        Neighborhood::new(&grid, Loc::new(1, 1), EdgeStrategy::ClampedZero).for_neighbor_cells(
            |neighbor| {
                assert_eq!(*neighbor, Counter(0));
                visited += 1;
            },
        );
        assert_eq!(visited, 8);
    }

    #[test]
    fn test_step_leaves_input_unchanged() {
        let grid = ones(5, 4);
        let before = grid.clone();
        let _next = grid.step(EdgeStrategy::Wrap);
        assert_eq!(grid, before);
    }

    #[test]
    fn test_seeded_random_is_reproducible() {
        let mut first = Random::from_seed(42);
        let mut second = Random::from_seed(42);
        let a: Vec<bool> = (0..64).map(|_| first.next_bool(0.5)).collect();
        let b: Vec<bool> = (0..64).map(|_| second.next_bool(0.5)).collect();
        assert_eq!(a, b);
    }
}
