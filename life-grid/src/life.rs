use crate::{EdgeStrategy, Grid, GridCell, GridError, Loc, Neighborhood, Random, World};
use log::{debug, info};

const ALIVE_COLOR: [u8; 4] = [0xd3, 0xd3, 0xd3, 0xff]; // lightgray
const DEAD_COLOR: [u8; 4] = [0xff, 0xff, 0xff, 0xff];

/// Chance of a cell starting alive under the historical `ln(10 * u) < -0.6`
/// test with `u` uniform in `(0, 1]`, i.e. `e^-0.6 / 10`.
pub const ORIGINAL_RANDOM_DENSITY: f64 = 0.054_881_163_609_402_64;

/// Live cells given as `(row, col)` offsets from the grid center.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pattern {
    pub name: &'static str,
    pub cells: &'static [(i32, i32)],
}

pub const DEFAULT_SEED: Pattern = Pattern {
    name: "R-pentomino",
    cells: &[(0, 0), (1, 0), (-1, 0), (0, -1), (-1, 1)],
};

/// How a fresh grid gets its first live cells.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SeedPolicy {
    Pattern(&'static Pattern),
    /// Every cell is alive independently with probability `density`.
    Random { density: f64 },
}

impl Default for SeedPolicy {
    fn default() -> Self {
        SeedPolicy::Pattern(&DEFAULT_SEED)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct LifeCell {
    pub alive: bool,
}

impl LifeCell {
    pub const ALIVE: LifeCell = LifeCell { alive: true };
    pub const DEAD: LifeCell = LifeCell { alive: false };

    fn num_live_neighbors(neighborhood: &Neighborhood<LifeCell>) -> u32 {
        let mut result = 0;
        neighborhood.for_neighbor_cells(|neighbor| {
            if neighbor.alive {
                result += 1;
            }
        });
        result
    }
}

impl GridCell for LifeCell {
    fn color_rgba(&self) -> [u8; 4] {
        if self.alive { ALIVE_COLOR } else { DEAD_COLOR }
    }

    fn next(&self, neighborhood: &Neighborhood<LifeCell>) -> Self {
        let neighbors = Self::num_live_neighbors(neighborhood);
        LifeCell {
            alive: if self.alive {
                (2..=3).contains(&neighbors)
            } else {
                neighbors == 3
            },
        }
    }
}

/// Number of live cells among the neighbours of `loc`, in `0..=8`.
pub fn count_live_neighbors(grid: &Grid<LifeCell>, loc: Loc, edges: EdgeStrategy) -> u32 {
    LifeCell::num_live_neighbors(&Neighborhood::new(grid, loc, edges))
}

/// Applies the Game of Life rule to every cell of `grid`, returning a new grid.
pub fn step(grid: &Grid<LifeCell>, edges: EdgeStrategy) -> Grid<LifeCell> {
    grid.step(edges)
}

impl Grid<LifeCell> {
    pub fn population(&self) -> usize {
        self.cells_iter().filter(|cell| cell.alive).count()
    }

    pub fn seed(&mut self, policy: SeedPolicy, rand: &mut Random) -> Result<(), GridError> {
        match policy {
            SeedPolicy::Pattern(pattern) => self.seed_pattern(pattern),
            SeedPolicy::Random { density } => self.seed_random(density, rand),
        }
    }

    /// Brings the pattern's cells to life around `(height / 2, width / 2)`.
    /// Nothing is changed if any of them would fall off the grid.
    pub fn seed_pattern(&mut self, pattern: &Pattern) -> Result<(), GridError> {
        let center = Loc::new(self.height() / 2, self.width() / 2);
        let locs = pattern
            .cells
            .iter()
            .map(|&(row_offset, col_offset)| self.offset_loc(center, row_offset, col_offset))
            .collect::<Result<Vec<_>, _>>()?;
        for loc in locs {
            self[loc] = LifeCell::ALIVE;
        }
        Ok(())
    }

    pub fn seed_random(&mut self, density: f64, rand: &mut Random) -> Result<(), GridError> {
        if !(0.0..=1.0).contains(&density) {
            return Err(GridError::InvalidDensity(density));
        }
        for cell in self.cells_iter_mut() {
            if rand.next_bool(density) {
                *cell = LifeCell::ALIVE;
            }
        }
        Ok(())
    }

    fn offset_loc(&self, center: Loc, row_offset: i32, col_offset: i32) -> Result<Loc, GridError> {
        let row = center.row as i64 + row_offset as i64;
        let col = center.col as i64 + col_offset as i64;
        if (0..self.height() as i64).contains(&row) && (0..self.width() as i64).contains(&col) {
            Ok(Loc::new(row as u32, col as u32))
        } else {
            Err(GridError::OutOfBounds {
                row,
                col,
                width: self.width(),
                height: self.height(),
            })
        }
    }
}

/// The current generation of a running simulation.
#[derive(Debug)]
pub struct LifeWorld {
    grid: Grid<LifeCell>,
    edges: EdgeStrategy,
    generation: u64,
}

impl LifeWorld {
    pub fn new(
        width: u32,
        height: u32,
        seed: SeedPolicy,
        edges: EdgeStrategy,
        rand: &mut Random,
    ) -> Result<Self, GridError> {
        assert!(width > 0 && height > 0);
        let mut grid = Grid::new(width, height);
        grid.seed(seed, rand)?;
        info!(
            "Seeded {}x{} grid with {:?}: {} live cells",
            width,
            height,
            seed,
            grid.population()
        );
        Ok(Self::from_grid(grid, edges))
    }

    pub fn from_grid(grid: Grid<LifeCell>, edges: EdgeStrategy) -> Self {
        Self {
            grid,
            edges,
            generation: 0,
        }
    }

    pub fn grid(&self) -> &Grid<LifeCell> {
        &self.grid
    }

    pub fn edges(&self) -> EdgeStrategy {
        self.edges
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl World for LifeWorld {
    fn width(&self) -> u32 {
        self.grid.width()
    }

    fn height(&self) -> u32 {
        self.grid.height()
    }

    fn num_cells(&self) -> usize {
        self.grid.num_cells()
    }

    fn cells_iter(&self) -> impl DoubleEndedIterator<Item = &impl GridCell> + Clone {
        self.grid.cells_iter()
    }

    fn update(&mut self) {
        self.grid = step(&self.grid, self.edges);
        self.generation += 1;
        debug!(
            "Generation {}: {} live cells",
            self.generation,
            self.grid.population()
        );
    }
}
