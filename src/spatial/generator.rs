//! Seeded generation of synthetic jigsaw puzzles
//!
//! The generator draws one lattice image in which neighbouring tiles share
//! their border row or column, then cuts it into tiles. Seams are drawn one
//! at a time and redrawn until they are not palindromes and neither they nor
//! their reversal appear anywhere else, which is exactly the uniqueness the
//! assembler relies on. Interiors are random at a given density, with motif
//! instances optionally planted in composite image coordinates. Interiors
//! are redrawn until the motif search finds exactly the planted instances.

use std::collections::HashSet;

use log::debug;
use ndarray::{Array2, ArrayViewMut1, s};
use rand::seq::{SliceRandom, index};
use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::analysis::composite::interior_size;
use crate::analysis::patterns::{Motif, scan_orientations};
use crate::io::configuration::{
    DEFAULT_DENSITY, DEFAULT_GRID_SIZE, DEFAULT_MOTIF_COUNT, DEFAULT_TILE_SIZE, FIRST_TILE_ID,
    MAX_INTERIOR_ATTEMPTS, MAX_MOTIF_ATTEMPTS, MAX_SEAM_ATTEMPTS, MIN_GENERATED_TILE_SIZE,
    TILE_ID_RANGE,
};
use crate::io::error::{Result, computation_error, invalid_parameter};
use crate::spatial::tiles::{Edge, Orientation, Tile, TileId, reversed};

/// Parameters of a synthetic puzzle
#[derive(Clone, Copy, Debug)]
pub struct GeneratorConfig {
    /// Number of tiles per grid side
    pub grid_size: usize,
    /// Side length of every tile, border included
    pub tile_size: usize,
    /// Probability of an interior cell being active
    pub density: f64,
    /// Number of motif instances to plant
    pub motif_count: usize,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            grid_size: DEFAULT_GRID_SIZE,
            tile_size: DEFAULT_TILE_SIZE,
            density: DEFAULT_DENSITY,
            motif_count: DEFAULT_MOTIF_COUNT,
        }
    }
}

impl GeneratorConfig {
    /// Check the parameters describe a puzzle that can be generated
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The grid is smaller than 2x2 or needs more ids than are available
    /// - Tiles are smaller than 4x4
    /// - The density is outside `[0, 1]`
    /// - The seams cannot all be distinct at this tile size
    pub fn validate(&self) -> Result<()> {
        if self.grid_size < 2 {
            return Err(invalid_parameter(
                "grid_size",
                &self.grid_size,
                &"a jigsaw needs at least 2x2 tiles",
            ));
        }
        if self.grid_size * self.grid_size > TILE_ID_RANGE {
            return Err(invalid_parameter(
                "grid_size",
                &self.grid_size,
                &format!("at most {TILE_ID_RANGE} distinct tile ids are available"),
            ));
        }
        if self.tile_size < MIN_GENERATED_TILE_SIZE {
            return Err(invalid_parameter(
                "tile_size",
                &self.tile_size,
                &format!("tiles must be at least {MIN_GENERATED_TILE_SIZE}x{MIN_GENERATED_TILE_SIZE}"),
            ));
        }
        if !(0.0..=1.0).contains(&self.density) {
            return Err(invalid_parameter(
                "density",
                &self.density,
                &"must be between 0 and 1",
            ));
        }
        let capacity = seam_capacity(self.tile_size);
        if self.seam_count() > capacity {
            return Err(invalid_parameter(
                "tile_size",
                &self.tile_size,
                &format!(
                    "{} seams needed but only {capacity} distinct seams exist",
                    self.seam_count()
                ),
            ));
        }
        Ok(())
    }

    /// Number of distinct seams in the lattice, outer border included
    pub const fn seam_count(&self) -> usize {
        2 * self.grid_size * (self.grid_size + 1)
    }

    /// Side length of the lattice image tiles are cut from
    pub const fn lattice_size(&self) -> usize {
        self.grid_size * (self.tile_size - 1) + 1
    }

    /// Side length of the composite image the puzzle assembles into
    pub const fn composite_size(&self) -> usize {
        self.grid_size * interior_size(self.tile_size)
    }
}

/// A generated puzzle with the facts needed to check a solution
#[derive(Debug, Clone)]
pub struct GeneratedPuzzle {
    /// Tiles in shuffled order, each under a random symmetry
    pub tiles: Vec<Tile>,
    /// Identifiers of the tiles at the NW, NE, SW and SE lattice corners
    pub corner_ids: [TileId; 4],
    /// Number of motif instances planted
    pub planted_motifs: usize,
    /// Composite image in lattice orientation
    pub composite: Array2<bool>,
}

impl GeneratedPuzzle {
    /// Product of the four corner identifiers
    pub fn corner_product(&self) -> u64 {
        self.corner_ids.iter().product()
    }
}

/// Generate a puzzle from a seed
///
/// The same configuration, motif and seed always produce the same puzzle.
///
/// # Errors
///
/// Returns an error if the configuration is invalid, motifs are requested
/// but the motif is larger than the composite image, or a seam or an
/// interior free of unplanted motifs could not be drawn within the attempt
/// limit
pub fn generate_puzzle(config: &GeneratorConfig, motif: &Motif, seed: u64) -> Result<GeneratedPuzzle> {
    config.validate()?;
    let (rows, cols) = motif.dim();
    if config.motif_count > 0 && (rows > config.composite_size() || cols > config.composite_size()) {
        return Err(invalid_parameter(
            "motifs",
            &config.motif_count,
            &format!(
                "a {rows}x{cols} motif does not fit a {side}x{side} image",
                side = config.composite_size()
            ),
        ));
    }
    let mut rng = StdRng::seed_from_u64(seed);

    let mut lattice = random_lattice(config, &mut rng);
    draw_seams(config, &mut lattice, &mut rng)?;
    let (planted_motifs, composite) = plant_interior(config, motif, &mut lattice, &mut rng)?;

    let ids: Vec<TileId> = index::sample(&mut rng, TILE_ID_RANGE, config.grid_size * config.grid_size)
        .into_iter()
        .map(|offset| FIRST_TILE_ID + offset as u64)
        .collect();

    let step = config.tile_size - 1;
    let last = config.grid_size - 1;
    let mut corner_ids = [0; 4];
    let mut tiles = Vec::with_capacity(ids.len());
    for (position, &id) in ids.iter().enumerate() {
        let (ty, tx) = (position / config.grid_size, position % config.grid_size);
        let cells = lattice.slice(s![
            ty * step..ty * step + config.tile_size,
            tx * step..tx * step + config.tile_size
        ]);
        let orientation = Orientation::ALL
            .get(rng.random_range(0..Orientation::ALL.len()))
            .copied()
            .unwrap_or_default();
        tiles.push(Tile::new(id, orientation.apply(&cells))?);

        let corner = match (tx, ty) {
            (0, 0) => Some(0),
            (x, 0) if x == last => Some(1),
            (0, y) if y == last => Some(2),
            (x, y) if x == last && y == last => Some(3),
            _ => None,
        };
        if let Some(slot) = corner.and_then(|corner_index| corner_ids.get_mut(corner_index)) {
            *slot = id;
        }
    }
    tiles.shuffle(&mut rng);

    debug!(
        "Generated {}x{} puzzle of {}x{} tiles with {planted_motifs} motifs (seed {seed})",
        config.grid_size, config.grid_size, config.tile_size, config.tile_size
    );

    Ok(GeneratedPuzzle {
        tiles,
        corner_ids,
        planted_motifs,
        composite,
    })
}

// Upper bound on distinct non-palindromic seams of a given length, counting
// a seam and its reversal once
const fn seam_capacity(tile_size: usize) -> usize {
    if tile_size >= usize::BITS as usize {
        return usize::MAX;
    }
    let all = 1_usize << tile_size;
    let palindromes = 1_usize << tile_size.div_ceil(2);
    (all - palindromes) / 2
}

fn random_lattice(config: &GeneratorConfig, rng: &mut StdRng) -> Array2<bool> {
    let side = config.lattice_size();
    Array2::from_shape_simple_fn((side, side), || rng.random_bool(config.density))
}

// Seam endpoints sit on lattice points shared with perpendicular seams, so
// they stay as drawn; only the cells strictly between them are redrawn.
fn draw_seams(config: &GeneratorConfig, lattice: &mut Array2<bool>, rng: &mut StdRng) -> Result<()> {
    let step = config.tile_size - 1;
    let mut used: HashSet<Edge> = HashSet::with_capacity(2 * config.seam_count());

    for line in 0..=config.grid_size {
        for segment in 0..config.grid_size {
            let fixed = line * step;
            let start = segment * step;
            draw_seam(
                lattice.slice_mut(s![fixed, start..=start + step]),
                &mut used,
                rng,
            )?;
            draw_seam(
                lattice.slice_mut(s![start..=start + step, fixed]),
                &mut used,
                rng,
            )?;
        }
    }
    Ok(())
}

fn draw_seam(
    mut seam: ArrayViewMut1<'_, bool>,
    used: &mut HashSet<Edge>,
    rng: &mut StdRng,
) -> Result<()> {
    let length = seam.len();
    for _ in 0..MAX_SEAM_ATTEMPTS {
        for i in 1..length - 1 {
            if let Some(cell) = seam.get_mut(i) {
                *cell = rng.random_bool(0.5);
            }
        }
        let edge: Edge = seam.iter().copied().collect();
        let reverse = reversed(&edge);
        if edge != reverse && !used.contains(&edge) && !used.contains(&reverse) {
            used.insert(edge);
            used.insert(reverse);
            return Ok(());
        }
    }
    Err(computation_error(
        "seam generation",
        &format!("no unique seam found in {MAX_SEAM_ATTEMPTS} attempts"),
    ))
}

// Accepts an interior once every symmetry holds as many motif matches as
// the planted cells alone produce
fn plant_interior(
    config: &GeneratorConfig,
    motif: &Motif,
    lattice: &mut Array2<bool>,
    rng: &mut StdRng,
) -> Result<(usize, Array2<bool>)> {
    for attempt in 0..MAX_INTERIOR_ATTEMPTS {
        if attempt > 0 {
            redraw_interior(config, lattice, rng);
        }
        let (planted, planted_cells) = plant_motifs(config, motif, lattice, rng);
        let expected = scan_orientations(&planted_cells, motif);
        let planted_found = expected
            .iter()
            .any(|&(orientation, count)| orientation == Orientation::IDENTITY && count == planted);
        let composite = lattice_interior(config, lattice);
        if planted_found && scan_orientations(&composite, motif) == expected {
            debug!("Interior accepted after {} draws", attempt + 1);
            return Ok((planted, composite));
        }
    }
    Err(computation_error(
        "motif planting",
        &format!("no interior with only the planted motifs in {MAX_INTERIOR_ATTEMPTS} attempts"),
    ))
}

fn redraw_interior(config: &GeneratorConfig, lattice: &mut Array2<bool>, rng: &mut StdRng) {
    let side = config.composite_size();
    for r in 0..side {
        for c in 0..side {
            let [lr, lc] = lattice_position(config, [r, c]);
            if let Some(cell) = lattice.get_mut((lr, lc)) {
                *cell = rng.random_bool(config.density);
            }
        }
    }
}

// Planted motifs never overlap each other; returns how many were placed
// along with the composite image of their cells alone
fn plant_motifs(
    config: &GeneratorConfig,
    motif: &Motif,
    lattice: &mut Array2<bool>,
    rng: &mut StdRng,
) -> (usize, Array2<bool>) {
    let side = config.composite_size();
    let (rows, cols) = motif.dim();

    let mut occupied = Array2::from_elem((side, side), false);
    let mut planted_cells = Array2::from_elem((side, side), false);
    let mut planted = 0;
    for _ in 0..config.motif_count {
        for _ in 0..MAX_MOTIF_ATTEMPTS {
            let r = rng.random_range(0..=side - rows);
            let c = rng.random_range(0..=side - cols);
            if occupied
                .slice(s![r..r + rows, c..c + cols])
                .iter()
                .any(|&cell| cell)
            {
                continue;
            }
            occupied.slice_mut(s![r..r + rows, c..c + cols]).fill(true);
            for ((mr, mc), &care) in motif.cells().indexed_iter() {
                if care {
                    if let Some(cell) = planted_cells.get_mut((r + mr, c + mc)) {
                        *cell = true;
                    }
                    let [lr, lc] = lattice_position(config, [r + mr, c + mc]);
                    if let Some(cell) = lattice.get_mut((lr, lc)) {
                        *cell = true;
                    }
                }
            }
            planted += 1;
            break;
        }
    }
    (planted, planted_cells)
}

// Composite cell -> lattice cell, skipping the shared border rows and columns
const fn lattice_position(config: &GeneratorConfig, composite: [usize; 2]) -> [usize; 2] {
    let interior = interior_size(config.tile_size);
    let step = config.tile_size - 1;
    [
        composite[0] / interior * step + composite[0] % interior + 1,
        composite[1] / interior * step + composite[1] % interior + 1,
    ]
}

fn lattice_interior(config: &GeneratorConfig, lattice: &Array2<bool>) -> Array2<bool> {
    let side = config.composite_size();
    Array2::from_shape_fn((side, side), |(r, c)| {
        let [lr, lc] = lattice_position(config, [r, c]);
        lattice.get((lr, lc)).copied().unwrap_or(false)
    })
}
