//! Command-line interface for solving puzzle files and generating new ones

use crate::algorithm::executor::JigsawSolver;
use crate::analysis::patterns::{Motif, find_motif};
use crate::io::configuration::{
    ASSEMBLY_SUFFIX, COMPOSITE_SUFFIX, DEFAULT_DENSITY, DEFAULT_GRID_SIZE, DEFAULT_MOTIF_COUNT,
    DEFAULT_SEED, DEFAULT_TILE_SIZE, GIF_FRAME_DELAY_MS, IMAGE_SCALE, INPUT_EXTENSION,
};
use crate::io::error::{JigsawError, Result, invalid_parameter};
use crate::io::image::export_composite_png;
use crate::io::input::format_tiles;
use crate::io::progress::{ProgressManager, Stage};
use crate::io::visualization::AssemblyCapture;
use crate::spatial::generator::{GeneratedPuzzle, GeneratorConfig, generate_puzzle};
use clap::{Args, Parser, Subcommand};
use log::{LevelFilter, debug, info, warn};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "tilestitch")]
#[command(
    author,
    version,
    about = "Assemble square-tile jigsaws and search the result for a motif"
)]
/// Command-line arguments for the jigsaw tool
pub struct Cli {
    /// Operation to run
    #[command(subcommand)]
    pub command: Command,

    /// Log every pipeline stage and placement
    #[arg(long, global = true)]
    pub verbose: bool,
}

/// Subcommands of the jigsaw tool
#[derive(Subcommand)]
pub enum Command {
    /// Solve a puzzle file or every puzzle in a directory
    Solve(SolveArgs),
    /// Write a synthetic puzzle with a known solution
    Generate(GenerateArgs),
}

/// Arguments of the `solve` subcommand
#[derive(Args, Clone, Debug)]
pub struct SolveArgs {
    /// Puzzle text file or directory of puzzle files
    #[arg(value_name = "TARGET")]
    pub target: PathBuf,

    /// Write the composite image as a PNG with motif cells highlighted
    #[arg(short, long)]
    pub image: bool,

    /// Write the assembly as an animated GIF
    #[arg(short, long)]
    pub visualize: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl SolveArgs {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }
}

/// Arguments of the `generate` subcommand
#[derive(Args, Clone, Debug)]
pub struct GenerateArgs {
    /// Path of the puzzle text file to write
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Number of tiles per grid side
    #[arg(short, long, default_value_t = DEFAULT_GRID_SIZE)]
    pub grid_size: usize,

    /// Side length of every tile, border included
    #[arg(short, long, default_value_t = DEFAULT_TILE_SIZE)]
    pub tile_size: usize,

    /// Probability of an interior cell being active
    #[arg(short, long, default_value_t = DEFAULT_DENSITY)]
    pub density: f64,

    /// Number of motif instances to plant
    #[arg(short, long, default_value_t = DEFAULT_MOTIF_COUNT)]
    pub motifs: usize,
}

impl GenerateArgs {
    /// Generator parameters taken from the arguments
    pub const fn config(&self) -> GeneratorConfig {
        GeneratorConfig {
            grid_size: self.grid_size,
            tile_size: self.tile_size,
            density: self.density,
            motif_count: self.motifs,
        }
    }
}

/// Answers computed for one puzzle file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileReport {
    /// Puzzle file the answers belong to
    pub path: PathBuf,
    /// Product of the four corner tile identifiers
    pub corner_product: u64,
    /// Active cells left uncovered by motif occurrences
    pub roughness: usize,
    /// Number of motif occurrences found
    pub motif_count: usize,
}

impl std::fmt::Display for FileReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}: corners={} roughness={}",
            self.path
                .file_name()
                .unwrap_or_default()
                .to_string_lossy(),
            self.corner_product,
            self.roughness
        )
    }
}

/// Install the `env_logger` backend
///
/// The level is `warn`, or `debug` when `verbose` is set; `RUST_LOG`
/// overrides both. Calling this more than once has no effect.
pub fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .try_init();
}

/// Run a parsed command line
///
/// # Errors
///
/// Returns the first error raised while solving or generating
// Answers go to standard output
#[allow(clippy::print_stdout)]
pub fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose);
    match cli.command {
        Command::Solve(args) => {
            let mut processor = FileProcessor::new(args);
            for report in processor.process()? {
                println!("{report}");
            }
        }
        Command::Generate(args) => {
            let puzzle = generate_to_file(&args)?;
            println!(
                "{}: corners={} motifs={}",
                args.output.display(),
                puzzle.corner_product(),
                puzzle.planted_motifs
            );
        }
    }
    Ok(())
}

/// Generate a puzzle and write it in the puzzle text format
///
/// # Errors
///
/// Returns an error if the parameters are invalid or the file cannot be written
pub fn generate_to_file(args: &GenerateArgs) -> Result<GeneratedPuzzle> {
    let puzzle = generate_puzzle(&args.config(), &Motif::default(), args.seed)?;

    if let Some(parent) = args.output.parent() {
        std::fs::create_dir_all(parent).map_err(|e| JigsawError::FileSystem {
            path: parent.to_path_buf(),
            operation: "create directory",
            source: e,
        })?;
    }
    std::fs::write(&args.output, format_tiles(&puzzle.tiles)).map_err(|e| {
        JigsawError::FileSystem {
            path: args.output.clone(),
            operation: "write puzzle",
            source: e,
        }
    })?;

    info!(
        "Wrote {} tiles to {} (corners {:?})",
        puzzle.tiles.len(),
        args.output.display(),
        puzzle.corner_ids
    );
    Ok(puzzle)
}

/// Orchestrates batch solving of puzzle files with progress tracking
pub struct FileProcessor {
    args: SolveArgs,
    motif: Motif,
    progress_manager: Option<ProgressManager>,
}

impl FileProcessor {
    /// Create a new file processor searching for the default motif
    pub fn new(args: SolveArgs) -> Self {
        Self::with_motif(args, Motif::default())
    }

    /// Create a new file processor searching for a custom motif
    pub fn with_motif(args: SolveArgs, motif: Motif) -> Self {
        let progress_manager = args.should_show_progress().then(ProgressManager::new);

        Self {
            args,
            motif,
            progress_manager,
        }
    }

    /// Solve every puzzle named by the target
    ///
    /// # Errors
    ///
    /// Returns an error if target validation fails or any puzzle cannot be
    /// read, solved or exported
    pub fn process(&mut self) -> Result<Vec<FileReport>> {
        let files = self.collect_files()?;

        if files.is_empty() {
            warn!("No puzzle files found in {}", self.args.target.display());
            return Ok(Vec::new());
        }

        if let Some(pm) = &mut self.progress_manager {
            pm.initialize(files.len());
        }

        // Stops at the first failing file; the bars are cleared either way
        let reports = files
            .iter()
            .map(|file| self.process_file(file))
            .collect::<Result<Vec<_>>>();

        if let Some(pm) = &self.progress_manager {
            pm.finish();
        }

        reports
    }

    /// Progress display, absent when running quietly
    pub const fn progress(&self) -> Option<&ProgressManager> {
        self.progress_manager.as_ref()
    }

    /// Puzzle files named by the target, sorted by path
    ///
    /// # Errors
    ///
    /// Returns an error if the target is neither a puzzle file nor a
    /// readable directory
    pub fn collect_files(&self) -> Result<Vec<PathBuf>> {
        let target = &self.args.target;
        if target.is_file() {
            if is_puzzle_file(target) {
                Ok(vec![target.clone()])
            } else {
                Err(invalid_parameter(
                    "target",
                    &target.display(),
                    &format!("puzzle files must have the .{INPUT_EXTENSION} extension"),
                ))
            }
        } else if target.is_dir() {
            let read_error = |e: std::io::Error| JigsawError::FileSystem {
                path: target.clone(),
                operation: "read directory",
                source: e,
            };
            let mut files = Vec::new();
            for entry in std::fs::read_dir(target).map_err(read_error)? {
                let path = entry.map_err(read_error)?.path();
                if path.is_file() && is_puzzle_file(&path) {
                    files.push(path);
                }
            }
            files.sort();
            Ok(files)
        } else {
            Err(invalid_parameter(
                "target",
                &target.display(),
                &"must be a puzzle file or a directory",
            ))
        }
    }

    fn process_file(&self, input_path: &Path) -> Result<FileReport> {
        if let Some(pm) = &self.progress_manager {
            pm.start_file(input_path);
        }
        self.enter(Stage::Parse);
        let text = std::fs::read_to_string(input_path).map_err(|e| JigsawError::FileSystem {
            path: input_path.to_path_buf(),
            operation: "read puzzle",
            source: e,
        })?;

        self.enter(Stage::Index);
        let solver = JigsawSolver::from_input(&text)?;
        let corner_product = solver.corner_product()?;

        self.enter(Stage::Assemble);
        let grid = solver.assemble()?;
        if self.args.visualize {
            let gif_path = output_path(input_path, ASSEMBLY_SUFFIX, "gif");
            AssemblyCapture::from_grid(solver.tiles(), &grid, IMAGE_SCALE)?
                .export_gif(&gif_path, GIF_FRAME_DELAY_MS)?;
            info!("Wrote {}", gif_path.display());
        }

        self.enter(Stage::Compose);
        let composite = solver.compose(&grid)?;

        self.enter(Stage::Search);
        let search = find_motif(&composite, &self.motif)?;
        if self.args.image {
            let png_path = output_path(input_path, COMPOSITE_SUFFIX, "png");
            let marked = search.marked_cells(&self.motif);
            export_composite_png(&search.image, Some(&marked), IMAGE_SCALE, &png_path)?;
            info!("Wrote {}", png_path.display());
        }

        if let Some(pm) = &self.progress_manager {
            pm.complete_file();
        }

        Ok(FileReport {
            path: input_path.to_path_buf(),
            corner_product,
            roughness: search.roughness(),
            motif_count: search.occurrences.len(),
        })
    }

    fn enter(&self, stage: Stage) {
        debug!("Stage: {stage}");
        if let Some(pm) = &self.progress_manager {
            pm.enter_stage(stage);
        }
    }
}

fn is_puzzle_file(path: &Path) -> bool {
    path.extension().and_then(|s| s.to_str()) == Some(INPUT_EXTENSION)
}

/// Sibling path `<stem><suffix>.<extension>` of an input file
pub fn output_path(input_path: &Path, suffix: &str, extension: &str) -> PathBuf {
    let stem = input_path.file_stem().unwrap_or_default();
    let output_name = format!("{}{suffix}.{extension}", stem.to_string_lossy());

    if let Some(parent) = input_path.parent() {
        parent.join(output_name)
    } else {
        PathBuf::from(output_name)
    }
}
