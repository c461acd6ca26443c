//! Per-file stage progress with an optional batch bar for multi-file runs

use crate::io::configuration::{BATCH_PROGRESS_THRESHOLD, PIPELINE_STAGES};
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::fmt;
use std::path::Path;
use std::sync::LazyLock;

/// Pipeline stage reported while solving one puzzle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Reading and parsing the puzzle text
    Parse,
    /// Building the edge index and detecting corners
    Index,
    /// Resolving every grid position
    Assemble,
    /// Stitching tile interiors into the composite image
    Compose,
    /// Searching the composite image for the motif
    Search,
}

impl Stage {
    /// Stages in execution order
    pub const ALL: [Self; PIPELINE_STAGES as usize] = [
        Self::Parse,
        Self::Index,
        Self::Assemble,
        Self::Compose,
        Self::Search,
    ];

    /// Number of stages completed once this stage starts
    pub const fn position(self) -> u64 {
        match self {
            Self::Parse => 0,
            Self::Index => 1,
            Self::Assemble => 2,
            Self::Compose => 3,
            Self::Search => 4,
        }
    }

    /// Short label shown next to the progress bar
    pub const fn label(self) -> &'static str {
        match self {
            Self::Parse => "parsing",
            Self::Index => "indexing edges",
            Self::Assemble => "assembling",
            Self::Compose => "compositing",
            Self::Search => "searching",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

static STAGE_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("{prefix} [{bar:30.cyan/blue}] {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("█▉▊▋▌▍▎▏ ")
});

static BATCH_STYLE: LazyLock<ProgressStyle> = LazyLock::new(|| {
    ProgressStyle::default_bar()
        .template("[{elapsed_precise}] Puzzles: [{bar:40.cyan/blue}] {pos}/{len}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
});

/// Coordinates progress display for a batch of puzzles
///
/// One bar follows the pipeline stages of the puzzle being solved; a batch
/// bar counting finished puzzles is added when more than one file is queued.
pub struct ProgressManager {
    multi_progress: MultiProgress,
    batch_bar: Option<ProgressBar>,
    stage_bar: Option<ProgressBar>,
    file_count: usize,
}

impl Default for ProgressManager {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressManager {
    /// Create a progress manager with no bars yet
    pub fn new() -> Self {
        Self {
            multi_progress: MultiProgress::new(),
            batch_bar: None,
            stage_bar: None,
            file_count: 0,
        }
    }

    /// Create the bars for a batch of `file_count` puzzles
    pub fn initialize(&mut self, file_count: usize) {
        self.file_count = file_count;

        if file_count > BATCH_PROGRESS_THRESHOLD {
            let batch_bar = ProgressBar::new(file_count as u64);
            batch_bar.set_style(BATCH_STYLE.clone());
            self.batch_bar = Some(self.multi_progress.add(batch_bar));
        }

        let stage_bar = ProgressBar::new(PIPELINE_STAGES);
        stage_bar.set_style(STAGE_STYLE.clone());
        self.stage_bar = Some(self.multi_progress.add(stage_bar));
    }

    /// Number of puzzles in the batch
    pub const fn file_count(&self) -> usize {
        self.file_count
    }

    /// Reset the stage bar for a new puzzle
    pub fn start_file(&self, path: &Path) {
        if let Some(bar) = &self.stage_bar {
            bar.set_prefix(
                path.file_name()
                    .unwrap_or_default()
                    .to_string_lossy()
                    .to_string(),
            );
            bar.set_position(0);
            bar.set_message(String::new());
        }
    }

    /// Report that a stage has started
    pub fn enter_stage(&self, stage: Stage) {
        if let Some(bar) = &self.stage_bar {
            bar.set_position(stage.position());
            bar.set_message(stage.label());
        }
    }

    /// Mark the current puzzle as finished
    pub fn complete_file(&self) {
        if let Some(bar) = &self.stage_bar {
            bar.set_position(PIPELINE_STAGES);
            bar.set_message("done");
        }
        if let Some(bar) = &self.batch_bar {
            bar.inc(1);
        }
    }

    /// Clean up all progress displays
    pub fn finish(&self) {
        if let Some(bar) = &self.stage_bar {
            bar.finish_and_clear();
        }
        if let Some(bar) = &self.batch_bar {
            bar.finish_with_message("All puzzles processed");
        }
        let _ = self.multi_progress.clear();
    }

    /// Whether the stage bar has been finished and cleared
    pub fn is_finished(&self) -> bool {
        self.stage_bar.as_ref().is_some_and(ProgressBar::is_finished)
    }

    /// Whether a batch bar is shown
    pub const fn has_batch_bar(&self) -> bool {
        self.batch_bar.is_some()
    }
}
