//! Puzzle text parsing and formatting
//!
//! A puzzle is a list of blocks separated by blank lines. Each block starts
//! with a label line `Tile <id>:` followed by D rows of D cells, `#` for an
//! active cell and `.` for an inactive one.

use std::collections::HashSet;

use ndarray::Array2;

use crate::io::configuration::{
    ACTIVE_CELL, INACTIVE_CELL, MIN_TILE_SIZE, TILE_LABEL_DELIMITER, TILE_LABEL_KEYWORD,
};
use crate::io::error::{JigsawError, Result, parse_error};
use crate::spatial::tiles::{Tile, TileId};

/// Parse every tile of a puzzle
///
/// Tiles keep the order in which they appear in the text.
///
/// # Errors
///
/// Returns an error if:
/// - A label line is malformed or a row holds an unknown character
/// - A tile is not square, or tiles differ in size
/// - A tile is smaller than 3x3
/// - Two tiles share an identifier, or the text holds no tile at all
pub fn parse_tiles(text: &str) -> Result<Vec<Tile>> {
    let mut tiles = Vec::new();
    let mut block: Vec<(usize, &str)> = Vec::new();

    for (index, line) in text.lines().enumerate() {
        let line = line.trim_end();
        if line.is_empty() {
            if !block.is_empty() {
                tiles.push(parse_block(&block)?);
                block.clear();
            }
        } else {
            block.push((index + 1, line));
        }
    }
    if !block.is_empty() {
        tiles.push(parse_block(&block)?);
    }

    validate_tiles(&tiles)?;
    Ok(tiles)
}

/// Write tiles back in the puzzle text format
pub fn format_tiles(tiles: &[Tile]) -> String {
    let mut text = String::new();
    for (index, tile) in tiles.iter().enumerate() {
        if index > 0 {
            text.push('\n');
        }
        text.push_str(&format!(
            "{TILE_LABEL_KEYWORD} {}{TILE_LABEL_DELIMITER}\n",
            tile.id()
        ));
        for row in tile.cells().rows() {
            text.extend(
                row.iter()
                    .map(|&cell| if cell { ACTIVE_CELL } else { INACTIVE_CELL }),
            );
            text.push('\n');
        }
    }
    text
}

/// Parse the identifier out of a label line such as `Tile 2311:`
///
/// # Errors
///
/// Returns an error if the keyword, the delimiter or the number is missing
pub fn parse_label(line_number: usize, line: &str) -> Result<TileId> {
    let rest = line
        .strip_prefix(TILE_LABEL_KEYWORD)
        .and_then(|rest| rest.strip_prefix(' '))
        .ok_or_else(|| {
            parse_error(
                line_number,
                &format!("expected '{TILE_LABEL_KEYWORD} <id>{TILE_LABEL_DELIMITER}', found '{line}'"),
            )
        })?;
    let digits = rest.strip_suffix(TILE_LABEL_DELIMITER).ok_or_else(|| {
        parse_error(
            line_number,
            &format!("label '{line}' does not end with '{TILE_LABEL_DELIMITER}'"),
        )
    })?;
    digits.trim().parse::<TileId>().map_err(|e| {
        parse_error(
            line_number,
            &format!("invalid tile id '{digits}': {e}"),
        )
    })
}

fn parse_block(block: &[(usize, &str)]) -> Result<Tile> {
    let Some((&(label_line, label), rows)) = block.split_first() else {
        return Err(JigsawError::InvalidSourceData {
            reason: "empty tile block".to_string(),
        });
    };
    let id = parse_label(label_line, label)?;

    let size = rows.len();
    let mut cells = Array2::from_elem((size, size), false);
    for (r, &(line_number, row)) in rows.iter().enumerate() {
        let width = row.chars().count();
        if width != size {
            return Err(parse_error(
                line_number,
                &format!("tile {id} row has {width} cells, expected {size}"),
            ));
        }
        for (c, symbol) in row.chars().enumerate() {
            let active = match symbol {
                ACTIVE_CELL => true,
                INACTIVE_CELL => false,
                other => {
                    return Err(parse_error(
                        line_number,
                        &format!("unexpected cell character '{other}'"),
                    ));
                }
            };
            if let Some(cell) = cells.get_mut((r, c)) {
                *cell = active;
            }
        }
    }

    Tile::new(id, cells)
}

fn validate_tiles(tiles: &[Tile]) -> Result<()> {
    let Some(first) = tiles.first() else {
        return Err(JigsawError::InvalidSourceData {
            reason: "puzzle contains no tiles".to_string(),
        });
    };

    let size = first.size();
    if size < MIN_TILE_SIZE {
        return Err(JigsawError::InvalidSourceData {
            reason: format!("tiles are {size}x{size}, at least {MIN_TILE_SIZE}x{MIN_TILE_SIZE} required"),
        });
    }

    let mut seen = HashSet::with_capacity(tiles.len());
    for tile in tiles {
        if tile.size() != size {
            return Err(JigsawError::InvalidSourceData {
                reason: format!(
                    "tile {} is {}x{}, expected {size}x{size}",
                    tile.id(),
                    tile.size(),
                    tile.size()
                ),
            });
        }
        if !seen.insert(tile.id()) {
            return Err(JigsawError::InvalidSourceData {
                reason: format!("duplicate tile id {}", tile.id()),
            });
        }
    }
    Ok(())
}
