//! Tests for grid assembly from detected corners

#[cfg(test)]
mod tests {
    use crate::{GRID_IDS, bitmap, puzzle_tiles, tile_index};
    use ndarray::Array2;
    use tilestitch::JigsawError;
    use tilestitch::algorithm::assembly::GridAssembler;
    use tilestitch::algorithm::edges::EdgeIndex;
    use tilestitch::spatial::grid::Grid;
    use tilestitch::spatial::tiles::{Direction, Orientation, Tile};

    fn assemble(tiles: &[Tile]) -> Grid {
        let index = EdgeIndex::build(tiles);
        let corners = index.classify(tiles).unwrap().corners;
        GridAssembler::new(tiles, &index)
            .unwrap()
            .assemble(&corners)
            .unwrap()
    }

    fn id_grid(tiles: &[Tile], grid: &Grid) -> Vec<Vec<u64>> {
        (0..grid.dimension())
            .map(|y| {
                (0..grid.dimension())
                    .map(|x| tiles[grid.get([x, y]).unwrap().tile].id())
                    .collect()
            })
            .collect()
    }

    // Tests the assembled grid places every tile at its expected position
    // Verified by starting from the largest corner identifier
    #[test]
    fn test_assembled_layout() {
        let tiles = puzzle_tiles();
        let grid = assemble(&tiles);
        assert!(grid.is_complete());

        let expected: Vec<Vec<u64>> = GRID_IDS.iter().map(|row| row.to_vec()).collect();
        assert_eq!(id_grid(&tiles, &grid), expected);
    }

    // Tests the chosen orientations, starting from the identity at the corner
    // Verified by picking the last matching symmetry instead of the first
    #[test]
    fn test_assembled_orientations() {
        let tiles = puzzle_tiles();
        let grid = assemble(&tiles);
        let expected = [
            [(0, false), (1, true), (1, false)],
            [(2, true), (3, false), (0, true)],
            [(2, false), (3, true), (2, false)],
        ];
        for (y, row) in expected.iter().enumerate() {
            for (x, &(turns, mirrored)) in row.iter().enumerate() {
                assert_eq!(
                    grid.get([x, y]).unwrap().orientation,
                    Orientation::new(turns, mirrored),
                    "position ({x}, {y})"
                );
            }
        }
    }

    // Tests every seam of the assembled grid agrees on both sides
    // Verified by comparing the candidate's south edge instead of its north edge
    #[test]
    fn test_seams_agree() {
        let tiles = puzzle_tiles();
        let grid = assemble(&tiles);
        for ([x, y], placement) in grid.placements() {
            let tile = &tiles[placement.tile];
            if let Some(east) = grid.neighbor([x, y], Direction::East) {
                assert_eq!(
                    tile.edge(placement.orientation, Direction::East),
                    tiles[east.tile].edge(east.orientation, Direction::West)
                );
            }
            if let Some(south) = grid.neighbor([x, y], Direction::South) {
                assert_eq!(
                    tile.edge(placement.orientation, Direction::South),
                    tiles[south.tile].edge(south.orientation, Direction::North)
                );
            }
        }
    }

    // Tests assembly is reproducible regardless of corner list order
    // Verified by taking the first listed corner instead of the smallest id
    #[test]
    fn test_assembly_is_deterministic() {
        let tiles = puzzle_tiles();
        let index = EdgeIndex::build(&tiles);
        let mut corners = index.classify(&tiles).unwrap().corners;
        let first = GridAssembler::new(&tiles, &index)
            .unwrap()
            .assemble(&corners)
            .unwrap();
        corners.reverse();
        let second = GridAssembler::new(&tiles, &index)
            .unwrap()
            .assemble(&corners)
            .unwrap();
        assert_eq!(first, second);
    }

    // Tests the initial corner gets the first symmetry leaving north and west unmatched
    // Verified by checking only the north edge
    #[test]
    fn test_initial_corner_orientation() {
        let tiles = puzzle_tiles();
        let index = EdgeIndex::build(&tiles);
        let corner = tile_index(&tiles, 3511);
        let mut assembler = GridAssembler::new(&tiles, &index).unwrap();
        assembler.place_initial_corner(corner).unwrap();

        let placement = *assembler.grid().get([0, 0]).unwrap();
        assert_eq!(placement.tile, corner);
        let tile = &tiles[corner];
        assert!(index.is_unmatched(&tile.edge(placement.orientation, Direction::North)));
        assert!(index.is_unmatched(&tile.edge(placement.orientation, Direction::West)));
        assert_eq!(assembler.grid().resolved(), 1);
    }

    // Tests a non-corner tile cannot start the grid
    // Verified by accepting any orientation for the initial corner
    #[test]
    fn test_interior_tile_cannot_start() {
        let tiles = puzzle_tiles();
        let index = EdgeIndex::build(&tiles);
        let center = tile_index(&tiles, 3307);
        let mut assembler = GridAssembler::new(&tiles, &index).unwrap();
        assert!(matches!(
            assembler.place_initial_corner(center),
            Err(JigsawError::OrientationExhausted {
                position: [0, 0],
                tile_id: 3307
            })
        ));
    }

    // Tests a position without resolved neighbours has no candidate
    // Verified by resolving against an empty edge set
    #[test]
    fn test_position_without_neighbors() {
        let tiles = puzzle_tiles();
        let index = EdgeIndex::build(&tiles);
        let mut assembler = GridAssembler::new(&tiles, &index).unwrap();
        assert!(matches!(
            assembler.resolve_position([2, 2]),
            Err(JigsawError::NoCandidate { position: [2, 2] })
        ));
    }

    // Tests three tiles sharing one edge make the placement ambiguous
    // Verified by taking the lowest candidate instead of failing
    #[test]
    fn test_ambiguous_placement() {
        let corner = Tile::new(10, bitmap("##..\n#...\n...#\n....")).unwrap();
        let mut tiles = vec![corner];
        for id in 11..=13 {
            tiles.push(Tile::new(id, bitmap("....\n....\n#...\n....")).unwrap());
        }
        let index = EdgeIndex::build(&tiles);
        let mut assembler = GridAssembler::new(&tiles, &index).unwrap();
        assembler.place_initial_corner(0).unwrap();
        assert_eq!(
            assembler.grid().get([0, 0]).unwrap().orientation,
            Orientation::IDENTITY
        );

        let result = assembler.resolve_position([1, 0]);
        assert!(
            matches!(
                &result,
                Err(JigsawError::AmbiguousPlacement {
                    position: [1, 0],
                    candidates,
                }) if candidates == &[11, 12, 13]
            ),
            "expected an ambiguous placement, got {result:?}"
        );
    }

    // Tests a tile with no unmatched sides cannot start even a blank grid
    // Verified by treating shared edges as unmatched
    #[test]
    fn test_blank_tiles_have_no_corner() {
        let tiles: Vec<Tile> = (1..=4)
            .map(|id| Tile::new(id, Array2::from_elem((3, 3), false)).unwrap())
            .collect();
        let index = EdgeIndex::build(&tiles);
        let mut assembler = GridAssembler::new(&tiles, &index).unwrap();
        assert!(matches!(
            assembler.place_initial_corner(0),
            Err(JigsawError::OrientationExhausted { .. })
        ));
    }

    // Tests an empty corner list is rejected
    // Verified by defaulting to tile zero
    #[test]
    fn test_no_corners() {
        let tiles = puzzle_tiles();
        let index = EdgeIndex::build(&tiles);
        let assembler = GridAssembler::new(&tiles, &index).unwrap();
        assert!(matches!(
            assembler.assemble(&[]),
            Err(JigsawError::CornerCount { found: 0 })
        ));
    }

    // Tests a tile count that is not a perfect square is rejected up front
    // Verified by rounding the grid dimension down
    #[test]
    fn test_non_square_tile_count() {
        let tiles = puzzle_tiles();
        let index = EdgeIndex::build(&tiles[..8]);
        assert!(matches!(
            GridAssembler::new(&tiles[..8], &index),
            Err(JigsawError::NotSquare { tile_count: 8 })
        ));
    }
}
