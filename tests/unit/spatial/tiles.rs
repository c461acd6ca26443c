//! Tests for tile symmetries, orientation algebra and edge extraction

#[cfg(test)]
mod tests {
    use crate::bitmap;
    use ndarray::{Array2, array};
    use std::collections::HashSet;
    use tilestitch::spatial::tiles::{
        Direction, Edge, Orientation, Tile, edge, reversed, symmetries,
    };

    fn asymmetric_tile() -> Tile {
        Tile::new(
            7,
            bitmap(
                "##..\n\
                 #...\n\
                 ...#\n\
                 .#..",
            ),
        )
        .unwrap()
    }

    fn edge_of(bits: &[bool]) -> Edge {
        bits.iter().copied().collect()
    }

    // Tests one quarter turn rotates counter-clockwise
    // Verified by flipping columns instead of rows after transposing
    #[test]
    fn test_quarter_turn_is_counter_clockwise() {
        let cells = array![[1, 2], [3, 4]];
        let rotated = Orientation::new(1, false).apply(&cells.view());
        assert_eq!(rotated, array![[2, 4], [1, 3]]);
    }

    // Tests mirroring reverses every row after rotation
    // Verified by mirroring before rotating
    #[test]
    fn test_mirror_applies_after_rotation() {
        let cells = array![[1, 2], [3, 4]];
        assert_eq!(
            Orientation::new(0, true).apply(&cells.view()),
            array![[2, 1], [4, 3]]
        );
        assert_eq!(
            Orientation::new(1, true).apply(&cells.view()),
            array![[4, 2], [3, 1]]
        );
    }

    // Tests the eight symmetries of an asymmetric tile are pairwise distinct
    // Verified by generating the mirrored views without mirroring
    #[test]
    fn test_symmetries_are_distinct() {
        let tile = asymmetric_tile();
        let views: HashSet<Vec<bool>> = tile
            .symmetries()
            .map(|(cells, _)| cells.iter().copied().collect())
            .collect();
        assert_eq!(views.len(), 8);
    }

    // Tests the symmetry sequence starts at the identity and follows generation order
    // Verified by listing mirrored views before unmirrored ones
    #[test]
    fn test_symmetry_order() {
        let tile = asymmetric_tile();
        let labels: Vec<Orientation> = tile.symmetries().map(|(_, o)| o).collect();
        assert_eq!(labels, Orientation::ALL.to_vec());
        assert_eq!(labels.first(), Some(&Orientation::IDENTITY));

        let (first, _) = symmetries(tile.cells().view()).next().unwrap();
        assert_eq!(&first, tile.cells());
    }

    // Tests applying an orientation then its inverse restores the cells
    // Verified by inverting mirrored orientations like pure rotations
    #[test]
    fn test_inverse_round_trip() {
        let tile = asymmetric_tile();
        for orientation in Orientation::ALL {
            let turned = tile.oriented(orientation);
            let restored = orientation.inverse().apply(&turned.view());
            assert_eq!(&restored, tile.cells(), "orientation {orientation}");
        }
    }

    // Tests four quarter turns reduce to the identity
    // Verified by removing the modulo in the constructor
    #[test]
    fn test_turns_wrap_modulo_four() {
        assert_eq!(Orientation::new(4, false), Orientation::IDENTITY);
        assert_eq!(Orientation::new(6, true), Orientation::new(2, true));
        assert_eq!(Orientation::new(3, false).degrees(), 270);
    }

    // Tests edges are read left to right and top to bottom
    // Verified by reading the east column bottom to top
    #[test]
    fn test_edge_extraction() {
        let tile = asymmetric_tile();
        let [north, east, south, west] = tile.edges();
        assert_eq!(north, edge_of(&[true, true, false, false]));
        assert_eq!(east, edge_of(&[false, false, true, false]));
        assert_eq!(south, edge_of(&[false, true, false, false]));
        assert_eq!(west, edge_of(&[true, true, false, false]));
    }

    // Tests the north edge after a half turn is the reversed original south edge
    // Verified by returning the unreversed south edge
    #[test]
    fn test_half_turn_north_edge() {
        let tile = asymmetric_tile();
        let half_turn = Orientation::new(2, false);
        let south = tile.edge(Orientation::IDENTITY, Direction::South);
        assert_eq!(
            tile.edge(half_turn, Direction::North),
            reversed(&south)
        );
    }

    // Tests every oriented edge is a physical edge in one of its two walk directions
    // Verified by indexing only forward edges
    #[test]
    fn test_oriented_edges_come_from_physical_edges() {
        let tile = asymmetric_tile();
        let physical: HashSet<Edge> = tile
            .edges()
            .into_iter()
            .flat_map(|e| {
                let r = reversed(&e);
                [e, r]
            })
            .collect();
        for orientation in Orientation::ALL {
            for direction in Direction::ALL {
                assert!(physical.contains(&tile.edge(orientation, direction)));
            }
        }
    }

    // Tests opposite sides pair up
    // Verified by mapping north to east
    #[test]
    fn test_opposite_directions() {
        for direction in Direction::ALL {
            assert_eq!(direction.opposite().opposite(), direction);
            assert_ne!(direction.opposite(), direction);
        }
        assert_eq!(Direction::North.opposite(), Direction::South);
        assert_eq!(Direction::West.opposite(), Direction::East);
    }

    // Tests non-square and empty cell matrices are rejected
    // Verified by removing the squareness check
    #[test]
    fn test_tile_must_be_square() {
        assert!(Tile::new(1, Array2::from_elem((3, 4), false)).is_err());
        assert!(Tile::new(1, Array2::from_elem((0, 0), false)).is_err());
        assert!(Tile::new(1, Array2::from_elem((3, 3), false)).is_ok());
    }

    // Tests edges of an empty view are empty
    // Verified by indexing row zero unconditionally
    #[test]
    fn test_edge_of_empty_view() {
        let empty: Array2<bool> = Array2::from_elem((0, 0), false);
        assert!(edge(&empty.view(), Direction::North).is_empty());
    }

    // Tests active cell counting and display labels
    // Verified by counting inactive cells
    #[test]
    fn test_tile_accessors() {
        let tile = asymmetric_tile();
        assert_eq!(tile.id(), 7);
        assert_eq!(tile.size(), 4);
        assert_eq!(tile.active_cells(), 5);
        assert_eq!(tile.to_string(), "Tile 7 (4x4)");
        assert_eq!(Orientation::new(1, true).to_string(), "90°+mirror");
        assert_eq!(Orientation::IDENTITY.to_string(), "0°");
    }
}
