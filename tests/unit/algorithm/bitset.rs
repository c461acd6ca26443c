//! Tests for `TileBitset` set operations used during candidate filtering

#[cfg(test)]
mod tests {
    use tilestitch::algorithm::bitset::TileBitset;

    // Verifies new TileBitset is empty with count 0
    // Verified by initializing bitset with all bits set to 1
    #[test]
    fn test_new_bitset() {
        let bitset = TileBitset::new(10);
        assert_eq!(bitset.count(), 0);
        assert!(bitset.is_empty());
        assert_eq!(bitset.first(), None);
    }

    // Tests insertion, removal and out-of-range indices
    // Verified by removing the bounds check from insert
    #[test]
    fn test_insert_remove_contains() {
        let mut bitset = TileBitset::new(10);
        bitset.insert(0);
        bitset.insert(5);
        bitset.insert(10);
        assert!(bitset.contains(0));
        assert!(bitset.contains(5));
        assert!(!bitset.contains(10));
        assert_eq!(bitset.count(), 2);

        bitset.remove(0);
        assert!(!bitset.contains(0));
        assert_eq!(bitset.first(), Some(5));
    }

    // Tests union followed by difference leaves only the unseen tiles
    // Verified by making difference a no-op
    #[test]
    fn test_union_and_difference() {
        let mut candidates = TileBitset::from_indices(&[1, 4], 8);
        candidates.union_with(&TileBitset::from_indices(&[4, 6], 8));
        assert_eq!(candidates.to_vec(), vec![1, 4, 6]);

        candidates.difference_with(&TileBitset::from_indices(&[1, 6, 7], 8));
        assert_eq!(candidates.to_vec(), vec![4]);
        assert_eq!(candidates.first(), Some(4));
    }

    // Tests display lists the member indices in ascending order
    // Verified by listing indices in insertion order
    #[test]
    fn test_display() {
        let bitset = TileBitset::from_indices(&[4, 0, 2], 5);
        assert_eq!(bitset.count(), 3);
        assert_eq!(bitset.to_string(), "TileBitset(3 tiles: [0, 2, 4])");
    }
}
