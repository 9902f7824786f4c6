//! Tests for slot state and possibility space geometry

#[cfg(test)]
mod tests {
    use wavetile::spatial::direction::Direction;
    use wavetile::spatial::grid::{Coordinate, PossibilitySpace, Slot, SlotState};

    // Tests every slot starts with the full catalog in index order
    #[test]
    fn test_new_space_holds_full_catalog() {
        let space = PossibilitySpace::new(3, 2, 4);
        assert_eq!(space.width(), 3);
        assert_eq!(space.height(), 2);
        assert_eq!(space.len(), 6);
        assert_eq!(space.total_possibilities(), 24);

        for slot in space.slots() {
            assert_eq!(slot.superposition(), &[0, 1, 2, 3]);
            assert_eq!(slot.state(), SlotState::Undetermined);
        }
        assert!(!space.is_fully_collapsed());
        assert!(space.first_contradiction().is_none());
    }

    // Tests flattened positions are y * width + x and slots iterate row-major
    // Verified by computing x * height + y instead
    #[test]
    fn test_flattened_index_is_row_major() {
        let space = PossibilitySpace::new(4, 3, 1);
        let coordinate = Coordinate::new(1, 2);

        assert_eq!(space.index_of(coordinate), Some(9));
        assert_eq!(space.coordinate_of(9), Some(coordinate));
        assert_eq!(space.index_of(Coordinate::new(4, 0)), None);
        assert_eq!(space.coordinate_of(12), None);

        let order: Vec<Coordinate> = space.cells().map(|(coordinate, _)| coordinate).collect();
        assert_eq!(order.get(1), Some(&Coordinate::new(1, 0)));
        assert_eq!(order.get(4), Some(&Coordinate::new(0, 1)));
    }

    // Tests neighbors outside the grid are skipped
    // Verified by wrapping coordinates around the grid edges
    #[test]
    fn test_neighbor_respects_bounds() {
        let space = PossibilitySpace::new(2, 2, 1);
        let origin = Coordinate::new(0, 0);

        assert_eq!(space.neighbor(origin, Direction::Up), None);
        assert_eq!(space.neighbor(origin, Direction::Left), None);
        assert_eq!(
            space.neighbor(origin, Direction::Right),
            Some(Coordinate::new(1, 0))
        );
        assert_eq!(
            space.neighbor(origin, Direction::Down),
            Some(Coordinate::new(0, 1))
        );
        assert_eq!(space.neighbor(Coordinate::new(1, 1), Direction::Right), None);
        assert_eq!(space.neighbor(Coordinate::new(1, 1), Direction::Down), None);
    }

    #[test]
    fn test_border_coordinates() {
        let space = PossibilitySpace::new(3, 2, 1);

        assert_eq!(
            space.border(Direction::Up),
            vec![
                Coordinate::new(0, 0),
                Coordinate::new(1, 0),
                Coordinate::new(2, 0)
            ]
        );
        assert_eq!(
            space.border(Direction::Right),
            vec![Coordinate::new(2, 0), Coordinate::new(2, 1)]
        );
        assert!(
            space
                .border(Direction::Down)
                .iter()
                .all(|coordinate| coordinate.y == 1)
        );
        assert_eq!(space.border(Direction::Left).len(), 2);
    }

    // Tests slot states follow superposition size
    #[test]
    fn test_slot_transitions() {
        let mut slot = Slot::new(vec![0, 1, 2]);
        assert_eq!(slot.state(), SlotState::Undetermined);

        assert_eq!(slot.retain(|id| id != 1), 1);
        assert_eq!(slot.superposition(), &[0, 2]);
        assert!(!slot.contains(1));

        slot.collapse_to(2);
        assert_eq!(slot.state(), SlotState::Collapsed);
        assert_eq!(slot.first(), Some(2));

        assert_eq!(slot.retain(|_| false), 1);
        assert_eq!(slot.state(), SlotState::Contradiction);
        assert_eq!(slot.first(), None);
    }

    #[test]
    fn test_first_contradiction_and_full_collapse() {
        let mut space = PossibilitySpace::new(2, 2, 2);
        for slot in space.slots_mut() {
            slot.collapse_to(0);
        }
        assert!(space.is_fully_collapsed());

        let target = Coordinate::new(1, 1);
        if let Some(slot) = space.slot_mut(target) {
            slot.retain(|_| false);
        }
        assert!(!space.is_fully_collapsed());
        assert_eq!(space.first_contradiction(), Some(target));
        assert_eq!(target.to_string(), "(1, 1)");
    }

    // Tests replacing a slot never changes where the space reports it
    // Verified by overwriting a slot with one built for another cell
    #[test]
    fn test_overwritten_slot_keeps_its_position() {
        let mut space = PossibilitySpace::new(3, 2, 3);
        let target = Coordinate::new(2, 1);

        if let Some(slot) = space.slot_mut(target) {
            *slot = Slot::new(Vec::new());
        }
        assert_eq!(space.first_contradiction(), Some(target));

        if let Some(slot) = space.slot_mut(target) {
            slot.set_superposition(vec![1]);
        }
        let narrowed: Vec<Coordinate> = space
            .cells()
            .filter(|(_, slot)| slot.len() == 1)
            .map(|(coordinate, _)| coordinate)
            .collect();
        assert_eq!(narrowed, vec![target]);
        assert_eq!(space.first_contradiction(), None);
    }
}
