// Reachable-space estimate via 4-connected flood fill

use std::collections::{HashSet, VecDeque};

use crate::board::BoardModel;
use crate::types::{Coord, Direction};

/// Counts free cells reachable from `start`, including `start` itself
///
/// Returns 0 when `start` is off the board or occupied. The count never
/// exceeds the board area, nor `node_cap` when one is given. Without a cap
/// the result is the size of the connected free component, so it does not
/// depend on visiting order.
pub fn reachable_area(start: Coord, board: &BoardModel, node_cap: Option<usize>) -> usize {
    if !board.is_free(start) {
        return 0;
    }

    let limit = node_cap.map_or(board.area(), |cap| cap.min(board.area()));
    if limit == 0 {
        return 0;
    }

    let mut visited: HashSet<Coord> = HashSet::new();
    let mut queue: VecDeque<Coord> = VecDeque::new();
    visited.insert(start);
    queue.push_back(start);

    while let Some(pos) = queue.pop_front() {
        for dir in Direction::PRIORITY {
            if visited.len() >= limit {
                return visited.len();
            }
            let next = board.neighbor(pos, dir);
            if board.is_free(next) && visited.insert(next) {
                queue.push_back(next);
            }
        }
    }

    visited.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_board_fills_every_cell() {
        let board = BoardModel::new(11, 11);
        for start in [Coord::new(5, 5), Coord::new(0, 0), Coord::new(10, 3)] {
            assert_eq!(reachable_area(start, &board, None), 121);
        }
    }

    #[test]
    fn test_rectangular_board() {
        let board = BoardModel::new(7, 3);
        assert_eq!(reachable_area(Coord::new(3, 1), &board, None), 21);
    }

    #[test]
    fn test_wall_splits_board() {
        // Vertical wall at x=2 on a 5x5 board
        let wall: Vec<Coord> = (0..5).map(|y| Coord::new(2, y)).collect();
        let board = BoardModel::new(5, 5).with_occupied(wall);

        assert_eq!(reachable_area(Coord::new(0, 0), &board, None), 10);
        assert_eq!(reachable_area(Coord::new(4, 4), &board, None), 10);
    }

    #[test]
    fn test_blocked_start_has_no_space() {
        let board = BoardModel::new(5, 5).with_occupied([Coord::new(1, 1)]);
        assert_eq!(reachable_area(Coord::new(1, 1), &board, None), 0);
        assert_eq!(reachable_area(Coord::new(-1, 1), &board, None), 0);
    }

    #[test]
    fn test_same_count_from_any_cell_of_a_region() {
        let wall = [
            Coord::new(1, 0),
            Coord::new(1, 1),
            Coord::new(1, 2),
            Coord::new(3, 2),
            Coord::new(3, 3),
        ];
        let board = BoardModel::new(5, 5).with_occupied(wall);
        let from_left = reachable_area(Coord::new(0, 0), &board, None);
        let region: Vec<usize> = [Coord::new(0, 4), Coord::new(2, 0), Coord::new(4, 4)]
            .iter()
            .map(|&c| reachable_area(c, &board, None))
            .collect();

        assert_eq!(from_left, 20);
        assert!(region.iter().all(|&n| n == from_left));
    }

    #[test]
    fn test_cap_limits_count() {
        let board = BoardModel::new(11, 11);
        assert_eq!(reachable_area(Coord::new(5, 5), &board, Some(10)), 10);
        assert_eq!(reachable_area(Coord::new(5, 5), &board, Some(1000)), 121);
        assert_eq!(reachable_area(Coord::new(5, 5), &board, Some(0)), 0);
    }

    #[test]
    fn test_cap_bounds_work_on_huge_board() {
        // 10^10 cells: only the capped cells may ever be touched
        let board = BoardModel::new(100_000, 100_000);
        assert_eq!(reachable_area(Coord::new(50, 50), &board, Some(500)), 500);
    }
}
