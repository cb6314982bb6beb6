// Goal-directed grid search
//
// A* over the 4-connected board with unit step cost and a Manhattan
// heuristic. Obstacles are the occupancy set of the board model; the goal
// cell itself may always be entered. Every search is bounded by a node
// budget no larger than the board area.

use log::debug;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap, HashSet};

use crate::board::{BoardModel, SelfState};
use crate::types::{Coord, Direction};

/// Outcome of a single search
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathResult {
    pub found: bool,
    /// Cells after the start, ending at the goal
    pub steps: Vec<Coord>,
    pub cost: usize,
}

impl PathResult {
    pub fn not_found() -> Self {
        PathResult {
            found: false,
            steps: Vec::new(),
            cost: 0,
        }
    }

    /// The cell to move onto this turn, if the path has one
    pub fn first_step(&self) -> Option<Coord> {
        if self.found {
            self.steps.first().copied()
        } else {
            None
        }
    }
}

/// Search over one board snapshot
pub struct Pathfinder<'a> {
    board: &'a BoardModel,
    node_budget: usize,
}

impl<'a> Pathfinder<'a> {
    /// `max_nodes` tightens the board-area budget when given
    pub fn new(board: &'a BoardModel, max_nodes: Option<usize>) -> Self {
        let area = board.area();
        let node_budget = max_nodes.map_or(area, |cap| cap.min(area));
        Pathfinder { board, node_budget }
    }

    pub fn node_budget(&self) -> usize {
        self.node_budget
    }

    /// Shortest path from `start` to `goal`
    ///
    /// Open-set ties break on `(f, h, x, y)` so results are reproducible.
    pub fn find_path(&self, start: Coord, goal: Coord) -> PathResult {
        if !self.board.in_bounds(goal) {
            return PathResult::not_found();
        }
        if start == goal {
            return PathResult {
                found: true,
                steps: Vec::new(),
                cost: 0,
            };
        }

        let mut open: BinaryHeap<Reverse<(usize, usize, Coord)>> = BinaryHeap::new();
        let mut g_score: HashMap<Coord, usize> = HashMap::new();
        let mut came_from: HashMap<Coord, Coord> = HashMap::new();
        let mut closed: HashSet<Coord> = HashSet::new();

        let h0 = start.manhattan(&goal);
        g_score.insert(start, 0);
        open.push(Reverse((h0, h0, start)));

        let mut expanded = 0usize;

        while let Some(Reverse((_, _, current))) = open.pop() {
            if current == goal {
                return Self::reconstruct(&came_from, start, goal);
            }
            if !closed.insert(current) {
                continue;
            }

            expanded += 1;
            if expanded > self.node_budget {
                debug!(
                    "Path search {:?} -> {:?} exhausted budget of {} nodes",
                    start, goal, self.node_budget
                );
                return PathResult::not_found();
            }

            let g = g_score.get(&current).copied().unwrap_or(usize::MAX);

            for dir in Direction::PRIORITY {
                let next = self.board.neighbor(current, dir);
                if !self.is_passable(next, goal) || closed.contains(&next) {
                    continue;
                }

                let tentative = g + 1;
                let better = g_score.get(&next).map_or(true, |&known| tentative < known);
                if better {
                    g_score.insert(next, tentative);
                    came_from.insert(next, current);
                    let h = next.manhattan(&goal);
                    open.push(Reverse((tentative + h, h, next)));
                }
            }
        }

        PathResult::not_found()
    }

    /// Stall goal: our own tail
    pub fn path_to_tail(&self, me: &SelfState) -> PathResult {
        self.find_path(me.head, me.tail)
    }

    /// Seek goal: the food with the lowest path cost, ties on smallest `(x, y)`
    ///
    /// Returns `None` when no food is reachable.
    pub fn path_to_nearest_food(&self, head: Coord) -> Option<(Coord, PathResult)> {
        let mut best: Option<(Coord, PathResult)> = None;

        for food in self.board.food_sorted() {
            // Manhattan distance is a lower bound on the path cost
            if let Some((_, ref path)) = best {
                if head.manhattan(&food) > path.cost {
                    continue;
                }
            }

            let path = self.find_path(head, food);
            if !path.found {
                continue;
            }

            // Foods are visited in (x, y) order, so only a strictly cheaper
            // path replaces the current best
            let replace = match best {
                Some((_, ref current)) => path.cost < current.cost,
                None => true,
            };
            if replace {
                best = Some((food, path));
            }
        }

        best
    }

    fn is_passable(&self, pos: Coord, goal: Coord) -> bool {
        self.board.in_bounds(pos) && (pos == goal || !self.board.is_occupied(pos))
    }

    fn reconstruct(came_from: &HashMap<Coord, Coord>, start: Coord, goal: Coord) -> PathResult {
        let mut steps = vec![goal];
        let mut current = goal;
        while let Some(&prev) = came_from.get(&current) {
            if prev == start {
                break;
            }
            steps.push(prev);
            current = prev;
        }
        steps.reverse();

        PathResult {
            found: true,
            cost: steps.len(),
            steps,
        }
    }
}
