// Move selection pipeline
//
// danger filter -> trap filter -> path ranking -> space ranking
//
// Every call is a pure function of one snapshot. The mode is re-derived from
// health each turn and nothing is remembered between turns.

use log::debug;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::fmt;

use crate::board::{BoardModel, SelfState};
use crate::config::{Config, TieBreak};
use crate::danger::{self, Danger};
use crate::pathfinder::Pathfinder;
use crate::space;
use crate::types::{Battlesnake, Board, Coord, Direction, Move};

/// Behavior mode for one turn
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    SeekFood,
    Stall,
}

impl Mode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::SeekFood => "seek_food",
            Mode::Stall => "stall",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which stage of the pipeline produced the move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reason {
    FoodPath,
    TailPath,
    MostSpace,
    /// No safe candidate; least bad one taken
    Fallback,
}

impl Reason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Reason::FoodPath => "food_path",
            Reason::TailPath => "tail_path",
            Reason::MostSpace => "most_space",
            Reason::Fallback => "fallback",
        }
    }
}

impl fmt::Display for Reason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One of the four possible moves, evaluated for this turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    pub direction: Direction,
    pub target: Coord,
    pub danger: Danger,
    pub lethal: bool,
    pub trapped: bool,
    /// Flood-fill size from `target`; exit count on the emergency path
    pub free_space: usize,
}

impl Candidate {
    pub fn is_safe(&self) -> bool {
        !self.lethal && !self.trapped
    }

    /// Lower is better: safe, trapped only, body collision, wall collision
    pub fn violation_rank(&self) -> u8 {
        match self.danger {
            Danger::Safe if self.trapped => 1,
            Danger::Safe => 0,
            Danger::Body => 2,
            Danger::Wall => 3,
        }
    }
}

/// Final answer for one turn
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decision {
    pub direction: Direction,
    pub mode: Mode,
    pub reason: Reason,
    pub message: Option<String>,
}

impl Decision {
    pub fn to_move(&self) -> Move {
        Move {
            direction: self.direction,
            message: self.message.clone(),
        }
    }
}

/// Orchestrates danger classification, pathfinding and space ranking
pub struct MoveSelector<'a> {
    config: &'a Config,
}

impl<'a> MoveSelector<'a> {
    pub fn new(config: &'a Config) -> Self {
        MoveSelector { config }
    }

    pub fn mode_for(&self, health: i32) -> Mode {
        if health <= self.config.selector.health_threshold {
            Mode::SeekFood
        } else {
            Mode::Stall
        }
    }

    /// Chooses a move for a raw API snapshot
    pub fn decide(&self, board: &Board, you: &Battlesnake, turn: i32) -> Decision {
        let me = SelfState::from_snake(you);
        let model = BoardModel::from_snapshot(board, &me, self.config.occupancy.own_tail_vacates);
        self.decide_on(&model, &me, turn)
    }

    /// Chooses a move on an already built board model
    pub fn decide_on(&self, board: &BoardModel, me: &SelfState, turn: i32) -> Decision {
        let mode = self.mode_for(me.health);
        let candidates = self.build_candidates(board, me);

        for c in &candidates {
            debug!(
                "Turn {}: {:>5} -> ({}, {}) danger={:?} trapped={} space={}",
                turn, c.direction.as_str(), c.target.x, c.target.y, c.danger, c.trapped, c.free_space
            );
        }

        let safe: Vec<&Candidate> = candidates.iter().filter(|c| c.is_safe()).collect();

        if safe.is_empty() {
            let chosen = Self::fallback(&candidates);
            return self.decision(chosen.direction, mode, Reason::Fallback);
        }

        let finder = Pathfinder::new(board, self.config.search.max_path_nodes);

        if mode == Mode::SeekFood {
            match finder.path_to_nearest_food(me.head) {
                Some((food, path)) => {
                    debug!(
                        "Turn {}: nearest food ({}, {}) at cost {}",
                        turn, food.x, food.y, path.cost
                    );
                    if let Some(dir) = Self::safe_step(&safe, path.first_step()) {
                        return self.decision(dir, mode, Reason::FoodPath);
                    }
                }
                None => debug!("Turn {}: no reachable food", turn),
            }
        }

        let tail_path = finder.path_to_tail(me);
        debug!(
            "Turn {}: tail path found={} cost={}",
            turn, tail_path.found, tail_path.cost
        );
        if let Some(dir) = Self::safe_step(&safe, tail_path.first_step()) {
            return self.decision(dir, mode, Reason::TailPath);
        }

        let dir = self.most_space(&safe, turn);
        self.decision(dir, mode, Reason::MostSpace)
    }

    /// Danger-only decision used when the full pipeline cannot finish in time
    pub fn emergency(&self, board: &Board, you: &Battlesnake) -> Decision {
        let me = SelfState::from_snake(you);
        let model = BoardModel::from_snapshot(board, &me, self.config.occupancy.own_tail_vacates);

        let candidates: Vec<Candidate> = Direction::PRIORITY
            .iter()
            .map(|&direction| {
                let target = model.neighbor(me.head, direction);
                let danger = danger::classify(target, &model);
                Candidate {
                    direction,
                    target,
                    danger,
                    lethal: danger.is_lethal(),
                    trapped: !danger.is_lethal() && danger::is_trapped(target, &model),
                    // No flood fill under time pressure: rank by exits instead
                    free_space: danger::exit_count(target, &model),
                }
            })
            .collect();

        let chosen = Self::fallback(&candidates);
        self.decision(chosen.direction, self.mode_for(me.health), Reason::Fallback)
    }

    /// Evaluates all four directions in priority order
    pub fn build_candidates(&self, board: &BoardModel, me: &SelfState) -> Vec<Candidate> {
        Direction::PRIORITY
            .iter()
            .map(|&direction| {
                let target = board.neighbor(me.head, direction);
                let danger = danger::classify(target, board);
                let lethal = danger.is_lethal();
                let trapped = !lethal && danger::is_trapped(target, board);
                let free_space = if lethal {
                    0
                } else {
                    space::reachable_area(target, board, self.config.search.max_flood_fill_nodes)
                };

                Candidate {
                    direction,
                    target,
                    danger,
                    lethal,
                    trapped,
                    free_space,
                }
            })
            .collect()
    }

    /// Least bad candidate: violation rank, then space, then priority order
    ///
    /// `candidates` must be in priority order and non-empty.
    pub fn fallback(candidates: &[Candidate]) -> &Candidate {
        candidates
            .iter()
            .min_by_key(|c| (c.violation_rank(), std::cmp::Reverse(c.free_space)))
            .unwrap_or(&candidates[0])
    }

    /// Safe candidate with the most free space; ties per the configured policy
    pub fn most_space(&self, safe: &[&Candidate], turn: i32) -> Direction {
        let best = safe.iter().map(|c| c.free_space).max().unwrap_or(0);
        let tied: Vec<Direction> = safe
            .iter()
            .filter(|c| c.free_space == best)
            .map(|c| c.direction)
            .collect();

        match (tied.len(), self.config.selector.tie_break) {
            (0, _) => Direction::Up,
            (1, _) | (_, TieBreak::Priority) => tied[0],
            (n, TieBreak::Random) => {
                let idx = match self.config.selector.random_seed {
                    Some(seed) => {
                        let mut rng = StdRng::seed_from_u64(seed.wrapping_add(turn as u64));
                        rng.random_range(0..n)
                    }
                    None => rand::rng().random_range(0..n),
                };
                tied[idx]
            }
        }
    }

    fn safe_step(safe: &[&Candidate], step: Option<Coord>) -> Option<Direction> {
        let step = step?;
        safe.iter().find(|c| c.target == step).map(|c| c.direction)
    }

    fn decision(&self, direction: Direction, mode: Mode, reason: Reason) -> Decision {
        let shout = &self.config.selector.shout;
        Decision {
            direction,
            mode,
            reason,
            message: if shout.is_empty() {
                None
            } else {
                Some(shout.clone())
            },
        }
    }
}
