//! Extended-state best-first search for a single leg
//!
//! A search state is more than a position: it also carries the treasures
//! still outstanding, the gravity/speed multipliers and the one-shot effects
//! that are still armed. Two branches standing on the same cell are only
//! interchangeable when all of those agree (see [`Signature`]).
//!
//! ## Architecture
//! - Level 2: `LegSearch::run` (frontier loop)
//! - Level 3: expansion of one node, path reconstruction
//! - Level 4: frontier ordering, signatures

use std::cmp::Ordering;
use std::collections::{BTreeSet, BinaryHeap};
use std::sync::Arc;

use rustc_hash::FxHashSet;
use serde::{Deserialize, Serialize};

use crate::board::{Board, CellKind, Coord};
use crate::config::SearchConfig;
use crate::topology::{neighbors, teleport_destination, Direction};
use crate::trace::{Arrival, Multipliers, Step};

// ============================================================================
// PUBLIC TYPES
// ============================================================================

/// Mutable part of a branch that outlives a single leg
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BranchState {
    pub multipliers: Multipliers,
    /// Treasures not yet collected
    pub remaining: BTreeSet<Coord>,
    /// Traps and rewards not yet triggered
    pub effects: BTreeSet<Coord>,
}

impl BranchState {
    /// Fresh state: unit multipliers, every effect on the board armed
    pub fn new(board: &Board, remaining: BTreeSet<Coord>) -> Self {
        Self {
            multipliers: Multipliers::default(),
            remaining,
            effects: board.effect_coordinates(),
        }
    }
}

/// A solved leg
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Leg {
    pub start: Coord,
    pub goal: Coord,
    /// Steps from `start` to `goal`, both included
    pub steps: Vec<Step>,
    /// Accumulated `g` at the goal
    pub cost: f64,
    /// Branch state on arrival at the goal
    pub end_state: BranchState,
}

/// Counters for one leg search
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Nodes popped and expanded
    pub expanded: usize,
    /// Children pushed onto the frontier
    pub generated: usize,
    /// Popped nodes discarded because their signature was already seen
    pub dominated: usize,
    /// Moves into a locked trap while treasures were outstanding
    pub pruned_locked: usize,
    /// Teleports whose destination was off the board or blocked
    pub pruned_teleport: usize,
}

impl SearchStats {
    pub fn merge(&mut self, other: &SearchStats) {
        self.expanded += other.expanded;
        self.generated += other.generated;
        self.dominated += other.dominated;
        self.pruned_locked += other.pruned_locked;
        self.pruned_teleport += other.pruned_teleport;
    }
}

/// Result of one leg search. `leg == None` means the goal is unreachable
/// from this state, which is an ordinary outcome.
#[derive(Clone, Debug)]
pub struct SearchOutcome {
    pub leg: Option<Leg>,
    pub stats: SearchStats,
    /// The expansion budget ran out before the frontier did
    pub budget_exhausted: bool,
}

impl SearchOutcome {
    pub fn is_found(&self) -> bool {
        self.leg.is_some()
    }

    pub fn cost(&self) -> Option<f64> {
        self.leg.as_ref().map(|leg| leg.cost)
    }
}

// ============================================================================
// INTERNAL TYPES
// ============================================================================

/// Node identifier (index into arena)
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
struct NodeId(usize);

/// Arena node. Sets are shared with the parent until a move changes them.
#[derive(Clone, Debug)]
struct Node {
    parent: Option<NodeId>,
    /// Teleport trap cell passed through on the way to `step`
    landing: Option<Step>,
    step: Step,
    g: f64,
    multipliers: Multipliers,
    remaining: Arc<BTreeSet<Coord>>,
    effects: Arc<BTreeSet<Coord>>,
}

impl Node {
    fn position(&self) -> Coord {
        self.step.coord
    }
}

/// Visited-state key
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
struct Signature {
    position: Coord,
    remaining: Arc<BTreeSet<Coord>>,
    gravity: i64,
    speed: i64,
    effects: Arc<BTreeSet<Coord>>,
}

/// Frontier entry: lowest `f` first, then insertion order
#[derive(Clone, Copy, Debug)]
struct FrontierEntry {
    f: f64,
    seq: u64,
    node: NodeId,
}

impl PartialEq for FrontierEntry {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierEntry {}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse order for min-heap
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// ============================================================================
// LEG SEARCH (Level 2 - Frontier loop)
// ============================================================================

/// Single-goal search over the extended state space
pub struct LegSearch<'a> {
    board: &'a Board,
    config: &'a SearchConfig,
}

impl<'a> LegSearch<'a> {
    pub fn new(board: &'a Board, config: &'a SearchConfig) -> Self {
        Self { board, config }
    }

    /// Cheapest route from `start` to `goal`, beginning in `origin`
    pub fn run(&self, start: Coord, goal: Coord, origin: &BranchState) -> SearchOutcome {
        let mut stats = SearchStats::default();
        let mut budget_exhausted = false;

        let Ok(start_kind) = self.board.cell_kind(start) else {
            return SearchOutcome {
                leg: None,
                stats,
                budget_exhausted,
            };
        };

        let mut arena: Vec<Node> = Vec::new();
        let mut frontier = BinaryHeap::new();
        let mut visited: FxHashSet<Signature> = FxHashSet::default();
        let mut seq = 0u64;

        arena.push(Node {
            parent: None,
            landing: None,
            step: Step::start(start, start_kind, origin.multipliers),
            g: 0.0,
            multipliers: origin.multipliers,
            remaining: Arc::new(origin.remaining.clone()),
            effects: Arc::new(origin.effects.clone()),
        });
        frontier.push(FrontierEntry {
            f: self.config.heuristic.estimate(start, goal),
            seq,
            node: NodeId(0),
        });

        while let Some(entry) = frontier.pop() {
            let signature = self.signature(&arena[entry.node.0]);
            if !visited.insert(signature) {
                stats.dominated += 1;
                continue;
            }

            let node = &arena[entry.node.0];
            if node.position() == goal {
                let leg = self.finish(&arena, entry.node, start, goal);
                return SearchOutcome {
                    leg: Some(leg),
                    stats,
                    budget_exhausted,
                };
            }

            if let Some(limit) = self.config.max_expansions {
                if stats.expanded >= limit {
                    tracing::warn!(
                        "Leg {} -> {} hit the expansion budget ({})",
                        start,
                        goal,
                        limit
                    );
                    budget_exhausted = true;
                    break;
                }
            }
            stats.expanded += 1;

            for child in self.expand(&arena[entry.node.0], entry.node, &mut stats) {
                let f = child.g + self.config.heuristic.estimate(child.position(), goal);
                let id = NodeId(arena.len());
                arena.push(child);
                seq += 1;
                stats.generated += 1;
                frontier.push(FrontierEntry { f, seq, node: id });
            }
        }

        SearchOutcome {
            leg: None,
            stats,
            budget_exhausted,
        }
    }

    // ========================================================================
    // EXPANSION (Level 3)
    // ========================================================================

    fn expand(&self, parent: &Node, parent_id: NodeId, stats: &mut SearchStats) -> Vec<Node> {
        let mut children = Vec::with_capacity(6);

        for (next, dir) in neighbors(self.board, parent.position()) {
            let Ok(kind) = self.board.cell_kind(next) else {
                continue;
            };
            if self.is_locked(kind, &parent.remaining) {
                stats.pruned_locked += 1;
                continue;
            }

            let mut child = Node {
                parent: Some(parent_id),
                landing: None,
                step: Step {
                    coord: next,
                    kind,
                    arrival: Arrival::Move(dir),
                    multipliers: parent.multipliers,
                },
                g: parent.g + parent.multipliers.step_cost(),
                multipliers: parent.multipliers,
                remaining: Arc::clone(&parent.remaining),
                effects: Arc::clone(&parent.effects),
            };

            if kind == CellKind::Trap3 && child.effects.contains(&next) {
                if !self.teleport(&mut child, dir, stats) {
                    continue;
                }
            } else {
                Self::enter(&mut child, next, kind);
            }

            children.push(child);
        }

        children
    }

    /// Throw `child` (standing on a live teleport trap) onward. Returns
    /// false when the move has to be pruned.
    fn teleport(&self, child: &mut Node, dir: Direction, stats: &mut SearchStats) -> bool {
        let landing = child.step.coord;
        let Some(dest) = teleport_destination(self.board, landing, dir) else {
            stats.pruned_teleport += 1;
            return false;
        };
        let Ok(dest_kind) = self.board.cell_kind(dest) else {
            stats.pruned_teleport += 1;
            return false;
        };
        if self.is_locked(dest_kind, &child.remaining) {
            stats.pruned_locked += 1;
            return false;
        }

        Arc::make_mut(&mut child.effects).remove(&landing);
        child.landing = Some(child.step);
        child.step = Step {
            coord: dest,
            kind: dest_kind,
            arrival: Arrival::Teleport(dir),
            multipliers: child.multipliers,
        };

        // Teleports do not chain: a live trap at the destination stays armed
        if dest_kind != CellKind::Trap3 {
            Self::enter(child, dest, dest_kind);
        } else {
            Self::collect(child, dest);
        }
        true
    }

    /// Fire the cell's one-shot effect and pick up its treasure
    fn enter(child: &mut Node, coord: Coord, kind: CellKind) {
        if kind.is_effect() && child.effects.contains(&coord) {
            Arc::make_mut(&mut child.effects).remove(&coord);
            child.multipliers = child.multipliers.apply(kind);
        }
        Self::collect(child, coord);
    }

    fn collect(child: &mut Node, coord: Coord) {
        if child.remaining.contains(&coord) {
            Arc::make_mut(&mut child.remaining).remove(&coord);
        }
    }

    fn is_locked(&self, kind: CellKind, remaining: &BTreeSet<Coord>) -> bool {
        kind == CellKind::Trap4 && !remaining.is_empty()
    }

    // ========================================================================
    // RESULT ASSEMBLY (Level 3)
    // ========================================================================

    fn finish(&self, arena: &[Node], goal_id: NodeId, start: Coord, goal: Coord) -> Leg {
        let mut steps = Vec::new();
        let mut cursor = Some(goal_id);
        while let Some(id) = cursor {
            let node = &arena[id.0];
            steps.push(node.step);
            if let Some(landing) = node.landing {
                steps.push(landing);
            }
            cursor = node.parent;
        }
        steps.reverse();

        let node = &arena[goal_id.0];
        Leg {
            start,
            goal,
            steps,
            cost: node.g,
            end_state: BranchState {
                multipliers: node.multipliers,
                remaining: (*node.remaining).clone(),
                effects: (*node.effects).clone(),
            },
        }
    }

    // ========================================================================
    // SIGNATURES (Level 4)
    // ========================================================================

    fn signature(&self, node: &Node) -> Signature {
        Signature {
            position: node.position(),
            remaining: Arc::clone(&node.remaining),
            gravity: self.config.dedup.key(node.multipliers.gravity),
            speed: self.config.dedup.key(node.multipliers.speed),
            effects: Arc::clone(&node.effects),
        }
    }
}

/// Convenience wrapper: one leg from a fresh state
pub fn find_path(
    board: &Board,
    config: &SearchConfig,
    start: Coord,
    goal: Coord,
    remaining: &BTreeSet<Coord>,
) -> SearchOutcome {
    let origin = BranchState::new(board, remaining.clone());
    LegSearch::new(board, config).run(start, goal, &origin)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DedupMode, HeuristicKind};

    fn board(rows: &[&[&str]]) -> Board {
        Board::from_glyph_rows(rows).unwrap()
    }

    fn search(board: &Board, start: Coord, goal: Coord) -> SearchOutcome {
        find_path(
            board,
            &SearchConfig::default(),
            start,
            goal,
            &board.treasure_coordinates(),
        )
    }

    #[test]
    fn test_two_by_two() {
        let b = board(&[&[" ", " "], &[" ", "$"]]);
        let outcome = search(&b, Coord::new(0, 0), Coord::new(1, 1));
        let leg = outcome.leg.unwrap();
        assert_eq!(leg.steps.first().unwrap().coord, Coord::new(0, 0));
        assert_eq!(leg.steps.last().unwrap().coord, Coord::new(1, 1));
        // (0,0) is an even column: (1,1) is one SE step away
        assert_eq!(leg.steps.len(), 2);
        assert_eq!(leg.cost, 1.0);
        assert!(leg.end_state.remaining.is_empty());
    }

    #[test]
    fn test_start_is_goal() {
        let b = board(&[&["$"]]);
        let outcome = search(&b, Coord::new(0, 0), Coord::new(0, 0));
        let leg = outcome.leg.unwrap();
        assert_eq!(leg.steps.len(), 1);
        assert_eq!(leg.cost, 0.0);
        assert_eq!(outcome.stats.expanded, 0);
    }

    #[test]
    fn test_unreachable_is_none() {
        let b = board(&[&[" ", "O", "$"], &[" ", "O", " "]]);
        let outcome = search(&b, Coord::new(0, 0), Coord::new(0, 2));
        assert!(outcome.leg.is_none());
        assert!(!outcome.budget_exhausted);
    }

    #[test]
    fn test_cost_uses_parent_multipliers() {
        // straight column: start, gravity trap, empty, treasure
        let b = board(&[&[" "], &["(~)"], &[" "], &["$"]]);
        let leg = search(&b, Coord::new(0, 0), Coord::new(3, 0)).leg.unwrap();
        // 1.0 into the trap, then 2.0 + 2.0
        assert_eq!(leg.cost, 5.0);
        assert_eq!(leg.end_state.multipliers.gravity, 2.0);
        assert!(leg.end_state.effects.is_empty());
    }

    #[test]
    fn test_reward_lowers_cost() {
        let with_reward = board(&[&[" "], &["[+]"], &[" "], &[" "], &["$"]]);
        let without = board(&[&[" "], &[" "], &[" "], &[" "], &["$"]]);
        let a = search(&with_reward, Coord::new(0, 0), Coord::new(4, 0))
            .leg
            .unwrap();
        let b = search(&without, Coord::new(0, 0), Coord::new(4, 0))
            .leg
            .unwrap();
        assert_eq!(a.cost, 2.5);
        assert_eq!(b.cost, 4.0);
        assert!(a.cost < b.cost);
    }

    #[test]
    fn test_speed_effects() {
        let b = board(&[&[" "], &["(+)"], &["[x]"], &[" "], &["$"]]);
        let leg = search(&b, Coord::new(0, 0), Coord::new(4, 0)).leg.unwrap();
        // 1 + 2 (speed 0.5) + 1 (speed back to 1) + 1
        assert_eq!(leg.cost, 5.0);
        assert_eq!(leg.end_state.multipliers.speed, 1.0);
    }

    #[test]
    fn test_effects_fire_once_per_branch() {
        let b = board(&[&[" "], &["(~)"], &["$"]]);
        let origin = BranchState {
            multipliers: Multipliers::default(),
            remaining: BTreeSet::from([Coord::new(2, 0)]),
            effects: BTreeSet::new(),
        };
        let config = SearchConfig::default();
        let leg = LegSearch::new(&b, &config)
            .run(Coord::new(0, 0), Coord::new(2, 0), &origin)
            .leg
            .unwrap();
        // trap already consumed in this branch
        assert_eq!(leg.cost, 2.0);
        assert_eq!(leg.end_state.multipliers.gravity, 1.0);
    }

    #[test]
    fn test_locked_trap_blocks_only_route() {
        let b = board(&[&[" "], &["(/)"], &["$"]]);
        let outcome = search(&b, Coord::new(0, 0), Coord::new(2, 0));
        assert!(outcome.leg.is_none());
        assert!(outcome.stats.pruned_locked > 0);
    }

    #[test]
    fn test_locked_trap_open_without_treasures() {
        let b = board(&[&[" "], &["(/)"], &[" "]]);
        let outcome = find_path(
            &b,
            &SearchConfig::default(),
            Coord::new(0, 0),
            Coord::new(2, 0),
            &BTreeSet::new(),
        );
        assert_eq!(outcome.cost(), Some(2.0));
    }

    #[test]
    fn test_teleport_appends_landing_then_destination() {
        let b = board(&[&[" "], &["(x)"], &[" "], &[" "], &["$"]]);
        let leg = search(&b, Coord::new(0, 0), Coord::new(4, 0)).leg.unwrap();
        let coords: Vec<_> = leg.steps.iter().map(|s| s.coord).collect();
        assert_eq!(
            coords,
            vec![
                Coord::new(0, 0),
                Coord::new(1, 0),
                Coord::new(3, 0),
                Coord::new(4, 0)
            ]
        );
        assert_eq!(leg.steps[2].arrival, Arrival::Teleport(Direction::S));
        // one move into the trap, free teleport, one move to the goal
        assert_eq!(leg.cost, 2.0);
    }

    #[test]
    fn test_teleport_out_of_bounds_is_discarded() {
        // Only the S move from (0,0) enters the trap; its destination (3,0)
        // is off the board, so the search must walk around through column 1.
        let b = board(&[&[" ", " "], &["(x)", " "], &["$", " "]]);
        let outcome = search(&b, Coord::new(0, 0), Coord::new(2, 0));
        let leg = outcome.leg.unwrap();
        assert!(outcome.stats.pruned_teleport > 0);
        assert!(leg.steps.iter().all(|s| s.coord != Coord::new(1, 0)));
        assert!(leg
            .steps
            .iter()
            .all(|s| !matches!(s.arrival, Arrival::Teleport(_))));
    }

    #[test]
    fn test_teleport_onto_obstacle_is_discarded() {
        // (1,0) would throw a southbound walker onto the obstacle at (3,0)
        let b = board(&[
            &[" ", " "],
            &["(x)", " "],
            &[" ", " "],
            &["O", " "],
            &["$", " "],
        ]);
        let outcome = search(&b, Coord::new(0, 0), Coord::new(4, 0));
        let leg = outcome.leg.unwrap();
        assert!(outcome.stats.pruned_teleport > 0);
        assert!(leg.steps.iter().all(|s| s.coord != Coord::new(1, 0)));
        assert!(leg.steps.iter().any(|s| s.coord.col == 1));
    }

    #[test]
    fn test_teleport_onto_locked_trap() {
        let locked = board(&[&[" "], &["(x)"], &[" "], &["(/)"], &[" "], &["$"]]);
        let outcome = search(&locked, Coord::new(0, 0), Coord::new(5, 0));
        assert!(outcome.leg.is_none());
        assert!(outcome.stats.pruned_locked > 0);
        assert_eq!(outcome.stats.pruned_teleport, 0);

        // with nothing left to collect the lock is open
        let open = board(&[&[" "], &["(x)"], &[" "], &["(/)"], &[" "], &[" "]]);
        let outcome = find_path(
            &open,
            &SearchConfig::default(),
            Coord::new(0, 0),
            Coord::new(5, 0),
            &BTreeSet::new(),
        );
        let leg = outcome.leg.unwrap();
        assert_eq!(leg.cost, 3.0);
        assert_eq!(leg.steps[2].coord, Coord::new(3, 0));
        assert_eq!(leg.steps[2].arrival, Arrival::Teleport(Direction::S));
        assert!(!leg.end_state.effects.contains(&Coord::new(3, 0)));
    }

    #[test]
    fn test_teleport_destination_reward_fires() {
        let b = board(&[&[" "], &["(x)"], &[" "], &["[+]"], &[" "], &["$"]]);
        let leg = search(&b, Coord::new(0, 0), Coord::new(5, 0)).leg.unwrap();
        // 1.0 into the trap, free throw, then two moves at gravity 0.5
        assert_eq!(leg.cost, 2.0);
        assert_eq!(leg.end_state.multipliers.gravity, 0.5);
        assert!(leg.end_state.effects.is_empty());
    }

    #[test]
    fn test_teleport_destination_treasure_collected() {
        let b = board(&[&[" "], &["(x)"], &[" "], &["$"], &[" "], &["$"]]);
        let leg = search(&b, Coord::new(0, 0), Coord::new(5, 0)).leg.unwrap();
        assert_eq!(leg.steps[2].coord, Coord::new(3, 0));
        assert!(matches!(leg.steps[2].arrival, Arrival::Teleport(_)));
        assert!(leg.end_state.remaining.is_empty());
    }

    #[test]
    fn test_teleport_does_not_chain() {
        let b = board(&[&[" "], &["(x)"], &[" "], &["(x)"], &[" "], &["$"]]);
        let leg = search(&b, Coord::new(0, 0), Coord::new(5, 0)).leg.unwrap();
        let coords: Vec<_> = leg.steps.iter().map(|s| s.coord).collect();
        assert_eq!(
            coords,
            vec![
                Coord::new(0, 0),
                Coord::new(1, 0),
                Coord::new(3, 0),
                Coord::new(4, 0),
                Coord::new(5, 0)
            ]
        );
        assert_eq!(leg.cost, 3.0);
        // the trap thrown onto is still armed, the one that threw is spent
        assert!(leg.end_state.effects.contains(&Coord::new(3, 0)));
        assert!(!leg.end_state.effects.contains(&Coord::new(1, 0)));
    }

    #[test]
    fn test_spent_teleport_is_ordinary_cell() {
        let b = board(&[&[" "], &["(x)"], &[" "], &["$"]]);
        let origin = BranchState {
            multipliers: Multipliers::default(),
            remaining: b.treasure_coordinates(),
            effects: BTreeSet::new(),
        };
        let config = SearchConfig::default();
        let leg = LegSearch::new(&b, &config)
            .run(Coord::new(0, 0), Coord::new(3, 0), &origin)
            .leg
            .unwrap();
        assert_eq!(leg.steps.len(), 4);
        assert_eq!(leg.cost, 3.0);
        assert!(leg
            .steps
            .iter()
            .all(|s| !matches!(s.arrival, Arrival::Teleport(_))));
    }

    #[test]
    fn test_treasure_picked_up_en_route() {
        let b = board(&[&[" "], &["$"], &["$"]]);
        let leg = search(&b, Coord::new(0, 0), Coord::new(2, 0)).leg.unwrap();
        assert!(leg.end_state.remaining.is_empty());
    }

    #[test]
    fn test_expansion_budget() {
        let b = Board::new(vec![vec![CellKind::Empty; 8]; 8]).unwrap();
        let config = SearchConfig::default().with_max_expansions(3);
        let outcome = find_path(
            &b,
            &config,
            Coord::new(0, 0),
            Coord::new(7, 7),
            &BTreeSet::new(),
        );
        assert!(outcome.leg.is_none());
        assert!(outcome.budget_exhausted);
        assert_eq!(outcome.stats.expanded, 3);
    }

    #[test]
    fn test_zero_heuristic_never_worse() {
        let b = board(&[
            &[" ", " ", "[+]", " ", " "],
            &[" ", "(~)", "O", "(+)", " "],
            &[" ", " ", "[x]", " ", "$"],
        ]);
        let treasures = b.treasure_coordinates();
        for dedup in [DedupMode::default(), DedupMode::Exact] {
            let greedy = find_path(
                &b,
                &SearchConfig::default().with_dedup(dedup),
                Coord::new(0, 0),
                Coord::new(2, 4),
                &treasures,
            );
            let uniform = find_path(
                &b,
                &SearchConfig::default()
                    .with_dedup(dedup)
                    .with_heuristic(HeuristicKind::Zero),
                Coord::new(0, 0),
                Coord::new(2, 4),
                &treasures,
            );
            assert!(uniform.cost().unwrap() <= greedy.cost().unwrap());
        }
    }

    #[test]
    fn test_frontier_orders_by_f_then_insertion() {
        let mut heap = BinaryHeap::new();
        heap.push(FrontierEntry {
            f: 2.0,
            seq: 0,
            node: NodeId(0),
        });
        heap.push(FrontierEntry {
            f: 1.0,
            seq: 2,
            node: NodeId(1),
        });
        heap.push(FrontierEntry {
            f: 1.0,
            seq: 1,
            node: NodeId(2),
        });
        assert_eq!(heap.pop().unwrap().node, NodeId(2));
        assert_eq!(heap.pop().unwrap().node, NodeId(1));
        assert_eq!(heap.pop().unwrap().node, NodeId(0));
    }
}
