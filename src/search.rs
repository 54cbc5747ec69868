//! The search engine shared by all five strategies.
//!
//! Every run owns its own frontier, explored set, queued set and cost index;
//! nothing survives between runs.

use std::collections::{HashMap, HashSet};
use std::fmt::Display;

use tracing::{debug, info, info_span, trace, warn};

use crate::board::Board;
use crate::domain::{Action, Domain};
use crate::error::{Error, Result};
use crate::frontier::{Discipline, Frontier, TieBreak};
use crate::heuristic::Heuristic;
use crate::node::{Node, NodeId, Tree};
use crate::path::{self, Solution};

#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, clap::ValueEnum)]
pub enum Strategy {
    Bfs,
    Dfs,
    Ucs,
    Greedy,
    #[value(name = "astar")]
    AStar,
}

impl Strategy {
    pub const ALL: [Strategy; 5] = [
        Strategy::Bfs,
        Strategy::Dfs,
        Strategy::Ucs,
        Strategy::Greedy,
        Strategy::AStar,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Strategy::Bfs => "BFS",
            Strategy::Dfs => "DFS",
            Strategy::Ucs => "UCS",
            Strategy::Greedy => "Greedy",
            Strategy::AStar => "A*",
        }
    }

    pub fn discipline(self) -> Discipline {
        match self {
            Strategy::Bfs => Discipline::Fifo,
            Strategy::Dfs => Discipline::Lifo,
            Strategy::Ucs => Discipline::Cost,
            Strategy::Greedy => Discipline::Heuristic,
            Strategy::AStar => Discipline::CostPlusHeuristic,
        }
    }

    pub fn is_informed(self) -> bool {
        matches!(self, Strategy::Greedy | Strategy::AStar)
    }

    /// The strategies run on a domain when none are requested.
    #[auto_enums::auto_enum(Iterator)]
    pub fn defaults(domain: Domain) -> impl Iterator<Item = Strategy> {
        match domain {
            Domain::SingleBlank => Strategy::ALL.into_iter(),
            Domain::MultiBlank => std::iter::once(Strategy::AStar),
        }
    }
}

impl Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SearchOptions {
    /// Overrides the domain's default heuristic for Greedy and A*.
    pub heuristic: Option<Heuristic>,
    /// Drop superseded frontier entries before every pop instead of
    /// skipping them lazily. Only with `TieBreak::Insertion` is the result
    /// guaranteed to be identical; heap ties can settle on another path of
    /// the same cost.
    pub purge_stale: bool,
    pub ties: TieBreak,
}

#[derive(Clone, Copy, Debug)]
pub struct Problem {
    pub domain: Domain,
    pub initial: Board,
}

impl Problem {
    pub fn new(domain: Domain, initial: Board) -> Problem {
        Problem { domain, initial }
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct Stats {
    /// States expanded (or, for the goal, reached).
    pub explored: usize,
    /// States still waiting in the frontier when the run ended.
    pub queued: usize,
    /// Frontier entries popped and discarded because their state was
    /// already explored.
    pub stale_skipped: usize,
    /// Children produced by expansion, kept or not.
    pub generated: usize,
    pub frontier_high_water: usize,
}

impl Stats {
    /// Explored plus still-queued states. This counts frontier states that
    /// were never expanded; reports use it as the expanded-node count.
    pub fn expanded(&self) -> usize {
        self.explored + self.queued
    }
}

/// Runs `strategy` on `problem` until the goal is found or the frontier
/// is exhausted.
pub fn search(problem: &Problem, strategy: Strategy, options: &SearchOptions) -> Result<Solution> {
    let span = info_span!("search", %strategy);
    let _enter = span.enter();

    problem.domain.validate(&problem.initial)?;

    let heuristic = options
        .heuristic
        .unwrap_or_else(|| Heuristic::default_for(problem.domain));
    debug!(initial = %problem.initial, domain = %problem.domain, %heuristic, "starting");

    if !problem.domain.is_solvable(&problem.initial) {
        warn!(initial = %problem.initial, "odd inversion count, goal is unreachable");
    }

    let mut run = Run::new(problem, strategy, heuristic, options);
    let terminal = run.execute();
    let stats = run.stats();

    let Some(terminal) = terminal else {
        info!(expanded = stats.expanded(), explored = stats.explored, "frontier exhausted");
        return Err(Error::Exhausted {
            strategy,
            expanded: stats.expanded(),
        });
    };

    let solution = path::reconstruct(problem, strategy, &run.tree, terminal, stats)?;
    info!(
        path_cost = solution.path_cost,
        expanded = stats.expanded(),
        explored = stats.explored,
        queued = stats.queued,
        stale_skipped = stats.stale_skipped,
        high_water = stats.frontier_high_water,
        "goal reached"
    );

    Ok(solution)
}

struct Run<'a> {
    problem: &'a Problem,
    strategy: Strategy,
    heuristic: Heuristic,
    purge_stale: bool,

    tree: Tree,
    frontier: Frontier,
    explored: HashSet<Board>,
    // states with a live frontier entry
    queued: HashSet<Board>,
    // best primary key recorded per queued state (priority strategies only)
    best: HashMap<Board, u32>,

    stale_skipped: usize,
    generated: usize,
    high_water: usize,
}

impl<'a> Run<'a> {
    fn new(problem: &'a Problem, strategy: Strategy, heuristic: Heuristic, options: &SearchOptions) -> Self {
        Run {
            problem,
            strategy,
            heuristic,
            purge_stale: options.purge_stale,
            tree: Tree::new(),
            frontier: Frontier::new(strategy.discipline(), options.ties),
            explored: HashSet::new(),
            queued: HashSet::new(),
            best: HashMap::new(),
            stale_skipped: 0,
            generated: 0,
            high_water: 0,
        }
    }

    fn stats(&self) -> Stats {
        Stats {
            explored: self.explored.len(),
            queued: self.queued.len(),
            stale_skipped: self.stale_skipped,
            generated: self.generated,
            frontier_high_water: self.high_water,
        }
    }

    fn estimate(&self, board: &Board) -> u32 {
        if self.strategy.is_informed() {
            self.heuristic.evaluate(self.problem.domain, board)
        } else {
            0
        }
    }

    fn execute(&mut self) -> Option<NodeId> {
        let domain = self.problem.domain;
        let initial = self.problem.initial;
        let root = self.tree.push(Node::root(initial, self.estimate(&initial)));
        if domain.goal_test(&initial) {
            return Some(root);
        }

        self.enqueue(root);

        while let Some(id) = self.next() {
            let board = self.tree[id].board;
            self.explored.insert(board);
            self.queued.remove(&board);

            if domain.goal_test(&board) {
                return Some(id);
            }

            trace!(%board, path_cost = self.tree[id].path_cost, "expanding");
            for action in domain.actions(&board) {
                self.generated += 1;
                self.consider(id, action, domain.result(&board, action));
            }
        }

        None
    }

    /// Pops the next node worth expanding, discarding entries whose state
    /// has been explored since they were pushed.
    fn next(&mut self) -> Option<NodeId> {
        loop {
            if self.purge_stale {
                self.purge();
            }

            let id = self.frontier.pop()?;
            if self.explored.contains(&self.tree[id].board) {
                self.stale_skipped += 1;
                continue;
            }

            return Some(id);
        }
    }

    fn enqueue(&mut self, id: NodeId) {
        let node = &self.tree[id];
        self.frontier.push(id, node);
        self.queued.insert(node.board);
        if let Some(priority) = self.strategy.discipline().priority(node) {
            self.best.insert(node.board, priority.primary);
        }

        self.high_water = self.high_water.max(self.frontier.len());
    }

    fn consider(&mut self, parent: NodeId, action: Action, board: Board) {
        if self.explored.contains(&board) {
            return;
        }

        let child = Node {
            board,
            parent: Some(parent),
            action: Some(action),
            path_cost: self.tree[parent].path_cost + 1,
            heuristic: self.estimate(&board),
        };

        let discipline = self.strategy.discipline();
        let worth_pushing = match discipline.priority(&child) {
            // a queued state is only pushed again with a strictly better key
            Some(priority) => match self.best.get(&board) {
                Some(&best) if self.queued.contains(&board) => priority.primary < best,
                _ => true,
            },
            // a stack may hold a state several times; the newest copy wins
            None if discipline == Discipline::Lifo => true,
            None => !self.queued.contains(&board),
        };

        if worth_pushing {
            let id = self.tree.push(child);
            self.enqueue(id);
        }
    }

    /// Removes every frontier entry that lazy deletion would skip or that
    /// a better entry for the same state has superseded.
    fn purge(&mut self) {
        let Run {
            strategy,
            tree,
            frontier,
            explored,
            best,
            ..
        } = self;
        let discipline = strategy.discipline();

        frontier.retain(|id| {
            let node = &tree[id];
            if explored.contains(&node.board) {
                return false;
            }

            match discipline.priority(node) {
                Some(priority) => best.get(&node.board) == Some(&priority.primary),
                None => true,
            }
        });
    }
}
