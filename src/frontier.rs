//! Frontier containers for the five strategies.
//!
//! The priority frontier has no decrease-key. A state whose key improves is
//! pushed again and the older entry is left in place to be skipped on pop.

use std::collections::VecDeque;

use crate::node::{Node, NodeId};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Discipline {
    Fifo,
    Lifo,
    /// Path cost, then action rank.
    Cost,
    /// Heuristic, then path cost, then action rank.
    Heuristic,
    /// Path cost plus heuristic, then action rank.
    CostPlusHeuristic,
}

impl Discipline {
    /// `None` for the queue/stack disciplines.
    pub fn priority(self, node: &Node) -> Option<Priority> {
        let (primary, secondary) = match self {
            Discipline::Fifo | Discipline::Lifo => return None,
            Discipline::Cost => (node.path_cost, 0),
            Discipline::Heuristic => (node.heuristic, node.path_cost),
            Discipline::CostPlusHeuristic => (node.path_cost + node.heuristic, 0),
        };

        Some(Priority {
            primary,
            secondary,
            rank: node.rank(),
        })
    }
}

/// Lower is better. `primary` is what the duplicate check compares.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd)]
pub struct Priority {
    pub primary: u32,
    pub secondary: u32,
    pub rank: u8,
}

/// Which of several entries with equal priority pops first.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq, clap::ValueEnum)]
pub enum TieBreak {
    /// Whatever the sift order of a binary heap comparing priorities only
    /// yields.
    #[default]
    Heap,
    /// Insertion order. Makes the pop order a total order, so removing
    /// superseded entries early never changes the result.
    Insertion,
}

#[derive(Clone, Copy, Debug)]
struct Entry {
    priority: Priority,
    seq: u64,
    node: NodeId,
}

// Array binary min-heap. Push sifts the new item towards the root while it is
// strictly smaller than its parent; pop moves the last item to the root, walks
// it down to a leaf along the smaller child (the right one on ties), then sifts
// it back up. Equal keys pop in whatever order these rules leave them.
struct PriorityHeap {
    discipline: Discipline,
    ties: TieBreak,
    entries: Vec<Entry>,
    seq: u64,
}

impl PriorityHeap {
    fn less(&self, a: &Entry, b: &Entry) -> bool {
        match self.ties {
            TieBreak::Heap => a.priority < b.priority,
            TieBreak::Insertion => (a.priority, a.seq) < (b.priority, b.seq),
        }
    }

    fn push(&mut self, priority: Priority, node: NodeId) {
        self.entries.push(Entry {
            priority,
            seq: self.seq,
            node,
        });
        self.seq += 1;
        self.sift_down(0, self.entries.len() - 1);
    }

    fn pop(&mut self) -> Option<NodeId> {
        let last = self.entries.pop()?;
        if self.entries.is_empty() {
            return Some(last.node);
        }

        let top = std::mem::replace(&mut self.entries[0], last);
        self.sift_up(0);
        Some(top.node)
    }

    fn sift_down(&mut self, start: usize, mut pos: usize) {
        let item = self.entries[pos];
        while pos > start {
            let parent = (pos - 1) / 2;
            if !self.less(&item, &self.entries[parent]) {
                break;
            }
            self.entries[pos] = self.entries[parent];
            pos = parent;
        }
        self.entries[pos] = item;
    }

    fn sift_up(&mut self, mut pos: usize) {
        let (start, end) = (pos, self.entries.len());
        let item = self.entries[pos];
        let mut child = 2 * pos + 1;
        while child < end {
            let right = child + 1;
            if right < end && !self.less(&self.entries[child], &self.entries[right]) {
                child = right;
            }
            self.entries[pos] = self.entries[child];
            pos = child;
            child = 2 * pos + 1;
        }
        self.entries[pos] = item;
        self.sift_down(start, pos);
    }

    fn retain(&mut self, mut keep: impl FnMut(NodeId) -> bool) {
        self.entries.retain(|entry| keep(entry.node));
        for pos in (0..self.entries.len() / 2).rev() {
            self.sift_up(pos);
        }
    }
}

enum Kind {
    Queue(VecDeque<NodeId>),
    Stack(Vec<NodeId>),
    Heap(PriorityHeap),
}

pub struct Frontier {
    kind: Kind,
}

impl Frontier {
    pub fn new(discipline: Discipline, ties: TieBreak) -> Frontier {
        let kind = match discipline {
            Discipline::Fifo => Kind::Queue(VecDeque::new()),
            Discipline::Lifo => Kind::Stack(Vec::new()),
            _ => Kind::Heap(PriorityHeap {
                discipline,
                ties,
                entries: Vec::new(),
                seq: 0,
            }),
        };

        Frontier { kind }
    }

    /// `node` must be the node stored under `id`.
    pub fn push(&mut self, id: NodeId, node: &Node) {
        match &mut self.kind {
            Kind::Queue(queue) => queue.push_back(id),
            Kind::Stack(stack) => stack.push(id),
            Kind::Heap(heap) => {
                if let Some(priority) = heap.discipline.priority(node) {
                    heap.push(priority, id);
                }
            }
        }
    }

    pub fn pop(&mut self) -> Option<NodeId> {
        match &mut self.kind {
            Kind::Queue(queue) => queue.pop_front(),
            Kind::Stack(stack) => stack.pop(),
            Kind::Heap(heap) => heap.pop(),
        }
    }

    pub fn retain(&mut self, mut keep: impl FnMut(NodeId) -> bool) {
        match &mut self.kind {
            Kind::Queue(queue) => queue.retain(|&id| keep(id)),
            Kind::Stack(stack) => stack.retain(|&id| keep(id)),
            Kind::Heap(heap) => heap.retain(keep),
        }
    }

    pub fn len(&self) -> usize {
        match &self.kind {
            Kind::Queue(queue) => queue.len(),
            Kind::Stack(stack) => stack.len(),
            Kind::Heap(heap) => heap.entries.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::domain::{Action, Direction, Domain};

    fn node(path_cost: u32, heuristic: u32, direction: Direction) -> Node {
        Node {
            board: Domain::SingleBlank.goal(),
            parent: Some(0),
            action: Some(Action {
                blank: 4,
                direction,
            }),
            path_cost,
            heuristic,
        }
    }

    fn drain(frontier: &mut Frontier) -> Vec<NodeId> {
        std::iter::from_fn(|| frontier.pop()).collect()
    }

    fn fill(discipline: Discipline, ties: TieBreak, nodes: &[Node]) -> Frontier {
        let mut frontier = Frontier::new(discipline, ties);
        for (id, n) in nodes.iter().enumerate() {
            frontier.push(id, n);
        }
        frontier
    }

    #[test]
    fn queue_and_stack_orders() {
        let nodes = [
            node(1, 0, Direction::Up),
            node(1, 0, Direction::Up),
            node(1, 0, Direction::Up),
        ];

        assert_eq!(drain(&mut fill(Discipline::Fifo, TieBreak::Heap, &nodes)), vec![0, 1, 2]);
        assert_eq!(drain(&mut fill(Discipline::Lifo, TieBreak::Heap, &nodes)), vec![2, 1, 0]);
    }

    #[test]
    fn cost_breaks_ties_by_direction() {
        let nodes = [
            node(2, 0, Direction::Up),
            node(1, 9, Direction::Left),
            node(1, 0, Direction::Right),
            node(1, 5, Direction::Right),
        ];

        assert_eq!(
            drain(&mut fill(Discipline::Cost, TieBreak::Insertion, &nodes)),
            vec![2, 3, 1, 0]
        );
    }

    #[test]
    fn heap_ties_follow_sift_order() {
        // four equal keys: popping 0 moves 3 to the root, which is walked down
        // along the right child on ties and lifts 2 above 1
        let nodes = [
            node(1, 0, Direction::Up),
            node(1, 0, Direction::Up),
            node(1, 0, Direction::Up),
            node(1, 0, Direction::Up),
        ];

        assert_eq!(
            drain(&mut fill(Discipline::Cost, TieBreak::Heap, &nodes)),
            vec![0, 2, 1, 3]
        );
        assert_eq!(
            drain(&mut fill(Discipline::Cost, TieBreak::Insertion, &nodes)),
            vec![0, 1, 2, 3]
        );
    }

    #[test]
    fn greedy_prefers_heuristic_then_cost() {
        let nodes = [
            node(5, 1, Direction::Left),
            node(3, 1, Direction::Left),
            node(3, 1, Direction::Up),
            node(1, 4, Direction::Up),
        ];

        for ties in [TieBreak::Heap, TieBreak::Insertion] {
            assert_eq!(drain(&mut fill(Discipline::Heuristic, ties, &nodes)), vec![2, 1, 0, 3]);
        }
    }

    #[test]
    fn astar_sums_cost_and_heuristic() {
        let nodes = [
            node(1, 4, Direction::Up),
            node(3, 1, Direction::Left),
            node(2, 2, Direction::Down),
        ];

        assert_eq!(
            drain(&mut fill(Discipline::CostPlusHeuristic, TieBreak::Heap, &nodes)),
            vec![2, 1, 0]
        );
    }

    #[test]
    fn retain_drops_entries() {
        let nodes = [
            node(1, 0, Direction::Up),
            node(2, 0, Direction::Up),
            node(3, 0, Direction::Up),
            node(4, 0, Direction::Up),
        ];
        let mut frontier = fill(Discipline::Cost, TieBreak::Heap, &nodes);
        frontier.retain(|id| id != 1);

        assert_eq!(frontier.len(), 3);
        assert_eq!(drain(&mut frontier), vec![0, 2, 3]);
        assert!(frontier.is_empty());
    }
}
