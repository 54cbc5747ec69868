//! Search nodes and the tree they form through parent links.
//!
//! Nodes live in an arena owned by a single search run and refer to their
//! parent by index. A node never changes after it is pushed, and no node
//! knows its children.

use std::ops::Index;

use crate::board::Board;
use crate::domain::Action;

pub type NodeId = usize;

#[derive(Clone, Debug)]
pub struct Node {
    pub board: Board,
    /// `None` only for the root.
    pub parent: Option<NodeId>,
    /// The action that turned the parent's board into this one.
    pub action: Option<Action>,
    pub path_cost: u32,
    /// Estimate to the goal; 0 for uninformed strategies.
    pub heuristic: u32,
}

impl Node {
    pub fn root(board: Board, heuristic: u32) -> Node {
        Node {
            board,
            parent: None,
            action: None,
            path_cost: 0,
            heuristic,
        }
    }

    /// Tie-break rank of the producing action. Only the direction counts,
    /// so in the multi-blank domain the blank index is ignored. The root
    /// ranks ahead of every action.
    pub fn rank(&self) -> u8 {
        match self.action {
            None => 0,
            Some(action) => action.direction.rank() + 1,
        }
    }
}

#[derive(Default)]
pub struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    pub fn new() -> Tree {
        Tree::default()
    }

    pub fn push(&mut self, node: Node) -> NodeId {
        debug_assert!(node.parent.map_or(true, |p| p < self.nodes.len()));
        self.nodes.push(node);
        self.nodes.len() - 1
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Walks from `id` up to the root, `id` first.
    pub fn ancestry(&self, id: NodeId) -> impl Iterator<Item = &Node> + '_ {
        std::iter::successors(Some(&self.nodes[id]), move |node| {
            node.parent.map(|p| &self.nodes[p])
        })
    }
}

impl Index<NodeId> for Tree {
    type Output = Node;
    fn index(&self, index: NodeId) -> &Self::Output {
        &self.nodes[index]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::domain::{Direction, Domain};

    #[test]
    fn ancestry_runs_back_to_root() {
        let domain = Domain::SingleBlank;
        let start = domain.parse("123456078").unwrap();
        let mut tree = Tree::new();
        let root = tree.push(Node::root(start, 2));

        let mut parent = root;
        let mut board = start;
        for direction in [Direction::Right, Direction::Right] {
            let action = Action {
                blank: board.blanks().next().unwrap(),
                direction,
            };
            board = domain.result(&board, action);
            parent = tree.push(Node {
                board,
                parent: Some(parent),
                action: Some(action),
                path_cost: tree[parent].path_cost + 1,
                heuristic: 0,
            });
        }

        let costs: Vec<u32> = tree.ancestry(parent).map(|n| n.path_cost).collect();
        assert_eq!(costs, vec![2, 1, 0]);
        assert_eq!(tree[parent].board, domain.goal());
        assert_eq!(tree.len(), 3);
    }

    #[test]
    fn rank_follows_direction_order() {
        let board = Domain::SingleBlank.goal();
        let child = |direction| Node {
            board,
            parent: Some(0),
            action: Some(Action { blank: 4, direction }),
            path_cost: 1,
            heuristic: 0,
        };

        assert_eq!(Node::root(board, 0).rank(), 0);
        assert!(child(Direction::Up).rank() < child(Direction::Right).rank());
        assert!(child(Direction::Right).rank() < child(Direction::Down).rank());
        assert!(child(Direction::Down).rank() < child(Direction::Left).rank());
    }
}
