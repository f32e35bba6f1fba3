use std::fmt;
use std::sync::Arc;

use conslist::List;

use crate::rank::Rank;

/// A heap-ordered binomial tree.
///
/// A tree of rank `r` has exactly `r` children, of ranks `r-1 .. 0` in that
/// order (highest first), holds `2^r` elements in total, and its root is
/// `<=` every element beneath it. Nodes are created by `singleton` and
/// `link` and never mutated, so a tree can appear in any number of heap
/// versions at once.
pub(crate) struct Tree<T>(Arc<Node<T>>);

struct Node<T> {
    rank: Rank,
    root: T,
    children: List<Tree<T>>,
}

impl<T> Clone for Tree<T> {
    fn clone(&self) -> Self {
        Tree(self.0.clone())
    }
}

impl<T> Tree<T> {
    /// A rank-0 tree holding a single element.
    pub(crate) fn singleton(root: T) -> Self {
        Tree(Arc::new(Node {
            rank: Rank::ZERO,
            root,
            children: List::new(),
        }))
    }

    #[inline]
    pub(crate) fn rank(&self) -> Rank {
        self.0.rank
    }

    #[inline]
    pub(crate) fn root(&self) -> &T {
        &self.0.root
    }

    #[inline]
    pub(crate) fn children(&self) -> &List<Tree<T>> {
        &self.0.children
    }

    /// The number of elements in this tree.
    #[inline]
    pub(crate) fn len(&self) -> usize {
        self.0.rank.len()
    }
}

impl<T: Ord + Clone> Tree<T> {
    /// Links two trees of equal rank into one tree of the next rank.
    ///
    /// The smaller root wins; on equal roots `self` wins. The loser is
    /// consed onto the winner's children, becoming its highest-rank child.
    /// Neither input is touched, both remain valid afterwards.
    ///
    /// Unequal ranks are a defect in the caller, not a runtime condition.
    pub(crate) fn link(&self, other: &Self) -> Self {
        assert_eq!(self.rank(), other.rank(), "linked trees must have equal rank");
        let (winner, loser) = if self.root() <= other.root() {
            (self, other)
        } else {
            (other, self)
        };
        Tree(Arc::new(Node {
            rank: winner.rank().succ(),
            root: winner.root().clone(),
            children: winner.children().cons(loser.clone()),
        }))
    }
}

impl<T: fmt::Debug> fmt::Debug for Tree<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Tree")
            .field("rank", &self.0.rank)
            .field("root", &self.0.root)
            .field("children", &self.0.children)
            .finish()
    }
}
