//! Structural invariant checking for the heap's forest.

use thiserror::Error;

use crate::heap::Heap;
use crate::tree::Tree;
use crate::rank::Rank;

/// Error returned when [`Heap::validate`] finds a broken invariant.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum ValidateHeapError {
    /// Forest ranks must be strictly increasing.
    #[error("forest out of order: rank {prev} followed by rank {next}")]
    ForestOrder { prev: u8, next: u8 },

    /// A rank-`r` tree must have exactly `r` children.
    #[error("rank {parent} tree has {found} children")]
    ChildCount { parent: u8, found: usize },

    /// Children must descend in rank, `r-1 .. 0`.
    #[error("rank {parent} tree has a rank {child} child at position {at}")]
    ChildRank { parent: u8, child: u8, at: usize },

    /// A root must be `<=` every element beneath it.
    #[error("heap order violated under a rank {parent} tree")]
    HeapOrder { parent: u8 },
}

impl<T: Ord> Heap<T> {
    /// Walks the whole forest checking every structural invariant: strictly
    /// increasing distinct ranks, per-tree child counts and child rank
    /// sequences, and heap order. Child count plus child ranks together pin
    /// the size of a rank-`r` tree to exactly `2^r`.
    ///
    /// O(n); meant for tests and debugging, not the hot path.
    pub fn validate(&self) -> Result<(), ValidateHeapError> {
        let mut prev: Option<Rank> = None;
        for tree in self.trees().iter() {
            if let Some(prev) = prev {
                if tree.rank() <= prev {
                    return Err(ValidateHeapError::ForestOrder {
                        prev: prev.get(),
                        next: tree.rank().get(),
                    });
                }
            }
            validate_tree(tree)?;
            prev = Some(tree.rank());
        }
        Ok(())
    }
}

fn validate_tree<T: Ord>(tree: &Tree<T>) -> Result<(), ValidateHeapError> {
    let rank = tree.rank().get();

    if tree.children().len() != rank as usize {
        return Err(ValidateHeapError::ChildCount {
            parent: rank,
            found: tree.children().len(),
        });
    }

    let mut expected = rank;
    for (at, child) in tree.children().iter().enumerate() {
        expected -= 1;
        if child.rank() != expected {
            return Err(ValidateHeapError::ChildRank {
                parent: rank,
                child: child.rank().get(),
                at,
            });
        }
        if child.root() < tree.root() {
            return Err(ValidateHeapError::HeapOrder { parent: rank });
        }
        validate_tree(child)?;
    }
    Ok(())
}
