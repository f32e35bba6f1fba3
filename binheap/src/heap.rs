use std::cmp::Ordering;
use std::fmt;
use std::iter::FromIterator;

use conslist::List;

use crate::tree::Tree;
use crate::rank::Rank;

/// An immutable, structurally-shared binomial heap.
///
/// The heap is a forest of heap-ordered binomial trees kept in strictly
/// increasing rank order, so a heap of n elements holds one tree per set bit
/// of n. Insert, merge and delete-minimum all run in O(log n) by the same
/// carry-propagation argument as binary addition.
///
/// Every operation takes `&self` and returns a new heap; the input is never
/// touched, and untouched subtrees are shared between the versions. A
/// `Heap` value itself is a thin handle and `Clone` is O(1).
pub struct Heap<T> {
    trees: List<Tree<T>>,
}

static_assertions::assert_impl_all!(Heap<u32>: Send, Sync);
static_assertions::assert_eq_size!(Heap<u32>, [usize; 2]);

impl<T> Heap<T> {
    /// Returns the empty heap.
    #[inline]
    pub const fn new() -> Self {
        Self { trees: List::new() }
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.trees.is_empty()
    }

    /// The number of elements, summed from the tree ranks.
    ///
    /// O(log n): one term per tree in the forest.
    pub fn len(&self) -> usize {
        self.trees.iter().map(Tree::len).sum()
    }

    /// The tree ranks of the forest, in traversal order.
    ///
    /// Strictly increasing in any valid heap; exposed for inspection and
    /// tests.
    pub fn ranks(&self) -> impl Iterator<Item = Rank> + '_ {
        self.trees.iter().map(Tree::rank)
    }

    #[inline]
    pub(crate) fn trees(&self) -> &List<Tree<T>> {
        &self.trees
    }
}

impl<T: Ord> Heap<T> {
    /// Returns the smallest element, or `None` if the heap is empty.
    ///
    /// Each root is only minimal within its own tree, so every root is
    /// scanned; among equal minima the earliest tree in the forest wins,
    /// matching [`Heap::remove_min`]. O(log n).
    pub fn find_min(&self) -> Option<&T> {
        let mut min: Option<&T> = None;
        for tree in self.trees.iter() {
            match min {
                Some(m) if m <= tree.root() => {}
                _ => min = Some(tree.root()),
            }
        }
        min
    }

    /// Removes the minimal tree from `forest`.
    ///
    /// `None` iff the forest is empty. The remainder keeps its rank order.
    /// Ties go to the earlier tree, which is what keeps this consistent
    /// with the iterative scan in `find_min`.
    fn remove_min_tree(forest: &List<Tree<T>>) -> Option<(Tree<T>, List<Tree<T>>)> {
        let (t, ts) = forest.uncons()?;
        match Self::remove_min_tree(&ts) {
            None => Some((t.clone(), ts)),
            Some((t2, ts2)) => {
                if t.root() <= t2.root() {
                    Some((t.clone(), ts))
                } else {
                    Some((t2, ts2.cons(t.clone())))
                }
            }
        }
    }
}

impl<T: Ord + Clone> Heap<T> {
    /// Returns a new heap with `element` added.
    ///
    /// O(log n) worst case (a full carry chain), O(1) amortized over a
    /// sequence of pushes.
    pub fn push(&self, element: T) -> Self {
        Self {
            trees: Self::insert_into(Tree::singleton(element), &self.trees),
        }
    }

    /// Pushes every element of `elements`, left to right.
    pub fn insert_all<I>(&self, elements: I) -> Self
    where
        I: IntoIterator<Item = T>,
    {
        let mut heap = self.clone();
        for element in elements {
            heap = heap.push(element);
        }
        heap
    }

    /// Merges two heaps into one holding both element multisets.
    ///
    /// O(log n) in the combined size; this is the operation the forest
    /// representation exists for. Both inputs remain valid.
    pub fn merge(&self, other: &Self) -> Self {
        Self {
            trees: Self::merge_forests(&self.trees, &other.trees),
        }
    }

    /// Removes the smallest element, returning it and the remaining heap.
    ///
    /// `None` iff the heap is empty; either way `self` is untouched. Among
    /// equal minima the same element is chosen as [`Heap::find_min`].
    /// O(log n) for the scan plus O(log n) for the merge of the removed
    /// tree's children back into the forest.
    pub fn remove_min(&self) -> Option<(T, Self)> {
        let (min, rest) = Self::remove_min_tree(&self.trees)?;
        // The children are ordered highest rank first; reverse to ascending
        // rank before merging them with the remaining forest.
        let trees = Self::merge_forests(&min.children().reverse(), &rest);
        Some((min.root().clone(), Self { trees }))
    }

    /// Drains the heap in non-decreasing order.
    pub fn into_sorted_vec(self) -> Vec<T> {
        let mut out = Vec::with_capacity(self.len());
        let mut heap = self;
        while let Some((element, rest)) = heap.remove_min() {
            out.push(element);
            heap = rest;
        }
        out
    }

    /// Inserts a single tree into a rank-ordered forest, linking with an
    /// existing same-rank tree as needed - binary-counter carry propagation.
    ///
    /// The forest invariant guarantees `tree.rank` can never exceed the head
    /// rank once it stops being smaller, so the only cases are "insertion
    /// point found" and "carry".
    fn insert_into(tree: Tree<T>, forest: &List<Tree<T>>) -> List<Tree<T>> {
        match forest.uncons() {
            None => forest.cons(tree),
            Some((head, tail)) => {
                if tree.rank() < head.rank() {
                    forest.cons(tree)
                } else {
                    Self::insert_into(tree.link(head), &tail)
                }
            }
        }
    }

    /// Merges two rank-ordered forests, like adding two binary numbers.
    ///
    /// An empty side shares the other side unchanged; equal-rank heads link
    /// into a carry that is inserted into the merge of both tails.
    /// Recursion depth is O(log n).
    fn merge_forests(lhs: &List<Tree<T>>, rhs: &List<Tree<T>>) -> List<Tree<T>> {
        let (t1, ts1) = match lhs.uncons() {
            None => return rhs.clone(),
            Some(head_tail) => head_tail,
        };
        let (t2, ts2) = match rhs.uncons() {
            None => return lhs.clone(),
            Some(head_tail) => head_tail,
        };
        match t1.rank().cmp(&t2.rank()) {
            Ordering::Less => Self::merge_forests(&ts1, rhs).cons(t1.clone()),
            Ordering::Greater => Self::merge_forests(lhs, &ts2).cons(t2.clone()),
            Ordering::Equal => {
                Self::insert_into(t1.link(t2), &Self::merge_forests(&ts1, &ts2))
            }
        }
    }
}

impl<T> Clone for Heap<T> {
    fn clone(&self) -> Self {
        Self {
            trees: self.trees.clone(),
        }
    }
}

impl<T> Default for Heap<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for Heap<T> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_struct("Heap").field("trees", &self.trees).finish()
    }
}

impl<T: Ord + Clone> FromIterator<T> for Heap<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::new().insert_all(iter)
    }
}
