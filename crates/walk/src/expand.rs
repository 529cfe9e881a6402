//! Lazy tree expansion over an arbitrary "immediate children" function.
//!
//! Both combinators keep their pending work in explicit frames (one
//! not-yet-consumed children iterator per expanded item) instead of
//! recursing, so arbitrarily deep trees cannot exhaust the call stack.
//!
//! An item's children are requested exactly once, at the moment the item
//! itself is yielded. Cycles are not detected: a children function that
//! leads back to an ancestor expands forever.

use std::collections::VecDeque;
use std::fmt;
use std::iter::FusedIterator;

/// Expands `root` depth-first in pre-order.
///
/// The root comes first, followed by the complete expansion of its first
/// child, then of its second child, and so on. Sibling order is whatever
/// `children_of` returns.
///
/// ```
/// use walk::expand_deep;
///
/// let order: Vec<u32> = expand_deep(1, |&n| if n < 4 { vec![n * 2, n * 2 + 1] } else { vec![] })
///     .collect();
/// assert_eq!(order, [1, 2, 4, 5, 3, 6, 7]);
/// ```
pub fn expand_deep<T, F, I>(root: T, children_of: F) -> ExpandDeep<T, F, I>
where
    F: FnMut(&T) -> I,
    I: IntoIterator<Item = T>,
{
    ExpandDeep {
        root: Some(root),
        stack: Vec::new(),
        children_of,
    }
}

/// Expands `root` breadth-first.
///
/// The root comes first, then all of its children, then all grandchildren
/// (grouped by parent, in the order the parents were yielded), and so on.
///
/// ```
/// use walk::expand_breadth;
///
/// let order: Vec<u32> = expand_breadth(1, |&n| if n < 4 { vec![n * 2, n * 2 + 1] } else { vec![] })
///     .collect();
/// assert_eq!(order, [1, 2, 3, 4, 5, 6, 7]);
/// ```
pub fn expand_breadth<T, F, I>(root: T, children_of: F) -> ExpandBreadth<T, F, I>
where
    F: FnMut(&T) -> I,
    I: IntoIterator<Item = T>,
{
    ExpandBreadth {
        root: Some(root),
        queue: VecDeque::new(),
        children_of,
    }
}

/// Depth-first iterator returned by [`expand_deep`].
pub struct ExpandDeep<T, F, I>
where
    I: IntoIterator<Item = T>,
{
    root: Option<T>,
    stack: Vec<I::IntoIter>,
    children_of: F,
}

impl<T, F, I> ExpandDeep<T, F, I>
where
    I: IntoIterator<Item = T>,
{
    /// Number of partially expanded items whose remaining children are
    /// still pending.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.stack.len()
    }
}

impl<T, F, I> Iterator for ExpandDeep<T, F, I>
where
    F: FnMut(&T) -> I,
    I: IntoIterator<Item = T>,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if let Some(root) = self.root.take() {
            self.stack.push((self.children_of)(&root).into_iter());
            return Some(root);
        }

        loop {
            let frame = self.stack.last_mut()?;
            if let Some(item) = frame.next() {
                let children = (self.children_of)(&item).into_iter();
                self.stack.push(children);
                return Some(item);
            }
            self.stack.pop();
        }
    }
}

impl<T, F, I> FusedIterator for ExpandDeep<T, F, I>
where
    F: FnMut(&T) -> I,
    I: IntoIterator<Item = T>,
{
}

impl<T, F, I> fmt::Debug for ExpandDeep<T, F, I>
where
    I: IntoIterator<Item = T>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpandDeep")
            .field("root_pending", &self.root.is_some())
            .field("depth", &self.stack.len())
            .finish_non_exhaustive()
    }
}

/// Breadth-first iterator returned by [`expand_breadth`].
pub struct ExpandBreadth<T, F, I>
where
    I: IntoIterator<Item = T>,
{
    root: Option<T>,
    queue: VecDeque<I::IntoIter>,
    children_of: F,
}

impl<T, F, I> Iterator for ExpandBreadth<T, F, I>
where
    F: FnMut(&T) -> I,
    I: IntoIterator<Item = T>,
{
    type Item = T;

    fn next(&mut self) -> Option<T> {
        if let Some(root) = self.root.take() {
            self.queue.push_back((self.children_of)(&root).into_iter());
            return Some(root);
        }

        loop {
            let frame = self.queue.front_mut()?;
            if let Some(item) = frame.next() {
                let children = (self.children_of)(&item).into_iter();
                self.queue.push_back(children);
                return Some(item);
            }
            self.queue.pop_front();
        }
    }
}

impl<T, F, I> FusedIterator for ExpandBreadth<T, F, I>
where
    F: FnMut(&T) -> I,
    I: IntoIterator<Item = T>,
{
}

impl<T, F, I> fmt::Debug for ExpandBreadth<T, F, I>
where
    I: IntoIterator<Item = T>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ExpandBreadth")
            .field("root_pending", &self.root.is_some())
            .field("frames", &self.queue.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn tree() -> HashMap<&'static str, Vec<&'static str>> {
        HashMap::from([
            ("a", vec!["b", "x"]),
            ("b", vec!["y", "c"]),
            ("c", vec!["z"]),
        ])
    }

    fn children<'t>(
        tree: &'t HashMap<&'static str, Vec<&'static str>>,
    ) -> impl FnMut(&&'static str) -> Vec<&'static str> + 't {
        |node| tree.get(node).cloned().unwrap_or_default()
    }

    #[test]
    fn deep_is_preorder() {
        let tree = tree();
        let order: Vec<_> = expand_deep("a", children(&tree)).collect();
        assert_eq!(order, ["a", "b", "y", "c", "z", "x"]);
    }

    #[test]
    fn breadth_is_level_order() {
        let tree = tree();
        let order: Vec<_> = expand_breadth("a", children(&tree)).collect();
        assert_eq!(order, ["a", "b", "x", "y", "c", "z"]);
    }

    #[test]
    fn leaf_root_yields_only_itself() {
        let mut deep = expand_deep(7, |_: &i32| Vec::new());
        assert_eq!(deep.next(), Some(7));
        assert_eq!(deep.next(), None);
        assert_eq!(deep.next(), None);

        let breadth: Vec<_> = expand_breadth(7, |_: &i32| Vec::new()).collect();
        assert_eq!(breadth, [7]);
    }

    #[test]
    fn children_are_listed_once_per_item_and_lazily() {
        let tree = tree();
        let mut listed = Vec::new();
        let mut deep = expand_deep("a", |node: &&'static str| {
            listed.push(*node);
            tree.get(node).cloned().unwrap_or_default()
        });

        assert_eq!(deep.next(), Some("a"));
        assert_eq!(deep.next(), Some("b"));
        drop(deep);
        assert_eq!(listed, ["a", "b"]);
    }

    #[test]
    fn deep_chain_does_not_recurse() {
        let depth = 200_000u32;
        let count = expand_deep(0u32, |&n| (n < depth).then_some(n + 1)).count();
        assert_eq!(count, usize::try_from(depth).expect("fits") + 1);
    }

    #[test]
    fn stack_depth_tracks_open_frames() {
        let tree = tree();
        let mut deep = expand_deep("a", children(&tree));
        assert_eq!(deep.depth(), 0);
        deep.next();
        assert_eq!(deep.depth(), 1);
        deep.next();
        deep.next();
        assert_eq!(deep.depth(), 3);
    }

    #[test]
    fn each_sequence_is_independent() {
        let tree = tree();
        let first: Vec<_> = expand_deep("a", children(&tree)).collect();
        let second: Vec<_> = expand_deep("a", children(&tree)).collect();
        assert_eq!(first, second);
    }
}
