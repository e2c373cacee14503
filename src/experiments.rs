//! A fully safe doubly linked list built on `ghost-cell` and `static-rc`,
//! kept as a compile-time-checked counterpart to the pointer-based
//! [`doubly::List`](crate::doubly::List).
//!
//! Each node is owned by two `StaticRc` halves (one per direction), and
//! all link access is mediated by a `GhostToken`, so the borrow checker
//! proves the prev/next symmetry that the raw-pointer implementation
//! maintains by hand. Traversal operations take the token explicitly.
//!
//! Nodes are only reclaimed when both halves are joined during a pop, so
//! a list that is dropped while non-empty leaks its remaining nodes;
//! callers should drain it first.

use ghost_cell::{GhostCell, GhostToken};
use static_rc::StaticRc;
use std::ops::Deref;

pub struct List<'id, T> {
    links: [Option<NodePtr<'id, T>>; 2],
}

struct Node<'id, T> {
    links: [Option<NodePtr<'id, T>>; 2],
    element: T,
}

type NodePtr<'id, T> = Half<GhostCell<'id, Node<'id, T>>>;

type Half<T> = StaticRc<T, 1, 2>;
type Full<T> = StaticRc<T, 2, 2>;

impl<'id, T> Node<'id, T> {
    const NEXT: usize = 0;
    const PREV: usize = 1;

    fn new(element: T) -> Self {
        let links = [None, None];
        Self { links, element }
    }
    fn next(&self) -> Option<&NodePtr<'id, T>> {
        self.links[Self::NEXT].as_ref()
    }
}

impl<'id, T> Default for List<'id, T> {
    fn default() -> Self {
        let links = [None, None];
        Self { links }
    }
}

// Link plumbing, parameterized over the side it works on.
impl<'id, T> List<'id, T> {
    const HEAD: usize = 0;
    const TAIL: usize = 1;

    fn head(&self) -> Option<&NodePtr<'id, T>> {
        self.links[Self::HEAD].as_ref()
    }

    fn push_at(&mut self, side: usize, element: T, token: &mut GhostToken<'id>) {
        let oppo = 1 - side;
        let (left, right) = Full::split(Full::new(GhostCell::new(Node::new(element))));
        match self.links[side].take() {
            Some(this_side) => {
                this_side.deref().borrow_mut(token).links[oppo] = Some(left);
                right.deref().borrow_mut(token).links[side] = Some(this_side);
            }
            None => self.links[oppo] = Some(left),
        }
        self.links[side] = Some(right);
    }

    fn pop_at(&mut self, side: usize, token: &mut GhostToken<'id>) -> Option<T> {
        debug_assert!(side < 2);
        let oppo = 1 - side;
        let right = self.links[side].take()?;
        let left = match right.deref().borrow_mut(token).links[side].take() {
            Some(this_side) => {
                let left = this_side.deref().borrow_mut(token).links[oppo]
                    .take()
                    .unwrap();
                self.links[side] = Some(this_side);
                left
            }
            None => self.links[oppo].take().unwrap(),
        };
        Some(Full::into_box(Full::join(left, right)).into_inner().element)
    }
}

impl<'id, T> List<'id, T> {
    pub fn new() -> Self {
        Default::default()
    }

    pub fn is_empty(&self) -> bool {
        self.head().is_none()
    }

    /// Insert a new element at the head of the list.
    pub fn insert(&mut self, element: T, token: &mut GhostToken<'id>) {
        self.push_at(Self::HEAD, element, token);
    }

    pub fn push_back(&mut self, element: T, token: &mut GhostToken<'id>) {
        self.push_at(Self::TAIL, element, token);
    }

    pub fn pop_front(&mut self, token: &mut GhostToken<'id>) -> Option<T> {
        self.pop_at(Self::HEAD, token)
    }

    pub fn pop_back(&mut self, token: &mut GhostToken<'id>) -> Option<T> {
        self.pop_at(Self::TAIL, token)
    }

    /// Count the elements by walking the forward links.
    pub fn len(&self, token: &GhostToken<'id>) -> usize {
        let mut len = 0;
        let mut cursor = self.head();
        while let Some(node) = cursor {
            len += 1;
            cursor = node.deref().borrow(token).next();
        }
        len
    }

    /// Returns `true` if the list contains an element equal to the given
    /// value.
    pub fn search(&self, value: &T, token: &GhostToken<'id>) -> bool
    where
        T: PartialEq,
    {
        let mut cursor = self.head();
        while let Some(node) = cursor {
            let node = node.deref().borrow(token);
            if node.element == *value {
                return true;
            }
            cursor = node.next();
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use crate::experiments::List;
    use ghost_cell::GhostToken;

    #[test]
    fn insert_prepends() {
        GhostToken::new(|mut token| {
            let mut list = List::new();
            assert!(list.is_empty());
            list.insert(0, &mut token);
            list.insert(-2, &mut token);
            list.insert(10, &mut token);
            assert_eq!(list.len(&token), 3);
            assert_eq!(list.pop_front(&mut token), Some(10));
            assert_eq!(list.pop_front(&mut token), Some(-2));
            assert_eq!(list.pop_front(&mut token), Some(0));
            assert!(list.is_empty());
        })
    }

    #[test]
    fn search_walks_the_chain() {
        GhostToken::new(|mut token| {
            let mut list = List::new();
            for value in [20, 5, -3, 4, -3] {
                list.insert(value, &mut token);
            }
            assert!(list.search(&5, &token));
            assert!(list.search(&-3, &token));
            assert!(!list.search(&0, &token));
            while list.pop_front(&mut token).is_some() {}
        })
    }

    #[test]
    fn both_ends_stay_linked() {
        GhostToken::new(|mut token| {
            let mut list = List::new();
            list.push_back(1, &mut token);
            list.insert(2, &mut token);
            list.push_back(3, &mut token);
            assert_eq!(list.len(&token), 3);
            assert_eq!(list.pop_back(&mut token), Some(3));
            assert_eq!(list.pop_front(&mut token), Some(2));
            assert_eq!(list.pop_back(&mut token), Some(1));
            assert!(list.is_empty());
        })
    }
}
