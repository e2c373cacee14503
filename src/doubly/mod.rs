use std::fmt::{self, Debug, Display, Formatter};
use std::marker::PhantomData;
use std::ptr::NonNull;

use crate::error::OutOfRange;
use crate::traverse::{self, Forward};

pub mod iterator;

mod algorithms;

pub use iterator::{IntoIter, Iter, IterMut};

/// The `List` is a doubly linked list with owned nodes.
///
/// It carries the same operation set as [`singly::List`], with the same
/// semantics. The forward `next` link is the owning relation; the `prev`
/// link is a non-owning back-reference used only for traversal and
/// relinking, never for lifetime management. Every mutating operation
/// keeps the two symmetric: whenever `n.next == m`, then `m.prev == n`
/// (until [`List::create_cycle`] deliberately closes the chain into a
/// wrap).
///
/// # Examples
///
/// ```
/// use chain_list::doubly::List;
///
/// let mut list = List::new();
/// list.insert(0);
/// list.insert(-2);
/// list.insert(10);
/// assert_eq!(list.to_string(), "10 -> -2 -> 0");
///
/// assert_eq!(list.delete(&-2), Some(-2));
/// assert_eq!(list.to_string(), "10 -> 0");
/// ```
///
/// [`singly::List`]: crate::singly::List
pub struct List<T> {
    pub(crate) head: Option<NonNull<Node<T>>>,
    marker: PhantomData<Box<Node<T>>>,
}

pub(crate) struct Node<T> {
    pub(crate) next: Option<NonNull<Node<T>>>,
    pub(crate) prev: Option<NonNull<Node<T>>>,
    pub(crate) element: T,
}

impl<T> Forward for Node<T> {
    fn forward(&self) -> Option<NonNull<Self>> {
        self.next
    }
}

impl<T> Node<T> {
    /// Create a detached node with the given element.
    pub(crate) fn new_detached(element: T) -> NonNull<Node<T>> {
        NonNull::from(Box::leak(Box::new(Node {
            next: None,
            prev: None,
            element,
        })))
    }
}

// Private methods.
impl<T> List<T> {
    /// Sever the wrap injected by [`List::create_cycle`], restoring the
    /// acyclic chain shape so teardown stays bounded.
    ///
    /// `create_cycle` only ever links tail→head (and head→tail through the
    /// back-reference), so a wrap to the head is the only cycle shape that
    /// can exist.
    fn sever_cycle(&mut self) {
        let Some(head) = self.head else { return };
        let mut current = head;
        loop {
            // SAFETY: every node reachable from `head` is alive and owned
            // by this list.
            match unsafe { (*current.as_ptr()).next } {
                None => return,
                Some(next) if next == head => {
                    unsafe {
                        (*current.as_ptr()).next = None;
                        (*head.as_ptr()).prev = None;
                    }
                    return;
                }
                Some(next) => current = next,
            }
        }
    }
}

impl<T> List<T> {
    /// Create an empty `List`.
    #[inline]
    pub const fn new() -> Self {
        Self {
            head: None,
            marker: PhantomData,
        }
    }

    /// Returns `true` if the `List` is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Returns the number of elements in the `List`, by walking the chain.
    pub fn len(&self) -> usize {
        // SAFETY: acyclic chain of valid nodes.
        unsafe { traverse::chain_len(self.head) }
    }

    /// Insert a new element at the head of the list, in *O*(1) time. The
    /// previous head's back-reference is pointed at the new node, and the
    /// new head's back-reference stays absent.
    pub fn insert(&mut self, element: T) {
        let mut node = Node::new_detached(element);
        // SAFETY: `node` is freshly allocated; the old head (if any) is a
        // valid node owned by this list.
        unsafe {
            node.as_mut().next = self.head;
            if let Some(mut head) = self.head {
                head.as_mut().prev = Some(node);
            }
        }
        self.head = Some(node);
    }

    /// Remove the first element and return it, or `None` if the list is
    /// empty.
    pub fn pop_front(&mut self) -> Option<T> {
        self.head.map(|node| {
            // SAFETY: `node` is the head, owned by this list, and is
            // unlinked before the box is dropped.
            let node = unsafe { Box::from_raw(node.as_ptr()) };
            self.head = node.next;
            if let Some(mut next) = node.next {
                unsafe { next.as_mut().prev = None };
            }
            node.element
        })
    }

    /// Removes all elements from the `List`, severing an injected cycle
    /// first so that teardown stays bounded.
    pub fn clear(&mut self) {
        self.sever_cycle();
        while self.pop_front().is_some() {}
    }

    /// Returns `true` if the list contains an element equal to the given
    /// value.
    pub fn search(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.iter().any(|element| element == value)
    }

    /// Returns a reference to the greatest element, or `None` if the list
    /// is empty.
    pub fn find_max(&self) -> Option<&T>
    where
        T: Ord,
    {
        self.iter().max()
    }

    /// Returns a reference to the smallest element, or `None` if the list
    /// is empty.
    pub fn find_min(&self) -> Option<&T>
    where
        T: Ord,
    {
        self.iter().min()
    }

    /// Returns a reference to the element at index `n`, counted from the
    /// head, or an [`OutOfRange`] error when `n >= len`.
    pub fn nth_from_start(&self, n: usize) -> Result<&T, OutOfRange> {
        // SAFETY: acyclic chain of valid nodes, borrowed for `'self`.
        unsafe {
            traverse::nth_node(self.head, n)
                .map(|node| &(*node.as_ptr()).element)
                .ok_or_else(|| OutOfRange {
                    index: n,
                    len: traverse::chain_len(self.head),
                })
        }
    }

    /// Insert a new element into an already sorted list, at the first
    /// position where it compares less than or equal to the current
    /// element, or at the tail when it is greater than all of them.
    /// Back-references on both sides of the splice point are rewired.
    ///
    /// # Examples
    ///
    /// ```
    /// use chain_list::doubly::List;
    ///
    /// let mut list = List::new();
    /// list.insert(4);
    /// list.insert(2);
    /// list.insert_ascending(3);
    /// list.insert_ascending(4);
    /// assert_eq!(list.to_string(), "2 -> 3 -> 4 -> 4");
    /// ```
    pub fn insert_ascending(&mut self, element: T)
    where
        T: Ord,
    {
        let mut node = Node::new_detached(element);
        let mut previous: Option<NonNull<Node<T>>> = None;
        let mut current = self.head;
        // SAFETY: all visited nodes are valid and owned by this list; the
        // four links around the splice point are rewired pairwise, which
        // keeps prev/next symmetric.
        unsafe {
            while let Some(cur) = current {
                if node.as_ref().element <= (*cur.as_ptr()).element {
                    break;
                }
                previous = current;
                current = (*cur.as_ptr()).next;
            }
            node.as_mut().prev = previous;
            node.as_mut().next = current;
            match previous {
                Some(mut prev) => prev.as_mut().next = Some(node),
                None => self.head = Some(node),
            }
            if let Some(mut next) = current {
                next.as_mut().prev = Some(node);
            }
        }
    }

    /// Unlink the first node holding the given value and return the
    /// removed value, or `None` if no node matches.
    ///
    /// Deleting the head has no predecessor to relink (the head link is
    /// updated instead), and deleting the tail has no successor whose
    /// back-reference needs fixing; both are handled explicitly rather
    /// than assuming interior neighbours exist.
    pub fn delete(&mut self, value: &T) -> Option<T>
    where
        T: PartialEq,
    {
        let mut current = self.head;
        while let Some(node) = current {
            // SAFETY: `node` is a valid node owned by this list;
            // `Box::from_raw` reclaims it exactly once, after its
            // neighbours are relinked to each other.
            unsafe {
                if (*node.as_ptr()).element == *value {
                    let node = Box::from_raw(node.as_ptr());
                    match node.prev {
                        Some(mut prev) => prev.as_mut().next = node.next,
                        // Deleting the head: no predecessor exists.
                        None => self.head = node.next,
                    }
                    if let Some(mut next) = node.next {
                        next.as_mut().prev = node.prev;
                    }
                    return Some(node.element);
                }
                current = (*node.as_ptr()).next;
            }
        }
        None
    }

    /// Reverse the list in place by swapping every node's `prev` and
    /// `next`; the final head is the previous tail. A no-op on empty and
    /// single-element lists.
    pub fn reverse(&mut self) {
        let mut previous = None;
        let mut current = self.head;
        while let Some(node) = current {
            // SAFETY: each node is visited exactly once; both of its links
            // are swapped, so symmetry holds again once the walk finishes.
            unsafe {
                let next = (*node.as_ptr()).next;
                (*node.as_ptr()).next = previous;
                (*node.as_ptr()).prev = next;
                previous = current;
                current = next;
            }
        }
        self.head = previous;
    }

    /// Returns a reference to the middle element (the lower of the two
    /// middles for even length), or `None` on an empty list.
    pub fn middle(&self) -> Option<&T> {
        let len = self.len();
        if len == 0 {
            return None;
        }
        self.nth_from_start(traverse::middle_index(len)).ok()
    }

    /// Returns a reference to the element at index `n` counted from the
    /// tail (tail = index 0), or an [`OutOfRange`] error when `n >= len`.
    ///
    /// One forward pass finds the tail and the length, then `n`
    /// back-references are walked, exercising the `prev` links instead of
    /// re-indexing from the head.
    pub fn nth_from_end(&self, n: usize) -> Result<&T, OutOfRange> {
        let mut len = 0;
        let mut tail = None;
        let mut current = self.head;
        while let Some(node) = current {
            len += 1;
            tail = current;
            // SAFETY: acyclic chain of valid nodes.
            current = unsafe { (*node.as_ptr()).next };
        }
        traverse::index_from_end(len, n)?;
        let mut node = tail.ok_or(OutOfRange { index: n, len })?;
        for _ in 0..n {
            // The range check above guarantees `n` predecessors exist.
            node = unsafe { (*node.as_ptr()).prev }.ok_or(OutOfRange { index: n, len })?;
        }
        // SAFETY: `node` is a valid node, borrowed for `'self`.
        Ok(unsafe { &(*node.as_ptr()).element })
    }

    /// Returns `true` if following `next` links from the head revisits a
    /// node, using the constant-space two-cursor detector.
    pub fn has_cycle(&self) -> bool {
        // SAFETY: every node reachable from `head` is valid.
        unsafe { traverse::has_cycle(self.head) }
    }

    /// Link the tail's `next` back to the head and the head's `prev` back
    /// to the tail, forming a doubly-cyclic structure. A no-op on an empty
    /// list. Test-support scaffolding for [`List::has_cycle`]: after this
    /// call every full-traversal operation diverges until the list is
    /// cleared or dropped.
    pub fn create_cycle(&mut self) {
        let Some(head) = self.head else { return };
        let mut tail = head;
        // SAFETY: the chain is acyclic before the wrap is installed, so
        // the walk to the tail terminates.
        unsafe {
            while let Some(next) = (*tail.as_ptr()).next {
                tail = next;
            }
            (*tail.as_ptr()).next = Some(head);
            (*head.as_ptr()).prev = Some(tail);
        }
    }

    /// Print every value, space-separated, followed by a newline. Debug
    /// aid only; prints a bare newline for an empty list.
    pub fn visit(&self)
    where
        T: Display,
    {
        for element in self.iter() {
            print!("{} ", element);
        }
        println!();
    }

    /// Provides a forward iterator.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self)
    }

    /// Provides a forward iterator with mutable references.
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(self)
    }
}

impl<T: Debug> Debug for List<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

/// Render the values in head-to-tail order joined by `" -> "`; an empty
/// list renders as the empty string.
impl<T: Display> Display for List<T> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for element in self.iter() {
            if !first {
                f.write_str(" -> ")?;
            }
            write!(f, "{}", element)?;
            first = false;
        }
        Ok(())
    }
}

impl<T> Default for List<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for List<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

unsafe impl<T: Send> Send for List<T> {}

unsafe impl<T: Sync> Sync for List<T> {}

#[cfg(test)]
mod tests {
    use super::{List, Node};
    use crate::error::OutOfRange;
    use std::cell::RefCell;
    use std::iter::FromIterator;
    use std::ptr::NonNull;

    /// Walk the chain and assert that every adjacent pair keeps the
    /// prev/next symmetry invariant. Only meaningful on acyclic lists.
    fn assert_symmetric<T>(list: &List<T>) {
        let mut previous: Option<NonNull<Node<T>>> = None;
        let mut current = list.head;
        while let Some(node) = current {
            unsafe {
                assert_eq!((*node.as_ptr()).prev, previous);
                previous = current;
                current = (*node.as_ptr()).next;
            }
        }
    }

    fn medium_list() -> List<i32> {
        let mut list = List::new();
        list.insert(0);
        list.insert(-2);
        list.insert(10);
        list
    }

    fn large_list() -> List<i32> {
        let mut list = List::new();
        list.insert(20);
        list.insert(5);
        list.insert(-3);
        list.insert(4);
        list.insert(-3);
        list
    }

    #[test]
    fn insert_prepends_and_backlinks() {
        let mut list = List::new();
        list.insert(2);
        list.insert(4);
        assert_eq!(list.to_string(), "4 -> 2");
        assert_symmetric(&list);

        assert_eq!(medium_list().to_string(), "10 -> -2 -> 0");
        assert_symmetric(&medium_list());
    }

    #[test]
    fn insert_ascending_keeps_order_and_symmetry() {
        let mut list = List::new();
        list.insert(4);
        list.insert(2);
        list.insert_ascending(3);
        assert_eq!(list.nth_from_start(1), Ok(&3));
        assert_symmetric(&list);

        list.insert_ascending(4); // duplicate goes before the existing 4
        assert_eq!(list.nth_from_start(3), Ok(&4));
        assert_eq!(list.to_string(), "2 -> 3 -> 4 -> 4");
        assert_symmetric(&list);

        list.insert_ascending(-1); // head
        list.insert_ascending(9); // tail
        assert_eq!(list.to_string(), "-1 -> 2 -> 3 -> 4 -> 4 -> 9");
        assert_symmetric(&list);
    }

    #[test]
    fn delete_interior_node() {
        let mut empty: List<i32> = List::new();
        assert_eq!(empty.delete(&2), None);

        let mut list = medium_list();
        let prev_len = list.len();
        assert_eq!(list.delete(&-2), Some(-2));
        assert_eq!(list.len(), prev_len - 1);
        assert_eq!(list.to_string(), "10 -> 0");
        assert_symmetric(&list);
    }

    #[test]
    fn delete_head_has_no_predecessor_to_relink() {
        let mut list = medium_list();
        assert_eq!(list.delete(&10), Some(10));
        assert_eq!(list.to_string(), "-2 -> 0");
        assert_symmetric(&list);

        let mut single = List::new();
        single.insert(2);
        assert_eq!(single.delete(&2), Some(2));
        assert!(single.is_empty());
    }

    #[test]
    fn delete_tail_has_no_successor_to_relink() {
        let mut list = medium_list();
        assert_eq!(list.delete(&0), Some(0));
        assert_eq!(list.to_string(), "10 -> -2");
        assert_symmetric(&list);
    }

    #[test]
    fn reverse_swaps_both_links() {
        let mut empty: List<i32> = List::new();
        empty.reverse();
        assert_eq!(empty.to_string(), "");

        let mut single = List::new();
        single.insert(2);
        single.reverse();
        assert_eq!(single.to_string(), "2");
        assert_symmetric(&single);

        let mut list = medium_list();
        list.reverse();
        assert_eq!(list.to_string(), "0 -> -2 -> 10");
        assert_symmetric(&list);

        list.reverse();
        assert_eq!(list, medium_list());
    }

    #[test]
    fn nth_from_end_walks_back_references() {
        let mut empty: List<i32> = List::new();
        assert_eq!(empty.nth_from_end(2), Err(OutOfRange { index: 2, len: 0 }));
        empty.insert(1);
        assert!(empty.nth_from_end(1).is_err());

        let list = large_list();
        assert_eq!(list.nth_from_end(0), Ok(&20));
        assert_eq!(list.nth_from_end(1), Ok(&5));
        assert_eq!(list.nth_from_end(4), Ok(&-3));
    }

    #[test]
    fn nth_from_both_ends_agree() {
        let list = large_list();
        let len = list.len();
        for i in 0..len {
            assert_eq!(list.nth_from_start(i), list.nth_from_end(len - 1 - i));
        }
    }

    #[test]
    fn middle_value() {
        assert_eq!(List::<i32>::new().middle(), None);
        assert_eq!(medium_list().middle(), Some(&-2));
        assert_eq!(large_list().middle(), Some(&-3));

        let even = List::from_iter([1, 2, 3, 4]);
        assert_eq!(even.middle(), Some(&2));
    }

    #[test]
    fn search_and_extrema() {
        let list = large_list();
        assert!(list.search(&5));
        assert!(!list.search(&0));
        assert_eq!(list.find_max(), Some(&20));
        assert_eq!(list.find_min(), Some(&-3));
    }

    #[test]
    fn cycle_detection_and_wrap_shape() {
        let mut empty: List<i32> = List::new();
        empty.create_cycle();
        assert!(!empty.has_cycle());

        let mut list = large_list();
        assert!(!list.has_cycle());
        list.create_cycle();
        assert!(list.has_cycle());

        // The wrap closes the chain in both directions: the head's
        // back-reference is the tail, and the tail's forward link is the
        // head.
        unsafe {
            let head = list.head.unwrap();
            let tail = (*head.as_ptr()).prev.unwrap();
            assert_eq!((*tail.as_ptr()).next, Some(head));
        }
    }

    #[test]
    fn cyclic_list_drops_every_node_once() {
        struct DropChecker<'a> {
            value: i32,
            dropped: &'a RefCell<Vec<i32>>,
        }
        impl Drop for DropChecker<'_> {
            fn drop(&mut self) {
                self.dropped.borrow_mut().push(self.value);
            }
        }

        let dropped = RefCell::new(Vec::new());
        let mut list = List::new();
        for value in [3, 2, 1] {
            list.insert(DropChecker {
                value,
                dropped: &dropped,
            });
        }
        list.create_cycle();
        drop(list);
        assert_eq!(dropped.borrow().as_slice(), &[1, 2, 3]);
    }
}
