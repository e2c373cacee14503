use std::fmt::{self, Debug, Display, Formatter};
use std::marker::PhantomData;
use std::ptr::NonNull;

use crate::error::OutOfRange;
use crate::traverse::{self, Forward};

pub mod iterator;

mod algorithms;

pub use iterator::{IntoIter, Iter, IterMut};

/// The `List` is a singly linked list with owned nodes.
///
/// Every node owns its successor through the `next` link, so the list
/// itself only holds the head; dropping the head releases the whole chain.
/// All operations start from the head and run in *O*(*n*) time with *O*(1)
/// auxiliary space, unless noted otherwise.
///
/// # Examples
///
/// ```
/// use chain_list::singly::List;
///
/// let mut list = List::new();
/// list.insert(20);
/// list.insert(5);
/// list.insert(-3);
///
/// assert_eq!(list.to_string(), "-3 -> 5 -> 20");
/// assert!(list.search(&5));
/// assert_eq!(list.find_max(), Some(&20));
/// ```
pub struct List<T> {
    pub(crate) head: Option<NonNull<Node<T>>>,
    marker: PhantomData<Box<Node<T>>>,
}

pub(crate) struct Node<T> {
    pub(crate) next: Option<NonNull<Node<T>>>,
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
            element,
        })))
    }
}

// Private methods.
impl<T> List<T> {
    /// Sever the tail→head wrap, if one was injected by [`List::create_cycle`].
    ///
    /// `create_cycle` only ever links the tail back to the head, so a wrap
    /// to the head is the only cycle shape that can exist. After this call
    /// the chain is acyclic and a pop-one-at-a-time teardown is bounded.
    fn sever_cycle(&mut self) {
        let Some(head) = self.head else { return };
        let mut current = head;
        loop {
            // SAFETY: every node reachable from `head` is alive and owned
            // by this list.
            match unsafe { (*current.as_ptr()).next } {
                None => return,
                Some(next) if next == head => {
                    unsafe { (*current.as_ptr()).next = None };
                    return;
                }
                Some(next) => current = next,
            }
        }
    }
}

impl<T> List<T> {
    /// Create an empty `List`.
    ///
    /// # Examples
    ///
    /// ```
    /// use chain_list::singly::List;
    /// let list: List<u32> = List::new();
    /// assert!(list.is_empty());
    /// ```
    #[inline]
    pub const fn new() -> Self {
        Self {
            head: None,
            marker: PhantomData,
        }
    }

    /// Returns `true` if the `List` is empty.
    ///
    /// This operation should compute in *O*(1) time.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Returns the number of elements in the `List`, by walking the chain.
    ///
    /// # Examples
    ///
    /// ```
    /// use chain_list::singly::List;
    ///
    /// let mut list = List::new();
    /// assert_eq!(list.len(), 0);
    ///
    /// list.insert(1);
    /// list.insert(2);
    /// assert_eq!(list.len(), 2);
    /// ```
    pub fn len(&self) -> usize {
        // SAFETY: the chain is acyclic (cycles exist only between
        // `create_cycle` and teardown) and every node is valid.
        unsafe { traverse::chain_len(self.head) }
    }

    /// Insert a new element at the head of the list.
    ///
    /// This operation should compute in *O*(1) time.
    ///
    /// # Examples
    ///
    /// ```
    /// use chain_list::singly::List;
    ///
    /// let mut list = List::new();
    /// list.insert(2);
    /// list.insert(4);
    /// assert_eq!(list.to_string(), "4 -> 2");
    /// ```
    pub fn insert(&mut self, element: T) {
        let mut node = Node::new_detached(element);
        // SAFETY: `node` is freshly allocated and not yet linked anywhere.
        unsafe { node.as_mut().next = self.head };
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
    ///
    /// # Examples
    ///
    /// ```
    /// use chain_list::singly::List;
    ///
    /// let mut list = List::new();
    /// list.insert(2);
    /// assert!(list.search(&2));
    /// assert!(!list.search(&-2));
    /// ```
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
    ///
    /// # Examples
    ///
    /// ```
    /// use chain_list::singly::List;
    ///
    /// let mut list = List::new();
    /// assert_eq!(list.find_min(), None);
    ///
    /// list.insert(0);
    /// list.insert(-2);
    /// list.insert(10);
    /// assert_eq!(list.find_min(), Some(&-2));
    /// assert_eq!(list.find_max(), Some(&10));
    /// ```
    pub fn find_min(&self) -> Option<&T>
    where
        T: Ord,
    {
        self.iter().min()
    }

    /// Returns a reference to the element at index `n`, counted from the
    /// head, or an [`OutOfRange`] error when `n >= len`.
    ///
    /// # Examples
    ///
    /// ```
    /// use chain_list::singly::List;
    ///
    /// let mut list = List::new();
    /// assert!(list.nth_from_start(0).is_err());
    ///
    /// list.insert(0);
    /// list.insert(-2);
    /// list.insert(10);
    /// assert_eq!(list.nth_from_start(0), Ok(&10));
    /// assert_eq!(list.nth_from_start(2), Ok(&0));
    /// assert!(list.nth_from_start(3).is_err());
    /// ```
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
    ///
    /// # Examples
    ///
    /// ```
    /// use chain_list::singly::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([2, 4, 5]);
    /// list.insert_ascending(3);
    /// list.insert_ascending(-2);
    /// list.insert_ascending(10);
    /// assert_eq!(list.to_string(), "-2 -> 2 -> 3 -> 4 -> 5 -> 10");
    /// ```
    pub fn insert_ascending(&mut self, element: T)
    where
        T: Ord,
    {
        let mut node = Node::new_detached(element);
        let mut cursor = &mut self.head;
        while let Some(current) = *cursor {
            // SAFETY: `current` is a valid node owned by this list; the
            // borrow of its `next` link replaces the borrow of `cursor`.
            unsafe {
                if node.as_ref().element <= (*current.as_ptr()).element {
                    break;
                }
                cursor = &mut (*current.as_ptr()).next;
            }
        }
        // SAFETY: `node` is detached; splicing it before `*cursor` keeps
        // the chain well formed.
        unsafe { node.as_mut().next = *cursor };
        *cursor = Some(node);
    }

    /// Unlink the first node holding the given value, relinking its
    /// predecessor to its successor, and return the removed value, or
    /// `None` if no node matches.
    ///
    /// # Examples
    ///
    /// ```
    /// use chain_list::singly::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([10, -2, 0]);
    /// assert_eq!(list.delete(&-2), Some(-2));
    /// assert_eq!(list.delete(&7), None);
    /// assert_eq!(list.to_string(), "10 -> 0");
    /// ```
    pub fn delete(&mut self, value: &T) -> Option<T>
    where
        T: PartialEq,
    {
        let mut cursor = &mut self.head;
        while let Some(current) = *cursor {
            // SAFETY: `current` is a valid node owned by this list;
            // `Box::from_raw` reclaims it exactly once, after which only
            // the copied `next` link is read.
            unsafe {
                if (*current.as_ptr()).element == *value {
                    let node = Box::from_raw(current.as_ptr());
                    *cursor = node.next;
                    return Some(node.element);
                }
                cursor = &mut (*current.as_ptr()).next;
            }
        }
        None
    }

    /// Reverse the list in place by iterative link reversal. A no-op on
    /// empty and single-element lists.
    ///
    /// # Examples
    ///
    /// ```
    /// use chain_list::singly::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([1, 2, 3]);
    /// list.reverse();
    /// assert_eq!(list.to_string(), "3 -> 2 -> 1");
    /// ```
    pub fn reverse(&mut self) {
        let mut previous = None;
        let mut current = self.head;
        while let Some(node) = current {
            // SAFETY: each node is visited exactly once; its forward link
            // is redirected to the already-reversed prefix.
            unsafe {
                let next = (*node.as_ptr()).next;
                (*node.as_ptr()).next = previous;
                previous = current;
                current = next;
            }
        }
        self.head = previous;
    }

    /// Returns a reference to the middle element: for a list of length
    /// `L`, the element at index `L / 2` when `L` is odd, or the lower of
    /// the two middles (`L / 2 - 1`) when `L` is even. Returns `None` on
    /// an empty list.
    ///
    /// # Examples
    ///
    /// ```
    /// use chain_list::singly::List;
    /// use std::iter::FromIterator;
    ///
    /// let mut list = List::from_iter([1, 2, 3]);
    /// assert_eq!(list.middle(), Some(&2));
    ///
    /// list.insert(0); // length 4, the lower middle is picked
    /// assert_eq!(list.middle(), Some(&1));
    /// ```
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
    /// Computed with two passes: one to measure the length, one to walk to
    /// the translated index.
    ///
    /// # Examples
    ///
    /// ```
    /// use chain_list::singly::List;
    /// use std::iter::FromIterator;
    ///
    /// let list = List::from_iter([-3, 4, -3, 5, 20]);
    /// assert_eq!(list.nth_from_end(0), Ok(&20));
    /// assert_eq!(list.nth_from_end(4), Ok(&-3));
    /// assert!(list.nth_from_end(5).is_err());
    /// ```
    pub fn nth_from_end(&self, n: usize) -> Result<&T, OutOfRange> {
        let index = traverse::index_from_end(self.len(), n)?;
        self.nth_from_start(index)
    }

    /// Returns `true` if following `next` links from the head revisits a
    /// node. Runs the two-cursor (fast/slow) detector, so it terminates
    /// and needs no auxiliary storage even on a cyclic list.
    ///
    /// # Examples
    ///
    /// ```
    /// use chain_list::singly::List;
    ///
    /// let mut list = List::new();
    /// list.insert(2);
    /// assert!(!list.has_cycle());
    ///
    /// list.create_cycle();
    /// assert!(list.has_cycle());
    /// ```
    pub fn has_cycle(&self) -> bool {
        // SAFETY: every node reachable from `head` is valid.
        unsafe { traverse::has_cycle(self.head) }
    }

    /// Link the tail's `next` back to the head, forming a cycle. A no-op
    /// on an empty list. Test-support scaffolding for [`List::has_cycle`]:
    /// after this call every full-traversal operation diverges until the
    /// list is cleared or dropped.
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
    ///
    /// # Examples
    ///
    /// ```
    /// use chain_list::singly::List;
    /// use std::iter::FromIterator;
    ///
    /// let list = List::from_iter([0, 1, 2]);
    /// let mut iter = list.iter();
    /// assert_eq!(iter.next(), Some(&0));
    /// assert_eq!(iter.next(), Some(&1));
    /// assert_eq!(iter.next(), Some(&2));
    /// assert_eq!(iter.next(), None);
    /// ```
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
    use super::List;
    use crate::error::OutOfRange;
    use std::cell::RefCell;
    use std::iter::FromIterator;

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
    fn insert_prepends() {
        let empty: List<i32> = List::new();
        assert_eq!(empty.to_string(), "");

        let mut small = List::new();
        small.insert(2);
        assert_eq!(small.to_string(), "2");

        let mut medium = List::new();
        medium.insert(0);
        medium.insert(-2);
        medium.insert(10);
        assert_eq!(medium.to_string(), "10 -> -2 -> 0");

        assert_eq!(large_list().to_string(), "-3 -> 4 -> -3 -> 5 -> 20");
    }

    #[test]
    fn len_counts_inserts() {
        let mut list = List::new();
        assert_eq!(list.len(), 0);
        for i in 0..7 {
            list.insert(i);
            assert_eq!(list.len(), i as usize + 1);
        }
    }

    #[test]
    fn search_finds_inserted_values() {
        let list = large_list();
        assert!(list.search(&5));
        assert!(list.search(&-3));
        assert!(!list.search(&0));
        assert!(!List::<i32>::new().search(&2));
    }

    #[test]
    fn find_max_and_min() {
        let empty: List<i32> = List::new();
        assert_eq!(empty.find_max(), None);
        assert_eq!(empty.find_min(), None);

        let list = large_list();
        assert_eq!(list.find_max(), Some(&20));
        assert_eq!(list.find_min(), Some(&-3));
    }

    #[test]
    fn nth_from_start_bounds() {
        let empty: List<i32> = List::new();
        assert_eq!(
            empty.nth_from_start(0),
            Err(OutOfRange { index: 0, len: 0 })
        );

        let list = large_list();
        assert_eq!(list.nth_from_start(0), Ok(&-3));
        assert_eq!(list.nth_from_start(4), Ok(&20));
        assert_eq!(
            list.nth_from_start(5),
            Err(OutOfRange { index: 5, len: 5 })
        );
    }

    #[test]
    fn insert_ascending_keeps_order() {
        let mut list = List::new();
        list.insert(5);
        list.insert(4);
        list.insert(2); // [2, 4, 5]

        list.insert_ascending(3); // middle
        assert_eq!(list.nth_from_start(1), Ok(&3));

        list.insert_ascending(-2); // head
        assert_eq!(list.nth_from_start(0), Ok(&-2));

        list.insert_ascending(10); // tail
        assert_eq!(list.nth_from_start(5), Ok(&10));

        assert_eq!(list.to_string(), "-2 -> 2 -> 3 -> 4 -> 5 -> 10");
    }

    #[test]
    fn delete_unlinks_first_match() {
        let mut empty: List<i32> = List::new();
        assert_eq!(empty.delete(&10), None);

        let mut small = List::new();
        small.insert(2);
        assert_eq!(small.delete(&2), Some(2));
        assert_eq!(small.len(), 0);

        let mut list = large_list();
        let prev_len = list.len();
        assert_eq!(list.delete(&-3), Some(-3));
        assert_eq!(list.len(), prev_len - 1);
        // Only the first occurrence goes away.
        assert_eq!(list.to_string(), "4 -> -3 -> 5 -> 20");
        assert!(list.search(&-3));
    }

    #[test]
    fn delete_then_search_is_false() {
        let mut list = List::from_iter([10, -2, 0]);
        assert_eq!(list.delete(&-2), Some(-2));
        assert!(!list.search(&-2));
    }

    #[test]
    fn reverse_reverses() {
        let mut empty: List<i32> = List::new();
        empty.reverse();
        assert_eq!(empty.to_string(), "");

        let mut small = List::new();
        small.insert(2);
        small.reverse();
        assert_eq!(small.to_string(), "2");

        let mut list = large_list();
        list.reverse();
        assert_eq!(list.to_string(), "20 -> 5 -> -3 -> 4 -> -3");
    }

    #[test]
    fn reverse_is_an_involution() {
        let list = large_list();
        let mut twice = list.clone();
        twice.reverse();
        twice.reverse();
        assert_eq!(twice, list);
    }

    #[test]
    fn middle_value() {
        let empty: List<i32> = List::new();
        assert_eq!(empty.middle(), None);

        let odd = List::from_iter([1, 2, 3, 4, 5]);
        assert_eq!(odd.middle(), Some(&3));

        let even = List::from_iter([1, 2, 3, 4]);
        assert_eq!(even.middle(), Some(&2));
    }

    #[test]
    fn nth_from_end_counts_tail_as_zero() {
        let empty: List<i32> = List::new();
        assert_eq!(empty.nth_from_end(0), Err(OutOfRange { index: 0, len: 0 }));

        let list = large_list();
        assert_eq!(list.nth_from_end(0), Ok(&20));
        assert_eq!(list.nth_from_end(3), Ok(&4));
        assert_eq!(list.nth_from_end(4), Ok(&-3));
        assert!(list.nth_from_end(5).is_err());
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
    fn cycle_detection() {
        let mut empty: List<i32> = List::new();
        assert!(!empty.has_cycle());
        empty.create_cycle();
        assert!(!empty.has_cycle());

        let mut small = List::new();
        small.insert(2);
        assert!(!small.has_cycle());
        small.create_cycle();
        assert!(small.has_cycle());

        let mut list = large_list();
        assert!(!list.has_cycle());
        list.create_cycle();
        assert!(list.has_cycle());
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

    #[test]
    fn acyclic_drop_order_is_head_to_tail() {
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
        drop(list);
        assert_eq!(dropped.borrow().as_slice(), &[1, 2, 3]);
    }

    #[test]
    fn clear_empties_even_a_cyclic_list() {
        let mut list = large_list();
        list.create_cycle();
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
    }
}
