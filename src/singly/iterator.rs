use std::fmt;
use std::iter::{FromIterator, FusedIterator};
use std::marker::PhantomData;
use std::ptr::NonNull;

use crate::singly::{List, Node};

/// An iterator over the elements of a [`List`].
///
/// Though the `Iter` does not hold a reference to the list, it borrows
/// (immutably) from it, so a phantom marker of `&'a List<T>` is added to
/// protect the list from being written while the iterator lives.
pub struct Iter<'a, T: 'a> {
    current: Option<NonNull<Node<T>>>,
    _marker: PhantomData<&'a List<T>>,
}

impl<'a, T: 'a> Iter<'a, T> {
    pub(crate) fn new(list: &'a List<T>) -> Self {
        Self {
            current: list.head,
            _marker: PhantomData,
        }
    }
}

impl<'a, T: 'a> Clone for Iter<'a, T> {
    fn clone(&self) -> Self {
        Self {
            current: self.current,
            _marker: PhantomData,
        }
    }
}

impl<'a, T: 'a> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        self.current.map(|node| {
            // SAFETY: the node is alive for as long as the list borrow
            // `'a` that created this iterator.
            let node = unsafe { &*node.as_ptr() };
            self.current = node.next;
            &node.element
        })
    }
}

impl<'a, T: 'a> FusedIterator for Iter<'a, T> {}

/// A mutable iterator over the elements of a [`List`].
pub struct IterMut<'a, T: 'a> {
    current: Option<NonNull<Node<T>>>,
    _marker: PhantomData<&'a mut List<T>>,
}

impl<'a, T: 'a> IterMut<'a, T> {
    pub(crate) fn new(list: &'a mut List<T>) -> Self {
        Self {
            current: list.head,
            _marker: PhantomData,
        }
    }
}

impl<'a, T: 'a> Iterator for IterMut<'a, T> {
    type Item = &'a mut T;

    fn next(&mut self) -> Option<Self::Item> {
        self.current.map(|node| {
            // SAFETY: the exclusive list borrow `'a` guarantees no other
            // access, and each node is yielded at most once.
            let node = unsafe { &mut *node.as_ptr() };
            self.current = node.next;
            &mut node.element
        })
    }
}

impl<'a, T: 'a> FusedIterator for IterMut<'a, T> {}

/// An owning iterator over the elements of a [`List`], created by the
/// [`into_iter`] method (provided by the `IntoIterator` trait).
///
/// [`into_iter`]: List::into_iter
pub struct IntoIter<T> {
    list: List<T>,
}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntoIter").field("list", &self.list).finish()
    }
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    fn next(&mut self) -> Option<Self::Item> {
        self.list.pop_front()
    }
}

impl<T> FusedIterator for IntoIter<T> {}

impl<T> IntoIterator for List<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter { list: self }
    }
}

impl<'a, T> IntoIterator for &'a List<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut List<T> {
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T> FromIterator<T> for List<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = List::new();
        list.extend(iter);
        list
    }
}

impl<T> Extend<T> for List<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        // Seek the tail link once, then keep appending through it, so
        // extending with n elements stays O(n) despite the missing tail
        // pointer.
        let mut cursor = &mut self.head;
        while let Some(node) = *cursor {
            // SAFETY: `node` is a valid node owned by this list.
            cursor = unsafe { &mut (*node.as_ptr()).next };
        }
        for element in iter {
            let node = Node::new_detached(element);
            *cursor = Some(node);
            // SAFETY: `node` was just attached; its `next` link is the new
            // tail link.
            cursor = unsafe { &mut (*node.as_ptr()).next };
        }
    }
}

impl<'a, T: 'a + Copy> Extend<&'a T> for List<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied())
    }
}

unsafe impl<T: Sync> Send for Iter<'_, T> {}

unsafe impl<T: Sync> Sync for Iter<'_, T> {}

unsafe impl<T: Send> Send for IterMut<'_, T> {}

unsafe impl<T: Sync> Sync for IterMut<'_, T> {}

#[cfg(test)]
mod tests {
    use crate::singly::List;
    use std::iter::FromIterator;

    #[test]
    fn iteration_is_head_to_tail() {
        let list = List::from_iter(0..5);
        assert_eq!(Vec::from_iter(list.iter().copied()), vec![0, 1, 2, 3, 4]);
        assert_eq!(Vec::from_iter(list), vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn iter_mut_updates_in_place() {
        let mut list = List::from_iter([1, 2, 3]);
        for element in list.iter_mut() {
            *element *= 10;
        }
        assert_eq!(list.to_string(), "10 -> 20 -> 30");
    }

    #[test]
    fn extend_appends_at_the_tail() {
        let mut list = List::from_iter([1, 2]);
        list.extend([3, 4]);
        assert_eq!(list.to_string(), "1 -> 2 -> 3 -> 4");

        list.extend(&[5, 6]);
        assert_eq!(list.len(), 6);
        assert_eq!(list.nth_from_end(0), Ok(&6));
    }

    #[test]
    fn iterators_are_fused() {
        let list = List::from_iter([1]);
        let mut iter = list.iter();
        assert_eq!(iter.next(), Some(&1));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);
    }
}
