extern crate alloc;

use alloc::boxed::Box;
use core::fmt;
use core::marker::PhantomData;
use core::mem;
use core::ptr::{self, NonNull};

/// A node in the doubly linked list.
///
/// Contains a value and pointers to the previous and next entries.
/// This structure is not meant to be used directly by users of the `List`.
pub struct Entry<T> {
    /// The value stored in this entry. Uses MaybeUninit to allow for sigil nodes.
    val: mem::MaybeUninit<T>,
    /// Pointer to the previous entry in the list.
    prev: *mut Entry<T>,
    /// Pointer to the next entry in the list.
    next: *mut Entry<T>,
}

impl<T> Entry<T> {
    fn new(val: T) -> Self {
        Entry {
            val: mem::MaybeUninit::new(val),
            prev: ptr::null_mut(),
            next: ptr::null_mut(),
        }
    }

    /// Creates a sentinel entry without initializing the value.
    fn new_sigil() -> Self {
        Entry {
            val: mem::MaybeUninit::uninit(),
            prev: ptr::null_mut(),
            next: ptr::null_mut(),
        }
    }

    /// Returns a reference to the stored value.
    ///
    /// # Safety
    ///
    /// The value must be initialized. Should only be called on non-sigil nodes.
    pub unsafe fn get_value(&self) -> &T {
        // SAFETY: the caller guarantees this is not a sigil node
        unsafe { self.val.assume_init_ref() }
    }

    /// Returns a mutable reference to the stored value.
    ///
    /// # Safety
    ///
    /// The value must be initialized. Should only be called on non-sigil nodes.
    pub unsafe fn get_value_mut(&mut self) -> &mut T {
        // SAFETY: the caller guarantees this is not a sigil node
        unsafe { self.val.assume_init_mut() }
    }

    /// Consumes a detached entry and returns its value.
    ///
    /// # Safety
    ///
    /// The entry must not be a sigil node.
    pub unsafe fn into_value(self: Box<Self>) -> T {
        // SAFETY: the caller guarantees the value was initialized by `Entry::new`
        unsafe { self.val.assume_init_read() }
    }
}

/// An unbounded doubly linked list that keeps insertion order.
///
/// Values are appended at the back and the oldest value sits at the front.
/// Nodes are handed out as raw pointers so the owner can keep a
/// key-to-node index and unlink any node in O(1). A node can be moved to
/// another list without reallocating it.
///
/// The list uses sentinel nodes (sigils) at the head and tail to simplify
/// linking.
pub struct List<T> {
    /// Current number of items in the list.
    len: usize,
    /// Pointer to the head sentinel node.
    head: *mut Entry<T>,
    /// Pointer to the tail sentinel node.
    tail: *mut Entry<T>,
    _marker: PhantomData<Box<Entry<T>>>,
}

impl<T> List<T> {
    /// Creates an empty list.
    pub fn new() -> List<T> {
        let head = Box::into_raw(Box::new(Entry::new_sigil()));
        let tail = Box::into_raw(Box::new(Entry::new_sigil()));

        // SAFETY: head and tail are newly allocated and valid pointers
        unsafe {
            (*head).next = tail;
            (*tail).prev = head;
        }

        List {
            len: 0,
            head,
            tail,
            _marker: PhantomData,
        }
    }

    /// Returns the current number of items in the list.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the list contains no items.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Appends a value at the back of the list.
    ///
    /// Returns a pointer to the new entry. The pointer stays valid until the
    /// entry is removed from the list or the list is dropped.
    pub fn push_back(&mut self, v: T) -> *mut Entry<T> {
        // SAFETY: Box::into_raw never returns null
        let node = unsafe { NonNull::new_unchecked(Box::into_raw(Box::new(Entry::new(v)))) };
        // SAFETY: node is a newly allocated entry that is not part of any list yet
        unsafe { self.attach_last(node.as_ptr()) };
        self.len += 1;
        node.as_ptr()
    }

    /// Removes the front (oldest) entry from the list.
    pub fn pop_front(&mut self) -> Option<Box<Entry<T>>> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: head is valid and the list is not empty, so head.next is a
        // real entry and not the tail sentinel
        let first = unsafe { (*self.head).next };
        // SAFETY: first belongs to this list
        unsafe { self.remove(first) }
    }

    /// Returns the front (oldest) value without removing it.
    pub fn front(&self) -> Option<&T> {
        if self.is_empty() {
            return None;
        }
        // SAFETY: the list is not empty so head.next is an initialized entry
        unsafe { Some((*(*self.head).next).get_value()) }
    }

    /// Detaches a node from the list and returns it as a Box.
    ///
    /// # Safety
    ///
    /// `node` must be a valid pointer to an entry currently linked into this
    /// list (not freed, not a sentinel of another list).
    pub unsafe fn remove(&mut self, node: *mut Entry<T>) -> Option<Box<Entry<T>>> {
        if self.is_empty() || node.is_null() || node == self.head || node == self.tail {
            return None;
        }

        // SAFETY: the caller guarantees node is linked into this list
        unsafe {
            self.detach(node);
            self.len -= 1;
            Some(Box::from_raw(node))
        }
    }

    /// Links an entry that was removed from another list at the back of this one.
    ///
    /// Returns the raw pointer to the entry, which keeps its address.
    pub fn push_back_entry(&mut self, entry: Box<Entry<T>>) -> *mut Entry<T> {
        let node = Box::into_raw(entry);
        // SAFETY: node was just released from its Box and is not linked anywhere
        unsafe { self.attach_last(node) };
        self.len += 1;
        node
    }

    /// Returns an iterator from the front (oldest) to the back (newest).
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            // SAFETY: head is valid for the lifetime of the list
            next: unsafe { (*self.head).next },
            tail: self.tail,
            remaining: self.len,
            _marker: PhantomData,
        }
    }

    /// Clears the list, dropping every entry.
    pub fn clear(&mut self) {
        while let Some(entry) = self.pop_front() {
            // SAFETY: pop_front never returns a sentinel
            drop(unsafe { entry.into_value() });
        }
    }

    /// # Safety
    ///
    /// `node` must be linked into this list.
    unsafe fn detach(&mut self, node: *mut Entry<T>) {
        // SAFETY: a linked node always has valid prev and next neighbours
        unsafe {
            (*(*node).prev).next = (*node).next;
            (*(*node).next).prev = (*node).prev;
        }
    }

    /// # Safety
    ///
    /// `node` must be valid and not linked into any list.
    unsafe fn attach_last(&mut self, node: *mut Entry<T>) {
        // SAFETY: tail is valid for the lifetime of the list
        unsafe {
            (*node).next = self.tail;
            (*node).prev = (*self.tail).prev;
            (*self.tail).prev = node;
            (*(*node).prev).next = node;
        }
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

        // SAFETY: head and tail were allocated in `new` and are freed only here
        unsafe {
            drop(Box::from_raw(self.head));
            drop(Box::from_raw(self.tail));
        }
    }
}

impl<T> fmt::Debug for List<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("List").field("length", &self.len).finish()
    }
}

/// Front-to-back iterator over a [`List`].
pub struct Iter<'a, T> {
    next: *mut Entry<T>,
    tail: *mut Entry<T>,
    remaining: usize,
    _marker: PhantomData<&'a T>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        if self.next == self.tail || self.remaining == 0 {
            return None;
        }
        // SAFETY: next is a non-sentinel entry of a list borrowed for 'a
        unsafe {
            let node = &*self.next;
            self.next = node.next;
            self.remaining -= 1;
            Some(node.get_value())
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> fmt::Debug for Iter<'_, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("remaining", &self.remaining)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use super::*;
    use alloc::string::String;
    use alloc::vec::Vec;

    #[test]
    fn test_new_list_is_empty() {
        let list = List::<u32>::new();
        assert_eq!(list.len(), 0);
        assert!(list.is_empty());
        assert!(!list.head.is_null());
        assert!(!list.tail.is_null());
        assert_eq!(list.front(), None);
    }

    #[test]
    fn test_push_back_keeps_insertion_order() {
        let mut list = List::<u32>::new();
        list.push_back(10);
        list.push_back(20);
        list.push_back(30);

        assert_eq!(list.len(), 3);
        assert_eq!(list.front(), Some(&10));
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), [10, 20, 30]);
    }

    #[test]
    fn test_pop_front_returns_oldest() {
        let mut list = List::<u32>::new();
        assert!(list.pop_front().is_none());

        list.push_back(10);
        list.push_back(20);

        let first = list.pop_front().unwrap();
        assert_eq!(unsafe { first.into_value() }, 10);
        assert_eq!(list.len(), 1);

        let second = list.pop_front().unwrap();
        assert_eq!(unsafe { second.into_value() }, 20);
        assert!(list.is_empty());
        assert!(list.pop_front().is_none());
    }

    #[test]
    fn test_remove_middle_node() {
        let mut list = List::<u32>::new();
        list.push_back(10);
        let middle = list.push_back(20);
        list.push_back(30);

        let removed = unsafe { list.remove(middle) }.unwrap();
        assert_eq!(unsafe { removed.into_value() }, 20);
        assert_eq!(list.len(), 2);
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), [10, 30]);
    }

    #[test]
    fn test_remove_rejects_sentinels() {
        let mut list = List::<u32>::new();
        list.push_back(1);
        let head = list.head;
        let tail = list.tail;
        assert!(unsafe { list.remove(head) }.is_none());
        assert!(unsafe { list.remove(tail) }.is_none());
        assert!(unsafe { list.remove(ptr::null_mut()) }.is_none());
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_cross_list_node_transfer() {
        let mut list1 = List::<u32>::new();
        let mut list2 = List::<u32>::new();

        let node1 = list1.push_back(10);
        list1.push_back(20);
        list2.push_back(5);

        let removed = unsafe { list1.remove(node1) }.unwrap();
        let moved = list2.push_back_entry(removed);

        // The node keeps its address when it changes lists
        assert_eq!(moved, node1);
        assert_eq!(list1.len(), 1);
        assert_eq!(list2.len(), 2);
        assert_eq!(list1.iter().copied().collect::<Vec<_>>(), [20]);
        assert_eq!(list2.iter().copied().collect::<Vec<_>>(), [5, 10]);
    }

    #[test]
    fn test_get_value_mut_through_node() {
        let mut list = List::<String>::new();
        let node = list.push_back(String::from("test"));

        unsafe {
            (*node).get_value_mut().push_str("_modified");
            assert_eq!((*node).get_value(), "test_modified");
        }
    }

    #[test]
    fn test_clear_drops_values() {
        use std::rc::Rc;

        let tracker = Rc::new(());
        let mut list = List::new();
        for _ in 0..4 {
            list.push_back(Rc::clone(&tracker));
        }
        assert_eq!(Rc::strong_count(&tracker), 5);

        list.clear();
        assert!(list.is_empty());
        assert_eq!(Rc::strong_count(&tracker), 1);

        // Still usable after clear
        list.push_back(Rc::clone(&tracker));
        assert_eq!(list.len(), 1);
        drop(list);
        assert_eq!(Rc::strong_count(&tracker), 1);
    }

    #[test]
    fn test_iter_size_hint() {
        let mut list = List::<u8>::new();
        list.push_back(1);
        list.push_back(2);
        let mut iter = list.iter();
        assert_eq!(iter.size_hint(), (2, Some(2)));
        iter.next();
        assert_eq!(iter.size_hint(), (1, Some(1)));
    }
}
