//! Intrusive circular doubly-linked list rooted at a sentinel head node.
//!
//! This crate provides the list substrate used by `rust-sentinel-queues`. The
//! list is circular and anchored at a dedicated *sentinel* link that carries
//! no data: an empty list is a sentinel pointing at itself, and the first and
//! last data nodes are `head.next` and `head.prev` respectively.
//!
//! # Sentinel vs free-floating rings
//!
//! With a sentinel:
//! - "empty" is a single O(1) check (`head.next == head`)
//! - insert-at-head and insert-at-tail are O(1) from the sentinel alone
//! - forward iteration has a natural start and stop point (the sentinel)
//! - a node's membership can be revoked without touching the list owner
//!
//! # Example
//!
//! ```rust
//! use sentinel_list::{ListLink, SentinelListOps};
//! use std::ptr::NonNull;
//!
//! struct Entry {
//!     link: ListLink,
//!     value: i32,
//! }
//!
//! let ops = SentinelListOps::new();
//!
//! let head = ListLink::new();
//! let entry = Entry { link: ListLink::new(), value: 7 };
//!
//! unsafe {
//!     let head_ptr = NonNull::from(&head);
//!     ops.init_sentinel(head_ptr);
//!     assert!(ops.is_empty(head_ptr));
//!
//!     ops.link_tail(head_ptr, NonNull::from(&entry.link));
//!     assert!(!ops.is_empty(head_ptr));
//!     assert_eq!(ops.first(head_ptr), Some(NonNull::from(&entry.link)));
//! }
//! ```
//!
//! # Safety model
//!
//! `ListLink` stores its neighbors in `Cell`s so that list surgery never
//! requires a `&mut ListLink`; all aliasing happens through shared references
//! to the links. The operations themselves are `unsafe`: the caller owns the
//! nodes and must keep them pinned in memory while linked.

#![cfg_attr(not(feature = "std"), no_std)]

use core::cell::Cell;
use core::fmt;
use core::ptr::NonNull;

// =============================================================================
// ListLink
// =============================================================================

/// Intrusive link that threads an object into a sentinel-rooted circular list.
///
/// When unlinked, both `next` and `prev` are `None`. When linked, both point
/// at valid links; a sentinel of an empty list points at itself.
#[repr(C)]
pub struct ListLink {
    next: Cell<Option<NonNull<ListLink>>>,
    prev: Cell<Option<NonNull<ListLink>>>,
}

impl ListLink {
    /// Creates a new unlinked `ListLink`.
    #[inline]
    pub const fn new() -> ListLink {
        ListLink {
            next: Cell::new(None),
            prev: Cell::new(None),
        }
    }

    /// Checks whether the link is part of a list.
    #[inline]
    pub fn is_linked(&self) -> bool {
        self.next.get().is_some()
    }

    /// Forcibly clears this link without updating its neighbors.
    ///
    /// # Safety
    ///
    /// The neighbors are left pointing at this node. Only use this when the
    /// surrounding list is being torn down wholesale, or after the neighbors
    /// have already been re-spliced around this node.
    #[inline]
    pub unsafe fn force_unlink(&self) {
        self.next.set(None);
        self.prev.set(None);
    }

    /// Gets the next link pointer.
    #[inline]
    pub fn next(&self) -> Option<NonNull<ListLink>> {
        self.next.get()
    }

    /// Gets the previous link pointer.
    #[inline]
    pub fn prev(&self) -> Option<NonNull<ListLink>> {
        self.prev.get()
    }

    /// Sets the next link pointer.
    #[inline]
    pub fn set_next(&self, next: Option<NonNull<ListLink>>) {
        self.next.set(next);
    }

    /// Sets the previous link pointer.
    #[inline]
    pub fn set_prev(&self, prev: Option<NonNull<ListLink>>) {
        self.prev.set(prev);
    }
}

impl Default for ListLink {
    #[inline]
    fn default() -> Self {
        ListLink::new()
    }
}

impl Clone for ListLink {
    /// Cloning a link creates a new unlinked link.
    #[inline]
    fn clone(&self) -> Self {
        ListLink::new()
    }
}

impl fmt::Debug for ListLink {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_linked() {
            write!(f, "ListLink(linked)")
        } else {
            write!(f, "ListLink(unlinked)")
        }
    }
}

// A ListLink can be sent to another thread if it is unlinked.
unsafe impl Send for ListLink {}

// =============================================================================
// SentinelListOps
// =============================================================================

/// Operations on sentinel-rooted circular doubly-linked lists.
///
/// All structural operations are O(1); `len`, `for_each`, and
/// `for_each_safe` are O(n).
///
/// # Safety
///
/// Most methods are unsafe because they operate on raw link pointers. The
/// caller must ensure:
/// - pointers are valid, aligned, and pinned while linked
/// - insertion targets are not already linked, removal targets are
/// - the sentinel passed to head/tail/iteration operations was initialized
///   with [`init_sentinel`](SentinelListOps::init_sentinel) and is the only
///   sentinel in its cycle
#[derive(Clone, Copy, Default)]
pub struct SentinelListOps;

impl SentinelListOps {
    /// Creates a new `SentinelListOps`.
    #[inline]
    pub const fn new() -> Self {
        SentinelListOps
    }

    /// Initializes `head` as the sentinel of an empty list.
    ///
    /// After this, `head.next == head` and `head.prev == head`.
    ///
    /// # Safety
    ///
    /// `head` must not currently be linked into any list.
    #[inline]
    pub unsafe fn init_sentinel(&self, head: NonNull<ListLink>) {
        head.as_ref().set_next(Some(head));
        head.as_ref().set_prev(Some(head));
    }

    /// Returns `true` if the list rooted at `head` has no data nodes.
    ///
    /// # Safety
    ///
    /// `head` must be an initialized sentinel.
    #[inline]
    pub unsafe fn is_empty(&self, head: NonNull<ListLink>) -> bool {
        head.as_ref().next() == Some(head)
    }

    /// Gets the successor of a linked node.
    ///
    /// # Safety
    ///
    /// `node` must be linked.
    #[inline]
    pub unsafe fn next(&self, node: NonNull<ListLink>) -> NonNull<ListLink> {
        debug_assert!(node.as_ref().is_linked(), "node is not linked");
        node.as_ref().next().unwrap()
    }

    /// Gets the predecessor of a linked node.
    ///
    /// # Safety
    ///
    /// `node` must be linked.
    #[inline]
    pub unsafe fn prev(&self, node: NonNull<ListLink>) -> NonNull<ListLink> {
        debug_assert!(node.as_ref().is_linked(), "node is not linked");
        node.as_ref().prev().unwrap()
    }

    /// Inserts `new` after `at`.
    ///
    /// # Safety
    ///
    /// - `at` must be linked (the sentinel counts as linked)
    /// - `new` must NOT be linked
    #[inline]
    pub unsafe fn insert_after(&self, at: NonNull<ListLink>, new: NonNull<ListLink>) {
        debug_assert!(at.as_ref().is_linked(), "at is not linked");
        debug_assert!(!new.as_ref().is_linked(), "new is already linked");

        let next = at.as_ref().next().unwrap();

        at.as_ref().set_next(Some(new));
        new.as_ref().set_prev(Some(at));
        new.as_ref().set_next(Some(next));
        next.as_ref().set_prev(Some(new));
    }

    /// Inserts `new` before `at`.
    ///
    /// # Safety
    ///
    /// - `at` must be linked (the sentinel counts as linked)
    /// - `new` must NOT be linked
    #[inline]
    pub unsafe fn insert_before(&self, at: NonNull<ListLink>, new: NonNull<ListLink>) {
        debug_assert!(at.as_ref().is_linked(), "at is not linked");
        debug_assert!(!new.as_ref().is_linked(), "new is already linked");

        let prev = at.as_ref().prev().unwrap();

        at.as_ref().set_prev(Some(new));
        new.as_ref().set_next(Some(at));
        new.as_ref().set_prev(Some(prev));
        prev.as_ref().set_next(Some(new));
    }

    /// Links `new` as the first data node of the list rooted at `head`.
    ///
    /// # Safety
    ///
    /// Same requirements as [`insert_after`](SentinelListOps::insert_after).
    #[inline]
    pub unsafe fn link_head(&self, head: NonNull<ListLink>, new: NonNull<ListLink>) {
        self.insert_after(head, new);
    }

    /// Links `new` as the last data node of the list rooted at `head`.
    ///
    /// # Safety
    ///
    /// Same requirements as [`insert_before`](SentinelListOps::insert_before).
    #[inline]
    pub unsafe fn link_tail(&self, head: NonNull<ListLink>, new: NonNull<ListLink>) {
        self.insert_before(head, new);
    }

    /// Unlinks a node, leaving it unlinked.
    ///
    /// # Safety
    ///
    /// `node` must be linked and must not be the list's sentinel.
    #[inline]
    pub unsafe fn unlink(&self, node: NonNull<ListLink>) {
        debug_assert!(node.as_ref().is_linked(), "node is not linked");

        let next = node.as_ref().next().unwrap();
        let prev = node.as_ref().prev().unwrap();

        prev.as_ref().set_next(Some(next));
        next.as_ref().set_prev(Some(prev));
        node.as_ref().force_unlink();
    }

    /// Unlinks a node and resets it to a one-node ring pointing at itself.
    ///
    /// This is the removal to use when the node will be treated as its own
    /// (empty-sentinel or single-entry) ring afterwards.
    ///
    /// # Safety
    ///
    /// `node` must be linked.
    #[inline]
    pub unsafe fn unlink_init(&self, node: NonNull<ListLink>) {
        self.unlink(node);
        node.as_ref().set_next(Some(node));
        node.as_ref().set_prev(Some(node));
    }

    /// Returns the first data node, or `None` if the list is empty.
    ///
    /// # Safety
    ///
    /// `head` must be an initialized sentinel.
    #[inline]
    pub unsafe fn first(&self, head: NonNull<ListLink>) -> Option<NonNull<ListLink>> {
        let first = head.as_ref().next().unwrap();
        if first == head {
            None
        } else {
            Some(first)
        }
    }

    /// Returns the last data node, or `None` if the list is empty.
    ///
    /// # Safety
    ///
    /// `head` must be an initialized sentinel.
    #[inline]
    pub unsafe fn last(&self, head: NonNull<ListLink>) -> Option<NonNull<ListLink>> {
        let last = head.as_ref().prev().unwrap();
        if last == head {
            None
        } else {
            Some(last)
        }
    }

    /// Counts the data nodes in the list rooted at `head`.
    ///
    /// This is O(n) - use sparingly.
    ///
    /// # Safety
    ///
    /// `head` must be an initialized sentinel.
    pub unsafe fn len(&self, head: NonNull<ListLink>) -> usize {
        let mut count = 0;
        let mut current = head.as_ref().next().unwrap();

        while current != head {
            count += 1;
            current = current.as_ref().next().unwrap();
        }

        count
    }

    /// Iterates forward over all data nodes, calling `f` for each.
    ///
    /// # Safety
    ///
    /// `head` must be an initialized sentinel. The callback must not modify
    /// the list structure; use
    /// [`for_each_safe`](SentinelListOps::for_each_safe) for that.
    pub unsafe fn for_each<F>(&self, head: NonNull<ListLink>, mut f: F)
    where
        F: FnMut(NonNull<ListLink>),
    {
        let mut current = head.as_ref().next().unwrap();

        while current != head {
            f(current);
            current = current.as_ref().next().unwrap();
        }
    }

    /// Iterates forward over all data nodes, fetching each successor before
    /// the callback runs so that `f` may unlink (and free) the current node.
    ///
    /// # Safety
    ///
    /// `head` must be an initialized sentinel. The callback may unlink the
    /// node it is given but must not touch any other node's linkage.
    pub unsafe fn for_each_safe<F>(&self, head: NonNull<ListLink>, mut f: F)
    where
        F: FnMut(NonNull<ListLink>),
    {
        let mut current = head.as_ref().next().unwrap();

        while current != head {
            let next = current.as_ref().next().unwrap();
            f(current);
            current = next;
        }
    }
}

// =============================================================================
// Utility macros for recovering the container from a link pointer
// =============================================================================

/// Recovers a `*const` pointer to the struct containing a link.
///
/// # Example
///
/// ```rust
/// use sentinel_list::{container_of, ListLink};
/// use std::ptr::NonNull;
///
/// struct Entry {
///     value: i32,
///     link: ListLink,
/// }
///
/// let entry = Entry { value: 42, link: ListLink::new() };
/// let link_ptr = NonNull::from(&entry.link);
///
/// unsafe {
///     let entry_ptr: *const Entry = container_of!(link_ptr.as_ptr(), Entry, link);
///     assert_eq!((*entry_ptr).value, 42);
/// }
/// ```
#[macro_export]
macro_rules! container_of {
    ($ptr:expr, $type:ty, $field:ident) => {{
        let ptr = $ptr as *const u8;
        let offset = core::mem::offset_of!($type, $field);
        ptr.sub(offset) as *const $type
    }};
}

/// Mutable version of [`container_of`].
#[macro_export]
macro_rules! container_of_mut {
    ($ptr:expr, $type:ty, $field:ident) => {{
        let ptr = $ptr as *mut u8;
        let offset = core::mem::offset_of!($type, $field);
        ptr.sub(offset) as *mut $type
    }};
}

// =============================================================================
// Tests
// =============================================================================
