//! Multi-queue merge.
//!
//! [`merge_all`] combines any number of individually sorted queues into one
//! sorted queue by folding the caller-supplied chain of [`QueueContext`]
//! handles pairwise from its tail toward its head. The underlying primitive,
//! [`Queue::merge_sorted`], splices donor nodes directly into the recipient's
//! ring - elements are never copied or reallocated, and the donor is left as
//! an empty queue.

use crate::order::SortOrder;
use crate::queue::{Element, Queue, OPS};

/// A non-owning handle pairing a queue with its element count, used to name
/// the queues participating in a [`merge_all`] call.
///
/// The count is captured at construction and updated by the merge: drained
/// donors report 0, the recipient reports the combined total.
#[derive(Debug)]
pub struct QueueContext<'a> {
    queue: &'a mut Queue,
    size: usize,
}

impl<'a> QueueContext<'a> {
    /// Wraps a queue, capturing its current element count.
    pub fn new(queue: &'a mut Queue) -> QueueContext<'a> {
        let size = queue.len();
        QueueContext { queue, size }
    }

    /// The element count as of construction (or of the last merge).
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// The wrapped queue.
    #[inline]
    pub fn queue(&self) -> &Queue {
        self.queue
    }
}

impl Queue {
    /// Merges all of `donor`'s elements into `self`, preserving the
    /// requested order.
    ///
    /// Both queues must already be sorted in that order; this is a
    /// precondition and is not verified. The merge walks both rings once,
    /// splicing each donor node in front of the first recipient node that
    /// must follow it. On ties the recipient's element stays first. The
    /// donor ends up empty (its sentinel again points at itself); ownership
    /// of every donor element transfers to `self`.
    pub fn merge_sorted(&mut self, donor: &mut Queue, order: SortOrder) {
        unsafe {
            let head = self.sentinel();
            let mut cursor = OPS.next(head);
            while let Some(incoming) = OPS.first(donor.sentinel()) {
                OPS.unlink(incoming);
                while cursor != head
                    && order.in_order(
                        &Element::from_link(cursor).value,
                        &Element::from_link(incoming).value,
                    )
                {
                    cursor = OPS.next(cursor);
                }
                OPS.insert_before(cursor, incoming);
            }
        }
    }
}

/// Merges every queue in `contexts` into the first one, in the requested
/// order, and returns the final element count.
///
/// The chain is folded pairwise from the tail toward the head: each queue is
/// merged into its earlier neighbor, so after the fold the first context's
/// queue holds every element and all others are empty. Every participating
/// queue must already be sorted in the requested order.
///
/// An empty chain merges to nothing and returns 0.
///
/// # Example
///
/// ```rust
/// use rust_sentinel_queues::{merge_all, Queue, QueueContext, SortOrder};
///
/// let mut odds: Queue = ["1", "3", "5"].into_iter().collect();
/// let mut evens: Queue = ["2", "4", "6"].into_iter().collect();
///
/// let mut contexts = [QueueContext::new(&mut odds), QueueContext::new(&mut evens)];
/// let total = merge_all(&mut contexts, SortOrder::Ascending);
///
/// assert_eq!(total, 6);
/// assert_eq!(odds.iter().collect::<Vec<_>>(), ["1", "2", "3", "4", "5", "6"]);
/// assert!(evens.is_empty());
/// ```
pub fn merge_all(contexts: &mut [QueueContext<'_>], order: SortOrder) -> usize {
    if contexts.is_empty() {
        return 0;
    }
    for i in (1..contexts.len()).rev() {
        let (earlier, later) = contexts.split_at_mut(i);
        let earlier = &mut earlier[i - 1];
        let later = &mut later[0];
        earlier.queue.merge_sorted(later.queue, order);
        earlier.size += later.size;
        later.size = 0;
    }
    contexts[0].size
}

#[cfg(test)]
mod tests {
    use super::*;

    fn queue_of(values: &[&str]) -> Queue {
        values.iter().collect()
    }

    fn contents(queue: &Queue) -> Vec<String> {
        queue.iter().map(String::from).collect()
    }

    #[test]
    fn test_merge_sorted_interleaves() {
        let mut recipient = queue_of(&["1", "3", "5"]);
        let mut donor = queue_of(&["2", "4", "6"]);
        recipient.merge_sorted(&mut donor, SortOrder::Ascending);
        assert_eq!(contents(&recipient), ["1", "2", "3", "4", "5", "6"]);
        assert!(donor.is_empty());
    }

    #[test]
    fn test_merge_sorted_descending() {
        let mut recipient = queue_of(&["9", "5", "1"]);
        let mut donor = queue_of(&["8", "2"]);
        recipient.merge_sorted(&mut donor, SortOrder::Descending);
        assert_eq!(contents(&recipient), ["9", "8", "5", "2", "1"]);
    }

    #[test]
    fn test_merge_sorted_into_empty_and_from_empty() {
        let mut recipient = Queue::new();
        let mut donor = queue_of(&["a", "b"]);
        recipient.merge_sorted(&mut donor, SortOrder::Ascending);
        assert_eq!(contents(&recipient), ["a", "b"]);

        let mut empty_donor = Queue::new();
        recipient.merge_sorted(&mut empty_donor, SortOrder::Ascending);
        assert_eq!(contents(&recipient), ["a", "b"]);
    }

    #[test]
    fn test_merge_sorted_ties_keep_recipient_first() {
        let mut recipient = queue_of(&["b"]);
        let mut donor = queue_of(&["b", "b"]);
        recipient.merge_sorted(&mut donor, SortOrder::Ascending);
        assert_eq!(contents(&recipient), ["b", "b", "b"]);
        assert_eq!(recipient.len(), 3);
    }

    #[test]
    fn test_merge_all_three_queues() {
        let mut a = queue_of(&["1", "4", "7"]);
        let mut b = queue_of(&["2", "5", "8"]);
        let mut c = queue_of(&["3", "6", "9"]);

        let mut contexts = [
            QueueContext::new(&mut a),
            QueueContext::new(&mut b),
            QueueContext::new(&mut c),
        ];
        let total = merge_all(&mut contexts, SortOrder::Ascending);

        assert_eq!(total, 9);
        assert_eq!(contexts[0].size(), 9);
        assert_eq!(contexts[1].size(), 0);
        assert_eq!(contexts[2].size(), 0);
        assert_eq!(
            contents(&a),
            ["1", "2", "3", "4", "5", "6", "7", "8", "9"]
        );
        assert!(b.is_empty());
        assert!(c.is_empty());
    }

    #[test]
    fn test_merge_all_descending() {
        let mut a = queue_of(&["c", "a"]);
        let mut b = queue_of(&["d", "b"]);

        let mut contexts = [QueueContext::new(&mut a), QueueContext::new(&mut b)];
        merge_all(&mut contexts, SortOrder::Descending);

        assert_eq!(contents(&a), ["d", "c", "b", "a"]);
    }

    #[test]
    fn test_merge_all_single_and_empty_chain() {
        let mut a = queue_of(&["x", "y"]);
        let mut contexts = [QueueContext::new(&mut a)];
        assert_eq!(merge_all(&mut contexts, SortOrder::Ascending), 2);
        assert_eq!(contents(&a), ["x", "y"]);

        let mut no_contexts: [QueueContext<'_>; 0] = [];
        assert_eq!(merge_all(&mut no_contexts, SortOrder::Ascending), 0);
    }
}
