//! Linked-list string queues with in-place restructuring
//!
//! This crate provides a queue of owned strings backed by a circular
//! doubly-linked list with a sentinel head node (the list substrate lives in
//! the `sentinel-list` crate). Alongside insertion and removal at both ends
//! it implements the classic linked-list restructuring operations in place:
//!
//! - **delete_mid**: remove the middle element via a two-cursor walk
//! - **delete_dup**: remove every run of consecutive duplicate values
//! - **swap_pairs** / **reverse** / **reverse_k**: reorder by exchanging
//!   values between nodes, never by relinking
//! - **sort**: adjacent-swap passes in either direction
//! - **ascend** / **descend**: keep only the monotonic subsequence ending at
//!   the tail
//! - **merge_all**: k-way merge of sorted queues by splicing nodes
//!
//! # Example
//!
//! ```rust
//! use rust_sentinel_queues::{Queue, SortOrder};
//!
//! let mut queue = Queue::new();
//! queue.push_back("banana");
//! queue.push_back("apple");
//! queue.push_front("cherry");
//!
//! queue.sort(SortOrder::Ascending);
//! assert_eq!(queue.iter().collect::<Vec<_>>(), ["apple", "banana", "cherry"]);
//!
//! queue.reverse();
//! assert_eq!(queue.pop_front(), Some(String::from("cherry")));
//! ```

pub mod merge;
pub mod order;
pub mod queue;

// Re-export the working set for convenience
pub use merge::{merge_all, QueueContext};
pub use order::SortOrder;
pub use queue::{Iter, Queue, QueueError};
