//! Topology model of a sharded key-value cluster.
//!
//! Keys are distributed over a fixed space of [`SLOT_COUNT`] hash slots (see
//! [`key_slot()`]), and every server of the cluster serves some subset of
//! these slots. This crate models a single such server:
//!
//! - [`SlotRange`] is an immutable set of hash slots, contiguous or sparse.
//! - [`ClusterNode`] is a point-in-time snapshot of a server: its address and
//!   identity, the slots it serves, its status [`Flag`]s and [`LinkState`].
//! - [`ClusterNodeBuilder`] assembles cluster nodes step by step, the way a
//!   topology discovery component learns about them.
//!
//! Routing a key boils down to finding the node that serves the key's slot,
//! skipping nodes that are marked as failed or are not connected:
//!
//! ```
//! use slotspace::{ClusterNode, Flag, LinkState, SlotRange, key_slot};
//!
//! let nodes = vec![
//!     ClusterNode::builder()
//!         .listening_at("10.0.0.1", 6379)
//!         .with_flags([Flag::Master])
//!         .serving("0-8191".parse()?)
//!         .link_state(LinkState::Connected)
//!         .build()?,
//!     ClusterNode::builder()
//!         .listening_at("10.0.0.2", 6379)
//!         .with_flags([Flag::Master])
//!         .serving(SlotRange::new(8192, 16383)?)
//!         .link_state(LinkState::Connected)
//!         .build()?,
//! ];
//!
//! let slot = key_slot("foo");
//! let target = nodes
//!     .iter()
//!     .filter(|node| node.is_connected() && !node.is_marked_as_fail())
//!     .find(|node| node.serves_slot(slot));
//! assert_eq!(target.map(ToString::to_string).as_deref(), Some("10.0.0.2:6379"));
//! # Ok::<(), slotspace::TopologyError>(())
//! ```

mod builder;
mod cluster_node;
mod error;
mod flag;
mod hash;
mod node;
mod slot;

pub use {
    builder::ClusterNodeBuilder,
    cluster_node::{ClusterNode, SlotOwner},
    error::{TopologyError, TopologyResult},
    flag::{Flag, LinkState, parse_flags},
    hash::key_slot,
    node::{Node, NodeBuilder, NodeType},
    slot::{SLOT_COUNT, SLOT_WORDS, Slot, SlotRange, Slots},
};
