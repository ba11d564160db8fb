use {
    super::{
        ClusterNodeBuilder,
        Flag,
        LinkState,
        Node,
        NodeType,
        Slot,
        SlotRange,
        TopologyResult,
    },
    auto_impl::auto_impl,
    std::{
        collections::BTreeSet,
        fmt,
        hash::{Hash, Hasher},
    },
};

/// Owner of a portion of the hash slot space.
///
/// Routing tables usually hold shared handles to nodes, so the trait is
/// implemented for references, boxes and `Arc`s of owners as well.
#[auto_impl(&, Box, Arc)]
pub trait SlotOwner {
    /// Slots served by the owner.
    fn slot_range(&self) -> &SlotRange;

    /// Checks whether the owner serves the given slot.
    fn serves_slot(&self, slot: Slot) -> bool {
        self.slot_range().contains(slot)
    }
}

impl SlotOwner for SlotRange {
    fn slot_range(&self) -> &SlotRange {
        self
    }
}

/// Server participating in the cluster.
///
/// Snapshot of a node as reported by the cluster at some point in time: the
/// slots it serves, its status flags and its link state. Nodes are never
/// updated in place, a topology refresh produces new instances.
///
/// Equality and hashing only consider the node identity (id and address), so
/// that re-reported nodes with changed status still match in routing maps.
#[derive(Debug, Clone)]
pub struct ClusterNode {
    node: Node,
    slot_range: SlotRange,
    link_state: Option<LinkState>,
    flags: BTreeSet<Flag>,
}

impl ClusterNode {
    /// Creates a node listening at the given address, serving no slots.
    pub fn new(host: impl Into<String>, port: u16) -> TopologyResult<Self> {
        Self::with_slot_range(host, port, SlotRange::empty())
    }

    /// Creates a node known only by its id, serving no slots.
    pub fn with_id(id: impl Into<String>) -> TopologyResult<Self> {
        let node = Node::builder().with_id(id).build()?;
        Ok(Self::from_parts(node, SlotRange::empty()))
    }

    /// Creates a node listening at the given address and serving given slots.
    pub fn with_slot_range(
        host: impl Into<String>,
        port: u16,
        slot_range: SlotRange,
    ) -> TopologyResult<Self> {
        Ok(Self::from_parts(Node::new(host, port)?, slot_range))
    }

    /// Creates a node without address, serving given slots.
    pub fn from_slot_range(slot_range: SlotRange) -> Self {
        Self::from_parts(Node::default(), slot_range)
    }

    /// Returns cluster node builder.
    pub fn builder() -> ClusterNodeBuilder {
        ClusterNodeBuilder::new()
    }

    pub(crate) fn from_parts(node: Node, slot_range: SlotRange) -> Self {
        Self {
            node,
            slot_range,
            link_state: None,
            flags: BTreeSet::new(),
        }
    }

    pub(crate) fn with_status(
        mut self,
        flags: BTreeSet<Flag>,
        link_state: Option<LinkState>,
    ) -> Self {
        self.flags = flags;
        self.link_state = link_state;
        self
    }

    /// Address and identity of the node.
    pub fn node(&self) -> &Node {
        &self.node
    }

    pub fn host(&self) -> Option<&str> {
        self.node.host()
    }

    pub fn port(&self) -> Option<u16> {
        self.node.port()
    }

    pub fn id(&self) -> Option<&str> {
        self.node.id()
    }

    pub fn name(&self) -> Option<&str> {
        self.node.name()
    }

    pub fn node_type(&self) -> Option<NodeType> {
        self.node.node_type()
    }

    pub fn master_id(&self) -> Option<&str> {
        self.node.master_id()
    }

    /// Slots served by the node.
    pub fn slot_range(&self) -> &SlotRange {
        &self.slot_range
    }

    /// Checks whether the node serves the given slot.
    pub fn serves_slot(&self, slot: Slot) -> bool {
        self.slot_range.contains(slot)
    }

    /// Link state, `None` if unknown.
    pub fn link_state(&self) -> Option<LinkState> {
        self.link_state
    }

    /// Node is connected to the cluster.
    ///
    /// Unknown link state counts as not connected.
    pub fn is_connected(&self) -> bool {
        self.link_state == Some(LinkState::Connected)
    }

    /// Status flags, empty if none were reported.
    pub fn flags(&self) -> &BTreeSet<Flag> {
        &self.flags
    }

    /// Node is marked as failed or possibly failed.
    pub fn is_marked_as_fail(&self) -> bool {
        self.flags.iter().any(Flag::is_failure)
    }

    /// Node is the one the topology was read from.
    pub fn is_myself(&self) -> bool {
        self.flags.contains(&Flag::Myself)
    }
}

impl SlotOwner for ClusterNode {
    fn slot_range(&self) -> &SlotRange {
        &self.slot_range
    }
}

impl PartialEq for ClusterNode {
    fn eq(&self, other: &Self) -> bool {
        self.node == other.node
    }
}

impl Eq for ClusterNode {}

impl Hash for ClusterNode {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.node.hash(state);
    }
}

impl fmt::Display for ClusterNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.node, f)
    }
}
