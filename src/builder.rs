use {
    super::{
        ClusterNode,
        Flag,
        LinkState,
        NodeBuilder,
        NodeType,
        SlotRange,
        TopologyError,
        TopologyResult,
    },
    std::collections::BTreeSet,
};

/// Cluster node builder.
///
/// Address and identity are collected by the wrapped [`NodeBuilder`], the
/// cluster specific status (flags, served slots, link state) on top of it.
/// Unset status fields default to no flags, no slots and unknown link state.
#[derive(Debug, Clone, Default)]
pub struct ClusterNodeBuilder {
    base: NodeBuilder,
    flags: BTreeSet<Flag>,
    link_state: Option<LinkState>,
    slot_range: SlotRange,
}

impl ClusterNodeBuilder {
    /// Create new cluster node builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set host and port the node listens at.
    pub fn listening_at(mut self, host: impl Into<String>, port: u16) -> Self {
        self.base = self.base.listening_at(host, port);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.base = self.base.with_name(name);
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.base = self.base.with_id(id);
        self
    }

    pub fn promoted_as(mut self, node_type: NodeType) -> Self {
        self.base = self.base.promoted_as(node_type);
        self
    }

    /// Set id of the master the node replicates.
    pub fn replica_of(mut self, master_id: impl Into<String>) -> Self {
        self.base = self.base.replica_of(master_id);
        self
    }

    /// Set status flags, replacing previously set ones.
    pub fn with_flags<I: IntoIterator<Item = Flag>>(mut self, flags: I) -> Self {
        self.flags = flags.into_iter().collect();
        self
    }

    /// Set slots served by the node.
    pub fn serving(mut self, slot_range: SlotRange) -> Self {
        self.slot_range = slot_range;
        self
    }

    pub fn link_state(mut self, link_state: LinkState) -> Self {
        self.link_state = Some(link_state);
        self
    }

    /// Build the cluster node.
    ///
    /// Fails if the node can be reached neither by address nor by id, or if
    /// host or id are empty.
    pub fn build(self) -> TopologyResult<ClusterNode> {
        let node = self
            .base
            .build()
            .inspect_err(|err| tracing::debug!(%err, "rejecting cluster node"))?;
        if node.host().is_none() && node.id().is_none() {
            tracing::debug!("rejecting cluster node without address and id");
            return Err(TopologyError::Unaddressable);
        }

        let node = ClusterNode::from_parts(node, self.slot_range)
            .with_status(self.flags, self.link_state);
        tracing::debug!(
            node = %node,
            slots = node.slot_range().len(),
            flags = ?node.flags(),
            link_state = ?node.link_state(),
            "built cluster node"
        );
        Ok(node)
    }
}
