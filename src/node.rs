use {
    super::{TopologyError, TopologyResult},
    std::{
        fmt,
        hash::{Hash, Hasher},
    },
};

/// Role a server plays in a deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeType {
    Master,
    Replica,
    Sentinel,
}

/// Address and identity of a single server.
///
/// Node is identified by its id and address (host and port). Descriptive
/// attributes (name, type, master id) do not take part in equality, so a node
/// can be used as a map key even after being re-described.
#[derive(Debug, Clone, Default)]
pub struct Node {
    pub(crate) host: Option<String>,
    pub(crate) port: Option<u16>,
    pub(crate) id: Option<String>,
    pub(crate) name: Option<String>,
    pub(crate) node_type: Option<NodeType>,
    pub(crate) master_id: Option<String>,
}

impl Node {
    /// Creates a node listening at the given address.
    pub fn new(host: impl Into<String>, port: u16) -> TopologyResult<Self> {
        NodeBuilder::new().listening_at(host, port).build()
    }

    /// Returns node builder.
    pub fn builder() -> NodeBuilder {
        NodeBuilder::new()
    }

    pub fn host(&self) -> Option<&str> {
        self.host.as_deref()
    }

    pub fn port(&self) -> Option<u16> {
        self.port
    }

    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn node_type(&self) -> Option<NodeType> {
        self.node_type
    }

    /// Id of the master this node replicates, if any.
    pub fn master_id(&self) -> Option<&str> {
        self.master_id.as_deref()
    }

    pub fn is_master(&self) -> bool {
        self.node_type == Some(NodeType::Master)
    }

    pub fn is_replica(&self) -> bool {
        self.node_type == Some(NodeType::Replica)
    }

    /// Whether the node can be reached by address.
    pub fn has_valid_host(&self) -> bool {
        self.host.as_deref().is_some_and(|host| !host.is_empty())
    }

    /// Returns `host:port` (IPv6 hosts are bracketed), if the node has an
    /// address.
    pub fn address(&self) -> Option<String> {
        let host = self.host.as_deref()?;
        let port = self.port?;
        if host.contains(':') {
            Some(format!("[{host}]:{port}"))
        } else {
            Some(format!("{host}:{port}"))
        }
    }

    pub(crate) fn identity(&self) -> (Option<&str>, Option<&str>, Option<u16>) {
        (self.id.as_deref(), self.host.as_deref(), self.port)
    }
}

impl PartialEq for Node {
    fn eq(&self, other: &Self) -> bool {
        self.identity() == other.identity()
    }
}

impl Eq for Node {}

impl Hash for Node {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.identity().hash(state);
    }
}

impl fmt::Display for Node {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.address(), self.host(), self.id()) {
            (Some(address), ..) => f.write_str(&address),
            (None, Some(host), _) => f.write_str(host),
            (None, None, Some(id)) => f.write_str(id),
            (None, None, None) => f.write_str("<unknown>"),
        }
    }
}

/// Node builder.
///
/// Every field is optional, validation happens on [`build()`](Self::build).
#[derive(Debug, Clone, Default)]
pub struct NodeBuilder {
    node: Node,
}

impl NodeBuilder {
    /// Create new node builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set host and port the node listens at.
    pub fn listening_at(mut self, host: impl Into<String>, port: u16) -> Self {
        self.node.host = Some(host.into());
        self.node.port = Some(port);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.node.name = Some(name.into());
        self
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.node.id = Some(id.into());
        self
    }

    pub fn promoted_as(mut self, node_type: NodeType) -> Self {
        self.node.node_type = Some(node_type);
        self
    }

    /// Set id of the master the node replicates.
    pub fn replica_of(mut self, master_id: impl Into<String>) -> Self {
        self.node.master_id = Some(master_id.into());
        self
    }

    /// Build the node.
    ///
    /// Fails if host or id were set to an empty string.
    pub fn build(self) -> TopologyResult<Node> {
        if self.node.host.as_deref() == Some("") {
            return Err(TopologyError::EmptyHost);
        }
        if self.node.id.as_deref() == Some("") {
            return Err(TopologyError::EmptyId);
        }
        Ok(self.node)
    }
}

#[cfg(test)]
mod tests {
    use {super::*, std::collections::HashSet};

    #[test]
    fn basic_ops() {
        let node = Node::builder()
            .listening_at("127.0.0.1", 7000)
            .with_id("e7d1eecce10fd6bb5eb35b9f99a514335d9ba9ca")
            .with_name("primary-0")
            .promoted_as(NodeType::Master)
            .build()
            .unwrap();

        assert_eq!(node.host(), Some("127.0.0.1"));
        assert_eq!(node.port(), Some(7000));
        assert_eq!(node.id(), Some("e7d1eecce10fd6bb5eb35b9f99a514335d9ba9ca"));
        assert_eq!(node.name(), Some("primary-0"));
        assert!(node.is_master());
        assert!(!node.is_replica());
        assert!(node.has_valid_host());
        assert_eq!(node.address().as_deref(), Some("127.0.0.1:7000"));
        assert_eq!(node.to_string(), "127.0.0.1:7000");

        let replica = Node::builder()
            .with_id("replica-1")
            .promoted_as(NodeType::Replica)
            .replica_of("e7d1eecce10fd6bb5eb35b9f99a514335d9ba9ca")
            .build()
            .unwrap();
        assert!(replica.is_replica());
        assert!(!replica.has_valid_host());
        assert_eq!(replica.master_id(), node.id());
        assert_eq!(replica.address(), None);
        assert_eq!(replica.to_string(), "replica-1");

        let ipv6 = Node::new("::1", 6379).unwrap();
        assert_eq!(ipv6.address().as_deref(), Some("[::1]:6379"));
    }

    #[test]
    fn empty_identity() {
        assert_eq!(Node::new("", 6379).err(), Some(TopologyError::EmptyHost));
        assert_eq!(
            Node::builder().with_id("").build().err(),
            Some(TopologyError::EmptyId)
        );
        assert_eq!(Node::builder().build().unwrap().to_string(), "<unknown>");
    }

    #[test]
    fn identity_equality() {
        let a = Node::builder()
            .listening_at("10.0.0.1", 6379)
            .with_name("a")
            .build()
            .unwrap();
        let renamed = Node::builder()
            .listening_at("10.0.0.1", 6379)
            .with_name("b")
            .promoted_as(NodeType::Replica)
            .build()
            .unwrap();
        let other_port = Node::new("10.0.0.1", 6380).unwrap();

        assert_eq!(a, renamed);
        assert_ne!(a, other_port);

        let nodes: HashSet<Node> = [a, renamed, other_port].into_iter().collect();
        assert_eq!(nodes.len(), 2);
    }
}
