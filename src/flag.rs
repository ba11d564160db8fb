use {
    super::{TopologyError, TopologyResult},
    std::{collections::BTreeSet, fmt, str::FromStr},
};

/// Status marker reported by the cluster about a node.
///
/// Each flag has a canonical lowercase token, used in raw cluster status
/// output (e.g. `myself,master`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Flag {
    /// The node the status was obtained from.
    Myself,
    Master,
    Replica,
    /// Failure confirmed by the majority of masters.
    Fail,
    /// Failure suspected by a single node.
    PFail,
    /// Node is not yet trusted, still in handshake.
    Handshake,
    /// Address of the node is unknown.
    NoAddr,
    NoFlags,
}

impl Flag {
    /// All flags, in declaration order.
    pub const ALL: [Flag; 8] = [
        Flag::Myself,
        Flag::Master,
        Flag::Replica,
        Flag::Fail,
        Flag::PFail,
        Flag::Handshake,
        Flag::NoAddr,
        Flag::NoFlags,
    ];

    /// Canonical wire token of the flag.
    pub fn raw(&self) -> &'static str {
        match self {
            Flag::Myself => "myself",
            Flag::Master => "master",
            Flag::Replica => "slave",
            Flag::Fail => "fail",
            Flag::PFail => "fail?",
            Flag::Handshake => "handshake",
            Flag::NoAddr => "noaddr",
            Flag::NoFlags => "noflags",
        }
    }

    /// Whether the flag marks the node as (possibly) failed.
    pub fn is_failure(&self) -> bool {
        matches!(self, Flag::Fail | Flag::PFail)
    }
}

impl fmt::Display for Flag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.raw())
    }
}

/// Only exact canonical tokens are accepted.
impl FromStr for Flag {
    type Err = TopologyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Flag::ALL
            .into_iter()
            .find(|flag| flag.raw() == s)
            .ok_or_else(|| {
                tracing::debug!(token = s, "rejecting unknown node flag");
                TopologyError::UnknownFlag(s.to_string())
            })
    }
}

/// Parses a comma separated list of flag tokens, e.g. `myself,master`.
///
/// A single unknown token fails the whole list.
pub fn parse_flags(s: &str) -> TopologyResult<BTreeSet<Flag>> {
    s.split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(Flag::from_str)
        .collect()
}

/// Link state of a node, from the point of view of the reporting node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LinkState {
    Connected,
    Disconnected,
}

impl LinkState {
    pub fn raw(&self) -> &'static str {
        match self {
            LinkState::Connected => "connected",
            LinkState::Disconnected => "disconnected",
        }
    }
}

impl fmt::Display for LinkState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.raw())
    }
}

impl FromStr for LinkState {
    type Err = TopologyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "connected" => Ok(LinkState::Connected),
            "disconnected" => Ok(LinkState::Disconnected),
            _ => {
                tracing::debug!(token = s, "rejecting unknown link state");
                Err(TopologyError::UnknownLinkState(s.to_string()))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_tokens() {
        let tokens: Vec<&str> = Flag::ALL.iter().map(Flag::raw).collect();
        assert_eq!(
            tokens,
            vec![
                "myself",
                "master",
                "slave",
                "fail",
                "fail?",
                "handshake",
                "noaddr",
                "noflags"
            ]
        );

        for flag in Flag::ALL {
            assert_eq!(flag.to_string().parse::<Flag>(), Ok(flag));
        }

        // Only the canonical token is recognized.
        assert_eq!(
            "replica".parse::<Flag>(),
            Err(TopologyError::UnknownFlag("replica".to_string()))
        );
        assert_eq!(
            "MASTER".parse::<Flag>(),
            Err(TopologyError::UnknownFlag("MASTER".to_string()))
        );
        assert_eq!(
            "pfail".parse::<Flag>(),
            Err(TopologyError::UnknownFlag("pfail".to_string()))
        );
    }

    #[test]
    fn flag_lists() {
        let flags = parse_flags("myself,master").unwrap();
        assert_eq!(flags, BTreeSet::from([Flag::Myself, Flag::Master]));

        let flags = parse_flags("slave,fail?").unwrap();
        assert!(flags.iter().any(Flag::is_failure));
        assert!(flags.contains(&Flag::Replica));

        assert!(parse_flags("").unwrap().is_empty());
        assert_eq!(
            parse_flags("master,nonsense"),
            Err(TopologyError::UnknownFlag("nonsense".to_string()))
        );
    }

    #[test]
    fn link_states() {
        assert_eq!("connected".parse(), Ok(LinkState::Connected));
        assert_eq!("disconnected".parse(), Ok(LinkState::Disconnected));
        assert_eq!(LinkState::Disconnected.to_string(), "disconnected");
        assert_eq!(
            "up".parse::<LinkState>(),
            Err(TopologyError::UnknownLinkState("up".to_string()))
        );
    }
}
