#[derive(Debug, PartialEq, thiserror::Error)]
pub enum TopologyError {
    /// Slot lies outside of `[0, SLOT_COUNT)`.
    #[error("Slot {0} is outside of the hash slot space")]
    SlotOutOfRange(usize),

    /// Slot range text could not be parsed.
    #[error("Invalid slot range: {0}")]
    InvalidSlotRange(String),

    /// One side of a `start-end` pair is missing.
    #[error("Missing {0} bound in slot range")]
    MissingBound(&'static str),

    /// Flag token is not one of the canonical wire tokens.
    #[error("Unknown node flag: {0}")]
    UnknownFlag(String),

    /// Link state token is neither `connected` nor `disconnected`.
    #[error("Unknown link state: {0}")]
    UnknownLinkState(String),

    #[error("Host must not be empty")]
    EmptyHost,

    #[error("Id must not be empty")]
    EmptyId,

    /// Node has neither an address nor an id.
    #[error("Node has neither address nor id")]
    Unaddressable,
}

pub type TopologyResult<T> = Result<T, TopologyError>;
