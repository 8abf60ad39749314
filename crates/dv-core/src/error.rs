//! Framework error type.
//!
//! Agent-level errors are all precondition violations: a well-behaved
//! transport never produces them.  The simulator treats every one as fatal.

use thiserror::Error;

use crate::NodeId;

/// The top-level error type for `dv-core` and the agent crate.
#[derive(Debug, Error)]
pub enum DvError {
    #[error("node {node} out of range for a {node_count}-node network")]
    NodeOutOfRange { node: NodeId, node_count: usize },

    #[error("packet from {sender} addressed to {destination} delivered to {receiver}")]
    MisaddressedPacket {
        sender:      NodeId,
        destination: NodeId,
        receiver:    NodeId,
    },

    #[error("vector from {sender} has {got} entries, expected {expected}")]
    VectorLength {
        sender:   NodeId,
        expected: usize,
        got:      usize,
    },

    #[error("node {0} cannot link to itself")]
    SelfLink(NodeId),

    #[error("{node_count} nodes exceeds the supported maximum of {max}")]
    TooManyNodes { node_count: usize, max: usize },

    #[error("link {a} <-> {b} declared more than once")]
    DuplicateLink { a: NodeId, b: NodeId },
}

/// Shorthand result type for all `dv-*` crates.
pub type DvResult<T> = Result<T, DvError>;
