//! Faults the virtual adapters report through the ports.

/// Simulated hardware or network failure.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum VirtualError {
    /// The station driver rejected the association request.
    #[error("station driver rejected the association request")]
    AssociationRejected,

    /// The thermometer did not answer the sample request.
    #[error("thermometer did not answer")]
    ProbeSilent,

    /// The broker could not be reached.
    #[error("broker unreachable")]
    BrokerUnreachable,

    /// The broker connection dropped.
    #[error("connection reset by broker")]
    ConnectionReset,

    /// The broker sent something the session could not make sense of.
    #[error("malformed packet")]
    MalformedPacket,
}
