//! Physics error types

/// Errors raised by collider construction and pairwise operations
///
/// Construction errors are precondition violations in the caller.
/// `UnsupportedPair` surfaces a collider pairing that has no defined
/// behaviour for an operation rather than silently doing nothing.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum PhysicsError {
    /// Circle radius must be finite and strictly positive
    #[error("invalid circle radius {0}: must be finite and > 0")]
    InvalidRadius(f64),

    /// A position or direction contained NaN or infinity
    #[error("non-finite position")]
    NonFinitePosition,

    /// Line collider endpoints coincide
    #[error("line segment endpoints coincide")]
    DegenerateSegment,

    /// Compound collider created without children
    #[error("compound collider needs at least one child")]
    EmptyCompound,

    /// Ray direction is zero or its distance is not a positive finite number
    #[error("ray needs a non-zero direction and a positive finite distance")]
    DegenerateRay,

    /// The operation is not defined for this pair of collider kinds
    #[error("{operation} is not supported between {this} and {other}")]
    UnsupportedPair {
        /// Operation name
        operation: &'static str,
        /// Receiver collider kind
        this: &'static str,
        /// Argument collider kind
        other: &'static str,
    },

    /// Handle does not refer to a registered collider
    #[error("collider handle is not registered")]
    UnknownCollider,
}

/// Result alias for physics operations
pub type PhysicsResult<T> = Result<T, PhysicsError>;
