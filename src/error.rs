//! Error type shared by the geometry core.
//!
//! Only conditions that make an operation meaningless are surfaced here.
//! Undefined angles, gimbal lock and dangling topology edges are resolved
//! where they occur and never reach the caller.

use crate::shape::ObjectType;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum GeometryError {
    /// Normalizing a vector whose magnitude is zero.
    #[error("cannot normalize a zero-length vector")]
    DegenerateVector,

    /// A shape was built from an empty coordinate list, so it has no centroid
    /// to anchor its transform on.
    #[error("shape has no coordinates to compute a centroid from")]
    EmptyShape,

    /// A curve or surface received a control point set it cannot tessellate.
    #[error("{kind} cannot be built from {count} control points: {reason}")]
    InvalidControlPoints {
        kind: ObjectType,
        count: usize,
        reason: &'static str,
    },

    /// The center of projection sits on the window plane.
    #[error("center of projection is {distance} units from the window, cannot project")]
    DegenerateCamera { distance: f64 },
}
