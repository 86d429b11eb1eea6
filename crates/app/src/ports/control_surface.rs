//! Control surface port: the rendered controls the reconciler paints.

use homehub_domain::control::{ControlButton, ControlPaint};

/// Read access to the rendered controls plus a way to paint them.
///
/// Positions are indexes into the list returned by the latest
/// [`controls`](Self::controls) call.
pub trait ControlSurface {
    /// Describe every control currently rendered, in document order.
    fn controls(&self) -> Vec<ControlButton>;

    /// Apply a visual state to the control at `position`.
    fn paint(&self, position: usize, paint: ControlPaint);
}
