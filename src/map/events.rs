use super::MarkerId;

/// User interaction delivered to a [`super::ParkMap`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MapEvent {
    /// Pointer entered a marker
    PointerOver(MarkerId),
    /// Pointer left a marker
    PointerOut(MarkerId),
    /// Marker was clicked
    Click(MarkerId),
    /// Pointer moved to a screen position
    PointerMove { x: f64, y: f64 },
}

/// Whether an event was handled by the map
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventPropagation {
    Propagate,
    Consume,
}
