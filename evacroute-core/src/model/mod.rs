//! Data model for evacuation routing
//!
//! Contains the floor graph (rooms, junctions, exits and the passages between
//! them) and the hazard zones evaluated against it at query time.

pub mod floor;
pub mod hazard;

pub use floor::{FloorGraph, FloorNode, GraphDiagnostics, IndexedPoint, Neighbor, NodeRole, Passage};
pub use hazard::HazardZone;
