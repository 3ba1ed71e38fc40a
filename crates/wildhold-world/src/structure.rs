//! Structure cost table.
//!
//! Costs are fixed per [`StructureKind`]:
//!
//! - Wall: 5 wood
//! - Camp: 10 wood + 5 stone

use wildhold_types::{Resource, StructureKind};

/// Material cost for building a structure of the given kind.
pub const fn cost(kind: StructureKind) -> &'static [(Resource, u32)] {
    match kind {
        StructureKind::Wall => &[(Resource::Wood, 5)],
        StructureKind::Camp => &[(Resource::Wood, 10), (Resource::Stone, 5)],
    }
}
