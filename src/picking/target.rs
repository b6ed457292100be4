//! What a pick hit selects.

/// Selection carried by a pickable object.
///
/// Helpers (grids, axes, labels) carry no target and are never returned by
/// the picker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PickTarget {
    /// A single atom, identified by entity ID and atom index.
    Atom {
        /// Owning entity.
        entity: u32,
        /// Atom index within the entity.
        atom: u32,
    },
    /// A residue, identified by its flat index.
    Residue(u32),
    /// A molecular surface belonging to an entity.
    Surface {
        /// Owning entity.
        entity: u32,
    },
}

impl PickTarget {
    /// Which selectable category this target belongs to.
    pub fn kind(&self) -> SelectableKind {
        match self {
            Self::Atom { .. } => SelectableKind::Atom,
            Self::Residue(_) => SelectableKind::Residue,
            Self::Surface { .. } => SelectableKind::Surface,
        }
    }

    /// Residue index for `Residue`, `None` otherwise.
    pub fn as_residue(&self) -> Option<u32> {
        match *self {
            Self::Residue(idx) => Some(idx),
            _ => None,
        }
    }
}

/// Category of selectable objects, used to clear one kind at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SelectableKind {
    /// Atom spheres.
    Atom,
    /// Residue ribbons and tubes.
    Residue,
    /// Molecular surfaces.
    Surface,
}
