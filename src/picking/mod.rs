//! Ray picking: screen point to world ray, then ordered hits against the
//! scene's pickable objects.

mod picker;
mod target;

pub use picker::{Intersection, Picker};
pub use target::{PickTarget, SelectableKind};
