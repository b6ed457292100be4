//! Scene collaborator contract and an in-memory scene.
//!
//! The camera layer only needs three things from a scene: enumerate
//! pickable objects in insertion order, add/remove top-level objects, and
//! query an object's bounding volume. [`SceneGraph`] captures that; hosts
//! with their own scene graph implement it directly. [`Scene`] is a flat
//! implementation over [`SceneObject`]s.

mod object;

pub use object::{ObjectId, Pickable, Primitive, SceneObject, TriangleMesh};
use rustc_hash::FxHashMap;

use crate::geometry::BoundingVolume;
use crate::picking::SelectableKind;

/// What the camera layer requires of a scene.
pub trait SceneGraph {
    /// Add a top-level object; returns its handle.
    fn add_object(&mut self, object: SceneObject) -> ObjectId;

    /// Remove a top-level object.
    fn remove_object(&mut self, id: ObjectId) -> Option<SceneObject>;

    /// All objects in insertion order, with their pick capability.
    fn pickables(&self) -> Box<dyn Iterator<Item = (ObjectId, &dyn Pickable)> + '_>;

    /// Bounding volume of one object, computed on demand.
    fn bounding_volume(&self, id: ObjectId) -> Option<BoundingVolume>;
}

/// Flat, insertion-ordered object store.
#[derive(Debug, Default)]
pub struct Scene {
    /// Objects in insertion order.
    objects: Vec<(ObjectId, SceneObject)>,
    /// Object id -> position in `objects`.
    index: FxHashMap<ObjectId, usize>,
    next_id: u64,
    /// Monotonically increasing generation; bumped on any mutation.
    generation: u64,
    /// Generation that was last consumed by the renderer.
    rendered_generation: u64,
}

impl Scene {
    /// Create an empty scene.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn invalidate(&mut self) {
        self.generation += 1;
    }

    fn reindex(&mut self) {
        self.index = self
            .objects
            .iter()
            .enumerate()
            .map(|(i, (id, _))| (*id, i))
            .collect();
    }

    /// Whether scene contents changed since last `mark_rendered()`.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.generation != self.rendered_generation
    }

    /// Mark current generation as rendered.
    pub fn mark_rendered(&mut self) {
        self.rendered_generation = self.generation;
    }

    /// Read access to an object.
    #[must_use]
    pub fn object(&self, id: ObjectId) -> Option<&SceneObject> {
        let &i = self.index.get(&id)?;
        self.objects.get(i).map(|(_, object)| object)
    }

    /// Write access (invalidates).
    pub fn object_mut(&mut self, id: ObjectId) -> Option<&mut SceneObject> {
        let &i = self.index.get(&id)?;
        self.invalidate();
        self.objects.get_mut(i).map(|(_, object)| object)
    }

    /// Number of objects.
    #[must_use]
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// Whether the scene holds no objects.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Remove every object (`None`) or only those selecting a given kind.
    /// Returns how many objects were removed.
    pub fn clear(&mut self, kind: Option<SelectableKind>) -> usize {
        let before = self.objects.len();
        match kind {
            None => self.objects.clear(),
            Some(kind) => self.objects.retain(|(_, object)| {
                object.target.map(|t| t.kind()) != Some(kind)
            }),
        }
        let removed = before - self.objects.len();
        if removed > 0 {
            self.reindex();
            self.invalidate();
        }
        removed
    }

    /// Union of every object's bounds.
    #[must_use]
    pub fn total_bounds(&self) -> Option<BoundingVolume> {
        self.objects
            .iter()
            .filter_map(|(_, object)| object.bounding_volume())
            .reduce(|a, b| a.union(&b))
    }
}

impl SceneGraph for Scene {
    fn add_object(&mut self, object: SceneObject) -> ObjectId {
        let id = ObjectId(self.next_id);
        self.next_id += 1;
        let _ = self.index.insert(id, self.objects.len());
        self.objects.push((id, object));
        self.invalidate();
        id
    }

    fn remove_object(&mut self, id: ObjectId) -> Option<SceneObject> {
        let i = self.index.remove(&id)?;
        let (_, object) = self.objects.remove(i);
        self.reindex();
        self.invalidate();
        Some(object)
    }

    fn pickables(&self) -> Box<dyn Iterator<Item = (ObjectId, &dyn Pickable)> + '_> {
        Box::new(self.objects.iter().map(
            |(id, object)| -> (ObjectId, &dyn Pickable) { (*id, object) },
        ))
    }

    fn bounding_volume(&self, id: ObjectId) -> Option<BoundingVolume> {
        self.object(id)?.bounding_volume()
    }
}
