//! Stepping the camera through residues in index order.

use super::{RenderTarget, ViewportEngine};
use crate::scene::{ObjectId, SceneGraph};

/// Fit margin used when stepping to a residue.
const RESIDUE_FIT_MARGIN: f32 = 2.0;

impl<R: RenderTarget, S: SceneGraph> ViewportEngine<R, S> {
    /// Residue objects ordered by residue index, insertion order breaking
    /// ties.
    fn residue_order(&self) -> Vec<ObjectId> {
        let mut residues: Vec<(u32, ObjectId)> = self
            .scene
            .pickables()
            .filter_map(|(id, pickable)| {
                let idx = pickable.pick_target()?.as_residue()?;
                Some((idx, id))
            })
            .collect();
        residues.sort_by_key(|&(idx, _)| idx);
        residues.into_iter().map(|(_, id)| id).collect()
    }

    /// Focus the residue after the current one, wrapping past the last.
    ///
    /// Returns the residue stepped to, or `None` when the scene holds no
    /// residues.
    pub fn focus_next_residue(&mut self) -> Option<ObjectId> {
        self.step_residue(1)
    }

    /// Focus the residue before the current one, wrapping past the first.
    pub fn focus_previous_residue(&mut self) -> Option<ObjectId> {
        self.step_residue(-1)
    }

    fn step_residue(&mut self, offset: isize) -> Option<ObjectId> {
        let order = self.residue_order();
        if order.is_empty() {
            log::debug!("residue step skipped: no residues in scene");
            return None;
        }
        let n = order.len() as isize;
        let cursor = (self.residue_cursor as isize + offset).rem_euclid(n) as usize;
        self.residue_cursor = cursor;
        let id = order.get(cursor).copied()?;
        if !self.fit_to_object(id, RESIDUE_FIT_MARGIN) {
            log::debug!("residue {id:?} has no extent; camera unchanged");
        }
        Some(id)
    }

    /// Move the residue cursor onto `id`, so stepping continues from a
    /// clicked residue. Unknown ids leave the cursor where it is.
    pub(super) fn sync_residue_cursor(&mut self, id: ObjectId) {
        if let Some(pos) = self.residue_order().iter().position(|&r| r == id) {
            self.residue_cursor = pos;
        }
    }
}
