//! Dynamic entities positioned on the map.
//!
//! Occupants are everything that is not terrain: the player, monsters,
//! anything movable. The registry is pure membership bookkeeping; movement
//! rules live on the world map.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Handle for a registered occupant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OccupantId(u64);

/// A movable entity with a position and a display appearance.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Occupant {
    pub x: i64,
    pub y: i64,
    /// Display character for the renderer
    pub glyph: char,
    /// Display color (RGB)
    pub color: (u8, u8, u8),
}

impl Occupant {
    pub fn new(x: i64, y: i64, glyph: char, color: (u8, u8, u8)) -> Self {
        Occupant { x, y, glyph, color }
    }
}

/// Set of occupants currently on a map, keyed by id.
///
/// Set semantics: ids are unique, iteration order is unspecified.
#[derive(Clone, Debug, Default)]
pub struct OccupantRegistry {
    members: HashMap<OccupantId, Occupant>,
    next_id: u64,
}

impl OccupantRegistry {
    pub fn new() -> Self {
        OccupantRegistry::default()
    }

    /// Register an occupant, returning its freshly allocated id.
    pub fn add(&mut self, occupant: Occupant) -> OccupantId {
        let id = OccupantId(self.next_id);
        self.next_id += 1;
        self.members.insert(id, occupant);
        id
    }

    /// Remove a member, returning it if it was present.
    pub fn remove(&mut self, id: OccupantId) -> Option<Occupant> {
        self.members.remove(&id)
    }

    pub fn contains(&self, id: OccupantId) -> bool {
        self.members.contains_key(&id)
    }

    pub fn get(&self, id: OccupantId) -> Option<&Occupant> {
        self.members.get(&id)
    }

    pub fn get_mut(&mut self, id: OccupantId) -> Option<&mut Occupant> {
        self.members.get_mut(&id)
    }

    /// Remove and return an arbitrary member (set-style pop).
    pub fn pop(&mut self) -> Option<(OccupantId, Occupant)> {
        let id = *self.members.keys().next()?;
        self.members.remove(&id).map(|occupant| (id, occupant))
    }

    pub fn len(&self) -> usize {
        self.members.len()
    }

    pub fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (OccupantId, &Occupant)> {
        self.members.iter().map(|(id, occupant)| (*id, occupant))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ids_are_unique() {
        let mut registry = OccupantRegistry::new();
        let a = registry.add(Occupant::new(0, 0, '@', (255, 255, 255)));
        let b = registry.add(Occupant::new(0, 0, '@', (255, 255, 255)));
        assert_ne!(a, b);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn test_remove_then_contains() {
        let mut registry = OccupantRegistry::new();
        let id = registry.add(Occupant::new(1, 2, 'm', (200, 60, 60)));
        assert!(registry.contains(id));

        let removed = registry.remove(id).unwrap();
        assert_eq!(removed.x, 1);
        assert!(!registry.contains(id));
        assert!(registry.remove(id).is_none());
    }

    #[test]
    fn test_pop_drains() {
        let mut registry = OccupantRegistry::new();
        for i in 0..5 {
            registry.add(Occupant::new(i, i, 'm', (0, 0, 0)));
        }
        let mut seen = 0;
        while let Some((id, _)) = registry.pop() {
            assert!(!registry.contains(id));
            seen += 1;
        }
        assert_eq!(seen, 5);
        assert!(registry.is_empty());
    }

    #[test]
    fn test_removed_ids_are_not_reused() {
        let mut registry = OccupantRegistry::new();
        let a = registry.add(Occupant::new(0, 0, '@', (0, 0, 0)));
        registry.remove(a);
        let b = registry.add(Occupant::new(0, 0, '@', (0, 0, 0)));
        assert_ne!(a, b);
    }
}
