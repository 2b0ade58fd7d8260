//! Mouse hit regions.

use ratatui::layout::{Position, Rect};

/// Screen regions registered during drawing, each mapped to a target.
///
/// Regions are cleared at the start of every frame and re-registered by the
/// draw code, so hit-testing always matches what is on screen. When regions
/// overlap, the one registered last wins (it was drawn on top).
#[derive(Debug, Clone)]
pub struct ClickMap<T> {
    regions: Vec<(Rect, T)>,
}

impl<T> Default for ClickMap<T> {
    fn default() -> Self {
        Self {
            regions: Vec::new(),
        }
    }
}

impl<T: Copy> ClickMap<T> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.regions.clear();
    }

    pub fn register(&mut self, area: Rect, target: T) {
        if area.width > 0 && area.height > 0 {
            self.regions.push((area, target));
        }
    }

    /// Target under the given cell.
    pub fn hit(&self, column: u16, row: u16) -> Option<T> {
        let position = Position::new(column, row);
        self.regions
            .iter()
            .rev()
            .find(|(area, _)| area.contains(position))
            .map(|(_, target)| *target)
    }

    /// Area registered for a target.
    pub fn area_of(&self, target: T) -> Option<Rect>
    where
        T: PartialEq,
    {
        self.regions
            .iter()
            .find(|(_, t)| *t == target)
            .map(|(area, _)| *area)
    }

    pub fn len(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    enum Button {
        Start,
        Reset,
    }

    #[test]
    fn test_hit() {
        let mut map = ClickMap::new();
        map.register(Rect::new(0, 0, 10, 3), Button::Start);
        map.register(Rect::new(12, 0, 10, 3), Button::Reset);

        assert_eq!(map.hit(0, 0), Some(Button::Start));
        assert_eq!(map.hit(9, 2), Some(Button::Start));
        assert_eq!(map.hit(10, 1), None);
        assert_eq!(map.hit(15, 1), Some(Button::Reset));
        assert_eq!(map.hit(15, 3), None);
    }

    #[test]
    fn test_last_registered_wins() {
        let mut map = ClickMap::new();
        map.register(Rect::new(0, 0, 20, 20), Button::Start);
        map.register(Rect::new(5, 5, 2, 2), Button::Reset);
        assert_eq!(map.hit(5, 5), Some(Button::Reset));
        assert_eq!(map.hit(1, 1), Some(Button::Start));
    }

    #[test]
    fn test_empty_areas_ignored() {
        let mut map = ClickMap::new();
        map.register(Rect::new(0, 0, 0, 3), Button::Start);
        assert!(map.is_empty());
    }

    #[test]
    fn test_clear_and_area_of() {
        let mut map = ClickMap::new();
        map.register(Rect::new(2, 2, 4, 1), Button::Reset);
        assert_eq!(map.area_of(Button::Reset), Some(Rect::new(2, 2, 4, 1)));
        map.clear();
        assert_eq!(map.len(), 0);
        assert_eq!(map.area_of(Button::Reset), None);
    }
}
