#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Rect { x, y, width, height }
    }

    pub fn right(&self) -> i32 {
        self.x + self.width
    }

    pub fn bottom(&self) -> i32 {
        self.y + self.height
    }

    // Strict overlap: rectangles that only share an edge do not collide.
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.x < other.right()
            && other.x < self.right()
            && self.y < other.bottom()
            && other.y < self.bottom()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overlapping_player_and_asteroid() {
        let player = Rect::new(100, 100, 50, 50);
        assert!(player.overlaps(&Rect::new(110, 120, 50, 50)));
        assert!(!player.overlaps(&Rect::new(200, 100, 50, 50)));
    }

    #[test]
    fn touching_edges_do_not_overlap() {
        let a = Rect::new(0, 0, 50, 50);
        assert!(!a.overlaps(&Rect::new(50, 0, 50, 50)));
        assert!(!a.overlaps(&Rect::new(0, 50, 50, 50)));
        assert!(a.overlaps(&Rect::new(49, 49, 50, 50)));
    }

    #[test]
    fn overlap_is_symmetric_and_covers_containment() {
        let outer = Rect::new(0, 0, 100, 100);
        let inner = Rect::new(40, 40, 10, 10);
        assert!(outer.overlaps(&inner));
        assert!(inner.overlaps(&outer));
    }
}
