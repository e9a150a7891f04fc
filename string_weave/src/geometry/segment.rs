use bresenham::Bresenham;

use super::Point;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Segment<T> {
    pub start: Point<T>,
    pub end: Point<T>,
}

impl<T> Segment<T> {
    pub fn new(start: Point<T>, end: Point<T>) -> Self {
        Self { start, end }
    }
}

impl Segment<isize> {
    /// Every pixel on the segment, both endpoints included.
    pub fn points_between(&self) -> impl Iterator<Item = Point<isize>> {
        Bresenham::new((self.start.x, self.start.y), (self.end.x, self.end.y))
            .map(|(x, y)| Point { x, y })
            .chain(std::iter::once(self.end))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizontal_segment_covers_every_pixel() {
        let seg = Segment::new(Point::new(0isize, 3), Point::new(4, 3));
        let points: Vec<_> = seg.points_between().collect();
        assert_eq!(points.len(), 5);
        assert!(points.iter().all(|p| p.y == 3));
        assert_eq!(points.first(), Some(&Point::new(0, 3)));
        assert_eq!(points.last(), Some(&Point::new(4, 3)));
    }

    #[test]
    fn degenerate_segment_is_a_single_pixel() {
        let seg = Segment::new(Point::new(2isize, 2), Point::new(2, 2));
        assert_eq!(seg.points_between().collect::<Vec<_>>(), vec![Point::new(2, 2)]);
    }
}
