//! Square spiral coordinate generation.
//!
//! This file places nodes on a 2-D canvas by walking an infinite square
//! spiral around the origin, so that sequentially created nodes end up
//! visually apart from each other.

/// A point in a cartesian coordinate system
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub fn new(x: i32, y: i32) -> Self {
        Point { x, y }
    }
}

/// Walk direction of the spiral, rotating up, right, down, left
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    fn rotated(self) -> Self {
        match self {
            Direction::Up => Direction::Right,
            Direction::Right => Direction::Down,
            Direction::Down => Direction::Left,
            Direction::Left => Direction::Up,
        }
    }
}

/// An infinite generator of square spiral coordinates.
///
/// Starting at the origin, the generator emits the current point and then
/// moves `distance` units in the current direction. Two legs are walked
/// per leg length before the length grows by one, producing the classic
/// square spiral (0,0), (0,d), (d,d), (d,0), (d,-d), (0,-d), (-d,-d), ...
///
/// The sequence is not restartable. A new instance starts over from the
/// origin.
#[derive(Debug, Clone)]
pub struct SpiralLayout {
    distance: i32,
    point: Point,
    dir: Direction,
    /// emissions per leg, grows after every second leg
    leg: u32,
    /// emissions already made in the current leg
    walked: u32,
    /// whether the current leg is the second one at this length
    second_leg: bool,
}

impl SpiralLayout {
    pub fn new(distance: i32) -> Self {
        SpiralLayout {
            distance,
            point: Point::new(0, 0),
            dir: Direction::Up,
            leg: 1,
            walked: 0,
            second_leg: false,
        }
    }
}

impl Iterator for SpiralLayout {
    type Item = Point;

    fn next(&mut self) -> Option<Point> {
        let emitted = self.point;

        match self.dir {
            Direction::Up => self.point.y += self.distance,
            Direction::Right => self.point.x += self.distance,
            Direction::Down => self.point.y -= self.distance,
            Direction::Left => self.point.x -= self.distance,
        }

        self.walked += 1;
        if self.walked == self.leg {
            self.walked = 0;
            self.dir = self.dir.rotated();
            if self.second_leg {
                self.leg += 1;
            }
            self.second_leg = !self.second_leg;
        }

        Some(emitted)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_starts_at_origin() {
        let mut spiral = SpiralLayout::new(200);
        assert_eq!(spiral.next(), Some(Point::new(0, 0)));
    }

    #[test]
    fn test_classic_spiral_sequence() {
        let spiral = SpiralLayout::new(100);
        let points: Vec<Point> = spiral.take(9).collect();
        assert_eq!(
            points,
            vec![
                Point::new(0, 0),
                Point::new(0, 100),
                Point::new(100, 100),
                Point::new(100, 0),
                Point::new(100, -100),
                Point::new(0, -100),
                Point::new(-100, -100),
                Point::new(-100, 0),
                Point::new(-100, 100),
            ]
        );
    }

    #[test]
    fn test_consecutive_points_differ_on_one_axis() {
        let distance = 37;
        let points: Vec<Point> = SpiralLayout::new(distance).take(200).collect();
        for pair in points.windows(2) {
            let dx = (pair[1].x - pair[0].x).abs();
            let dy = (pair[1].y - pair[0].y).abs();
            // exactly one axis moves, by exactly the configured distance
            assert_eq!(dx + dy, distance);
            assert!(dx == 0 || dy == 0);
        }
    }

    #[test]
    fn test_leg_lengths_grow_in_pairs() {
        // Leg lengths follow 1,1,2,2,3,3,... which can be observed through
        // the number of emissions between direction changes.
        let points: Vec<Point> = SpiralLayout::new(10).take(50).collect();
        let mut leg_lengths = Vec::new();
        let mut current = 1;
        for w in points.windows(3) {
            let (a, b, c) = (w[0], w[1], w[2]);
            let same_dir = (b.x - a.x, b.y - a.y) == (c.x - b.x, c.y - b.y);
            if same_dir {
                current += 1;
            } else {
                leg_lengths.push(current);
                current = 1;
            }
        }
        assert!(leg_lengths.starts_with(&[1, 1, 2, 2, 3, 3, 4, 4]));
    }

    #[test]
    fn test_fresh_instance_restarts() {
        let first: Vec<Point> = SpiralLayout::new(50).take(10).collect();
        let second: Vec<Point> = SpiralLayout::new(50).take(10).collect();
        assert_eq!(first, second);
    }
}
