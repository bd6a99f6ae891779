use std::{fmt, iter};

use anyhow::Result;
use nom::{
    bytes::complete::tag,
    character::complete::{char, space0},
    combinator::map,
    error::{FromExternalError, ParseError},
    sequence::{delimited, separated_pair},
    IResult,
};
use thiserror::Error;
use util::{parse_nice, parse_number, Span};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Point {
    pub x: i64,
    pub y: i64,
}

impl Point {
    pub fn new(x: i64, y: i64) -> Self {
        Self { x, y }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    Horizontal,
    Vertical,
    Diagonal,
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Segment {
    pub start: Point,
    pub end: Point,
}

impl Segment {
    pub fn new(start: Point, end: Point) -> Self {
        Self { start, end }
    }

    pub fn kind(&self) -> SegmentKind {
        let dx = self.start.x.abs_diff(self.end.x);
        let dy = self.start.y.abs_diff(self.end.y);

        if dy == 0 {
            SegmentKind::Horizontal
        } else if dx == 0 {
            SegmentKind::Vertical
        } else if dx == dy {
            SegmentKind::Diagonal
        } else {
            SegmentKind::Other
        }
    }

    pub fn is_drawn(&self, include_diagonals: bool) -> bool {
        match self.kind() {
            SegmentKind::Horizontal | SegmentKind::Vertical => true,
            SegmentKind::Diagonal => include_diagonals,
            SegmentKind::Other => false,
        }
    }

    /// Lattice points from start to end, both included. Unsupported slopes,
    /// and diagonals unless `include_diagonals`, give no points.
    pub fn points(&self, include_diagonals: bool) -> Vec<Point> {
        if !self.is_drawn(include_diagonals) {
            return Vec::new();
        }

        let end = self.end;
        let step_x = end.x.cmp(&self.start.x) as i64;
        let step_y = end.y.cmp(&self.start.y) as i64;

        // every step stays between the endpoints
        iter::successors(Some(self.start), |p| {
            (*p != end).then(|| Point::new(p.x + step_x, p.y + step_y))
        })
        .collect()
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum GridError {
    #[error("Point ({}, {}) is outside the {size}x{size} grid", .point.x, .point.y)]
    OutOfBounds { point: Point, size: usize },
}

/// Square counting surface, one counter per lattice point.
#[derive(Debug, Clone)]
pub struct Grid {
    size: usize,
    cells: Vec<u32>,
    include_diagonals: bool,
}

impl Grid {
    pub fn new(size: usize) -> Self {
        Self {
            size,
            cells: vec![0; size * size],
            include_diagonals: false,
        }
    }

    pub fn with_diagonals(mut self, include_diagonals: bool) -> Self {
        self.include_diagonals = include_diagonals;
        self
    }

    pub fn size(&self) -> usize {
        self.size
    }

    fn index(&self, point: &Point) -> Result<usize, GridError> {
        let coord = |c: i64| usize::try_from(c).ok().filter(|&c| c < self.size);

        match (coord(point.x), coord(point.y)) {
            (Some(x), Some(y)) => Ok(y * self.size + x),
            _ => Err(GridError::OutOfBounds {
                point: *point,
                size: self.size,
            }),
        }
    }

    pub fn get(&self, point: &Point) -> Result<u32, GridError> {
        Ok(self.cells[self.index(point)?])
    }

    pub fn mark_point(&mut self, point: &Point) -> Result<(), GridError> {
        let i = self.index(point)?;
        self.cells[i] += 1;
        Ok(())
    }

    /// Returns how many points the segment covered. A segment leaving the grid
    /// is rejected before any point is marked.
    pub fn mark_line(&mut self, segment: &Segment) -> Result<usize, GridError> {
        if !segment.is_drawn(self.include_diagonals) {
            return Ok(0);
        }

        // points lie between the endpoints, so these bound the whole segment
        self.index(&segment.start)?;
        self.index(&segment.end)?;

        let points = segment.points(self.include_diagonals);

        for point in points.iter() {
            self.mark_point(point)?;
        }
        log::trace!("{segment:?} covers {} points", points.len());

        Ok(points.len())
    }

    pub fn count_at_least(&self, threshold: u32) -> usize {
        self.cells.iter().filter(|&&c| c >= threshold).count()
    }

    // Bottom-right corner of the marked area
    fn extent(&self) -> Option<(usize, usize)> {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, &c)| c > 0)
            .map(|(i, _)| (i % self.size, i / self.size))
            .reduce(|(x_max, y_max), (x, y)| (x_max.max(x), y_max.max(y)))
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let Some((x_end, y_end)) = self.extent() else {
            return Ok(());
        };

        for y in 0..=y_end {
            for x in 0..=x_end {
                match self.cells[y * self.size + x] {
                    0 => write!(f, ".")?,
                    c => write!(f, "{c}")?,
                }
            }
            if y != y_end {
                writeln!(f)?
            }
        }

        Ok(())
    }
}

fn parse_point<'a, E>(i: Span<'a>) -> IResult<Span<'a>, Point, E>
where
    E: ParseError<Span<'a>> + FromExternalError<Span<'a>, std::num::ParseIntError>,
{
    map(
        separated_pair(parse_number, char(','), parse_number),
        |(x, y)| Point::new(x, y),
    )(i)
}

fn parse_segment<'a, E>(i: Span<'a>) -> IResult<Span<'a>, Segment, E>
where
    E: ParseError<Span<'a>> + FromExternalError<Span<'a>, std::num::ParseIntError>,
{
    map(
        delimited(
            space0,
            separated_pair(parse_point, tag(" -> "), parse_point),
            space0,
        ),
        |(start, end)| Segment::new(start, end),
    )(i)
}

pub fn get_segments(input: impl Iterator<Item = impl Into<String>>) -> Result<Vec<Segment>> {
    input
        .map(Into::<String>::into)
        .filter(|line| !line.trim().is_empty())
        .map(|line| parse_nice(line.as_str(), parse_segment))
        .collect()
}

/// Number of points covered by at least two segments.
pub fn count_overlaps(
    input: impl Iterator<Item = impl Into<String>>,
    size: usize,
    include_diagonals: bool,
) -> Result<usize> {
    let mut grid = Grid::new(size).with_diagonals(include_diagonals);

    for segment in get_segments(input)? {
        grid.mark_line(&segment)?;
    }

    Ok(grid.count_at_least(2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    const TEST_INPUT: &str = include_str!("../data/test_input");
    const TEST_DIAGRAM: &str = include_str!("../data/test_diagram");

    fn segment(x1: i64, y1: i64, x2: i64, y2: i64) -> Segment {
        Segment::new(Point::new(x1, y1), Point::new(x2, y2))
    }

    #[test]
    fn horizontal_points() {
        let points = segment(0, 9, 5, 9).points(false);
        assert_eq!(points, (0..=5).map(|x| Point::new(x, 9)).collect::<Vec<_>>());
    }

    #[test]
    fn reversed_vertical_points() {
        let points = segment(7, 4, 7, 0).points(false);
        assert_eq!(points.len(), 5);
        assert_eq!(points.first(), Some(&Point::new(7, 4)));
        assert_eq!(points.last(), Some(&Point::new(7, 0)));
    }

    #[test]
    fn diagonal_points() {
        let points = segment(8, 0, 0, 8).points(true);
        assert_eq!(points.len(), 9);
        assert!(points
            .iter()
            .enumerate()
            .all(|(i, p)| *p == Point::new(8 - i as i64, i as i64)));
    }

    #[test]
    fn single_point_segment() {
        assert_eq!(segment(3, 3, 3, 3).points(false), vec![Point::new(3, 3)]);
    }

    #[rstest]
    #[case(segment(0, 0, 8, 8), false)]
    #[case(segment(0, 0, 2, 1), false)]
    #[case(segment(0, 0, 2, 1), true)]
    #[case(segment(5, 5, 1, 2), true)]
    fn unsupported_segments_are_empty(#[case] segment: Segment, #[case] diagonals: bool) {
        let mut grid = Grid::new(10).with_diagonals(diagonals);
        assert!(segment.points(diagonals).is_empty());
        assert_eq!(grid.mark_line(&segment), Ok(0));
        assert_eq!(grid.count_at_least(1), 0);
    }

    #[rstest]
    #[case(Point::new(10, 0))]
    #[case(Point::new(0, 10))]
    #[case(Point::new(-1, 3))]
    fn out_of_bounds(#[case] point: Point) {
        let mut grid = Grid::new(10);
        assert_eq!(
            grid.mark_point(&point),
            Err(GridError::OutOfBounds { point, size: 10 })
        );
    }

    #[test]
    fn overlapping_segments_count_twice() {
        let mut grid = Grid::new(10);
        grid.mark_line(&segment(0, 0, 3, 0)).unwrap();
        grid.mark_line(&segment(3, 0, 3, 3)).unwrap();

        assert_eq!(grid.get(&Point::new(3, 0)), Ok(2));
        assert_eq!(grid.count_at_least(2), 1);
        assert_eq!(grid.count_at_least(1), 7);
    }

    #[rstest]
    #[case(false, 5)]
    #[case(true, 12)]
    fn example(#[case] include_diagonals: bool, #[case] expected: usize) {
        let res = count_overlaps(TEST_INPUT.lines(), 10, include_diagonals);
        assert!(res.is_ok());
        assert_eq!(res.unwrap(), expected);
    }

    #[test]
    fn example_diagram() {
        let mut grid = Grid::new(1000).with_diagonals(true);
        for segment in get_segments(TEST_INPUT.lines()).unwrap() {
            grid.mark_line(&segment).unwrap();
        }
        assert_eq!(format!("{grid}"), TEST_DIAGRAM.trim_end());
    }

    #[rstest]
    #[case("0,0 -> -9223372036854775808,0")]
    #[case("0,0 -> 0,3000000000")]
    #[case("9223372036854775807,5 -> -9223372036854775808,5")]
    fn far_out_segment_is_out_of_bounds(#[case] line: &str) {
        let res = count_overlaps([line].into_iter(), 1000, true);
        assert!(res.is_err());
    }

    #[test]
    fn far_out_unsupported_segment_is_ignored() {
        let res = count_overlaps(
            ["9223372036854775807,0 -> -9223372036854775808,5"].into_iter(),
            1000,
            true,
        );
        assert_eq!(res.unwrap(), 0);
    }

    #[test]
    fn rejected_segment_leaves_grid_untouched() {
        let mut grid = Grid::new(10);
        assert_eq!(
            grid.mark_line(&segment(5, 0, 12, 0)),
            Err(GridError::OutOfBounds {
                point: Point::new(12, 0),
                size: 10
            })
        );
        assert_eq!(grid.count_at_least(1), 0);
    }

    #[test]
    fn bad_segment_line() {
        assert!(get_segments(["0,9 -> 5"].into_iter()).is_err());
        assert!(get_segments(["0,9 => 5,9"].into_iter()).is_err());
    }
}
