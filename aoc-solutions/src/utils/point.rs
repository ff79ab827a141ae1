//! 2D/3D integer points and compass directions
//!
//! Coordinates use screen orientation: `x` grows to the right and `y` grows
//! downwards, so `Direction::Up` is `(0, -1)`.

use num::{NumCast, PrimInt, Signed, ToPrimitive};
use std::cmp::Ordering;
use std::fmt;
use std::hash::Hash;
use std::ops::{Add, AddAssign, Mul, Neg, Sub, SubAssign};
use std::str::FromStr;
use thiserror::Error;

/// Integer types usable as point coordinates (`i32`, `i64`, `i128`, ...)
pub trait Coordinate:
    PrimInt + Signed + Hash + Default + fmt::Debug + fmt::Display + FromStr
{
}

impl<T> Coordinate for T where
    T: PrimInt + Signed + Hash + Default + fmt::Debug + fmt::Display + FromStr
{
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PointParseError {
    #[error("expected {expected} comma separated coordinates, got {input:?}")]
    Shape { expected: usize, input: String },
    #[error("invalid coordinate {0:?}")]
    Coordinate(String),
    #[error("invalid direction {0:?}")]
    Direction(char),
}

/// A 2D point or vector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point2D<T = i32> {
    pub x: T,
    pub y: T,
}

/// The point type grids are addressed with
pub type Point = Point2D<i32>;

impl<T: Coordinate> Point2D<T> {
    pub const fn new(x: T, y: T) -> Self {
        Self { x, y }
    }

    pub fn origin() -> Self {
        Self::new(T::zero(), T::zero())
    }

    /// The adjacent point one step in `direction`
    pub fn neighbor(self, direction: Direction) -> Self {
        self + direction.vector()
    }

    pub fn diagonal_neighbor(self, direction: DiagonalDirection) -> Self {
        self + direction.vector()
    }

    /// Up, right, down, left
    pub fn orthogonal_neighbors(self) -> [Self; 4] {
        Direction::ALL.map(|d| self.neighbor(d))
    }

    pub fn diagonal_neighbors(self) -> [Self; 4] {
        DiagonalDirection::ALL.map(|d| self.diagonal_neighbor(d))
    }

    /// All eight surrounding points, clockwise starting from up
    pub fn all_neighbors(self) -> [Self; 8] {
        let [up, right, down, left] = self.orthogonal_neighbors();
        let [up_right, down_right, down_left, up_left] = self.diagonal_neighbors();
        [
            up, up_right, right, down_right, down, down_left, left, up_left,
        ]
    }

    /// True when `other` is one of the eight surrounding points
    pub fn is_adjacent_to(self, other: Self) -> bool {
        let delta = other - self;
        self != other && delta.x.abs() <= T::one() && delta.y.abs() <= T::one()
    }

    pub fn manhattan_distance(self, other: Self) -> T {
        let delta = other - self;
        delta.x.abs() + delta.y.abs()
    }

    /// Euclidean distance
    pub fn distance(self, other: Self) -> f64 {
        let delta = other - self;
        let dx = delta.x.to_f64().unwrap_or(f64::NAN);
        let dy = delta.y.to_f64().unwrap_or(f64::NAN);
        dx.hypot(dy)
    }

    /// Unit step (per-axis signum) that moves this point towards `other`
    pub fn vector_towards(self, other: Self) -> Self {
        let delta = other - self;
        Self::new(delta.x.signum(), delta.y.signum())
    }

    /// `dy / dx`, or `None` for a vertical line
    pub fn slope_to(self, other: Self) -> Option<f64> {
        let delta = other - self;
        if delta.x.is_zero() {
            return None;
        }
        Some(delta.y.to_f64()? / delta.x.to_f64()?)
    }

    /// Inside the axis-aligned box spanned by `a` and `b`, borders included
    pub fn is_between(self, a: Self, b: Self) -> bool {
        let (min_x, max_x) = (a.x.min(b.x), a.x.max(b.x));
        let (min_y, max_y) = (a.y.min(b.y), a.y.max(b.y));
        (min_x..=max_x).contains(&self.x) && (min_y..=max_y).contains(&self.y)
    }

    /// Rotates this vector a quarter turn clockwise (right becomes down)
    pub fn rotate_clockwise(self) -> Self {
        Self::new(-self.y, self.x)
    }

    pub fn rotate_counter_clockwise(self) -> Self {
        Self::new(self.y, -self.x)
    }

    /// Converts coordinates, `None` if either does not fit
    pub fn cast<U: Coordinate>(self) -> Option<Point2D<U>> {
        Some(Point2D::new(
            <U as NumCast>::from(self.x)?,
            <U as NumCast>::from(self.y)?,
        ))
    }
}

impl<T: Coordinate> Add for Point2D<T> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl<T: Coordinate> AddAssign for Point2D<T> {
    fn add_assign(&mut self, rhs: Self) {
        *self = *self + rhs;
    }
}

impl<T: Coordinate> Sub for Point2D<T> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl<T: Coordinate> SubAssign for Point2D<T> {
    fn sub_assign(&mut self, rhs: Self) {
        *self = *self - rhs;
    }
}

impl<T: Coordinate> Mul<T> for Point2D<T> {
    type Output = Self;

    fn mul(self, factor: T) -> Self {
        Self::new(self.x * factor, self.y * factor)
    }
}

impl<T: Coordinate> Neg for Point2D<T> {
    type Output = Self;

    fn neg(self) -> Self {
        Self::new(-self.x, -self.y)
    }
}

/// Reading order: top to bottom, then left to right
impl<T: Coordinate> Ord for Point2D<T> {
    fn cmp(&self, other: &Self) -> Ordering {
        self.y.cmp(&other.y).then(self.x.cmp(&other.x))
    }
}

impl<T: Coordinate> PartialOrd for Point2D<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T: Coordinate> fmt::Display for Point2D<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}

impl<T: Coordinate> FromStr for Point2D<T> {
    type Err = PointParseError;

    /// Parses `"x,y"`, ignoring whitespace around each coordinate
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match parse_coordinates::<T, 2>(s)? {
            [x, y] => Ok(Self::new(x, y)),
        }
    }
}

impl<T: Coordinate> From<(T, T)> for Point2D<T> {
    fn from((x, y): (T, T)) -> Self {
        Self::new(x, y)
    }
}

fn parse_coordinates<T: Coordinate, const N: usize>(s: &str) -> Result<[T; N], PointParseError> {
    let shape_error = || PointParseError::Shape {
        expected: N,
        input: s.to_string(),
    };

    let mut coordinates = [T::zero(); N];
    let mut parts = s.split(',');
    for slot in coordinates.iter_mut() {
        let part = parts.next().ok_or_else(shape_error)?.trim();
        *slot = part
            .parse()
            .map_err(|_| PointParseError::Coordinate(part.to_string()))?;
    }
    match parts.next() {
        Some(_) => Err(shape_error()),
        None => Ok(coordinates),
    }
}

/// Orthogonal direction on the screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    Up,
    Right,
    Down,
    Left,
}

impl Direction {
    /// Clockwise, starting from up
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Right,
        Direction::Down,
        Direction::Left,
    ];

    pub fn vector<T: Coordinate>(self) -> Point2D<T> {
        let (zero, one) = (T::zero(), T::one());
        match self {
            Direction::Up => Point2D::new(zero, -one),
            Direction::Right => Point2D::new(one, zero),
            Direction::Down => Point2D::new(zero, one),
            Direction::Left => Point2D::new(-one, zero),
        }
    }

    pub fn turn_right(self) -> Self {
        match self {
            Direction::Up => Direction::Right,
            Direction::Right => Direction::Down,
            Direction::Down => Direction::Left,
            Direction::Left => Direction::Up,
        }
    }

    pub fn turn_left(self) -> Self {
        match self {
            Direction::Up => Direction::Left,
            Direction::Left => Direction::Down,
            Direction::Down => Direction::Right,
            Direction::Right => Direction::Up,
        }
    }

    pub fn opposite(self) -> Self {
        self.turn_right().turn_right()
    }

    /// Position in [`Direction::ALL`], handy for per-direction arrays
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn is_vertical(self) -> bool {
        matches!(self, Direction::Up | Direction::Down)
    }
}

impl TryFrom<char> for Direction {
    type Error = PointParseError;

    /// Accepts arrows (`^>v<`) and letters (`URDL`, either case)
    fn try_from(c: char) -> Result<Self, Self::Error> {
        match c {
            '^' | 'U' | 'u' | 'N' => Ok(Direction::Up),
            '>' | 'R' | 'r' | 'E' => Ok(Direction::Right),
            'v' | 'D' | 'd' | 'S' => Ok(Direction::Down),
            '<' | 'L' | 'l' | 'W' => Ok(Direction::Left),
            other => Err(PointParseError::Direction(other)),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DiagonalDirection {
    UpRight,
    DownRight,
    DownLeft,
    UpLeft,
}

impl DiagonalDirection {
    pub const ALL: [DiagonalDirection; 4] = [
        DiagonalDirection::UpRight,
        DiagonalDirection::DownRight,
        DiagonalDirection::DownLeft,
        DiagonalDirection::UpLeft,
    ];

    pub fn vector<T: Coordinate>(self) -> Point2D<T> {
        let (one, minus_one) = (T::one(), -T::one());
        match self {
            DiagonalDirection::UpRight => Point2D::new(one, minus_one),
            DiagonalDirection::DownRight => Point2D::new(one, one),
            DiagonalDirection::DownLeft => Point2D::new(minus_one, one),
            DiagonalDirection::UpLeft => Point2D::new(minus_one, minus_one),
        }
    }
}

/// A 3D point or vector
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
pub struct Point3D<T = i32> {
    pub x: T,
    pub y: T,
    pub z: T,
}

impl<T: Coordinate> Point3D<T> {
    pub const fn new(x: T, y: T, z: T) -> Self {
        Self { x, y, z }
    }

    /// Unit vectors along each axis, both signs
    pub fn orthogonal_vectors() -> [Self; 6] {
        let (zero, one) = (T::zero(), T::one());
        [
            Self::new(one, zero, zero),
            Self::new(-one, zero, zero),
            Self::new(zero, one, zero),
            Self::new(zero, -one, zero),
            Self::new(zero, zero, one),
            Self::new(zero, zero, -one),
        ]
    }

    pub fn orthogonal_neighbors(self) -> [Self; 6] {
        Self::orthogonal_vectors().map(|v| self + v)
    }

    pub fn manhattan_distance(self, other: Self) -> T {
        let delta = other - self;
        delta.x.abs() + delta.y.abs() + delta.z.abs()
    }

    /// Inside the box spanned by `a` and `b`, borders included
    pub fn is_between(self, a: Self, b: Self) -> bool {
        let within = |v: T, p: T, q: T| p.min(q) <= v && v <= p.max(q);
        within(self.x, a.x, b.x) && within(self.y, a.y, b.y) && within(self.z, a.z, b.z)
    }
}

impl<T: Coordinate> Add for Point3D<T> {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self::new(self.x + rhs.x, self.y + rhs.y, self.z + rhs.z)
    }
}

impl<T: Coordinate> Sub for Point3D<T> {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self {
        Self::new(self.x - rhs.x, self.y - rhs.y, self.z - rhs.z)
    }
}

impl<T: Coordinate> fmt::Display for Point3D<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{},{}", self.x, self.y, self.z)
    }
}

impl<T: Coordinate> FromStr for Point3D<T> {
    type Err = PointParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match parse_coordinates::<T, 3>(s)? {
            [x, y, z] => Ok(Self::new(x, y, z)),
        }
    }
}

/// Parses `separator`-delimited `"x,y"` points, skipping empty entries
pub fn parse_points<T: Coordinate>(
    input: &str,
    separator: &str,
) -> Result<Vec<Point2D<T>>, PointParseError> {
    input
        .split(separator)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::parse)
        .collect()
}

pub fn parse_points_3d<T: Coordinate>(
    input: &str,
    separator: &str,
) -> Result<Vec<Point3D<T>>, PointParseError> {
    input
        .split(separator)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::parse)
        .collect()
}
