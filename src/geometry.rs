//! Integer 3D geometry for the cube lattice.
//!
//! Every piece sits on a point of the {-1, 0, 1}^3 lattice. Moves never use
//! arbitrary rotations: there are exactly six quarter-turn matrices, one
//! clockwise/counterclockwise pair per coordinate plane.
//!
//! Axis conventions:
//! - +x is right, -x is left
//! - +y is up, -y is down
//! - +z is front, -z is back

use std::fmt;
use std::ops::{Add, AddAssign, Index, Mul, Sub, SubAssign};

/// An integer 3D vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32, z: i32) -> Self {
        Self { x, y, z }
    }

    pub const fn dot(self, other: Point) -> i32 {
        self.x * other.x + self.y * other.y + self.z * other.z
    }

    pub const fn cross(self, other: Point) -> Point {
        Point::new(
            self.y * other.z - self.z * other.y,
            self.z * other.x - self.x * other.z,
            self.x * other.y - self.y * other.x,
        )
    }

    /// Number of components equal to `value`.
    ///
    /// Used to classify directions: a face axis has two zeros, a slice plane
    /// (sum of two axes) has one.
    pub fn count(self, value: i32) -> usize {
        self.components().iter().filter(|&&c| c == value).count()
    }

    pub const fn components(self) -> [i32; 3] {
        [self.x, self.y, self.z]
    }

    pub const fn is_zero(self) -> bool {
        self.x == 0 && self.y == 0 && self.z == 0
    }

    /// Returns a copy with the component on `axis` replaced.
    pub const fn with(self, axis: usize, value: i32) -> Point {
        match axis {
            0 => Point::new(value, self.y, self.z),
            1 => Point::new(self.x, value, self.z),
            _ => Point::new(self.x, self.y, value),
        }
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

impl Index<usize> for Point {
    type Output = i32;

    fn index(&self, axis: usize) -> &i32 {
        match axis {
            0 => &self.x,
            1 => &self.y,
            2 => &self.z,
            _ => panic!("point index {axis} out of range"),
        }
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, other: Point) -> Point {
        Point::new(self.x + other.x, self.y + other.y, self.z + other.z)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, other: Point) -> Point {
        Point::new(self.x - other.x, self.y - other.y, self.z - other.z)
    }
}

impl Mul<i32> for Point {
    type Output = Point;

    fn mul(self, scalar: i32) -> Point {
        Point::new(self.x * scalar, self.y * scalar, self.z * scalar)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, other: Point) {
        *self = *self + other;
    }
}

impl SubAssign for Point {
    fn sub_assign(&mut self, other: Point) {
        *self = *self - other;
    }
}

/// A 3x3 integer matrix, stored row-major.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Matrix {
    rows: [[i32; 3]; 3],
}

impl Matrix {
    pub const IDENTITY: Matrix = Matrix::new([[1, 0, 0], [0, 1, 0], [0, 0, 1]]);

    pub const fn new(rows: [[i32; 3]; 3]) -> Self {
        Self { rows }
    }

    pub fn rows(&self) -> impl Iterator<Item = Point> + '_ {
        self.rows.iter().map(|&[x, y, z]| Point::new(x, y, z))
    }

    pub fn cols(&self) -> impl Iterator<Item = Point> + '_ {
        (0..3).map(|col| Point::new(self.rows[0][col], self.rows[1][col], self.rows[2][col]))
    }

    pub fn transpose(&self) -> Matrix {
        let mut rows = [[0; 3]; 3];
        for (i, col) in self.cols().enumerate() {
            rows[i] = col.components();
        }
        Matrix::new(rows)
    }

    pub fn determinant(&self) -> i32 {
        let [a, b, c] = self.rows;
        Point::new(a[0], a[1], a[2]).dot(Point::new(b[0], b[1], b[2]).cross(Point::new(c[0], c[1], c[2])))
    }
}

impl Mul<Point> for Matrix {
    type Output = Point;

    fn mul(self, point: Point) -> Point {
        let [x, y, z] = [0, 1, 2].map(|row| {
            let [a, b, c] = self.rows[row];
            Point::new(a, b, c).dot(point)
        });
        Point::new(x, y, z)
    }
}

impl Mul for Matrix {
    type Output = Matrix;

    fn mul(self, other: Matrix) -> Matrix {
        let mut rows = [[0; 3]; 3];
        for (i, row) in self.rows().enumerate() {
            for (j, col) in other.cols().enumerate() {
                rows[i][j] = row.dot(col);
            }
        }
        Matrix::new(rows)
    }
}

impl Add for Matrix {
    type Output = Matrix;

    fn add(self, other: Matrix) -> Matrix {
        let mut rows = self.rows;
        for (row, other_row) in rows.iter_mut().zip(other.rows) {
            for (value, other_value) in row.iter_mut().zip(other_row) {
                *value += other_value;
            }
        }
        Matrix::new(rows)
    }
}

impl Sub for Matrix {
    type Output = Matrix;

    fn sub(self, other: Matrix) -> Matrix {
        let mut rows = self.rows;
        for (row, other_row) in rows.iter_mut().zip(other.rows) {
            for (value, other_value) in row.iter_mut().zip(other_row) {
                *value -= other_value;
            }
        }
        Matrix::new(rows)
    }
}

pub const RIGHT: Point = Point::new(1, 0, 0);
pub const LEFT: Point = Point::new(-1, 0, 0);
pub const UP: Point = Point::new(0, 1, 0);
pub const DOWN: Point = Point::new(0, -1, 0);
pub const FRONT: Point = Point::new(0, 0, 1);
pub const BACK: Point = Point::new(0, 0, -1);

pub const X_AXIS: Point = RIGHT;
pub const Y_AXIS: Point = UP;
pub const Z_AXIS: Point = FRONT;

/// The six face directions, in the order faces are checked by `Cube::is_solved`.
pub const FACES: [Point; 6] = [FRONT, BACK, UP, DOWN, LEFT, RIGHT];

// 90 degree rotations in the XY plane (about the z axis)
pub const ROT_XY_CW: Matrix = Matrix::new([[0, 1, 0], [-1, 0, 0], [0, 0, 1]]);
pub const ROT_XY_CC: Matrix = Matrix::new([[0, -1, 0], [1, 0, 0], [0, 0, 1]]);

// 90 degree rotations in the XZ plane (about the y axis)
pub const ROT_XZ_CW: Matrix = Matrix::new([[0, 0, -1], [0, 1, 0], [1, 0, 0]]);
pub const ROT_XZ_CC: Matrix = Matrix::new([[0, 0, 1], [0, 1, 0], [-1, 0, 0]]);

// 90 degree rotations in the YZ plane (about the x axis)
pub const ROT_YZ_CW: Matrix = Matrix::new([[1, 0, 0], [0, 0, 1], [0, -1, 0]]);
pub const ROT_YZ_CC: Matrix = Matrix::new([[1, 0, 0], [0, 0, -1], [0, 1, 0]]);

/// All six canonical rotations.
pub const ROTATIONS: [Matrix; 6] = [
    ROT_XY_CW, ROT_XY_CC, ROT_XZ_CW, ROT_XZ_CC, ROT_YZ_CW, ROT_YZ_CC,
];

/// Every lattice point with at least one nonzero coordinate (the 26 piece slots).
pub fn lattice_points() -> impl Iterator<Item = Point> {
    (-1..=1)
        .flat_map(|x| (-1..=1).flat_map(move |y| (-1..=1).map(move |z| Point::new(x, y, z))))
        .filter(|point| !point.is_zero())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rotations_are_proper() {
        for rotation in ROTATIONS {
            assert_eq!(rotation * rotation.transpose(), Matrix::IDENTITY);
            assert_eq!(rotation.determinant(), 1, "{rotation:?} is not proper");
        }
    }

    #[test]
    fn test_rotation_pairs_are_inverses() {
        assert_eq!(ROT_XY_CW * ROT_XY_CC, Matrix::IDENTITY);
        assert_eq!(ROT_XZ_CW * ROT_XZ_CC, Matrix::IDENTITY);
        assert_eq!(ROT_YZ_CW * ROT_YZ_CC, Matrix::IDENTITY);
    }

    #[test]
    fn test_four_quarter_turns_are_identity() {
        for rotation in ROTATIONS {
            let full_turn = rotation * rotation * rotation * rotation;
            assert_eq!(full_turn, Matrix::IDENTITY);
        }
    }

    #[test]
    fn test_rotations_keep_their_plane_axis_fixed() {
        assert_eq!(ROT_XY_CW * Z_AXIS, Z_AXIS);
        assert_eq!(ROT_XZ_CW * Y_AXIS, Y_AXIS);
        assert_eq!(ROT_YZ_CW * X_AXIS, X_AXIS);
        assert_eq!(ROT_XY_CW * UP, RIGHT);
        assert_eq!(ROT_YZ_CW * UP, BACK);
        assert_eq!(ROT_XZ_CW * RIGHT, FRONT);
    }

    #[test]
    fn test_vector_arithmetic() {
        let a = Point::new(1, -1, 0);
        let b = Point::new(0, 1, 1);
        assert_eq!(a + b, Point::new(1, 0, 1));
        assert_eq!(a - b, Point::new(1, -2, -1));
        assert_eq!(a * 2, Point::new(2, -2, 0));
        assert_eq!(a.dot(b), -1);
        assert_eq!(X_AXIS.cross(Y_AXIS), Z_AXIS);
        assert_eq!(a.count(0), 1);
        assert_eq!(a[1], -1);
        assert_eq!(a.with(2, 5), Point::new(1, -1, 5));

        let mut c = a;
        c += b;
        c -= a;
        assert_eq!(c, b);
    }

    #[test]
    fn test_matrix_add_sub() {
        let sum = ROT_XY_CW + ROT_XY_CC;
        assert_eq!(sum, Matrix::new([[0, 0, 0], [0, 0, 0], [0, 0, 2]]));
        assert_eq!(sum - ROT_XY_CC, ROT_XY_CW);
    }

    #[test]
    fn test_lattice_has_26_distinct_points() {
        let points: Vec<Point> = lattice_points().collect();
        assert_eq!(points.len(), 26);
        for (i, a) in points.iter().enumerate() {
            assert!(points[i + 1..].iter().all(|b| a != b));
        }
    }
}
