use num_traits::Float;


/// Euclidean distance
pub fn euclidean<T>(x1: T, y1: T, x2: T, y2: T) -> T
where
    T: Float,
    {
    ((x1 - x2).powi(2) + (y1 - y2).powi(2)).sqrt()
}

/// Squared Euclidean distance
pub fn squared_euclidean<T>(x1: T, y1: T, x2: T, y2: T) -> T
where
    T: Float,
    {
    (x1 - x2).powi(2) + (y1 - y2).powi(2)
}


/// 2D Point
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {

    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        euclidean(self.x, self.y, other.x, other.y)
    }
}


/// Node payloads that can be placed on the plane
/// Spatial queries read positions only through this trait
pub trait Positioned {
    fn position(&self) -> Point;
}

impl Positioned for Point {
    fn position(&self) -> Point {
        *self
    }
}
