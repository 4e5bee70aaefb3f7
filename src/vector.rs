use serde::{Deserialize, Serialize};

/// Point or direction on the grid plane. One grid cell is one unit.
#[derive(Debug, Default, Copy, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vector2 {
    pub x: f64,
    pub y: f64,
}

impl std::fmt::Display for Vector2 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{},{}]", self.x, self.y)
    }
}

impl Vector2 {
    pub const ZERO: Self = Self { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub const fn scalar(value: f64) -> Self {
        Self { x: value, y: value }
    }

    /// Unit vector pointing at `angle` radians (x axis = 0, y grows downward).
    pub fn from_angle(angle: f64) -> Self {
        Self {
            x: angle.cos(),
            y: angle.sin(),
        }
    }

    pub fn angle(&self) -> f64 {
        self.y.atan2(self.x)
    }

    pub fn add(self, that: Self) -> Self {
        Self::new(self.x + that.x, self.y + that.y)
    }

    pub fn sub(self, that: Self) -> Self {
        Self::new(self.x - that.x, self.y - that.y)
    }

    /// Component-wise product.
    pub fn mul(self, that: Self) -> Self {
        Self::new(self.x * that.x, self.y * that.y)
    }

    /// Component-wise quotient.
    pub fn div(self, that: Self) -> Self {
        Self::new(self.x / that.x, self.y / that.y)
    }

    pub fn scale(self, value: f64) -> Self {
        Self::new(self.x * value, self.y * value)
    }

    pub fn sqr_length(&self) -> f64 {
        self.x * self.x + self.y * self.y
    }

    pub fn length(&self) -> f64 {
        self.sqr_length().sqrt()
    }

    /// Unit vector with the same heading; the zero vector stays zero.
    pub fn norm(self) -> Self {
        let l = self.length();
        if l == 0.0 {
            return Self::ZERO;
        }
        Self::new(self.x / l, self.y / l)
    }

    pub fn dot(&self, that: Self) -> f64 {
        self.x * that.x + self.y * that.y
    }

    pub fn distance_to(self, that: Self) -> f64 {
        that.sub(self).length()
    }

    pub fn sqr_distance_to(self, that: Self) -> f64 {
        that.sub(self).sqr_length()
    }

    pub fn lerp(self, that: Self, t: f64) -> Self {
        self.add(that.sub(self).scale(t))
    }

    pub fn rot90(self) -> Self {
        Self::new(-self.y, self.x)
    }

    pub fn floor(self) -> Self {
        self.map(f64::floor)
    }

    pub fn map(self, f: impl Fn(f64) -> f64) -> Self {
        Self::new(f(self.x), f(self.y))
    }
}

impl std::ops::Add for Vector2 {
    type Output = Self;
    fn add(self, rhs: Self) -> Self::Output {
        Vector2::add(self, rhs)
    }
}

impl std::ops::Sub for Vector2 {
    type Output = Self;
    fn sub(self, rhs: Self) -> Self::Output {
        Vector2::sub(self, rhs)
    }
}

impl std::ops::Mul<f64> for Vector2 {
    type Output = Self;
    fn mul(self, rhs: f64) -> Self::Output {
        self.scale(rhs)
    }
}

impl std::ops::Neg for Vector2 {
    type Output = Self;
    fn neg(self) -> Self::Output {
        Self::new(-self.x, -self.y)
    }
}
