use std::fmt;
use std::ops::{Index, IndexMut};

/// A three-component vector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Vec3<T> {
	pub x: T,
	pub y: T,
	pub z: T,
}

impl<T> Vec3<T> {
	/// Creates a vector from its components.
	pub const fn new(x: T, y: T, z: T) -> Self {
		Self { x, y, z }
	}

	/// Applies `f` to each component.
	pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Vec3<U> {
		Vec3 {
			x: f(self.x),
			y: f(self.y),
			z: f(self.z),
		}
	}

	/// Returns the components as an array.
	pub fn into_array(self) -> [T; 3] {
		[self.x, self.y, self.z]
	}

	/// Iterates over the components in `x`, `y`, `z` order.
	pub fn iter(&self) -> impl Iterator<Item = &T> {
		[&self.x, &self.y, &self.z].into_iter()
	}
}

impl<T: Copy + PartialOrd> Vec3<T> {
	/// Returns true if every component lies within `[min, max]`.
	pub fn within(&self, min: T, max: T) -> bool {
		self.iter().all(|&v| v >= min && v <= max)
	}
}

impl<T> From<[T; 3]> for Vec3<T> {
	fn from([x, y, z]: [T; 3]) -> Self {
		Self { x, y, z }
	}
}

impl<T> Index<usize> for Vec3<T> {
	type Output = T;

	/// # Panics
	///
	/// Panics if `index > 2`.
	fn index(&self, index: usize) -> &T {
		match index {
			0 => &self.x,
			1 => &self.y,
			2 => &self.z,
			_ => panic!("Vec3 index out of range: {index}"),
		}
	}
}

impl<T> IndexMut<usize> for Vec3<T> {
	fn index_mut(&mut self, index: usize) -> &mut T {
		match index {
			0 => &mut self.x,
			1 => &mut self.y,
			2 => &mut self.z,
			_ => panic!("Vec3 index out of range: {index}"),
		}
	}
}

impl<T: fmt::Display> fmt::Display for Vec3<T> {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{} {} {}", self.x, self.y, self.z)
	}
}

/// Component-wise `as` cast. Components beyond ±2^53 round to the nearest double.
impl From<Vec3<i64>> for Vec3<f64> {
	fn from(v: Vec3<i64>) -> Self {
		v.map(|c| c as f64)
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn index_matches_fields() {
		let mut v = Vec3::new(1, 2, 3);
		assert_eq!((v[0], v[1], v[2]), (1, 2, 3));
		v[1] = 7;
		assert_eq!(v.y, 7);
	}

	#[test]
	fn display_is_space_separated() {
		assert_eq!(Vec3::new(1.5, -2.0, 0.25).to_string(), "1.5 -2 0.25");
	}

	#[test]
	fn widening_preserves_values() {
		let v: Vec3<f64> = Vec3::new(1_i64, -4, 9).into();
		assert_eq!(v, Vec3::new(1.0, -4.0, 9.0));
	}

	#[test]
	fn within_checks_every_component() {
		assert!(Vec3::new(0, 5, 10).within(0, 10));
		assert!(!Vec3::new(0, 11, 10).within(0, 10));
	}
}
