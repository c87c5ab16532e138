use super::{Factor, LinearScale, ScaleError};

/// Scale over plain sequence positions (slot numbers, row indices).
///
/// One index is one factor-1 pixel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexScale {
    end: i64,
    factor: Factor,
}

impl IndexScale {
    pub fn new(end: i64, factor: Factor) -> Result<Self, ScaleError> {
        if end < 0 {
            return Err(ScaleError::NegativeEnd(end));
        }
        Ok(Self { end, factor })
    }

    pub fn with_factor(self, factor: Factor) -> Self {
        Self { factor, ..self }
    }
}

impl LinearScale<i64> for IndexScale {
    fn to_grid_pixels_with_factor1(&self, value: &i64) -> i64 {
        *value
    }

    fn to_scale_units_with_factor1(&self, pixels: i64) -> i64 {
        pixels
    }

    fn end_in_scale_units(&self) -> i64 {
        self.end
    }

    fn factor(&self) -> i64 {
        self.factor.get()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scale(end: i64, factor: i64) -> IndexScale {
        IndexScale::new(end, Factor::new(factor).expect("valid factor")).expect("valid scale")
    }

    #[test]
    fn converts_with_factor() {
        let s = scale(100, 5);
        assert_eq!(s.to_grid_pixels(&20), 4);
        assert_eq!(s.to_scale_units(4), 20);
        assert_eq!(s.end_in_grid_pixels(), 20);
    }

    #[test]
    fn round_trips_multiples_of_factor() {
        let s = scale(1_000, 8);
        for v in (0..=1_000).step_by(8) {
            assert_eq!(s.to_scale_units(s.to_grid_pixels(&v)), v);
        }
        // 13 is not a multiple of 8: the remainder is lost
        assert_eq!(s.to_scale_units(s.to_grid_pixels(&13)), 8);
    }

    #[test]
    fn factor1_primitives_are_inverse() {
        let s = scale(10, 3);
        for v in [-5, 0, 1, 10, i64::MAX] {
            assert_eq!(s.to_scale_units_with_factor1(s.to_grid_pixels_with_factor1(&v)), v);
            assert_eq!(s.to_grid_pixels_with_factor1(&s.to_scale_units_with_factor1(v)), v);
        }
    }

    #[test]
    fn rejects_negative_end() {
        assert_eq!(
            IndexScale::new(-1, Factor::ONE),
            Err(ScaleError::NegativeEnd(-1))
        );
    }

    #[test]
    fn zoom_changes_extent_only() {
        let s = scale(64, 4);
        let zoomed = s.with_factor(Factor::new(2).expect("valid factor"));
        assert_eq!(s.end_in_grid_pixels(), 16);
        assert_eq!(zoomed.end_in_grid_pixels(), 32);
        assert_eq!(zoomed.end_in_scale_units(), 64);
    }
}
