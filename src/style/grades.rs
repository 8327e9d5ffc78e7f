use serde::Deserialize;
use thiserror::Error;

/// One row of a grade table: values strictly above `min` use `color`
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Grade {
    pub min: f64,
    pub color: String,
}

impl Grade {
    pub fn new(min: f64, color: impl Into<String>) -> Self {
        Self {
            min,
            color: color.into(),
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum GradeError {
    #[error("grade table must have at least one row")]
    Empty,
    #[error("grade bound {0} is not a finite number")]
    NonFinite(f64),
    #[error("grade bounds must be strictly ascending, found {prev} followed by {next}")]
    NotAscending { prev: f64, next: f64 },
}

/// Ordered acreage grades used for both marker fill and legend swatches
///
/// Bounds are strictly ascending. Lookup walks the rows from the top and picks
/// the first bound the value strictly exceeds, falling back to the first row.
#[derive(Debug, Clone, PartialEq)]
pub struct GradeTable {
    grades: Vec<Grade>,
}

impl GradeTable {
    pub fn new(grades: Vec<Grade>) -> Result<Self, GradeError> {
        if grades.is_empty() {
            return Err(GradeError::Empty);
        }
        if let Some(bad) = grades.iter().find(|g| !g.min.is_finite()) {
            return Err(GradeError::NonFinite(bad.min));
        }
        if let Some(pair) = grades.windows(2).find(|w| w[1].min <= w[0].min) {
            return Err(GradeError::NotAscending {
                prev: pair[0].min,
                next: pair[1].min,
            });
        }

        Ok(Self { grades })
    }

    pub fn grades(&self) -> &[Grade] {
        &self.grades
    }

    pub fn len(&self) -> usize {
        self.grades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.grades.is_empty()
    }

    /// Index of the bucket `acres` falls into
    pub fn bucket_for(&self, acres: f64) -> usize {
        self.grades
            .iter()
            .rposition(|g| acres > g.min)
            .unwrap_or(0)
    }

    /// Fill color for a park of the given size
    pub fn color_for(&self, acres: f64) -> &str {
        &self.grades[self.bucket_for(acres)].color
    }
}

impl Default for GradeTable {
    fn default() -> Self {
        Self {
            grades: vec![
                Grade::new(0.0, "#7CFC00"),
                Grade::new(10.0, "#32CD32"),
                Grade::new(20.0, "#228B22"),
                Grade::new(50.0, "#006400"),
            ],
        }
    }
}
