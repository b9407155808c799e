use anyhow::{Result, bail};
use ndarray::Array2;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Odd-sized square weight matrix used to smooth a grid.
///
/// Weights are stored as `weights[(row, column)]`; [`Kernel::at`] takes the column first.
#[derive(Clone, Debug, PartialEq)]
pub struct Kernel {
    weights: Array2<i32>,
}

/// Round `size` up to the nearest odd value of at least one.
pub fn normalise_size(size: usize) -> usize {
    let size = size.max(1);
    if size % 2 == 0 { size + 1 } else { size }
}

impl Kernel {
    /// Build a kernel from rows of weights.
    pub fn new(rows: Vec<Vec<i32>>) -> Result<Self> {
        let size = rows.len();
        if size == 0 {
            bail!("Kernel must contain at least one row");
        }
        if size % 2 == 0 {
            bail!("Kernel size must be odd, got {size}");
        }
        if let Some(n) = rows.iter().position(|row| row.len() != size) {
            bail!("Kernel must be square: row {n} has {} weights, expected {size}", rows[n].len());
        }
        let weights = Array2::from_shape_vec((size, size), rows.into_iter().flatten().collect())?;
        Ok(Self { weights })
    }

    /// Square kernel of `size` (normalised to odd) with every weight set to `weight`.
    pub fn filled(size: usize, weight: i32) -> Self {
        let size = normalise_size(size);
        Self {
            weights: Array2::from_elem((size, size), weight),
        }
    }

    /// 3×3 all-ones kernel counting the cell and its eight neighbours.
    pub fn moore() -> Self {
        Self::filled(3, 1)
    }

    /// Copy of this kernel at a new (normalised) size.
    /// Overlapping weights are kept and new cells are zero.
    pub fn resized(&self, size: usize) -> Self {
        let size = normalise_size(size);
        let old = self.size();
        let weights = Array2::from_shape_fn((size, size), |(row, col)| {
            if row < old && col < old {
                self.weights[(row, col)]
            } else {
                0
            }
        });
        Self { weights }
    }

    /// Side length.
    pub fn size(&self) -> usize {
        self.weights.nrows()
    }

    /// Half-width `b` of a kernel of size `2b + 1`.
    pub fn bounds(&self) -> usize {
        (self.size() - 1) / 2
    }

    /// Weight at column `x`, row `y`.
    pub fn at(&self, x: usize, y: usize) -> i32 {
        self.weights[(y, x)]
    }

    /// Weights indexed `(row, col)`.
    pub fn weights(&self) -> &Array2<i32> {
        &self.weights
    }

    /// Weights as nested rows, the form used in config files.
    pub fn rows(&self) -> Vec<Vec<i32>> {
        self.weights.rows().into_iter().map(|row| row.to_vec()).collect()
    }

    /// Whether the kernel is square with an odd side.
    pub fn is_valid(&self) -> bool {
        let (rows, cols) = self.weights.dim();
        rows == cols && rows % 2 == 1
    }
}

impl Default for Kernel {
    fn default() -> Self {
        Self::moore()
    }
}

impl Serialize for Kernel {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.rows().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Kernel {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let rows = Vec::<Vec<i32>>::deserialize(deserializer)?;
        Kernel::new(rows).map_err(serde::de::Error::custom)
    }
}
