use thiserror::Error;

#[derive(Debug, Error)]
#[error("expected {expected} entries for {num_places} places, got {found}")]
pub struct MatrixShapeError {
    pub num_places: usize,
    pub expected: usize,
    pub found: usize,
}

/// Square travel-time matrix between N places, in whole seconds.
///
/// Entries are stored as a flat vector; the duration from place `from` to
/// place `to` lives at `from * num_places + to`. The diagonal is
/// conventionally zero and the matrix need not be symmetric (one-way
/// streets, asymmetric transit schedules).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistanceMatrix {
    num_places: usize,
    seconds: Vec<u32>,
}

impl DistanceMatrix {
    pub fn zeroed(num_places: usize) -> DistanceMatrix {
        DistanceMatrix {
            num_places,
            seconds: vec![0; num_places * num_places],
        }
    }

    pub fn from_flat(
        num_places: usize,
        seconds: Vec<u32>,
    ) -> Result<DistanceMatrix, MatrixShapeError> {
        let expected = num_places * num_places;
        if seconds.len() != expected {
            return Err(MatrixShapeError {
                num_places,
                expected,
                found: seconds.len(),
            });
        }

        Ok(DistanceMatrix {
            num_places,
            seconds,
        })
    }

    pub fn num_places(&self) -> usize {
        self.num_places
    }

    /// Travel time in seconds from place `from` to place `to`.
    pub fn duration(&self, from: usize, to: usize) -> u32 {
        self.seconds[from * self.num_places + to]
    }

    pub fn set(&mut self, from: usize, to: usize, seconds: u32) {
        self.seconds[from * self.num_places + to] = seconds;
    }

    /// Entries in row-major order, row per origin.
    pub fn values(&self) -> &[u32] {
        &self.seconds
    }

    /// Rows in origin order; each row holds destinations in input order.
    pub fn rows(&self) -> impl Iterator<Item = &[u32]> {
        // chunk size must be non-zero; an empty matrix yields no rows
        self.seconds.chunks_exact(self.num_places.max(1))
    }
}
