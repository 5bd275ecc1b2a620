use std::ffi::OsString;
use std::fs::File;
use std::io::BufWriter;
use std::path::{Path, PathBuf};

use mercator_core::matrix::DistanceMatrix;

use crate::error::MatError;
use crate::reader;
use crate::writer::MatWriter;

pub const MATRIX_VARIABLE: &str = "Dist_Matrix";
pub const NUM_PLACES_VARIABLE: &str = "Num_Places";

/// Appends `.mat` unless the path already ends with it, so a plain artifact
/// name like `MATLAB_Info` lands on disk as `MATLAB_Info.mat`.
pub fn artifact_path(path: &Path) -> PathBuf {
    match path.extension() {
        Some(ext) if ext == "mat" => path.to_path_buf(),
        _ => {
            let mut with_ext = OsString::from(path.as_os_str());
            with_ext.push(".mat");
            PathBuf::from(with_ext)
        }
    }
}

/// Writes the matrix and its place count as the two variables MATLAB-side
/// consumers read back. Returns the path actually written.
pub fn save_matrix(path: &Path, matrix: &DistanceMatrix) -> Result<PathBuf, MatError> {
    let target = artifact_path(path);
    let file = File::create(&target)?;
    let mut writer = MatWriter::new(BufWriter::new(file))?;

    let num_places = matrix.num_places();
    let count =
        u32::try_from(num_places).map_err(|_| MatError::Dimension(num_places))?;

    writer.write_u32_matrix(MATRIX_VARIABLE, num_places, num_places, matrix.values())?;
    writer.write_u32_scalar(NUM_PLACES_VARIABLE, count)?;
    writer.finish()?;

    Ok(target)
}

/// Reads an artifact back, checking that the matrix is square and agrees
/// with the stored place count. The exact path is tried first, then the
/// `.mat`-suffixed one, mirroring [`save_matrix`].
pub fn load_matrix(path: &Path) -> Result<(DistanceMatrix, u32), MatError> {
    let bytes = match std::fs::read(path) {
        Ok(bytes) => bytes,
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            std::fs::read(artifact_path(path))?
        }
        Err(err) => return Err(MatError::Io(err)),
    };

    let mut arrays = reader::parse(&bytes)?;

    let position = arrays
        .iter()
        .position(|array| array.name == MATRIX_VARIABLE)
        .ok_or_else(|| MatError::MissingVariable(MATRIX_VARIABLE.to_owned()))?;
    let matrix_array = arrays.swap_remove(position);

    let count_array = arrays
        .iter()
        .find(|array| array.name == NUM_PLACES_VARIABLE)
        .ok_or_else(|| MatError::MissingVariable(NUM_PLACES_VARIABLE.to_owned()))?;
    if count_array.values.len() != 1 {
        return Err(MatError::Element("place count must be a scalar"));
    }
    let num_places = count_array.values[0];

    if matrix_array.rows != matrix_array.cols {
        return Err(MatError::NotSquare {
            rows: matrix_array.rows,
            cols: matrix_array.cols,
        });
    }
    if matrix_array.rows != num_places as usize {
        return Err(MatError::CountMismatch {
            num_places,
            rows: matrix_array.rows,
            cols: matrix_array.cols,
        });
    }

    let matrix = DistanceMatrix::from_flat(matrix_array.rows, matrix_array.values)
        .map_err(|_| MatError::Element("matrix data does not match its dimensions"))?;

    Ok((matrix, num_places))
}
