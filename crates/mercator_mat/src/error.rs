use thiserror::Error;

#[derive(Debug, Error)]
pub enum MatError {
    #[error("MAT file I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("malformed MAT header: {0}")]
    Header(&'static str),

    #[error("MAT file truncated at byte {offset}")]
    Truncated { offset: usize },

    #[error("unsupported MAT element type {mi_type}")]
    UnsupportedElement { mi_type: u32 },

    #[error("unsupported MAT array class {class}")]
    UnsupportedClass { class: u32 },

    #[error("malformed MAT element: {0}")]
    Element(&'static str),

    #[error("invalid MATLAB variable name {0:?}")]
    VariableName(String),

    #[error("matrix {name} has {found} values for shape {rows}x{cols}")]
    Shape {
        name: String,
        rows: usize,
        cols: usize,
        found: usize,
    },

    #[error("dimension {0} does not fit in a MAT file")]
    Dimension(usize),

    #[error("matrix {0} exceeds the MAT element size limit")]
    Oversize(String),

    #[error("variable {0} not found in artifact")]
    MissingVariable(String),

    #[error("matrix is {rows}x{cols}, expected square")]
    NotSquare { rows: usize, cols: usize },

    #[error("artifact stores {num_places} places but a {rows}x{cols} matrix")]
    CountMismatch {
        num_places: u32,
        rows: usize,
        cols: usize,
    },
}
