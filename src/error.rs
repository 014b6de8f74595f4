use core::fmt;

/// Result alias for `symnmf`.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors returned by the matrix primitives, graph stages and solver.
#[derive(Debug, Clone, PartialEq)]
pub enum Error {
    /// Input was empty.
    EmptyInput,

    /// Storage for a new matrix could not be reserved.
    AllocationFailure {
        /// Number of `f64` cells requested (saturated on overflow).
        elements: usize,
    },

    /// Vector length mismatch (usize).
    DimensionMismatch {
        /// Expected dimension.
        expected: usize,
        /// Found dimension.
        found: usize,
    },

    /// Matrix shape mismatch.
    ShapeMismatch {
        /// Expected shape description.
        expected: String,
        /// Actual shape description.
        actual: String,
    },

    /// A degree entry is zero, negative or not finite, so `D^{-1/2}` is undefined.
    DegenerateInput {
        /// Row (point) whose degree is degenerate.
        index: usize,
        /// The offending degree value.
        degree: f64,
    },

    /// Goal token not recognised by the pipeline.
    UnknownGoal {
        /// Token as supplied by the caller.
        goal: String,
    },

    /// Invalid number of clusters requested.
    InvalidClusterCount {
        /// Requested count.
        requested: usize,
        /// Number of items.
        n_items: usize,
    },

    /// Invalid parameter value.
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Error message.
        message: &'static str,
    },
}

impl Error {
    /// True for caller configuration errors (bad goal, cluster count or parameter).
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            Error::UnknownGoal { .. }
                | Error::InvalidClusterCount { .. }
                | Error::InvalidParameter { .. }
        )
    }

    pub(crate) fn shape(expected: (usize, usize), actual: (usize, usize)) -> Self {
        Error::ShapeMismatch {
            expected: format!("{}x{}", expected.0, expected.1),
            actual: format!("{}x{}", actual.0, actual.1),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::EmptyInput => write!(f, "empty input provided"),
            Error::AllocationFailure { elements } => {
                write!(f, "failed to allocate a matrix of {elements} cells")
            }
            Error::DimensionMismatch { expected, found } => {
                write!(f, "dimension mismatch: expected {expected}, found {found}")
            }
            Error::ShapeMismatch { expected, actual } => {
                write!(f, "shape mismatch: expected {expected}, actual {actual}")
            }
            Error::DegenerateInput { index, degree } => {
                write!(f, "degenerate input: degree of point {index} is {degree}")
            }
            Error::UnknownGoal { goal } => {
                write!(f, "unknown goal '{goal}' (expected sym, ddg or norm)")
            }
            Error::InvalidClusterCount { requested, n_items } => {
                write!(f, "cannot create {requested} clusters from {n_items} items")
            }
            Error::InvalidParameter { name, message } => {
                write!(f, "invalid parameter '{name}': {message}")
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}
