/// Represents errors that can occur when inspecting a [`LinearHashMap`](crate::LinearHashMap)
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Error {
    /// A bucket index past the end of the directory (index, bucket count)
    OutOfRange {
        /// The requested bucket index
        index: usize,

        /// The number of buckets in the directory
        buckets: usize,
    },
}

impl std::fmt::Display for Error {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::OutOfRange { index, buckets } => {
                write!(f, "bucket index {index} out of range ({buckets} buckets)")
            }
        }
    }
}

impl std::error::Error for Error {}

/// Inspection result
pub type Result<T> = std::result::Result<T, Error>;
