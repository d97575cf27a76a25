/// The fundamental unit of a chromosome.
/// Gene values are opaque to the operators; i64 covers any
/// integer encoding a caller is likely to use.
pub type Gene = i64;

/// An owned run of genes (one chromosome segment).
pub type Segment = Vec<Gene>;
