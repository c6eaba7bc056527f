mod galois;

pub use galois::*;
