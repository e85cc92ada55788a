mod fixtures;
mod tracing;

pub use {fixtures::*, tracing::*};
