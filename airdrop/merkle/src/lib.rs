mod batch;
mod node;
mod tree;

pub use {batch::*, node::*, tree::*};
