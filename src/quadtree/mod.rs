mod node;
mod pool;
mod tree;

pub use node::*;
pub use pool::*;
pub use tree::*;
