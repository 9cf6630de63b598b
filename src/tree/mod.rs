pub mod forest;
pub use forest::*;

pub mod node;
pub use node::*;

pub mod ply;
pub use ply::*;
