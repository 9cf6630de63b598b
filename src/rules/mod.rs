pub mod ending;
pub use ending::*;

pub mod history;
pub use history::*;

pub mod illegal;
pub use illegal::*;

pub mod outcome;
pub use outcome::*;
