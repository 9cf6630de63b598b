pub mod direction;
pub use direction::*;

pub mod kind;
pub use kind::*;

pub mod piece;
pub use piece::*;

pub mod placement;
pub use placement::*;

pub mod position;
pub use position::*;

pub mod route;
pub use route::*;

pub mod side;
pub use side::*;

pub mod square;
pub use square::*;

pub mod squares;
pub use squares::*;

pub mod state;
pub use state::*;

pub mod step;
pub use step::*;
