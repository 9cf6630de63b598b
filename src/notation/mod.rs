pub mod annotate;
pub use annotate::*;

pub mod cursor;
pub use cursor::*;

pub mod error;
pub use error::*;

pub mod import;
pub use import::*;

pub mod parser;
pub use parser::*;

pub mod partial;
pub use partial::*;

pub mod record;
pub use record::*;

pub mod style;
pub use style::*;

pub mod word;
pub use word::*;

pub mod words;
pub use words::*;
