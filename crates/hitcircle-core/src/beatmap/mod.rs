mod decoder;
mod difficulty;
mod document;
mod hit_object;
mod number;
mod timing;

pub use decoder::*;
pub use difficulty::*;
pub use document::*;
pub use hit_object::*;
pub use number::{parse_finite_prefix, parse_float_prefix, parse_int_prefix};
pub use timing::*;
