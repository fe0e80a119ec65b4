pub use {burrow::*, util::*};

pub mod burrow;

mod util;
