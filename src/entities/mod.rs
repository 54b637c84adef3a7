pub mod prelude;

pub mod films;
