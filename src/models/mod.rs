pub mod film;

pub use film::{Film, FilmInput};
