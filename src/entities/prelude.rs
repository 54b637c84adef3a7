pub use super::films::Entity as Films;
