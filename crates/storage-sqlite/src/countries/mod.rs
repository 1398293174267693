//! Country persistence: DB row models and the repository.

mod model;
mod repository;

pub use model::{name_key_of, CountryDB, NewCountryDB};
pub use repository::CountryRepository;
