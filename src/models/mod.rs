pub mod movie;

pub use movie::{Movie, MoviePayload, NewMovie, SearchParams};
