pub mod error;
pub mod model;
pub mod validate;

pub use error::ApiError;
pub use model::{Activity, Board, Card, List};
