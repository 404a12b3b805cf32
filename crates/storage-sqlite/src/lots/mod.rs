mod model;
mod repository;

pub use model::{LotDB, LotUpdateDB};
pub use repository::LotRepository;
