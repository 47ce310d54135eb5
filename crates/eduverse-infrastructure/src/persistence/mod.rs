mod database;
mod result_ext;

pub mod repositories;

pub use database::Database;
pub use result_ext::StoreResultExt;
