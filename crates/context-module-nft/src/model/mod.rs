mod options;
mod response;
mod transaction;

pub use options::LoaderOptions;
pub use response::{ContextResponse, LoaderError};
pub use transaction::Transaction;
