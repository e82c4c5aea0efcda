pub mod datastore;
pub mod fieldbook;
pub mod record;
pub mod transport;

pub use datastore::*;
pub use fieldbook::*;
pub use record::*;
pub use transport::*;
