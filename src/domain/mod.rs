mod money;
mod period;
mod summary;
mod transaction;
mod validation;

pub use money::*;
pub use period::*;
pub use summary::*;
pub use transaction::*;
pub use validation::*;
