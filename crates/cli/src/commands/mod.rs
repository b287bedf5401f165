pub mod check;
pub mod explain;
pub mod rules;
pub mod types;
pub mod util;

pub use check::*;
pub use explain::*;
pub use rules::*;
pub use types::*;
pub use util::*;
