mod draft;
mod error;
mod promotions;
mod record;
mod registry;
mod rules;
mod store;

pub use draft::*;
pub use error::*;
pub use promotions::*;
pub use record::*;
pub use registry::*;
pub use rules::*;
pub use store::*;
