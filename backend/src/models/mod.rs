pub mod admin;
pub mod content;
pub mod document;
pub mod submissions;
pub mod validation;

pub use admin::*;
pub use content::*;
pub use document::*;
pub use submissions::*;
pub use validation::ValidationError;
