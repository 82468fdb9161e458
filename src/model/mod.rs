pub mod profile;
pub mod request;
pub mod result;

pub use profile::Profile;
pub use request::{CompressionRequest, FallbackPolicy, PassSettings};
pub use result::{reduction_percent, Attempt, CompressionResult, Stage};
