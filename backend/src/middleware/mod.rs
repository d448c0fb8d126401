pub mod logging;
pub mod origin;
pub mod request_id;

pub use logging::*;
pub use origin::*;
pub use request_id::*;
