pub mod constants;
pub mod errors;
pub mod traits;
pub mod types;
pub mod utils;

pub use errors::{
    ConfigError, ConnectionError, ExportError, FetchError, MessageError, PulseError, PulseResult,
};
pub use traits::*;
pub use types::*;
pub use utils::DisplayUtils;
