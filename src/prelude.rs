#![allow(unused_imports)]

pub use tracing::{Level, debug, info, instrument, warn};

pub use crate::error::{Error, Result};
