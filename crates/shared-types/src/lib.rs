pub mod error;
pub mod feature_flags;

// Case workflow domain modules
pub mod case;
pub mod case_file;
pub mod client;
pub mod common;
pub mod records;
pub mod reference;

pub use error::*;
pub use feature_flags::*;

pub use case::*;
pub use case_file::*;
pub use client::*;
pub use common::*;
pub use records::*;
pub use reference::*;
