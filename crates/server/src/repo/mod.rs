pub mod case;
pub mod case_file;
pub mod client;
pub mod records;
pub mod reference;
pub mod sequence;
