pub mod binary;
pub mod primitive;
pub mod sink;

pub extern crate uuid;

pub use wavestash_core_derive::*;
