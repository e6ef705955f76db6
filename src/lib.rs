//! Schema-driven CRUD backend: table descriptors in, list and form endpoints out.

pub mod libs;

pub use libs::*;
