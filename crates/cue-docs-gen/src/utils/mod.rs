pub mod refs;
pub mod schema_ext;
pub mod spec;
