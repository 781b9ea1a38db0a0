//! Application Layer - Use Cases

pub mod manage_items;
