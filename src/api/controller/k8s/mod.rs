pub mod deployment;
pub mod namespace;
pub mod node;
pub mod node_pool;
pub mod overview;
pub mod pod;
pub mod service;
pub mod statefulset;
