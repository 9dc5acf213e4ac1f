pub mod client;
pub mod cluster;
pub mod state;
pub mod util;
