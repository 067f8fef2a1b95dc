pub mod dsu;
pub mod time;
