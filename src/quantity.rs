#[macro_use]
pub mod macros;

pub mod power;
pub mod temperature;
pub mod time;
