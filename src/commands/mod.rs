pub mod interactive;
pub mod lookup;
mod output;
pub mod status;
