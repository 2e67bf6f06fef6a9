pub mod date;
pub mod errors;
pub mod money;
pub mod ratelimit;
pub mod table;

pub use ratelimit::check_cooldown;
