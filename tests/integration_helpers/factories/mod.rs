pub mod pokemon;
pub mod trainer;
pub mod user;
