pub mod events;
pub mod fighters;
pub mod fights;
pub mod health;
pub mod rankings;
