mod event;
mod fight;
mod fighter;
mod ranking;
mod weight_class;

pub use event::Event;
pub use fight::Fight;
pub use fighter::Fighter;
pub use ranking::Ranking;
pub use weight_class::{ParseWeightClassError, WeightClass};
