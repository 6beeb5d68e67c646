pub mod fight_recording;
pub mod ranking_adjustment;

#[cfg(test)]
pub(crate) mod memory;
