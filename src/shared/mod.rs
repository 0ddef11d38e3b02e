mod coordinator;

pub use coordinator::{Coordinator, LinkedTimeView, time_window_fan_out};
#[cfg(test)]
pub use coordinator::Channel;
