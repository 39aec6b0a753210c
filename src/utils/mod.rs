pub mod dir;
pub mod hours;
pub mod logging;
pub mod names;
pub mod time;
