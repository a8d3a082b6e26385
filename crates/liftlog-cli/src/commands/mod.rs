pub mod dispatch;
pub mod events;
pub mod history;
pub mod log;
pub mod retry;
pub mod shared;
pub mod status;
pub mod sync;
pub mod watch;
