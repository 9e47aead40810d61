//! Hosting Layer
//!
//! The screen around the simulation core. This layer reads the clock and
//! owns everything that outlives a single run; all game logic stays in
//! `game/`.

pub mod hearts;
pub mod session;
pub mod driver;

pub use hearts::HeartEconomy;
pub use session::{HostSession, SessionError};
pub use driver::{Control, DriverError, DriverHandle, FrameDriver};
