pub mod session;
pub mod snake;

mod session_rng;

pub use session_rng::SessionRng;
