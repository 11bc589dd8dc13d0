mod timers;
pub use timers::*;
pub(crate) use timers::timeit;
