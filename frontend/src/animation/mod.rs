//! Host-independent animation math. The DOM components feed these with
//! measurements and write back what they return.

pub mod count_up;
pub mod ripple;
pub mod scroll;
pub mod stagger;
pub mod typewriter;
