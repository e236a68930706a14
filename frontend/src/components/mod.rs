pub mod interactions;
pub mod nav;
pub mod notification;
pub mod particles;
pub mod reveal;
pub mod smooth_scroll;
pub mod waitlist_form;

#[cfg(target_arch = "wasm32")]
pub mod scroll_effects;
