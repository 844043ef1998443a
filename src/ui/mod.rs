mod confirm_modal;

pub use confirm_modal::*;
