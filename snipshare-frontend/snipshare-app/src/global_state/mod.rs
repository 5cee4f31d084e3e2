pub mod cards;
pub mod theme;
pub mod toasts;
