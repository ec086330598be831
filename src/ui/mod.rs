/// UI module exports
pub mod components;
pub mod output;
pub mod popup;
