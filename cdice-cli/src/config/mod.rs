mod settings;

pub use settings::{OutputSettings, SchemeSettings, Settings};
