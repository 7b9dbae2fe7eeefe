pub use self::{app_state::*, settings::*};

mod app_state;
mod settings;
