// Upstream strategies - one module per extraction service

mod cobalt;
mod tikwm;

pub use cobalt::CobaltStrategy;
pub use tikwm::TikwmStrategy;
