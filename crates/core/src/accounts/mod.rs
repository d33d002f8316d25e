mod broker;
mod shareholder;

pub use broker::Broker;
pub use shareholder::Shareholder;
