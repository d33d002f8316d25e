use thiserror::Error;

#[derive(Error, Debug)]
pub enum EngineError {
    #[error("request channel closed")]
    ChannelClosed,
}

pub type Result<T> = std::result::Result<T, EngineError>;
