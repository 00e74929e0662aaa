/// Failures talking to the session store.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Invalid session store configuration: {0}")]
    Config(#[from] deadpool_redis::CreatePoolError),

    #[error("Session store connection unavailable: {0}")]
    Pool(#[from] deadpool_redis::PoolError),

    #[error("Session store command failed: {0}")]
    Command(#[from] redis::RedisError),
}
