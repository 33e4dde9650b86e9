/// Result alias used by the application and adapter layers.
/// Domain services return their own typed errors instead.
pub type Result<T> = std::result::Result<T, anyhow::Error>;
