use service::cafe::{CafeRepository, CafeService};

#[derive(Clone)]
pub struct ServerAuthConfig {
    /// Shared secret required by the delete route.
    pub api_key: String,
}

#[derive(Clone)]
pub struct ServerState {
    pub cafes: CafeService<dyn CafeRepository>,
    pub auth: ServerAuthConfig,
}
