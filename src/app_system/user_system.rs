use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::{error, info};

use super::SystemConfig;
use crate::actor_framework::ResourceActor;
use crate::clients::UserClient;
use crate::domain::User;

/// The application system: owns the user directory actor.
///
/// Responsible for starting it up, handing out the client, and shutdown.
pub struct UserSystem {
    pub user_client: UserClient,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl UserSystem {
    /// Starts the system. Must be called inside a Tokio runtime.
    pub fn new(config: SystemConfig) -> Self {
        info!(buffer_size = config.buffer_size, id_prefix = %config.id_prefix, "Starting user system");

        let user_id_counter = Arc::new(AtomicU64::new(1));
        let prefix = config.id_prefix;
        let next_user_id = move || {
            let id = user_id_counter.fetch_add(1, Ordering::SeqCst);
            format!("{}_{}", prefix, id)
        };

        let (user_actor, user_resource_client) =
            ResourceActor::<User>::new("users", config.buffer_size, next_user_id);
        let user_client = UserClient::new(user_resource_client);
        let user_handle = tokio::spawn(user_actor.run());

        Self {
            user_client,
            handles: vec![user_handle],
        }
    }

    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");
        // Actors stop once every client is dropped, so callers must not
        // hold clones past this point.
        drop(self.user_client);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Actor task failed: {:?}", e);
                return Err(format!("Actor task failed: {:?}", e));
            }
        }

        info!("System shutdown complete.");
        Ok(())
    }
}
