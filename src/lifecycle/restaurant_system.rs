use crate::clients::{MenuClient, OrderLifecycle, RestaurantClient, TableClient, UserClient};
use crate::config::Config;
use crate::routes::RouteError;
use crate::session::{AuthProvider, LocalAuthProvider, SessionState};
use std::sync::Arc;
use tracing::{error, info};

/// The runtime orchestrator: one actor per collection plus the services built on
/// top of them.
///
/// # Architecture
///
/// - **User Actor**: `users` identity documents
/// - **Restaurant Actor**: public restaurant details
/// - **Menu Actor**: one menu document per restaurant
/// - **Table Actor**: tables with their embedded order queues
///
/// [`OrderLifecycle`] and [`SessionState`] are thin layers over those clients and
/// hold no state of their own beyond the signed-in identity.
///
/// # Example
///
/// ```ignore
/// let system = RestaurantSystem::new(&Config::from_env());
///
/// let owner = system.session.sign_up("chef@example.com", "secret", profile).await?;
/// let table = system.tables.create(RestaurantId::from(&owner.id), 1).await?;
/// let mut feed = system.orders.subscribe(table.restaurant_id.clone()).await?;
///
/// system.shutdown().await?;
/// ```
pub struct RestaurantSystem {
    pub config: Config,
    pub tables: TableClient,
    pub menus: MenuClient,
    pub users: UserClient,
    pub restaurants: RestaurantClient,
    pub orders: OrderLifecycle,
    pub session: SessionState,

    /// Task handles for all running actors (used for graceful shutdown)
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl RestaurantSystem {
    /// Spawns every collection actor with an in-process auth provider.
    pub fn new(config: &Config) -> Self {
        Self::with_auth(config, Arc::new(LocalAuthProvider::new()))
    }

    /// Same as [`RestaurantSystem::new`] with a caller-supplied auth provider.
    pub fn with_auth(config: &Config, auth: Arc<dyn AuthProvider>) -> Self {
        let buffer = config.channel_buffer;

        // 1. Create actors. None of them has dependencies (Context = ()).
        let (user_actor, users) = crate::user_actor::new(buffer);
        let (restaurant_actor, restaurants) = crate::restaurant_actor::new(buffer);
        let (menu_actor, menus) = crate::menu_actor::new(buffer);
        let (table_actor, tables) = crate::table_actor::new(buffer);

        // 2. Start them.
        let handles = vec![
            tokio::spawn(user_actor.run(())),
            tokio::spawn(restaurant_actor.run(())),
            tokio::spawn(menu_actor.run(())),
            tokio::spawn(table_actor.run(())),
        ];

        // 3. Services over the clients.
        let orders = OrderLifecycle::new(tables.clone());
        let session = SessionState::new(auth, users.clone(), restaurants.clone());

        info!(base_url = %config.base_url, buffer, "System started");
        Self {
            config: config.clone(),
            tables,
            menus,
            users,
            restaurants,
            orders,
            session,
            handles,
        }
    }

    /// The URL encoded into a table's QR code.
    pub fn qr_url(&self, table: &crate::model::Table) -> Result<String, RouteError> {
        table.qr_payload().to_url(&self.config.base_url)
    }

    /// Gracefully shuts down the entire system.
    ///
    /// Dropping every client closes the actors' channels; each actor then drains
    /// and exits its loop. Clients cloned out of the system keep their actor alive,
    /// so drop them before calling this. Open feeds end with `None`.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down system...");

        drop(self.orders);
        drop(self.session);
        drop(self.tables);
        drop(self.menus);
        drop(self.users);
        drop(self.restaurants);

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
