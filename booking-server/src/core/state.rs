use std::sync::Arc;

use crate::auth::{JwtService, password};
use crate::core::Config;
use crate::reservations::BookingManager;
use shared::models::{User, UserRole};
use shared::util::{now_millis, snowflake_id};

/// Server state - shared handles for all services
///
/// Cloning is cheap: the manager shares its database handle internally and
/// the JWT service sits behind an `Arc`.
///
/// | Field | Type | Purpose |
/// |-------|------|---------|
/// | config | Config | Immutable configuration |
/// | manager | BookingManager | Reservation lifecycle + storage |
/// | jwt_service | Arc<JwtService> | Token generation and validation |
#[derive(Clone)]
pub struct ServerState {
    /// Server configuration
    pub config: Config,
    /// Reservation manager (owns the redb database)
    pub manager: BookingManager,
    /// JWT service
    jwt_service: Arc<JwtService>,
}

impl ServerState {
    /// Initialize all services from configuration
    ///
    /// Creates the work directory, opens the database and seeds the admin
    /// account when `ADMIN_EMAIL`/`ADMIN_PASSWORD` are configured.
    pub fn initialize(config: &Config) -> anyhow::Result<Self> {
        std::fs::create_dir_all(&config.work_dir)?;

        let manager = BookingManager::new(config.db_path())
            .map_err(|e| anyhow::anyhow!("Failed to open database: {}", e))?;
        let jwt_service = Arc::new(JwtService::with_config(config.jwt.clone()));

        let state = Self {
            config: config.clone(),
            manager,
            jwt_service,
        };
        state.seed_admin()?;
        Ok(state)
    }

    /// Create a state over in-memory storage (for testing)
    pub fn for_testing(config: Config) -> anyhow::Result<Self> {
        let storage = crate::reservations::BookingStorage::open_in_memory()
            .map_err(|e| anyhow::anyhow!("Failed to open in-memory database: {}", e))?;
        Ok(Self {
            manager: BookingManager::with_storage(storage),
            jwt_service: Arc::new(JwtService::with_config(config.jwt.clone())),
            config,
        })
    }

    pub fn jwt_service(&self) -> Arc<JwtService> {
        self.jwt_service.clone()
    }

    pub fn manager(&self) -> &BookingManager {
        &self.manager
    }

    /// Create the configured admin account if it does not exist yet
    fn seed_admin(&self) -> anyhow::Result<()> {
        let (Some(email), Some(passwd)) =
            (&self.config.admin_email, &self.config.admin_password)
        else {
            return Ok(());
        };

        let storage = self.manager.storage();
        if storage
            .get_user_by_email(email)
            .map_err(|e| anyhow::anyhow!("Admin lookup failed: {}", e))?
            .is_some()
        {
            return Ok(());
        }

        let user = User {
            id: snowflake_id(),
            email: email.clone(),
            password_hash: password::hash_password(passwd)
                .map_err(|e| anyhow::anyhow!("Failed to hash admin password: {}", e))?,
            role: UserRole::Admin,
            created_at: now_millis(),
        };
        let txn = storage
            .begin_write()
            .map_err(|e| anyhow::anyhow!("Admin seed failed: {}", e))?;
        storage
            .put_user(&txn, &user)
            .map_err(|e| anyhow::anyhow!("Admin seed failed: {}", e))?;
        txn.commit()
            .map_err(|e| anyhow::anyhow!("Admin seed failed: {}", e))?;

        tracing::info!(email = %email, "Seeded admin account");
        Ok(())
    }
}
