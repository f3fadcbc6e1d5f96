//! Service context - dependency container for services
//!
//! Holds all repositories, the JWT service, the ID generator, and the upload
//! storage handle needed by services.

use std::sync::Arc;

use archive_common::auth::JwtService;
use archive_common::storage::UploadStorage;
use archive_core::traits::{
    AccessRequestRepository, ChannelRepository, DownloadRepository, MaterialRepository,
    MembershipRepository, UserRepository, VerificationRepository, WarningRepository,
};
use archive_core::SnowflakeGenerator;
use archive_db::PgPool;

/// Service context containing all dependencies
///
/// This is the main dependency container that gets passed to all services.
#[derive(Clone)]
pub struct ServiceContext {
    // Database pool
    pool: PgPool,

    // Repositories
    user_repo: Arc<dyn UserRepository>,
    warning_repo: Arc<dyn WarningRepository>,
    verification_repo: Arc<dyn VerificationRepository>,
    channel_repo: Arc<dyn ChannelRepository>,
    membership_repo: Arc<dyn MembershipRepository>,
    access_request_repo: Arc<dyn AccessRequestRepository>,
    material_repo: Arc<dyn MaterialRepository>,
    download_repo: Arc<dyn DownloadRepository>,

    // Services
    jwt_service: Arc<JwtService>,
    snowflake_generator: Arc<SnowflakeGenerator>,
    storage: UploadStorage,
}

impl ServiceContext {
    /// Create a new service context with all dependencies
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        pool: PgPool,
        user_repo: Arc<dyn UserRepository>,
        warning_repo: Arc<dyn WarningRepository>,
        verification_repo: Arc<dyn VerificationRepository>,
        channel_repo: Arc<dyn ChannelRepository>,
        membership_repo: Arc<dyn MembershipRepository>,
        access_request_repo: Arc<dyn AccessRequestRepository>,
        material_repo: Arc<dyn MaterialRepository>,
        download_repo: Arc<dyn DownloadRepository>,
        jwt_service: Arc<JwtService>,
        snowflake_generator: Arc<SnowflakeGenerator>,
        storage: UploadStorage,
    ) -> Self {
        Self {
            pool,
            user_repo,
            warning_repo,
            verification_repo,
            channel_repo,
            membership_repo,
            access_request_repo,
            material_repo,
            download_repo,
            jwt_service,
            snowflake_generator,
            storage,
        }
    }

    /// Get the PostgreSQL connection pool
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    // === Repositories ===

    /// Get the user repository
    pub fn user_repo(&self) -> &dyn UserRepository {
        self.user_repo.as_ref()
    }

    /// Get the warning repository
    pub fn warning_repo(&self) -> &dyn WarningRepository {
        self.warning_repo.as_ref()
    }

    /// Get the teacher verification repository
    pub fn verification_repo(&self) -> &dyn VerificationRepository {
        self.verification_repo.as_ref()
    }

    /// Get the channel repository
    pub fn channel_repo(&self) -> &dyn ChannelRepository {
        self.channel_repo.as_ref()
    }

    /// Get the membership repository
    pub fn membership_repo(&self) -> &dyn MembershipRepository {
        self.membership_repo.as_ref()
    }

    /// Get the access request repository
    pub fn access_request_repo(&self) -> &dyn AccessRequestRepository {
        self.access_request_repo.as_ref()
    }

    /// Get the material repository
    pub fn material_repo(&self) -> &dyn MaterialRepository {
        self.material_repo.as_ref()
    }

    /// Get the download audit repository
    pub fn download_repo(&self) -> &dyn DownloadRepository {
        self.download_repo.as_ref()
    }

    // === Services ===

    /// Get the JWT service
    pub fn jwt_service(&self) -> &JwtService {
        self.jwt_service.as_ref()
    }

    /// Get the snowflake ID generator
    pub fn snowflake_generator(&self) -> &SnowflakeGenerator {
        self.snowflake_generator.as_ref()
    }

    /// Get the upload storage handle
    pub fn storage(&self) -> &UploadStorage {
        &self.storage
    }

    /// Generate a new Snowflake ID
    pub fn generate_id(&self) -> archive_core::Snowflake {
        self.snowflake_generator.generate()
    }
}

impl std::fmt::Debug for ServiceContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServiceContext")
            .field("pool", &"PgPool")
            .field("repositories", &"...")
            .field("storage", &self.storage)
            .finish()
    }
}

/// Builder for creating ServiceContext with custom configuration
#[derive(Default)]
pub struct ServiceContextBuilder {
    pool: Option<PgPool>,
    user_repo: Option<Arc<dyn UserRepository>>,
    warning_repo: Option<Arc<dyn WarningRepository>>,
    verification_repo: Option<Arc<dyn VerificationRepository>>,
    channel_repo: Option<Arc<dyn ChannelRepository>>,
    membership_repo: Option<Arc<dyn MembershipRepository>>,
    access_request_repo: Option<Arc<dyn AccessRequestRepository>>,
    material_repo: Option<Arc<dyn MaterialRepository>>,
    download_repo: Option<Arc<dyn DownloadRepository>>,
    jwt_service: Option<Arc<JwtService>>,
    snowflake_generator: Option<Arc<SnowflakeGenerator>>,
    storage: Option<UploadStorage>,
}

impl ServiceContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pool(mut self, pool: PgPool) -> Self {
        self.pool = Some(pool);
        self
    }

    pub fn user_repo(mut self, repo: Arc<dyn UserRepository>) -> Self {
        self.user_repo = Some(repo);
        self
    }

    pub fn warning_repo(mut self, repo: Arc<dyn WarningRepository>) -> Self {
        self.warning_repo = Some(repo);
        self
    }

    pub fn verification_repo(mut self, repo: Arc<dyn VerificationRepository>) -> Self {
        self.verification_repo = Some(repo);
        self
    }

    pub fn channel_repo(mut self, repo: Arc<dyn ChannelRepository>) -> Self {
        self.channel_repo = Some(repo);
        self
    }

    pub fn membership_repo(mut self, repo: Arc<dyn MembershipRepository>) -> Self {
        self.membership_repo = Some(repo);
        self
    }

    pub fn access_request_repo(mut self, repo: Arc<dyn AccessRequestRepository>) -> Self {
        self.access_request_repo = Some(repo);
        self
    }

    pub fn material_repo(mut self, repo: Arc<dyn MaterialRepository>) -> Self {
        self.material_repo = Some(repo);
        self
    }

    pub fn download_repo(mut self, repo: Arc<dyn DownloadRepository>) -> Self {
        self.download_repo = Some(repo);
        self
    }

    pub fn jwt_service(mut self, service: Arc<JwtService>) -> Self {
        self.jwt_service = Some(service);
        self
    }

    pub fn snowflake_generator(mut self, generator: Arc<SnowflakeGenerator>) -> Self {
        self.snowflake_generator = Some(generator);
        self
    }

    pub fn storage(mut self, storage: UploadStorage) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Build the ServiceContext
    ///
    /// # Errors
    /// Returns `ServiceError::Validation` if any required dependency is missing
    pub fn build(self) -> super::error::ServiceResult<ServiceContext> {
        use super::error::ServiceError;

        Ok(ServiceContext::new(
            self.pool.ok_or_else(|| ServiceError::validation("pool is required"))?,
            self.user_repo.ok_or_else(|| ServiceError::validation("user_repo is required"))?,
            self.warning_repo.ok_or_else(|| ServiceError::validation("warning_repo is required"))?,
            self.verification_repo
                .ok_or_else(|| ServiceError::validation("verification_repo is required"))?,
            self.channel_repo.ok_or_else(|| ServiceError::validation("channel_repo is required"))?,
            self.membership_repo
                .ok_or_else(|| ServiceError::validation("membership_repo is required"))?,
            self.access_request_repo
                .ok_or_else(|| ServiceError::validation("access_request_repo is required"))?,
            self.material_repo.ok_or_else(|| ServiceError::validation("material_repo is required"))?,
            self.download_repo.ok_or_else(|| ServiceError::validation("download_repo is required"))?,
            self.jwt_service.ok_or_else(|| ServiceError::validation("jwt_service is required"))?,
            self.snowflake_generator
                .ok_or_else(|| ServiceError::validation("snowflake_generator is required"))?,
            self.storage.ok_or_else(|| ServiceError::validation("storage is required"))?,
        ))
    }
}
