use folio_core_contact_impl::{
    gatekeeper::ContactGatekeeperServiceImpl, rate_limit::ContactRateLimitServiceImpl,
    ContactFeatureServiceImpl,
};
use folio_core_health_impl::HealthFeatureServiceImpl;
use folio_core_projects_impl::ProjectsFeatureServiceImpl;
use folio_email_impl::EmailServiceImpl;
use folio_shared_impl::{hash::HashServiceImpl, time::TimeServiceImpl};
use folio_storage_file::FileStorage;

// API
pub type RestServer = folio_api_rest::RestServer<HealthFeature, ProjectsFeature, ContactFeature>;

// Storage
pub type Storage = FileStorage;

// Email
pub type Email = EmailServiceImpl;

// Shared
pub type Hash = HashServiceImpl;
pub type Time = TimeServiceImpl;

// Core
pub type HealthFeature = HealthFeatureServiceImpl<Time, Storage, Email>;

pub type ProjectsFeature = ProjectsFeatureServiceImpl;

pub type ContactFeature = ContactFeatureServiceImpl<Time, Email, ContactGatekeeper, ContactRateLimit>;
pub type ContactGatekeeper = ContactGatekeeperServiceImpl;
pub type ContactRateLimit = ContactRateLimitServiceImpl<Hash, Storage>;
