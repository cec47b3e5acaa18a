//! Services module for external integrations and business logic

pub mod identity_provider;
pub mod jwks_aggregator;
pub mod key_provider;
pub mod notification_sender;
pub mod notifier;
pub mod onesignal;
pub mod proposal_directory;
pub mod templates;

pub use identity_provider::RemoteIdentityProvider;
pub use jwks_aggregator::JwksAggregator;
pub use key_provider::KeyProvider;
pub use notification_sender::NotificationSender;
pub use notifier::ProposalNotifier;
pub use onesignal::OneSignalClient;
pub use proposal_directory::{HttpProposalDirectory, ProposalDirectory};
