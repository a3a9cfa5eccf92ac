//! # tessera-account
//!
//! Account-level Telegram requests on top of a pluggable transport.
//!
//! ## Features
//! - Account self-destruction TTL (get / set)
//! - QR-code login confirmation from another device
//! - Active sessions: list (sorted for display), terminate one, terminate all others
//! - Connected websites: list, disconnect one, disconnect all
//! - Message-sender resolution with access checks and safe fallbacks
//! - Chat action-bar state
//!
//! Every request goes through a [`TypedQuery`]: one request, one decoded reply,
//! exactly one completion.
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use tessera_account::{Account, Config, DialogDirectory, Transport, UserDirectory};
//!
//! async fn show_sessions(
//!     transport: Arc<dyn Transport>,
//!     users: Arc<dyn UserDirectory>,
//!     dialogs: Arc<dyn DialogDirectory>,
//! ) -> Result<(), tessera_account::InvocationError> {
//!     let account = Account::new(Config::default(), transport, users, dialogs);
//!     for session in account.get_active_sessions().await? {
//!         println!("{} on {}", session.application_name, session.device_model);
//!     }
//!     Ok(())
//! }
//! ```

#![deny(unsafe_code)]

mod errors;
mod promise;
mod transport;
pub mod action_bar;
pub mod directory;
pub mod ids;
pub mod query;
pub mod sender;
pub mod session;
pub mod website;

pub use action_bar::{ChatActionBar, DialogActionBar};
pub use directory::{AccountEvent, DeviceNotifier, DialogDirectory, NoDevice, ServiceUser, UserDirectory};
pub use errors::{InvocationError, RpcError, ServerAnomaly, ValidationError};
pub use ids::{ChannelId, ChatId, DialogId, DialogType, SecretChatId, UserId};
pub use promise::{Completion, Promise};
pub use query::{ResultHandler, TypedQuery};
pub use sender::{Identity, MessageSender, MessageSenders, SenderResolver, ValidationPolicy};
pub use session::Session;
pub use transport::Transport;
pub use website::ConnectedWebsite;

use std::sync::Arc;

use tessera_tl as tl;
use tessera_tl::{Deserializable, RemoteCall, Serializable};

// ─── ResetPolicy ──────────────────────────────────────────────────────────────

/// What a `false` reply to a terminate / disconnect request means.
///
/// Telegram answers these with a bare `Bool`.  `false` comes without a reason
/// and the target is usually gone anyway, so by default it is only logged.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ResetPolicy {
    /// Log a warning and report success.
    #[default]
    Lenient,
    /// Log a warning and fail with [`InvocationError::UnexpectedState`].
    Strict,
}

impl ResetPolicy {
    pub(crate) fn check(self, done: bool, failure: &'static str) -> Result<(), InvocationError> {
        if done {
            return Ok(());
        }
        tracing::warn!("[tessera] {failure}");
        match self {
            Self::Lenient => Ok(()),
            Self::Strict  => Err(InvocationError::UnexpectedState(failure)),
        }
    }
}

// ─── Config ───────────────────────────────────────────────────────────────────

/// Configuration for [`Account::new`].
#[derive(Clone)]
pub struct Config {
    /// The logged-in account is a bot.
    pub is_bot:            bool,
    /// How `false` replies to terminate / disconnect requests are treated.
    pub reset_policy:      ResetPolicy,
    /// Scheme and path a QR-code login link must start with (compared
    /// case-insensitively).
    pub login_link_prefix: String,
    /// Told to re-register push tokens after other sessions are terminated.
    pub device_notifier:   Arc<dyn DeviceNotifier>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            is_bot:            false,
            reset_policy:      ResetPolicy::Lenient,
            login_link_prefix: "tg://login?token=".to_string(),
            device_notifier:   Arc::new(NoDevice),
        }
    }
}

// ─── Account ──────────────────────────────────────────────────────────────────

struct AccountInner {
    transport: Arc<dyn Transport>,
    users:     Arc<dyn UserDirectory>,
    dialogs:   Arc<dyn DialogDirectory>,
    config:    Config,
}

/// Handle for account-level requests.  Cheap to clone.
#[derive(Clone)]
pub struct Account {
    inner: Arc<AccountInner>,
}

impl Account {
    pub fn new(
        config:    Config,
        transport: Arc<dyn Transport>,
        users:     Arc<dyn UserDirectory>,
        dialogs:   Arc<dyn DialogDirectory>,
    ) -> Self {
        Self { inner: Arc::new(AccountInner { transport, users, dialogs, config }) }
    }

    pub fn config(&self) -> &Config {
        &self.inner.config
    }

    /// Sender resolution over this account's user and dialog stores.
    pub fn senders(&self) -> SenderResolver<'_> {
        SenderResolver::new(
            self.inner.users.as_ref(),
            self.inner.dialogs.as_ref(),
            self.inner.config.is_bot,
        )
    }

    // ── Raw invoke ─────────────────────────────────────────────────────────

    /// Invoke any schema function and return its decoded reply.
    pub async fn invoke<R>(&self, req: &R) -> Result<R::Return, InvocationError>
    where
        R: RemoteCall + Sync,
    {
        let body = self.inner.transport.dispatch(req.to_bytes()).await?;
        R::Return::from_bytes(&body).map_err(Into::into)
    }

    /// Run `req` as a [`TypedQuery`] and wait for its completion.
    pub(crate) async fn call<R, T, F>(&self, req: R, transform: F) -> Result<T, InvocationError>
    where
        R: RemoteCall + Sync,
        T: Send + 'static,
        F: FnOnce(R::Return) -> Result<T, InvocationError> + Send + 'static,
    {
        let (promise, completion) = Promise::new();
        let mut query = TypedQuery::<R, T>::new(promise, transform);
        query.send(self.inner.transport.as_ref(), &req).await;
        completion.wait().await
    }

    // ── Account TTL ────────────────────────────────────────────────────────

    /// Set how many days of inactivity delete the account.
    pub async fn set_account_ttl(&self, days: i32) -> Result<(), InvocationError> {
        let req = tl::functions::account::SetAccountTtl {
            ttl: tl::types::AccountDaysTtl { days }.into(),
        };
        self.call(req, |done| {
            if done {
                Ok(())
            } else {
                Err(InvocationError::UnexpectedState("failed to set account TTL"))
            }
        })
        .await
    }

    /// Days of inactivity after which the account is deleted.
    pub async fn get_account_ttl(&self) -> Result<i32, InvocationError> {
        self.call(tl::functions::account::GetAccountTtl {}, |ttl| {
            let tl::enums::AccountDaysTtl::AccountDaysTtl(ttl) = ttl;
            tracing::info!("[tessera] Account TTL is {} days", ttl.days);
            Ok(ttl.days)
        })
        .await
    }
}
