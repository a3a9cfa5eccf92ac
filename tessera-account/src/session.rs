//! Active sessions of the account: listing, QR-code login confirmation, and
//! termination.
//!
//! Provides [`Account::get_active_sessions`], [`Account::confirm_qr_code_authentication`],
//! [`Account::terminate_session`] and [`Account::terminate_all_other_sessions`].

use std::cmp::Ordering;

use base64::engine::{DecodePaddingMode, GeneralPurpose, GeneralPurposeConfig};
use base64::{Engine as _, alphabet};
use chrono::{DateTime, Utc};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tessera_tl as tl;

use crate::{Account, InvocationError, ValidationError};

/// URL-safe alphabet; padding optional, stray bits in the last symbol ignored.
const LOGIN_TOKEN_ENGINE: GeneralPurpose = GeneralPurpose::new(
    &alphabet::URL_SAFE,
    GeneralPurposeConfig::new()
        .with_encode_padding(false)
        .with_decode_padding_mode(DecodePaddingMode::Indifferent)
        .with_decode_allow_trailing_bits(true),
);

// ─── Session ──────────────────────────────────────────────────────────────────

/// One logged-in session of the account.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Session {
    /// Identifier used to terminate the session.
    pub id:                      i64,
    /// This is the session making the request.
    pub is_current:              bool,
    /// Logged in with the code but the 2FA password has not been entered yet.
    pub is_password_pending:     bool,
    pub is_official_application: bool,
    pub api_id:                  i32,
    pub application_name:        String,
    pub application_version:     String,
    pub device_model:            String,
    pub platform:                String,
    pub system_version:          String,
    /// Unix time of login.
    pub log_in_date:             i32,
    /// Unix time the session was last used.
    pub last_active_date:        i32,
    pub ip:                      String,
    pub country:                 String,
    pub region:                  String,
}

impl Session {
    pub fn logged_in_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.log_in_date as i64, 0)
    }

    pub fn last_active_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.last_active_date as i64, 0)
    }

    /// Display order: current session first, then sessions waiting for the
    /// 2FA password, then the rest; most recently active first within each.
    pub fn display_order(&self, other: &Self) -> Ordering {
        other.is_current.cmp(&self.is_current)
            .then(other.is_password_pending.cmp(&self.is_password_pending))
            .then(other.last_active_date.cmp(&self.last_active_date))
    }
}

impl From<tl::types::Authorization> for Session {
    fn from(a: tl::types::Authorization) -> Self {
        Self {
            id:                      a.hash,
            is_current:              a.current,
            is_password_pending:     a.password_pending,
            is_official_application: a.official_app,
            api_id:                  a.api_id,
            application_name:        a.app_name,
            application_version:     a.app_version,
            device_model:            a.device_model,
            platform:                a.platform,
            system_version:          a.system_version,
            log_in_date:             a.date_created,
            last_active_date:        a.date_active,
            ip:                      a.ip,
            country:                 a.country,
            region:                  a.region,
        }
    }
}

impl From<tl::enums::Authorization> for Session {
    fn from(a: tl::enums::Authorization) -> Self {
        let tl::enums::Authorization::Authorization(a) = a;
        a.into()
    }
}

/// Sort `sessions` by [`Session::display_order`].
pub fn sort_sessions(sessions: &mut [Session]) {
    sessions.sort_by(Session::display_order);
}

/// Extract the raw token from a `tg://login?token=…` link.
///
/// The prefix is matched case-insensitively; the token must be URL-safe
/// base64, with or without padding.
pub fn parse_login_token(link: &str, prefix: &str) -> Result<Vec<u8>, ValidationError> {
    let head = link.get(..prefix.len()).ok_or(ValidationError::AuthTokenInvalid)?;
    if !head.eq_ignore_ascii_case(prefix) {
        return Err(ValidationError::AuthTokenInvalid);
    }
    LOGIN_TOKEN_ENGINE
        .decode(&link[prefix.len()..])
        .map_err(|_| ValidationError::AuthTokenInvalid)
}

// ─── Client methods ───────────────────────────────────────────────────────────

impl Account {
    /// Confirm a login requested by scanning a QR code on another device.
    ///
    /// `link` is the `tg://login?token=…` link encoded in the QR code.  A
    /// malformed link fails with [`ValidationError::AuthTokenInvalid`] without
    /// contacting Telegram.  Returns the session that was just authorized.
    pub async fn confirm_qr_code_authentication(&self, link: &str) -> Result<Session, InvocationError> {
        let token = parse_login_token(link, &self.config().login_link_prefix)?;
        let req = tl::functions::auth::AcceptLoginToken { token };
        self.call(req, |authorization| {
            tracing::debug!("[tessera] Receive result for AcceptLoginToken: {authorization:?}");
            Ok(Session::from(authorization))
        })
        .await
    }

    /// All sessions of the account, current one first.
    pub async fn get_active_sessions(&self) -> Result<Vec<Session>, InvocationError> {
        self.call(tl::functions::account::GetAuthorizations {}, |reply| {
            let tl::enums::account::Authorizations::Authorizations(reply) = reply;
            tracing::info!("[tessera] Receive {} active sessions", reply.authorizations.len());
            let mut sessions: Vec<Session> = reply.authorizations.into_iter().map(Session::from).collect();
            sort_sessions(&mut sessions);
            Ok(sessions)
        })
        .await
    }

    /// Log out the session with the given [`Session::id`].
    pub async fn terminate_session(&self, session_id: i64) -> Result<(), InvocationError> {
        let policy = self.config().reset_policy;
        let req = tl::functions::account::ResetAuthorization { hash: session_id };
        self.call(req, move |done| policy.check(done, "failed to terminate session")).await
    }

    /// Log out every session except the current one.
    ///
    /// On a reply the device notifier is told to re-register push tokens; that
    /// notification does not hold up this call.
    pub async fn terminate_all_other_sessions(&self) -> Result<(), InvocationError> {
        let policy = self.config().reset_policy;
        let device = self.config().device_notifier.clone();
        self.call(tl::functions::auth::ResetAuthorizations {}, move |done| {
            let result = policy.check(done, "failed to terminate all sessions");
            device.reregister_device();
            result
        })
        .await
    }
}
