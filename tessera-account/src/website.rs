//! Websites logged in through Telegram.

use chrono::{DateTime, Utc};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use tessera_tl as tl;

use crate::errors::ServerAnomaly;
use crate::ids::UserId;
use crate::{Account, InvocationError};

/// A website the user logged in to with their Telegram account.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ConnectedWebsite {
    pub id:               i64,
    pub domain_name:      String,
    /// The bot that handled the login; `UserId(0)` if the server sent garbage.
    pub bot_user_id:      UserId,
    pub browser:          String,
    pub platform:         String,
    pub log_in_date:      i32,
    pub last_active_date: i32,
    pub ip:               String,
    pub location:         String,
}

impl ConnectedWebsite {
    pub fn logged_in_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.log_in_date as i64, 0)
    }

    pub fn last_active_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp(self.last_active_date as i64, 0)
    }
}

impl From<tl::enums::WebAuthorization> for ConnectedWebsite {
    fn from(w: tl::enums::WebAuthorization) -> Self {
        let tl::enums::WebAuthorization::WebAuthorization(w) = w;
        let mut bot_user_id = UserId(w.bot_id);
        if !bot_user_id.is_valid() {
            ServerAnomaly::InvalidBotId { bot_id: w.bot_id }.report();
            bot_user_id = UserId::default();
        }
        Self {
            id: w.hash,
            domain_name: w.domain,
            bot_user_id,
            browser: w.browser,
            platform: w.platform,
            log_in_date: w.date_created,
            last_active_date: w.date_active,
            ip: w.ip,
            location: w.region,
        }
    }
}

impl Account {
    /// Websites currently logged in with this account.
    ///
    /// Users bundled with the reply are handed to the user directory before the
    /// list is built.
    pub async fn get_connected_websites(&self) -> Result<Vec<ConnectedWebsite>, InvocationError> {
        let users = self.inner.users.clone();
        self.call(tl::functions::account::GetWebAuthorizations {}, move |reply| {
            let tl::enums::account::WebAuthorizations::WebAuthorizations(reply) = reply;
            tracing::info!("[tessera] Receive {} connected websites", reply.authorizations.len());
            users.on_get_users(reply.users, "get_connected_websites");
            Ok(reply.authorizations.into_iter().map(ConnectedWebsite::from).collect())
        })
        .await
    }

    /// Log out of one website by [`ConnectedWebsite::id`].
    pub async fn disconnect_website(&self, website_id: i64) -> Result<(), InvocationError> {
        let policy = self.config().reset_policy;
        let req = tl::functions::account::ResetWebAuthorization { hash: website_id };
        self.call(req, move |done| policy.check(done, "failed to disconnect website")).await
    }

    /// Log out of every connected website.
    pub async fn disconnect_all_websites(&self) -> Result<(), InvocationError> {
        let policy = self.config().reset_policy;
        self.call(tl::functions::account::ResetWebAuthorizations {}, move |done| {
            policy.check(done, "failed to disconnect all websites")
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fields_are_mapped() {
        let website = ConnectedWebsite::from(tl::enums::WebAuthorization::from(tl::types::WebAuthorization {
            hash:         9,
            bot_id:       42,
            domain:       "example.org".into(),
            browser:      "Firefox".into(),
            platform:     "Linux".into(),
            date_created: 10,
            date_active:  20,
            ip:           "192.0.2.1".into(),
            region:       "Nowhere".into(),
        }));
        assert_eq!(website.id, 9);
        assert_eq!(website.bot_user_id, UserId(42));
        assert_eq!(website.domain_name, "example.org");
        assert_eq!(website.location, "Nowhere");
        assert_eq!(website.last_active_at().unwrap().timestamp(), 20);
    }

    #[test]
    fn invalid_bot_id_is_zeroed() {
        for bot_id in [0, -5, UserId::MAX + 1] {
            let website = ConnectedWebsite::from(tl::enums::WebAuthorization::from(tl::types::WebAuthorization {
                bot_id,
                ..Default::default()
            }));
            assert_eq!(website.bot_user_id, UserId::default());
        }
    }
}
