//! In-memory collaborators shared by the integration tests.

#![allow(dead_code)]

use std::collections::{HashSet, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tessera_account::{
    Account, Config, DialogDirectory, DialogId, InvocationError, ServiceUser, Transport, UserDirectory, UserId,
};
use tessera_tl as tl;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::layer::{Context, Layer};

// ── Transport ─────────────────────────────────────────────────────────────────

/// Records every request and answers from a scripted queue.
#[derive(Default)]
pub struct MemTransport {
    pub sent:    Mutex<Vec<Vec<u8>>>,
    pub replies: Mutex<VecDeque<Result<Vec<u8>, InvocationError>>>,
}

impl MemTransport {
    pub fn reply(&self, body: Vec<u8>) {
        self.replies.lock().unwrap().push_back(Ok(body));
    }

    pub fn fail(&self, error: InvocationError) {
        self.replies.lock().unwrap().push_back(Err(error));
    }

    pub fn sent(&self) -> Vec<Vec<u8>> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for MemTransport {
    async fn dispatch(&self, request: Vec<u8>) -> Result<Vec<u8>, InvocationError> {
        self.sent.lock().unwrap().push(request);
        self.replies.lock().unwrap().pop_front().unwrap_or(Err(InvocationError::Dropped))
    }
}

// ── Directories ───────────────────────────────────────────────────────────────

#[derive(Default)]
pub struct MemUsers {
    /// Known locally.
    pub known:    Mutex<HashSet<UserId>>,
    /// Not known locally, but loadable on demand.
    pub loadable: Mutex<HashSet<UserId>>,
    pub service:  Mutex<Vec<ServiceUser>>,
    pub absorbed: Mutex<Vec<(tl::enums::User, &'static str)>>,
}

impl MemUsers {
    pub fn with_known(ids: impl IntoIterator<Item = i64>) -> Self {
        let users = Self::default();
        users.known.lock().unwrap().extend(ids.into_iter().map(UserId));
        users
    }
}

#[async_trait]
impl UserDirectory for MemUsers {
    fn have_user(&self, user_id: UserId) -> bool {
        self.known.lock().unwrap().contains(&user_id)
    }

    async fn have_user_force(&self, user_id: UserId) -> bool {
        if self.loadable.lock().unwrap().remove(&user_id) {
            self.known.lock().unwrap().insert(user_id);
        }
        self.have_user(user_id)
    }

    fn add_service_user(&self, kind: ServiceUser) -> UserId {
        self.service.lock().unwrap().push(kind);
        self.known.lock().unwrap().insert(kind.user_id());
        kind.user_id()
    }

    fn on_get_users(&self, users: Vec<tl::enums::User>, source: &'static str) {
        let mut absorbed = self.absorbed.lock().unwrap();
        for user in users {
            absorbed.push((user, source));
        }
    }
}

#[derive(Default)]
pub struct MemDialogs {
    /// Full local dialogs.
    pub dialogs:  Mutex<HashSet<DialogId>>,
    /// Enough is known to create the dialog locally.
    pub info:     Mutex<HashSet<DialogId>>,
    /// Exists on the server; loading it creates the local dialog.
    pub loadable: Mutex<HashSet<DialogId>>,
    /// Has info, but local creation fails.
    pub broken:   Mutex<HashSet<DialogId>>,
    pub created:  Mutex<Vec<(DialogId, &'static str)>>,
}

impl MemDialogs {
    pub fn with_dialogs(ids: impl IntoIterator<Item = DialogId>) -> Self {
        let dialogs = Self::default();
        dialogs.dialogs.lock().unwrap().extend(ids);
        dialogs
    }
}

#[async_trait]
impl DialogDirectory for MemDialogs {
    fn have_dialog(&self, dialog_id: DialogId) -> bool {
        self.dialogs.lock().unwrap().contains(&dialog_id)
    }

    fn have_dialog_info(&self, dialog_id: DialogId) -> bool {
        self.info.lock().unwrap().contains(&dialog_id) || self.have_dialog(dialog_id)
    }

    async fn have_dialog_force(&self, dialog_id: DialogId, _source: &'static str) -> bool {
        if self.loadable.lock().unwrap().remove(&dialog_id) {
            self.dialogs.lock().unwrap().insert(dialog_id);
        }
        self.have_dialog(dialog_id)
    }

    fn force_create_dialog(&self, dialog_id: DialogId, source: &'static str) {
        self.created.lock().unwrap().push((dialog_id, source));
        if self.info.lock().unwrap().contains(&dialog_id) && !self.broken.lock().unwrap().contains(&dialog_id) {
            self.dialogs.lock().unwrap().insert(dialog_id);
        }
    }
}

// ── Account ───────────────────────────────────────────────────────────────────

pub struct Harness {
    pub account:   Account,
    pub transport: Arc<MemTransport>,
    pub users:     Arc<MemUsers>,
    pub dialogs:   Arc<MemDialogs>,
}

pub fn harness(config: Config) -> Harness {
    let transport = Arc::new(MemTransport::default());
    let users = Arc::new(MemUsers::default());
    let dialogs = Arc::new(MemDialogs::default());
    let account = Account::new(config, transport.clone(), users.clone(), dialogs.clone());
    Harness { account, transport, users, dialogs }
}

// ── Log capture ───────────────────────────────────────────────────────────────

/// Counts events at `level`.
#[derive(Clone, Default)]
pub struct CountingLayer {
    pub errors:   Arc<AtomicUsize>,
    pub warnings: Arc<AtomicUsize>,
}

impl CountingLayer {
    pub fn errors(&self) -> usize {
        self.errors.load(Ordering::SeqCst)
    }

    pub fn warnings(&self) -> usize {
        self.warnings.load(Ordering::SeqCst)
    }
}

impl<S: Subscriber> Layer<S> for CountingLayer {
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        match *event.metadata().level() {
            Level::ERROR => { self.errors.fetch_add(1, Ordering::SeqCst); }
            Level::WARN  => { self.warnings.fetch_add(1, Ordering::SeqCst); }
            _ => {}
        }
    }
}

/// Install a [`CountingLayer`] for the current thread until the guard drops.
pub fn count_logs() -> (CountingLayer, tracing::subscriber::DefaultGuard) {
    use tracing_subscriber::layer::SubscriberExt;
    let layer = CountingLayer::default();
    let subscriber = tracing_subscriber::registry().with(layer.clone());
    (layer, tracing::subscriber::set_default(subscriber))
}
