mod support;

use support::{MemDialogs, MemUsers, count_logs};
use tessera_account::{
    ChannelId, ChatId, DialogId, Identity, MessageSender, SenderResolver, ServiceUser, UserId, ValidationError,
    ValidationPolicy,
};
use tessera_tl as tl;

const SERVICE_NOTIFICATIONS: UserId = UserId(777_000);

fn chat(id: i64) -> DialogId {
    DialogId::from_chat(ChatId(id))
}

fn peer_user(user_id: i64) -> tl::enums::Peer {
    tl::types::PeerUser { user_id }.into()
}

fn peer_chat(chat_id: i64) -> tl::enums::Peer {
    tl::types::PeerChat { chat_id }.into()
}

fn peer_channel(channel_id: i64) -> tl::enums::Peer {
    tl::types::PeerChannel { channel_id }.into()
}

// ── resolve_sender ────────────────────────────────────────────────────────────

#[tokio::test]
async fn empty_sender_follows_allow_empty() {
    let (users, dialogs) = (MemUsers::default(), MemDialogs::default());
    let resolver = SenderResolver::new(&users, &dialogs, false);
    let lax = ValidationPolicy::new(false, true);
    let strict = ValidationPolicy::new(false, false);

    assert_eq!(resolver.resolve_sender(None, lax).await, Ok(Identity::Empty));
    assert_eq!(resolver.resolve_sender(None, strict).await, Err(ValidationError::SenderEmpty));

    let zero_user = MessageSender::User(UserId(0));
    assert_eq!(resolver.resolve_sender(Some(&zero_user), lax).await, Ok(Identity::Empty));
    assert_eq!(resolver.resolve_sender(Some(&zero_user), strict).await, Err(ValidationError::UserIdInvalid));

    let zero_chat = MessageSender::Chat(DialogId(0));
    assert_eq!(resolver.resolve_sender(Some(&zero_chat), lax).await, Ok(Identity::Empty));
    assert_eq!(resolver.resolve_sender(Some(&zero_chat), strict).await, Err(ValidationError::ChatIdInvalid));
}

#[tokio::test]
async fn out_of_range_ids_are_invalid_even_when_empty_is_allowed() {
    let (users, dialogs) = (MemUsers::default(), MemDialogs::default());
    let resolver = SenderResolver::new(&users, &dialogs, false);
    let lax = ValidationPolicy::new(true, true);

    let negative_user = MessageSender::User(UserId(-1));
    assert_eq!(resolver.resolve_sender(Some(&negative_user), lax).await, Err(ValidationError::UserIdInvalid));

    let huge_user = MessageSender::User(UserId(UserId::MAX + 1));
    assert_eq!(resolver.resolve_sender(Some(&huge_user), lax).await, Err(ValidationError::UserIdInvalid));

    let bare_secret_base = MessageSender::Chat(DialogId(-2_000_000_000_000));
    assert_eq!(resolver.resolve_sender(Some(&bare_secret_base), lax).await, Err(ValidationError::ChatIdInvalid));
}

#[tokio::test]
async fn access_check_loads_or_rejects() {
    let users = MemUsers::with_known([1]);
    users.loadable.lock().unwrap().insert(UserId(2));
    let dialogs = MemDialogs::with_dialogs([chat(10)]);
    dialogs.loadable.lock().unwrap().insert(chat(11));
    let resolver = SenderResolver::new(&users, &dialogs, false);
    let check = ValidationPolicy::new(true, false);

    for (sender, expected) in [
        (MessageSender::User(UserId(1)), Ok(Identity::User(UserId(1)))),
        (MessageSender::User(UserId(2)), Ok(Identity::User(UserId(2)))),
        (MessageSender::User(UserId(3)), Err(ValidationError::UserUnknown)),
        (MessageSender::Chat(chat(10)), Ok(Identity::Chat(chat(10)))),
        (MessageSender::Chat(chat(11)), Ok(Identity::Chat(chat(11)))),
        (MessageSender::Chat(chat(12)), Err(ValidationError::ChatUnknown)),
        (MessageSender::Chat(DialogId::from_user(UserId(1))), Ok(Identity::Chat(DialogId(1)))),
        (MessageSender::Chat(DialogId::from_user(UserId(4))), Err(ValidationError::ChatUnknown)),
    ] {
        assert_eq!(resolver.resolve_sender(Some(&sender), check).await, expected, "{sender:?}");
    }
}

#[tokio::test]
async fn without_access_check_nothing_is_looked_up() {
    let (users, dialogs) = (MemUsers::default(), MemDialogs::default());
    users.loadable.lock().unwrap().insert(UserId(5));
    let resolver = SenderResolver::new(&users, &dialogs, false);
    let policy = ValidationPolicy::default();

    let sender = MessageSender::User(UserId(5));
    assert_eq!(resolver.resolve_sender(Some(&sender), policy).await, Ok(Identity::User(UserId(5))));
    assert!(!users.known.lock().unwrap().contains(&UserId(5)));

    let channel = DialogId::from_channel(ChannelId(1));
    let identity = resolver.resolve_sender(Some(&MessageSender::Chat(channel)), policy).await.unwrap();
    assert_eq!(identity.dialog_id(), channel);
}

// ── wire → domain ─────────────────────────────────────────────────────────────

#[test]
fn unusable_peers_are_dropped_in_order() {
    let users = MemUsers::with_known([1, 4]);
    let dialogs = MemDialogs::default();
    dialogs.info.lock().unwrap().insert(chat(3));
    let resolver = SenderResolver::new(&users, &dialogs, false);

    let (logs, _guard) = count_logs();
    let ids = resolver.sender_dialog_ids(&[
        peer_user(4),
        peer_user(2),
        peer_chat(3),
        peer_channel(9),
        peer_chat(0),
        peer_user(1),
    ]);
    assert_eq!(ids, [DialogId(4), chat(3), DialogId(1)]);
    assert_eq!(logs.errors(), 2);
    assert_eq!(dialogs.created.lock().unwrap().as_slice(), [(chat(3), "sender_dialog_ids")]);
}

#[test]
fn chat_that_cannot_be_created_is_dropped() {
    let users = MemUsers::with_known([1, 2]);
    let dialogs = MemDialogs::default();
    dialogs.info.lock().unwrap().extend([chat(3), chat(5)]);
    dialogs.broken.lock().unwrap().insert(chat(3));
    let resolver = SenderResolver::new(&users, &dialogs, false);

    let (logs, _guard) = count_logs();
    let ids = resolver.sender_dialog_ids(&[peer_user(1), peer_chat(3), peer_chat(5), peer_user(2)]);
    assert_eq!(ids, [DialogId(1), chat(5), DialogId(2)]);
    assert_eq!(logs.errors(), 0);
    assert_eq!(
        dialogs.created.lock().unwrap().as_slice(),
        [(chat(3), "sender_dialog_ids"), (chat(5), "sender_dialog_ids")]
    );
}

#[test]
fn convert_senders_counts_survivors() {
    let users = MemUsers::with_known([1]);
    let dialogs = MemDialogs::default();
    dialogs.info.lock().unwrap().insert(chat(3));
    let resolver = SenderResolver::new(&users, &dialogs, false);

    let senders = resolver.convert_senders(&[peer_chat(3), peer_user(2), peer_user(1)]);
    assert_eq!(senders.total_count, 2);
    assert_eq!(senders.senders, [MessageSender::Chat(chat(3)), MessageSender::User(UserId(1))]);
}

// ── projection ────────────────────────────────────────────────────────────────

#[test]
fn known_dialog_wins_over_user() {
    let users = MemUsers::with_known([1]);
    let dialogs = MemDialogs::with_dialogs([chat(3)]);
    let resolver = SenderResolver::new(&users, &dialogs, false);

    assert_eq!(resolver.sender(UserId(1), chat(3), "test"), MessageSender::Chat(chat(3)));
    assert_eq!(resolver.sender(UserId(1), chat(4), "test"), MessageSender::User(UserId(1)));
    assert_eq!(resolver.sender_for_dialog(DialogId(1), "test"), MessageSender::User(UserId(1)));
    assert_eq!(resolver.sender_for_dialog(chat(3), "test"), MessageSender::Chat(chat(3)));
}

#[test]
fn pure_projection_reports_once_and_touches_nothing() {
    let (users, dialogs) = (MemUsers::default(), MemDialogs::default());
    let resolver = SenderResolver::new(&users, &dialogs, true);

    let (logs, _guard) = count_logs();
    let sender = resolver.sender(UserId(0), DialogId(0), "test");
    assert_eq!(sender, MessageSender::User(SERVICE_NOTIFICATIONS));
    assert_eq!(logs.errors(), 1);
    assert!(users.service.lock().unwrap().is_empty());
    assert!(dialogs.created.lock().unwrap().is_empty());
}

#[test]
fn ensuring_projection_registers_service_users_for_bots() {
    let (users, dialogs) = (MemUsers::default(), MemDialogs::default());
    let bot = SenderResolver::new(&users, &dialogs, true);
    assert_eq!(bot.ensure_sender(UserId(0), DialogId(0), "test"), MessageSender::User(SERVICE_NOTIFICATIONS));
    assert_eq!(
        users.service.lock().unwrap().as_slice(),
        [ServiceUser::AnonymousBot, ServiceUser::ServiceNotifications]
    );

    let (users, dialogs) = (MemUsers::default(), MemDialogs::default());
    let user = SenderResolver::new(&users, &dialogs, false);
    assert_eq!(user.ensure_sender(UserId(0), DialogId(0), "test"), MessageSender::User(SERVICE_NOTIFICATIONS));
    assert!(users.service.lock().unwrap().is_empty());
}

#[test]
fn ensuring_projection_creates_missing_dialog() {
    let users = MemUsers::default();
    let dialogs = MemDialogs::default();
    dialogs.info.lock().unwrap().insert(chat(7));
    let resolver = SenderResolver::new(&users, &dialogs, false);

    let (logs, _guard) = count_logs();
    assert_eq!(resolver.ensure_sender_for_dialog(chat(7), "history"), MessageSender::Chat(chat(7)));
    assert_eq!(logs.errors(), 1);
    assert_eq!(dialogs.created.lock().unwrap().as_slice(), [(chat(7), "history")]);

    // Second time the dialog exists and nothing is reported.
    assert_eq!(resolver.ensure_sender_for_dialog(chat(7), "history"), MessageSender::Chat(chat(7)));
    assert_eq!(logs.errors(), 1);
}
