use corkboard_common::account::{AccountError, AccountManager};
use corkboard_common::account_view::{avatar_glyph, MenuVisibility};
use corkboard_common::shoutbox::{ShoutError, Shoutbox, ShoutboxMode};
use corkboard_common::storage::{KeyValueStore, MemoryStore, SHOUTBOX_KEY};

/// A visitor registers, signs in, posts, and signs out; every component sees
/// the same store.
#[test]
fn register_login_shout_logout() {
    let store = MemoryStore::new();
    let accounts = AccountManager::new(store.clone());
    let shoutbox = Shoutbox::new(store.clone());

    // Signed out: read-only shoutbox, placeholder avatar.
    let session = accounts.current_session().unwrap();
    assert_eq!(avatar_glyph(session.as_ref()), "?");
    assert_eq!(
        ShoutboxMode::for_session(session.as_ref()),
        ShoutboxMode::ReadOnly
    );
    assert!(matches!(
        shoutbox.send(session.as_ref(), "anyone?"),
        Err(ShoutError::NotAuthenticated)
    ));
    assert!(store.get_item(SHOUTBOX_KEY).unwrap().is_none());

    accounts.register("alice", "wonderland").unwrap();
    let session = accounts.login("alice", "wonderland").unwrap();
    assert_eq!(avatar_glyph(Some(&session)), "A");
    assert!(MenuVisibility::for_session(Some(&session)).logout);

    let sent = shoutbox.send(Some(&session), "hello").unwrap().unwrap();
    let messages = shoutbox.messages().unwrap();
    assert_eq!(messages.len(), 1);
    assert_eq!(messages[0], sent);
    assert_eq!(messages[0].user, "alice");

    accounts.logout().unwrap();
    assert!(accounts.current_session().unwrap().is_none());

    // Messages outlive the session.
    assert_eq!(shoutbox.messages().unwrap().len(), 1);
}

/// A second manager over the same store (a page reload) sees the session and
/// the registered users.
#[test]
fn session_survives_reload() {
    let store = MemoryStore::new();
    {
        let accounts = AccountManager::new(store.clone());
        accounts.register("bob", "builder").unwrap();
        accounts.login("bob", "builder").unwrap();
    }

    let reloaded = AccountManager::new(store);
    let session = reloaded.current_session().unwrap().unwrap();
    assert_eq!(session.username, "bob");
    assert!(matches!(
        reloaded.register("bob", "other"),
        Err(AccountError::DuplicateUsername(_))
    ));
}

/// Messages carry a copy of the author's name, not a reference to the account.
#[test]
fn author_name_is_copied_into_messages() {
    let store = MemoryStore::new();
    let accounts = AccountManager::new(&store);
    let shoutbox = Shoutbox::new(&store);

    accounts.register("carol", "pw").unwrap();
    let carol = accounts.login("carol", "pw").unwrap();
    shoutbox.send(Some(&carol), "one").unwrap();
    shoutbox.send(Some(&carol), "  ").unwrap();
    shoutbox.send(Some(&carol), "two").unwrap();
    accounts.logout().unwrap();

    let texts: Vec<_> = shoutbox
        .messages()
        .unwrap()
        .into_iter()
        .map(|m| (m.user, m.text))
        .collect();
    assert_eq!(
        texts,
        [
            ("carol".to_string(), "one".to_string()),
            ("carol".to_string(), "two".to_string()),
        ]
    );
}
