use std::sync::Arc;

use turnstile::session::{Session, SessionStore};
use turnstile::user::User;

#[tokio::test]
async fn test_add_then_find_returns_same_session() {
    let store = SessionStore::new();
    let added = store.add(Session::with_id("hello")).await;

    let found = store.find("hello").await.unwrap();

    assert!(Arc::ptr_eq(&added, &found));
    assert_eq!(found.id(), "hello");
}

#[tokio::test]
async fn test_find_unknown_id() {
    let store = SessionStore::new();

    assert!(store.find("world").await.is_none());
}

#[tokio::test]
async fn test_remove_session() {
    let store = SessionStore::new();
    store.add(Session::with_id("helloworld")).await;

    let removed = store.remove("helloworld").await;

    assert_eq!(removed.unwrap().id(), "helloworld");
    assert!(store.find("helloworld").await.is_none());
    assert!(store.remove("helloworld").await.is_none());
}

#[tokio::test]
async fn test_clear_sessions() {
    let store = SessionStore::new();
    store.add(Session::with_id("a")).await;
    store.add(Session::with_id("b")).await;
    assert_eq!(store.len().await, 2);

    store.clear().await;

    assert!(store.is_empty().await);
    assert!(store.find("a").await.is_none());
}

#[tokio::test]
async fn test_add_overwrites_same_id() {
    let store = SessionStore::new();
    store.add(Session::with_id("dup")).await;

    let mut replacement = Session::with_id("dup");
    replacement.set_attribute("marker", 7u32);
    store.add(replacement).await;

    assert_eq!(store.len().await, 1);
    let found = store.find("dup").await.unwrap();
    assert_eq!(found.attribute::<u32>("marker"), Some(&7));
}

#[tokio::test]
async fn test_cloned_handles_share_sessions() {
    let store = SessionStore::new();
    let other = store.clone();

    store.add(Session::with_id("shared")).await;

    assert!(other.find("shared").await.is_some());
}

#[tokio::test]
async fn test_concurrent_adds_from_many_tasks() {
    let store = SessionStore::new();

    let tasks: Vec<_> = (0..32)
        .map(|i| {
            let store = store.clone();
            tokio::spawn(async move {
                store.add(Session::with_id(format!("s-{i}"))).await;
                store.find(&format!("s-{i}")).await.is_some()
            })
        })
        .collect();

    for task in tasks {
        assert!(task.await.unwrap());
    }
    assert_eq!(store.len().await, 32);
}

#[test]
fn test_generated_ids_are_unique() {
    let a = Session::new();
    let b = Session::new();

    assert_ne!(a.id(), b.id());
    assert_eq!(a.id().len(), 36);
}

#[test]
fn test_session_attributes() {
    let mut session = Session::new();
    session.set_attribute("user", User::new("gugu", "password", "gugu@naver.com"));

    let user = session.attribute::<User>("user").unwrap();
    assert_eq!(user.account, "gugu");
    assert!(session.has_attribute("user"));

    // Wrong type yields nothing rather than panicking
    assert!(session.attribute::<String>("user").is_none());

    session.remove_attribute("user");
    assert!(!session.has_attribute("user"));
}
