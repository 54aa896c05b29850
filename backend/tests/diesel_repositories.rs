//! Integration tests for the Diesel/SQLite adapters.
//!
//! Exercises the repository ports against a real migrated database,
//! concentrating on the behaviour the domain layer relies on:
//! constraint violations, cascade deletion, derived counts, and the
//! feed union.

use backend::domain::ports::{
    EngagementRepository, PostRepository, RepositoryError, SocialGraphRepository, UserRepository,
};
use backend::domain::{CommentBody, Email, NewUser, PostBody, UserId, Username};
use backend::outbound::persistence::{
    DbPool, DieselEngagementRepository, DieselPostRepository, DieselSocialGraphRepository,
    DieselUserRepository,
};
use tempfile::TempDir;

mod support;

struct Repos {
    _dir: TempDir,
    users: DieselUserRepository,
    posts: DieselPostRepository,
    engagement: DieselEngagementRepository,
    graph: DieselSocialGraphRepository,
}

fn repos() -> Repos {
    let (dir, pool) = support::test_pool();
    Repos {
        _dir: dir,
        users: DieselUserRepository::new(pool.clone()),
        posts: DieselPostRepository::new(pool.clone()),
        engagement: DieselEngagementRepository::new(pool.clone()),
        graph: DieselSocialGraphRepository::new(pool),
    }
}

fn new_user(username: &str) -> NewUser {
    NewUser {
        username: Username::new(username).expect("valid username"),
        email: Email::new(format!("{username}@example.com")).expect("valid email"),
        password_hash: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdHNhbHQ$aGFzaGhhc2g".to_owned(),
    }
}

async fn seed_user(users: &DieselUserRepository, username: &str) -> UserId {
    users
        .create(new_user(username))
        .await
        .expect("create user")
}

#[tokio::test]
async fn user_uniqueness_is_enforced_by_the_store() {
    let repos = repos();
    seed_user(&repos.users, "alice").await;

    let duplicate = repos.users.create(new_user("alice")).await;
    assert_eq!(duplicate, Err(RepositoryError::UniqueViolation));
}

#[tokio::test]
async fn user_lookups_agree_across_keys() {
    let repos = repos();
    let id = seed_user(&repos.users, "alice").await;

    let by_name = repos
        .users
        .find_by_username("alice")
        .await
        .expect("query")
        .expect("found");
    let by_email = repos
        .users
        .find_by_email("alice@example.com")
        .await
        .expect("query")
        .expect("found");
    let by_id = repos
        .users
        .find_by_id(id)
        .await
        .expect("query")
        .expect("found");

    assert_eq!(by_name, by_email);
    assert_eq!(by_name, by_id);
    assert!(repos
        .users
        .find_by_username("nobody")
        .await
        .expect("query")
        .is_none());
}

#[tokio::test]
async fn annotations_are_derived_from_engagement_rows() {
    let repos = repos();
    let alice = seed_user(&repos.users, "alice").await;
    let bob = seed_user(&repos.users, "bob").await;

    let post = repos
        .posts
        .create(alice, PostBody::new("hello").expect("valid body"))
        .await
        .expect("create post");
    assert_eq!(post.comments_count, 0);
    assert_eq!(post.likes_count, 0);
    assert!(!post.is_liked);

    repos
        .engagement
        .add_comment(post.id, bob, CommentBody::new("hi").expect("valid body"))
        .await
        .expect("add comment");
    repos
        .engagement
        .add_like(post.id, bob)
        .await
        .expect("add like");

    let for_bob = repos
        .posts
        .find(post.id, Some(bob))
        .await
        .expect("query")
        .expect("found");
    assert_eq!(for_bob.comments_count, 1);
    assert_eq!(for_bob.likes_count, 1);
    assert!(for_bob.is_liked);
    assert_eq!(for_bob.username, "alice");

    let anonymous = repos
        .posts
        .find(post.id, None)
        .await
        .expect("query")
        .expect("found");
    assert!(!anonymous.is_liked);
}

#[tokio::test]
async fn double_likes_hit_the_primary_key() {
    let repos = repos();
    let alice = seed_user(&repos.users, "alice").await;
    let post = repos
        .posts
        .create(alice, PostBody::new("once").expect("valid body"))
        .await
        .expect("create post");

    repos
        .engagement
        .add_like(post.id, alice)
        .await
        .expect("first like");
    let second = repos.engagement.add_like(post.id, alice).await;
    assert_eq!(second, Err(RepositoryError::UniqueViolation));

    assert!(repos
        .engagement
        .remove_like(post.id, alice)
        .await
        .expect("remove"));
    assert!(!repos
        .engagement
        .remove_like(post.id, alice)
        .await
        .expect("second remove is a no-op"));
}

#[tokio::test]
async fn deleting_a_post_cascades_to_comments_and_likes() {
    let repos = repos();
    let alice = seed_user(&repos.users, "alice").await;
    let bob = seed_user(&repos.users, "bob").await;

    let post = repos
        .posts
        .create(alice, PostBody::new("short lived").expect("valid body"))
        .await
        .expect("create post");
    repos
        .engagement
        .add_comment(post.id, bob, CommentBody::new("bye").expect("valid body"))
        .await
        .expect("add comment");
    repos
        .engagement
        .add_like(post.id, bob)
        .await
        .expect("add like");

    repos.posts.delete(post.id).await.expect("delete post");

    assert!(repos
        .posts
        .find(post.id, None)
        .await
        .expect("query")
        .is_none());
    assert!(repos
        .engagement
        .comments_for(post.id)
        .await
        .expect("query")
        .is_empty());
    // The like rows went with the post, so removal finds nothing.
    assert!(!repos
        .engagement
        .remove_like(post.id, bob)
        .await
        .expect("remove"));

    let missing = repos.posts.delete(post.id).await;
    assert_eq!(missing, Err(RepositoryError::NotFound));
}

#[tokio::test]
async fn feed_unions_own_posts_with_followed_authors() {
    let repos = repos();
    let alice = seed_user(&repos.users, "alice").await;
    let bob = seed_user(&repos.users, "bob").await;
    let carol = seed_user(&repos.users, "carol").await;

    for (author, text) in [(alice, "mine"), (bob, "followed"), (carol, "stranger")] {
        repos
            .posts
            .create(author, PostBody::new(text).expect("valid body"))
            .await
            .expect("create post");
    }
    repos
        .graph
        .add_edge(alice, bob)
        .await
        .expect("follow");

    let feed = repos
        .posts
        .followed_feed(alice, None)
        .await
        .expect("query");
    let bodies: Vec<&str> = feed.iter().map(|p| p.body.as_str()).collect();
    assert_eq!(bodies, vec!["followed", "mine"]);

    let authored = repos.posts.by_author(bob, None).await.expect("query");
    assert_eq!(authored.len(), 1);
    assert_eq!(authored[0].body, "followed");
}

#[tokio::test]
async fn follow_edges_are_directional_and_counted() {
    let repos = repos();
    let alice = seed_user(&repos.users, "alice").await;
    let bob = seed_user(&repos.users, "bob").await;
    let carol = seed_user(&repos.users, "carol").await;

    repos.graph.add_edge(bob, alice).await.expect("follow");
    repos.graph.add_edge(carol, alice).await.expect("follow");
    repos.graph.add_edge(alice, bob).await.expect("follow");

    let duplicate = repos.graph.add_edge(bob, alice).await;
    assert_eq!(duplicate, Err(RepositoryError::UniqueViolation));

    assert!(repos.graph.edge_exists(bob, alice).await.expect("query"));
    assert!(!repos.graph.edge_exists(alice, carol).await.expect("query"));

    let counts = repos.graph.follow_counts(alice).await.expect("query");
    assert_eq!(counts.followers, 2);
    assert_eq!(counts.followed, 1);

    assert!(repos.graph.remove_edge(bob, alice).await.expect("remove"));
    assert!(!repos
        .graph
        .remove_edge(bob, alice)
        .await
        .expect("second remove is a no-op"));
    let counts = repos.graph.follow_counts(alice).await.expect("query");
    assert_eq!(counts.followers, 1);
}
