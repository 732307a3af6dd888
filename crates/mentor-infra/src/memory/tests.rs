//! Blog workflow tests against the in-memory content store.

use std::sync::Arc;

use async_trait::async_trait;
use uuid::Uuid;

use mentor_core::domain::{Post, PostDraft, PostSummary, Role};
use mentor_core::error::{DomainError, RepoError};
use mentor_core::ports::{
    AuthError, BaseRepository, IdentityProvider, PasswordService, PostRepository, RoleRepository,
};
use mentor_core::services::{
    AdminDelete, AdminGuard, AdminIdentity, AdminManager, Authorization, BLOG_INDEX_PATH,
    BlogReader, Confirmation, DeleteOutcome, DetailView, PostService, SitemapGenerator,
};

use super::{InMemoryPostRepository, InMemoryRoleRepository};
use crate::auth::{JwtConfig, JwtTokenService, LocalIdentityProvider};

/// Stores passwords verbatim so tests skip Argon2's cost.
struct PlainPasswords;

impl PasswordService for PlainPasswords {
    fn hash(&self, password: &str) -> Result<String, AuthError> {
        Ok(format!("plain:{password}"))
    }

    fn verify(&self, password: &str, hash: &str) -> Result<bool, AuthError> {
        Ok(hash == format!("plain:{password}"))
    }
}

/// A content store that cannot be reached.
struct UnreachableStore;

#[async_trait]
impl BaseRepository<Post, Uuid> for UnreachableStore {
    async fn find_by_id(&self, _id: Uuid) -> Result<Option<Post>, RepoError> {
        Err(RepoError::Connection("connection refused".to_string()))
    }

    async fn insert(&self, _post: Post) -> Result<Post, RepoError> {
        Err(RepoError::Connection("connection refused".to_string()))
    }

    async fn update(&self, _post: Post) -> Result<Post, RepoError> {
        Err(RepoError::Connection("connection refused".to_string()))
    }

    async fn delete(&self, _id: Uuid) -> Result<bool, RepoError> {
        Err(RepoError::Connection("connection refused".to_string()))
    }
}

#[async_trait]
impl PostRepository for UnreachableStore {
    async fn list_published(&self, _limit: Option<usize>) -> Result<Vec<PostSummary>, RepoError> {
        Err(RepoError::Connection("connection refused".to_string()))
    }

    async fn find_published_by_slug(&self, _slug: &str) -> Result<Option<Post>, RepoError> {
        Err(RepoError::Connection("connection refused".to_string()))
    }

    async fn find_by_slug(&self, _slug: &str) -> Result<Option<Post>, RepoError> {
        Err(RepoError::Connection("connection refused".to_string()))
    }

    async fn list_all(&self) -> Result<Vec<Post>, RepoError> {
        Err(RepoError::Connection("connection refused".to_string()))
    }
}

struct FailingRoles;

#[async_trait]
impl RoleRepository for FailingRoles {
    async fn find_role(&self, _user_id: Uuid) -> Result<Role, RepoError> {
        Err(RepoError::Query("user_roles unavailable".to_string()))
    }
}

struct Harness {
    idp: Arc<LocalIdentityProvider>,
    roles: Arc<InMemoryRoleRepository>,
    posts: PostService,
    admin: AdminManager,
    reader: BlogReader,
}

fn identity_provider() -> Arc<LocalIdentityProvider> {
    Arc::new(LocalIdentityProvider::new(
        Arc::new(JwtTokenService::new(JwtConfig {
            secret: "workflow-test-secret".to_string(),
            expiration_hours: 1,
            issuer: "workflow-test".to_string(),
        })),
        Arc::new(PlainPasswords),
    ))
}

fn harness_with(repo: Arc<dyn PostRepository>) -> Harness {
    let idp = identity_provider();
    let roles = Arc::new(InMemoryRoleRepository::new());
    let posts = PostService::new(repo);
    let admin = AdminManager::new(AdminGuard::new(idp.clone(), roles.clone()), posts.clone());
    let reader = BlogReader::new(posts.clone());

    Harness {
        idp,
        roles,
        posts,
        admin,
        reader,
    }
}

fn harness() -> Harness {
    harness_with(Arc::new(InMemoryPostRepository::new()))
}

/// Register an account with `role` and return its access token.
async fn sign_in_as(h: &Harness, email: &str, role: Role) -> String {
    let user_id = h.idp.register(email, "pw").await.unwrap();
    h.roles.assign(user_id, role).await;
    h.idp.sign_in(email, "pw").await.unwrap().access_token
}

async fn operator(h: &Harness) -> AdminIdentity {
    let token = sign_in_as(h, "ops@example.com", Role::Admin).await;
    match h.admin.authorize(Some(&token)).await {
        Authorization::Authorized(admin) => admin,
        other => panic!("expected admin, got {other:?}"),
    }
}

#[tokio::test]
async fn test_unpublished_post_is_hidden_until_published() {
    let h = harness();
    let admin = operator(&h).await;

    let draft = PostDraft::new("My First Trade!", "<p>hi</p>").published(false);
    let created = h.posts.create(&admin, &draft).await.unwrap();
    assert_eq!(created.slug, "my-first-trade");

    let hidden = h.posts.get_by_slug("my-first-trade").await;
    assert!(matches!(hidden, Err(DomainError::NotFound { .. })));

    let mut edit = PostDraft::from(&created);
    edit.published = true;
    h.posts.update(&admin, created.id, &edit).await.unwrap();

    let visible = h.posts.get_by_slug("my-first-trade").await.unwrap();
    assert_eq!(visible.id, created.id);
    assert!(visible.published);
    assert!(visible.updated_at.is_some());
}

#[tokio::test]
async fn test_create_then_read_round_trips_draft() {
    let h = harness();
    let admin = operator(&h).await;
    let draft = PostDraft::new("Reading the Order Book", "<p>Depth matters.</p>")
        .with_excerpt("Bids, asks and what sits between them")
        .with_cover_image("https://cdn.example.com/order-book.png")
        .published(true);

    h.posts.create(&admin, &draft).await.unwrap();
    let stored = h.posts.get_by_slug("reading-the-order-book").await.unwrap();

    assert_eq!(stored.title, draft.title);
    assert_eq!(stored.content, draft.content);
    assert_eq!(stored.excerpt, draft.excerpt);
    assert_eq!(stored.cover_image, draft.cover_image);
    assert_eq!(stored.published, draft.published);
    assert_eq!(stored.author_id, admin.user_id());
}

#[tokio::test]
async fn test_duplicate_derived_slug_conflicts() {
    let h = harness();
    let admin = operator(&h).await;

    h.posts
        .create(&admin, &PostDraft::new("Gold Setup", "first"))
        .await
        .unwrap();
    let second = h
        .posts
        .create(&admin, &PostDraft::new("Gold Setup!", "second"))
        .await;

    assert!(matches!(second, Err(DomainError::Conflict(_))));
    assert_eq!(h.posts.list_all(&admin).await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_invalid_draft_writes_nothing() {
    let h = harness();
    let admin = operator(&h).await;

    let result = h.posts.create(&admin, &PostDraft::new("Title", "  ")).await;

    assert!(matches!(result, Err(DomainError::Validation(_))));
    assert!(h.posts.list_all(&admin).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_delete_is_permanent_and_idempotent() {
    let h = harness();
    let admin = operator(&h).await;
    let post = h
        .posts
        .create(&admin, &PostDraft::new("Exit Rules", "body").published(true))
        .await
        .unwrap();

    let first = h.posts.delete(&admin, post.id).await.unwrap();
    let second = h.posts.delete(&admin, post.id).await.unwrap();

    assert_eq!(first, DeleteOutcome::Deleted);
    assert_eq!(second, DeleteOutcome::AlreadyAbsent);
    assert!(h.posts.get_by_slug("exit-rules").await.unwrap_err().is_not_found());
}

#[tokio::test]
async fn test_list_published_excludes_drafts_newest_first() {
    let h = harness();
    let admin = operator(&h).await;
    for (title, published) in [("One", true), ("Two", false), ("Three", true), ("Four", true)] {
        h.posts
            .create(&admin, &PostDraft::new(title, "body").published(published))
            .await
            .unwrap();
    }

    let all = h.posts.list_published(None).await.unwrap();
    let slugs: Vec<&str> = all.iter().map(|p| p.slug.as_str()).collect();
    assert_eq!(slugs, vec!["four", "three", "one"]);

    let limited = h.posts.list_published(Some(2)).await.unwrap();
    assert_eq!(limited.len(), 2);
    assert_eq!(limited[0].slug, "four");

    assert_eq!(h.posts.list_all(&admin).await.unwrap().len(), 4);
}

#[tokio::test]
async fn test_update_missing_post_is_not_found() {
    let h = harness();
    let admin = operator(&h).await;

    let result = h
        .posts
        .update(&admin, Uuid::new_v4(), &PostDraft::new("Ghost", "body"))
        .await;

    assert!(matches!(result, Err(DomainError::NotFound { .. })));
}

#[tokio::test]
async fn test_update_slug_collision_conflicts() {
    let h = harness();
    let admin = operator(&h).await;
    h.posts
        .create(&admin, &PostDraft::new("Support and Resistance", "a"))
        .await
        .unwrap();
    let other = h
        .posts
        .create(&admin, &PostDraft::new("Trend Lines", "b"))
        .await
        .unwrap();

    let clash = h
        .posts
        .update(
            &admin,
            other.id,
            &PostDraft::new("Trend Lines", "b").with_slug("support-and-resistance"),
        )
        .await;
    assert!(matches!(clash, Err(DomainError::Conflict(_))));

    let keep_own = h
        .posts
        .update(&admin, other.id, &PostDraft::new("Trend Lines", "edited"))
        .await
        .unwrap();
    assert_eq!(keep_own.slug, "trend-lines");
    assert_eq!(keep_own.content, "edited");
}

#[tokio::test]
async fn test_guard_outcomes() {
    let h = harness();
    let admin_token = sign_in_as(&h, "admin@example.com", Role::Admin).await;
    let super_token = sign_in_as(&h, "root@example.com", Role::Superadmin).await;
    let reader_token = sign_in_as(&h, "reader@example.com", Role::None).await;

    assert!(h.admin.authorize(Some(&admin_token)).await.is_authorized());
    assert!(h.admin.authorize(Some(&super_token)).await.is_authorized());
    assert!(matches!(
        h.admin.authorize(Some(&reader_token)).await,
        Authorization::Denied
    ));
    assert!(matches!(
        h.admin.authorize(None).await,
        Authorization::Unauthenticated
    ));
    assert!(matches!(
        h.admin.authorize(Some("not-a-token")).await,
        Authorization::Unauthenticated
    ));
}

#[tokio::test]
async fn test_sign_out_returns_to_unauthenticated() {
    let h = harness();
    let token = sign_in_as(&h, "ops@example.com", Role::Admin).await;
    assert!(h.admin.authorize(Some(&token)).await.is_authorized());

    h.admin.sign_out(&token).await.unwrap();

    assert!(matches!(
        h.admin.authorize(Some(&token)).await,
        Authorization::Unauthenticated
    ));
}

#[tokio::test]
async fn test_role_lookup_failure_denies() {
    let idp = identity_provider();
    idp.register("ops@example.com", "pw").await.unwrap();
    let token = idp.sign_in("ops@example.com", "pw").await.unwrap().access_token;
    let guard = AdminGuard::new(idp, Arc::new(FailingRoles));

    assert!(matches!(
        guard.authorize(Some(&token)).await,
        Authorization::Denied
    ));
}

#[tokio::test]
async fn test_admin_delete_requires_confirmation() {
    let h = harness();
    let admin = operator(&h).await;
    let post = h
        .admin
        .submit(&admin, None, &PostDraft::new("Position Sizing", "body"))
        .await
        .unwrap();

    let pending = h
        .admin
        .delete(&admin, post.id, Confirmation::Pending)
        .await
        .unwrap();
    assert_eq!(pending, AdminDelete::ConfirmationRequired);
    assert_eq!(h.admin.dashboard(&admin).await.unwrap().len(), 1);

    let done = h
        .admin
        .delete(&admin, post.id, Confirmation::Confirmed)
        .await
        .unwrap();
    assert_eq!(done, AdminDelete::Done(DeleteOutcome::Deleted));
    assert!(h.admin.dashboard(&admin).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_edit_form_then_submit_updates() {
    let h = harness();
    let admin = operator(&h).await;
    let post = h
        .admin
        .submit(
            &admin,
            None,
            &PostDraft::new("Candles 101", "body").with_excerpt("Basics"),
        )
        .await
        .unwrap();

    let mut form = h.admin.edit_form(&admin, post.id).await.unwrap();
    assert_eq!(form.title, "Candles 101");
    assert_eq!(form.slug.as_deref(), Some("candles-101"));
    assert_eq!(form.excerpt.as_deref(), Some("Basics"));

    form.content = "<p>Wicks and bodies</p>".to_string();
    let updated = h.admin.submit(&admin, Some(post.id), &form).await.unwrap();

    assert_eq!(updated.id, post.id);
    assert_eq!(updated.content, "<p>Wicks and bodies</p>");
    assert_eq!(updated.created_at, post.created_at);
}

#[tokio::test]
async fn test_reader_listing_and_detail_states() {
    let h = harness();
    assert!(h.reader.teaser().await.is_empty());

    let admin = operator(&h).await;
    for title in ["A", "B", "C", "D"] {
        h.posts
            .create(&admin, &PostDraft::new(title, "body").published(true))
            .await
            .unwrap();
    }

    let teaser = h.reader.teaser().await;
    assert_eq!(teaser.posts.len(), 3);
    assert!(teaser.notice.is_none());
    assert_eq!(h.reader.listing(None).await.posts.len(), 4);

    assert!(matches!(h.reader.detail("a").await, DetailView::Found { .. }));
    match h.reader.detail("missing-post").await {
        DetailView::NotFound { slug, back_link } => {
            assert_eq!(slug, "missing-post");
            assert_eq!(back_link, BLOG_INDEX_PATH);
        }
        other => panic!("expected not found, got {other:?}"),
    }
}

#[tokio::test]
async fn test_reader_degrades_when_store_unreachable() {
    let h = harness_with(Arc::new(UnreachableStore));

    let listing = h.reader.listing(None).await;
    assert!(listing.is_empty());
    assert!(listing.notice.is_some());

    assert!(matches!(
        h.reader.detail("anything").await,
        DetailView::Unavailable { .. }
    ));
    assert!(matches!(
        h.posts.list_published(None).await,
        Err(DomainError::ServiceUnavailable(_))
    ));
}

#[tokio::test]
async fn test_sitemap_lists_static_pages_and_published_posts() {
    let h = harness();
    let admin = operator(&h).await;
    h.posts
        .create(&admin, &PostDraft::new("Gold Setup", "body").published(true))
        .await
        .unwrap();
    h.posts
        .create(&admin, &PostDraft::new("Draft Idea", "body"))
        .await
        .unwrap();

    let generator = SitemapGenerator::new(h.posts.clone(), "https://example.com/");
    let sitemap = generator.generate().await;
    let xml = sitemap.to_xml();

    assert!(sitemap.includes_posts);
    assert_eq!(sitemap.entries.len(), 8);
    assert_eq!(xml.matches("<url>").count(), 8);
    assert!(xml.contains("<loc>https://example.com</loc>"));
    assert!(xml.contains("<loc>https://example.com/blog/gold-setup</loc>"));
    assert!(!xml.contains("draft-idea"));
    assert_eq!(xml.matches("<lastmod>").count(), 1);
}

#[tokio::test]
async fn test_sitemap_falls_back_to_static_pages() {
    let h = harness_with(Arc::new(UnreachableStore));
    let generator = SitemapGenerator::new(h.posts.clone(), "https://example.com");

    let sitemap = generator.generate().await;

    assert!(!sitemap.includes_posts);
    assert_eq!(sitemap.entries.len(), 7);
    assert_eq!(sitemap.to_xml().matches("<url>").count(), 7);
}

#[tokio::test]
async fn test_sitemap_lastmod_prefers_update_time() {
    let h = harness();
    let admin = operator(&h).await;
    let post = h
        .posts
        .create(&admin, &PostDraft::new("Gold Setup", "body").published(true))
        .await
        .unwrap();
    let updated = h
        .posts
        .update(&admin, post.id, &PostDraft::new("Gold Setup", "v2").published(true))
        .await
        .unwrap();

    let sitemap = SitemapGenerator::new(h.posts.clone(), "https://example.com")
        .generate()
        .await;
    let entry = sitemap
        .entries
        .iter()
        .find(|e| e.loc.ends_with("/blog/gold-setup"))
        .unwrap();

    assert_eq!(entry.lastmod, updated.updated_at);
}

#[tokio::test]
async fn test_legacy_slug_stays_readable() {
    let repo = Arc::new(InMemoryPostRepository::new());
    let mut legacy = Post::new(
        Uuid::new_v4(),
        PostDraft::new("Gold Setup", "<p>old</p>").validate().unwrap(),
    );
    legacy.slug = "gold_setup".to_string();
    legacy.published = true;
    repo.insert(legacy.clone()).await.unwrap();
    let h = harness_with(repo);

    let found = h.posts.get_by_slug("gold_setup").await.unwrap();
    assert_eq!(found.id, legacy.id);
    assert!(matches!(h.reader.detail("gold_setup").await, DetailView::Found { .. }));

    assert!(h.posts.get_by_slug("").await.unwrap_err().is_not_found());
    assert!(h.posts.get_by_slug("blog/gold_setup").await.unwrap_err().is_not_found());
}
