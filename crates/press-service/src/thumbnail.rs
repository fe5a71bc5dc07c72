//! Featured image URL resolution.

use press_config::MediaConfig;
use press_core::{meta_key, PostId, PressResult};
use press_repository::{PostFilter, PostMetaFilter, PostMetaRepository, PostRepository};
use std::sync::Arc;
use tracing::{debug, warn};

/// Resolves a post's featured image URL.
///
/// The chain is post → `_thumbnail_id` → attachment → `_wp_attached_file`,
/// prefixed with the configured media base path. A missing link anywhere
/// yields `None`; only store failures are errors. Meta rows of a post that
/// does not exist are orphans and never resolve.
#[derive(Clone)]
pub struct ThumbnailResolver {
    posts: Arc<dyn PostRepository>,
    postmeta: Arc<dyn PostMetaRepository>,
    media: MediaConfig,
}

impl ThumbnailResolver {
    /// Creates a resolver reading posts and meta from the given repositories.
    #[must_use]
    pub fn new(posts: Arc<dyn PostRepository>, postmeta: Arc<dyn PostMetaRepository>, media: MediaConfig) -> Self {
        Self { posts, postmeta, media }
    }

    /// Returns the featured image URL of `post_id`, or `None` when the chain breaks.
    pub async fn resolve(&self, post_id: PostId) -> PressResult<Option<String>> {
        debug!("Resolving thumbnail for post {}", post_id);

        let Some(raw_id) = self.first_value(post_id, meta_key::THUMBNAIL_ID).await? else {
            return Ok(None);
        };

        let attachment_id = match raw_id.parse::<PostId>() {
            Ok(id) if !id.is_zero() => id,
            _ => {
                warn!("Post {} has a malformed thumbnail id '{}'", post_id, raw_id);
                return Ok(None);
            }
        };

        if !self.posts_exist(post_id, attachment_id).await? {
            debug!("Thumbnail chain of post {} references a missing post", post_id);
            return Ok(None);
        }

        let file = self
            .first_value(attachment_id, meta_key::ATTACHED_FILE)
            .await?
            .filter(|file| !file.is_empty());

        Ok(file.map(|file| format!("{}{}", self.media.base_path(), file)))
    }

    /// Returns true when both the post and its attachment have a posts row.
    async fn posts_exist(&self, post_id: PostId, attachment_id: PostId) -> PressResult<bool> {
        let found = self
            .posts
            .find(&PostFilter::new().ids(vec![post_id, attachment_id]))
            .await?;
        let has = |id: PostId| found.iter().any(|post| post.id == id);
        Ok(has(post_id) && has(attachment_id))
    }

    /// Returns the value of the lowest-id row with `key`, if any.
    async fn first_value(&self, post_id: PostId, key: &str) -> PressResult<Option<String>> {
        let rows = self
            .postmeta
            .find(&PostMetaFilter::new().post_id(post_id).key(key))
            .await?;
        Ok(rows.into_iter().next().and_then(|row| row.meta_value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use mockall::mock;
    use press_core::{post_status, post_type, MetaId, Post, PostMeta, PressError};
    use press_repository::InMemoryContentStore;

    mock! {
        MetaRepo {}

        #[async_trait]
        impl PostMetaRepository for MetaRepo {
            async fn find(&self, filter: &PostMetaFilter) -> PressResult<Vec<PostMeta>>;
        }
    }

    fn local_media() -> MediaConfig {
        MediaConfig {
            amazon_s3: false,
            upload_directory: "https://example.com/".to_string(),
        }
    }

    fn store_with_thumbnail(thumbnail_id: &str) -> Arc<InMemoryContentStore> {
        let store = InMemoryContentStore::new();
        store.insert_post(Post::new(PostId::new(10), post_type::POST, post_status::PUBLISH));
        store.insert_post(Post::new(PostId::new(20), post_type::ATTACHMENT, post_status::INHERIT));
        store.insert_meta(PostMeta::new(MetaId::new(1), PostId::new(10), meta_key::THUMBNAIL_ID, thumbnail_id));
        store.insert_meta(PostMeta::new(MetaId::new(2), PostId::new(20), meta_key::ATTACHED_FILE, "2024/01/cat.jpg"));
        Arc::new(store)
    }

    fn resolver(store: Arc<InMemoryContentStore>, media: MediaConfig) -> ThumbnailResolver {
        ThumbnailResolver::new(store.clone(), store, media)
    }

    fn with_meta_mock(repo: MockMetaRepo) -> ThumbnailResolver {
        ThumbnailResolver::new(Arc::new(InMemoryContentStore::new()), Arc::new(repo), local_media())
    }

    #[tokio::test]
    async fn test_resolves_local_upload_url() {
        let url = resolver(store_with_thumbnail("20"), local_media())
            .resolve(PostId::new(10))
            .await
            .unwrap();
        assert_eq!(url.as_deref(), Some("https://example.com/wp-content/uploads/2024/01/cat.jpg"));
    }

    #[tokio::test]
    async fn test_resolves_s3_url() {
        let media = MediaConfig {
            amazon_s3: true,
            upload_directory: "https://bucket.s3.amazonaws.com/".to_string(),
        };
        let url = resolver(store_with_thumbnail("20"), media)
            .resolve(PostId::new(10))
            .await
            .unwrap();
        assert_eq!(url.as_deref(), Some("https://bucket.s3.amazonaws.com/2024/01/cat.jpg"));
    }

    #[tokio::test]
    async fn test_no_thumbnail() {
        let resolver = resolver(store_with_thumbnail("20"), local_media());
        assert!(resolver.resolve(PostId::new(20)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_missing_attachment_file() {
        let resolver = resolver(store_with_thumbnail("30"), local_media());
        assert!(resolver.resolve(PostId::new(10)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_orphaned_attachment_meta_is_ignored() {
        // Attached-file meta exists for 30, but there is no post 30.
        let store = store_with_thumbnail("30");
        store.insert_meta(PostMeta::new(MetaId::new(3), PostId::new(30), meta_key::ATTACHED_FILE, "ghost.jpg"));

        let resolver = resolver(store, local_media());
        assert!(resolver.resolve(PostId::new(10)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_orphaned_thumbnail_meta_is_ignored() {
        let store = InMemoryContentStore::new();
        store.insert_post(Post::new(PostId::new(20), post_type::ATTACHMENT, post_status::INHERIT));
        store.insert_meta(PostMeta::new(MetaId::new(1), PostId::new(10), meta_key::THUMBNAIL_ID, "20"));
        store.insert_meta(PostMeta::new(MetaId::new(2), PostId::new(20), meta_key::ATTACHED_FILE, "cat.jpg"));

        let resolver = resolver(Arc::new(store), local_media());
        assert!(resolver.resolve(PostId::new(10)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_malformed_thumbnail_id_skips_second_lookup() {
        let mut repo = MockMetaRepo::new();
        repo.expect_find()
            .withf(|filter| filter.meta_keys.as_deref() == Some(&[meta_key::THUMBNAIL_ID.to_string()][..]))
            .times(1)
            .returning(|_| Ok(vec![PostMeta::new(MetaId::new(1), PostId::new(10), meta_key::THUMBNAIL_ID, "abc")]));

        assert!(with_meta_mock(repo).resolve(PostId::new(10)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_zero_thumbnail_id_is_none() {
        let mut repo = MockMetaRepo::new();
        repo.expect_find()
            .times(1)
            .returning(|_| Ok(vec![PostMeta::new(MetaId::new(1), PostId::new(10), meta_key::THUMBNAIL_ID, "0")]));

        assert!(with_meta_mock(repo).resolve(PostId::new(10)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_store_failure_propagates() {
        let mut repo = MockMetaRepo::new();
        repo.expect_find()
            .returning(|_| Err(PressError::Database("connection reset".to_string())));

        let err = with_meta_mock(repo).resolve(PostId::new(10)).await.unwrap_err();
        assert!(matches!(err, PressError::Database(_)));
    }
}
