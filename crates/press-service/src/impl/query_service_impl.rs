//! Content query service implementation.

use crate::dto::PostsArgs;
use crate::menu_tree::{menu_item_from_post, MenuTreeBuilder};
use crate::meta_filter::filter_meta;
use crate::module::Repositories;
use crate::query_service::QueryService;
use crate::thumbnail::ThumbnailResolver;
use async_trait::async_trait;
use press_config::MediaConfig;
use press_core::{
    meta_key, post_status, post_type, rules, taxonomy, MenuItem, MetaId, MetaKeys, MetaMap, Post, PostId,
    PostMeta, PressError, PressResult, Term, ValidateExt, Viewer,
};
use press_repository::{
    PostFilter, PostMetaFilter, PostMetaRepository, PostRepository, TermFilter, TermRelationshipFilter,
    TermRelationshipRepository, TermRepository, TermTaxonomyFilter, TermTaxonomyRepository,
};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::debug;

/// Item type of menu entries that link a post object.
const LINKS_POST_OBJECT: &str = "post_type";

/// Content query service over the repository traits.
pub struct QueryServiceImpl {
    posts: Arc<dyn PostRepository>,
    postmeta: Arc<dyn PostMetaRepository>,
    terms: Arc<dyn TermRepository>,
    term_taxonomy: Arc<dyn TermTaxonomyRepository>,
    term_relationships: Arc<dyn TermRelationshipRepository>,
    thumbnails: ThumbnailResolver,
}

impl QueryServiceImpl {
    /// Creates a new query service.
    #[must_use]
    pub fn new(repositories: &Repositories, media: MediaConfig) -> Self {
        Self {
            posts: Arc::clone(&repositories.posts),
            postmeta: Arc::clone(&repositories.postmeta),
            terms: Arc::clone(&repositories.terms),
            term_taxonomy: Arc::clone(&repositories.term_taxonomy),
            term_relationships: Arc::clone(&repositories.term_relationships),
            thumbnails: ThumbnailResolver::new(
                Arc::clone(&repositories.posts),
                Arc::clone(&repositories.postmeta),
                media,
            ),
        }
    }

    /// Returns true if the post has a row. Meta of absent posts is orphaned.
    async fn post_exists(&self, id: PostId) -> PressResult<bool> {
        Ok(self.posts.find_by_id(id).await?.is_some())
    }

    fn require_text(field: &str, value: &str) -> PressResult<()> {
        rules::not_blank(value).map_err(|_| PressError::Validation(format!("{}: must not be blank", field)))
    }

    /// Fills empty titles of items linking a post object with that post's title.
    async fn fill_linked_titles(&self, items: &mut [MenuItem]) -> PressResult<()> {
        let linked: Vec<PostId> = items
            .iter()
            .filter(|item| item.title.is_empty() && item.item_type == LINKS_POST_OBJECT && item.object_id != 0)
            .map(|item| PostId::new(item.object_id))
            .collect();
        if linked.is_empty() {
            return Ok(());
        }

        let titles: HashMap<PostId, String> = self
            .posts
            .find(&PostFilter::new().ids(linked))
            .await?
            .into_iter()
            .map(|post| (post.id, post.post_title))
            .collect();

        for item in items.iter_mut() {
            if item.title.is_empty() && item.item_type == LINKS_POST_OBJECT {
                if let Some(title) = titles.get(&PostId::new(item.object_id)) {
                    item.title.clone_from(title);
                }
            }
        }
        Ok(())
    }
}

#[async_trait]
impl QueryService for QueryServiceImpl {
    async fn get_viewer(&self) -> Viewer {
        Viewer::anonymous()
    }

    async fn get_posts(&self, args: PostsArgs) -> PressResult<Vec<Post>> {
        debug!("Listing published posts of type {}", args.post_type);
        args.validate_request()?;

        self.posts
            .find(&PostFilter::new().status(post_status::PUBLISH).post_type(args.post_type))
            .await
    }

    async fn get_post_by_id(&self, id: PostId) -> PressResult<Post> {
        debug!("Getting post: {}", id);

        self.posts
            .find_by_id(id)
            .await?
            .ok_or_else(|| PressError::not_found("Post", id))
    }

    async fn get_post_by_name(&self, name: &str) -> PressResult<Post> {
        debug!("Getting post by name: {}", name);
        Self::require_text("name", name)?;

        let posts = self
            .posts
            .find(&PostFilter::new().name(name).status(post_status::PUBLISH).limit(1))
            .await?;
        posts
            .into_iter()
            .next()
            .ok_or_else(|| PressError::not_found("Post", name))
    }

    async fn get_post_thumbnail(&self, id: PostId) -> PressResult<Option<String>> {
        self.thumbnails.resolve(id).await
    }

    async fn get_postmeta(&self, id: PostId, keys: Option<&MetaKeys>) -> PressResult<MetaMap> {
        debug!("Getting meta of post {}", id);

        let (exists, rows) = futures::try_join!(self.post_exists(id), self.postmeta.find_for_post(id, keys))?;
        if !exists {
            debug!("Post {} does not exist; its meta is orphaned", id);
            return Ok(MetaMap::new());
        }
        Ok(filter_meta(rows, keys))
    }

    async fn get_post_meta_by_id(&self, id: MetaId) -> PressResult<PostMeta> {
        debug!("Getting post meta: {}", id);

        let meta = self
            .postmeta
            .find_by_id(id)
            .await?
            .ok_or_else(|| PressError::not_found("PostMeta", id))?;
        if !self.post_exists(meta.post_id).await? {
            debug!("Post meta {} belongs to missing post {}", id, meta.post_id);
            return Err(PressError::not_found("PostMeta", id));
        }
        Ok(meta)
    }

    async fn get_menu(&self, name: &str) -> PressResult<Vec<MenuItem>> {
        debug!("Getting menu: {}", name);
        Self::require_text("name", name)?;

        let term_ids = self
            .terms
            .find_by_slug(name)
            .await?
            .into_iter()
            .map(|term| term.term_id)
            .collect::<Vec<_>>();
        if term_ids.is_empty() {
            return Err(PressError::not_found("Menu", name));
        }

        let menu = self
            .term_taxonomy
            .find(&TermTaxonomyFilter::new().term_ids(term_ids).taxonomy(taxonomy::NAV_MENU))
            .await?
            .into_iter()
            .next()
            .ok_or_else(|| PressError::not_found("Menu", name))?;

        let item_ids: Vec<PostId> = self
            .term_relationships
            .find(&TermRelationshipFilter::new().term_taxonomy_ids(vec![menu.term_taxonomy_id]))
            .await?
            .into_iter()
            .map(|rel| rel.object_id)
            .collect();
        if item_ids.is_empty() {
            return Ok(Vec::new());
        }

        let post_filter = PostFilter::new()
            .ids(item_ids.clone())
            .post_type(post_type::NAV_MENU_ITEM)
            .status(post_status::PUBLISH);
        let meta_filter = PostMetaFilter::new().post_ids(item_ids);
        let (items, meta) = futures::try_join!(self.posts.find(&post_filter), self.postmeta.find(&meta_filter))?;

        let mut meta_by_post: HashMap<PostId, MetaMap> = HashMap::new();
        for row in meta {
            if let Some(key) = row.meta_key {
                meta_by_post.entry(row.post_id).or_default().insert_first(key, row.meta_value);
            }
        }

        let empty = MetaMap::new();
        let mut records: Vec<MenuItem> = items
            .iter()
            .map(|post| menu_item_from_post(post, meta_by_post.get(&post.id).unwrap_or(&empty)))
            .collect();
        self.fill_linked_titles(&mut records).await?;

        debug!("Menu {} has {} items", name, records.len());
        Ok(MenuTreeBuilder::build(records))
    }

    async fn get_post_terms(&self, id: PostId, taxonomy: &str) -> PressResult<Vec<Term>> {
        debug!("Getting {} terms of post {}", taxonomy, id);
        Self::require_text("taxonomy", taxonomy)?;

        let tt_ids = self
            .term_relationships
            .find(&TermRelationshipFilter::new().object_ids(vec![id]))
            .await?
            .into_iter()
            .map(|rel| rel.term_taxonomy_id)
            .collect::<Vec<_>>();
        if tt_ids.is_empty() {
            return Ok(Vec::new());
        }

        let term_ids = self
            .term_taxonomy
            .find(&TermTaxonomyFilter::new().ids(tt_ids).taxonomy(taxonomy))
            .await?
            .into_iter()
            .map(|tt| tt.term_id)
            .collect::<Vec<_>>();
        if term_ids.is_empty() {
            return Ok(Vec::new());
        }

        self.terms.find(&TermFilter::new().term_ids(term_ids)).await
    }
}
