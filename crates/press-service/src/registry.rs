//! Named query registry.
//!
//! Maps query names to typed handlers. The built-in queries are registered
//! by [`QueryRegistryBuilder::new`]; callers add or replace queries before
//! [`QueryRegistryBuilder::build`], after which the set is fixed.

use crate::dto::{MenuArgs, PostByNameArgs, PostIdArgs, PostMetaArgs, PostMetaByIdArgs, PostTermsArgs, PostsArgs};
use crate::module::Repositories;
use crate::query_service::QueryService;
use async_trait::async_trait;
use press_core::{BoxFuture, ErrorResponse, PressError, PressResult, ValidateExt};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::{json, Value};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, warn};
use validator::Validate;

/// Everything a query may read from.
#[derive(Clone)]
pub struct QueryContext {
    pub service: Arc<dyn QueryService>,
    pub repositories: Repositories,
}

/// A query callable by name with JSON arguments.
#[async_trait]
pub trait NamedQuery: Send + Sync {
    async fn execute(&self, ctx: &QueryContext, args: Value) -> PressResult<Value>;
}

/// Adapter turning a closure into a [`NamedQuery`].
pub struct FnQuery<F>(F);

/// Wraps a closure returning a boxed future.
///
/// ```ignore
/// let count = query_fn(|ctx, _args| Box::pin(async move {
///     let posts = ctx.service.get_posts(PostsArgs::default()).await?;
///     Ok(serde_json::json!(posts.len()))
/// }));
/// ```
pub fn query_fn<F>(f: F) -> FnQuery<F>
where
    F: for<'a> Fn(&'a QueryContext, Value) -> BoxFuture<'a, Value> + Send + Sync,
{
    FnQuery(f)
}

#[async_trait]
impl<F> NamedQuery for FnQuery<F>
where
    F: for<'a> Fn(&'a QueryContext, Value) -> BoxFuture<'a, Value> + Send + Sync,
{
    async fn execute(&self, ctx: &QueryContext, args: Value) -> PressResult<Value> {
        (self.0)(ctx, args).await
    }
}

/// Deserializes and validates query arguments. A missing argument object
/// counts as `{}`.
pub fn parse_args<T>(args: Value) -> PressResult<T>
where
    T: DeserializeOwned + Validate,
{
    let args = if args.is_null() {
        Value::Object(serde_json::Map::new())
    } else {
        args
    };
    let parsed: T = serde_json::from_value(args)?;
    parsed.validate_request()?;
    Ok(parsed)
}

/// Serializes a query result.
pub fn to_json<T: Serialize>(value: &T) -> PressResult<Value> {
    serde_json::to_value(value).map_err(|e| PressError::Internal(format!("Failed to serialize result: {}", e)))
}

/// Registers the built-in queries on a fresh builder.
fn with_builtins(builder: QueryRegistryBuilder) -> QueryRegistryBuilder {
    builder
        .register(
            "viewer",
            query_fn(|ctx, _args| Box::pin(async move { to_json(&ctx.service.get_viewer().await) })),
        )
        .register(
            "posts",
            query_fn(|ctx, args| {
                Box::pin(async move {
                    let args: PostsArgs = parse_args(args)?;
                    to_json(&ctx.service.get_posts(args).await?)
                })
            }),
        )
        .register(
            "post",
            query_fn(|ctx, args| {
                Box::pin(async move {
                    let args: PostIdArgs = parse_args(args)?;
                    to_json(&ctx.service.get_post_by_id(args.id).await?)
                })
            }),
        )
        .register(
            "postByName",
            query_fn(|ctx, args| {
                Box::pin(async move {
                    let args: PostByNameArgs = parse_args(args)?;
                    to_json(&ctx.service.get_post_by_name(&args.name).await?)
                })
            }),
        )
        .register(
            "postThumbnail",
            query_fn(|ctx, args| {
                Box::pin(async move {
                    let args: PostIdArgs = parse_args(args)?;
                    to_json(&ctx.service.get_post_thumbnail(args.id).await?)
                })
            }),
        )
        .register(
            "postmeta",
            query_fn(|ctx, args| {
                Box::pin(async move {
                    let args: PostMetaArgs = parse_args(args)?;
                    let keys = args.meta_keys();
                    to_json(&ctx.service.get_postmeta(args.id, keys.as_ref()).await?)
                })
            }),
        )
        .register(
            "postMetaById",
            query_fn(|ctx, args| {
                Box::pin(async move {
                    let args: PostMetaByIdArgs = parse_args(args)?;
                    to_json(&ctx.service.get_post_meta_by_id(args.id).await?)
                })
            }),
        )
        .register(
            "menu",
            query_fn(|ctx, args| {
                Box::pin(async move {
                    let args: MenuArgs = parse_args(args)?;
                    to_json(&ctx.service.get_menu(&args.name).await?)
                })
            }),
        )
        .register(
            "postTerms",
            query_fn(|ctx, args| {
                Box::pin(async move {
                    let args: PostTermsArgs = parse_args(args)?;
                    to_json(&ctx.service.get_post_terms(args.id, &args.taxonomy).await?)
                })
            }),
        )
}

/// Collects queries before the registry is frozen.
pub struct QueryRegistryBuilder {
    queries: BTreeMap<String, Arc<dyn NamedQuery>>,
    context: QueryContext,
}

impl QueryRegistryBuilder {
    /// Creates a builder holding the built-in queries.
    #[must_use]
    pub fn new(context: QueryContext) -> Self {
        with_builtins(Self {
            queries: BTreeMap::new(),
            context,
        })
    }

    /// Adds a query, replacing any query of the same name.
    #[must_use]
    pub fn register(mut self, name: impl Into<String>, query: impl NamedQuery + 'static) -> Self {
        self.queries.insert(name.into(), Arc::new(query));
        self
    }

    /// Adds an already shared query.
    #[must_use]
    pub fn register_shared(mut self, name: impl Into<String>, query: Arc<dyn NamedQuery>) -> Self {
        self.queries.insert(name.into(), query);
        self
    }

    /// Freezes the query set.
    #[must_use]
    pub fn build(self) -> QueryRegistry {
        QueryRegistry {
            queries: self.queries,
            context: self.context,
        }
    }
}

/// Immutable name → query map bound to its read context.
pub struct QueryRegistry {
    queries: BTreeMap<String, Arc<dyn NamedQuery>>,
    context: QueryContext,
}

impl QueryRegistry {
    /// Runs a query by name.
    ///
    /// Unknown names fail with `NotFound`; malformed arguments fail with
    /// `Validation` before any read.
    pub async fn execute(&self, name: &str, args: Value) -> PressResult<Value> {
        let query = self
            .queries
            .get(name)
            .ok_or_else(|| PressError::not_found("Query", name))?;
        debug!("Executing query {}", name);
        query.execute(&self.context, args).await
    }

    /// Runs a query and wraps the outcome in a JSON envelope: `{"data": ...}`
    /// on success, `{"errors": [ErrorResponse]}` on failure.
    pub async fn respond(&self, name: &str, args: Value) -> Value {
        match self.execute(name, args).await {
            Ok(data) => json!({ "data": data }),
            Err(e) => {
                warn!("Query {} failed: {}", name, e);
                json!({ "errors": [ErrorResponse::from(&e).for_query(name)] })
            }
        }
    }

    /// Returns true if a query with this name exists.
    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.queries.contains_key(name)
    }

    /// Returns the registered names in order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.queries.keys().map(String::as_str)
    }

    /// Returns the context queries run against.
    #[must_use]
    pub fn context(&self) -> &QueryContext {
        &self.context
    }
}
