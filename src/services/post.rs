use crate::{
    error::{AppError, AppResult},
    models::{post, Post, PostModel},
};
use sea_orm::{
    sea_query::{Expr, SimpleExpr},
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, FromQueryResult,
    PaginatorTrait, QueryFilter, QueryOrder, QuerySelect, Select, TransactionTrait,
};
use serde::Serialize;
use utoipa::ToSchema;

/// Counters returned by a vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, FromQueryResult, Serialize, ToSchema)]
pub struct VoteCounts {
    pub upvotes: i32,
    pub downvotes: i32,
}

#[derive(Debug, Clone, Copy)]
enum VoteKind {
    Up,
    Down,
}

impl VoteKind {
    fn column(self) -> post::Column {
        match self {
            VoteKind::Up => post::Column::Upvotes,
            VoteKind::Down => post::Column::Downvotes,
        }
    }
}

#[derive(Debug, Clone, Copy)]
enum Flag {
    Pinned,
    Resolved,
}

/// The post store. Each method checks one connection out of the pool (or
/// opens one transaction) and gives it back before returning.
pub struct PostService {
    db: DatabaseConnection,
}

impl PostService {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    pub async fn create(
        &self,
        title: &str,
        question_body: &str,
        ai_response: Option<&str>,
        topic: &str,
    ) -> AppResult<PostModel> {
        Self::validate_fields(title, question_body, topic)?;

        let now = chrono::Utc::now().naive_utc();

        let new_post = post::ActiveModel {
            title: sea_orm::ActiveValue::Set(title.to_string()),
            question_body: sea_orm::ActiveValue::Set(question_body.to_string()),
            ai_response: sea_orm::ActiveValue::Set(ai_response.map(str::to_string)),
            topic: sea_orm::ActiveValue::Set(topic.to_string()),
            upvotes: sea_orm::ActiveValue::Set(0),
            downvotes: sea_orm::ActiveValue::Set(0),
            is_pinned: sea_orm::ActiveValue::Set(false),
            is_resolved: sea_orm::ActiveValue::Set(false),
            created_at: sea_orm::ActiveValue::Set(now),
            ..Default::default()
        };

        let post = new_post.insert(&self.db).await?;
        tracing::debug!(post_id = post.id, topic = %post.topic, "Post created");
        Ok(post)
    }

    /// Required post fields must be non-blank.
    pub fn validate_fields(title: &str, question_body: &str, topic: &str) -> AppResult<()> {
        require_non_empty("title", title)?;
        require_non_empty("question_body", question_body)?;
        require_non_empty("topic", topic)
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<PostModel> {
        Post::find_by_id(id)
            .one(&self.db)
            .await?
            .ok_or(AppError::NotFound)
    }

    pub async fn count(&self) -> AppResult<u64> {
        Ok(Post::find().count(&self.db).await?)
    }

    /// All posts, pinned first, newest first within each group.
    pub async fn list_all(&self) -> AppResult<Vec<PostModel>> {
        Ok(board_order(Post::find()).all(&self.db).await?)
    }

    /// Case-insensitive substring match on title or question body, in board
    /// order. The query is matched as given; only a blank query lists
    /// everything.
    pub async fn search(&self, query: &str) -> AppResult<Vec<PostModel>> {
        if query.trim().is_empty() {
            return self.list_all().await;
        }

        let pattern = like_pattern(query);
        let condition = Condition::any()
            .add(lower_like(post::Column::Title, &pattern))
            .add(lower_like(post::Column::QuestionBody, &pattern));

        Ok(board_order(Post::find().filter(condition))
            .all(&self.db)
            .await?)
    }

    pub async fn upvote(&self, id: i32) -> AppResult<VoteCounts> {
        self.vote(id, VoteKind::Up).await
    }

    pub async fn downvote(&self, id: i32) -> AppResult<VoteCounts> {
        self.vote(id, VoteKind::Down).await
    }

    async fn vote(&self, id: i32, kind: VoteKind) -> AppResult<VoteCounts> {
        let column = kind.column();
        let txn = self.db.begin().await?;

        let result = Post::update_many()
            .col_expr(column, Expr::col(column).add(1))
            .filter(post::Column::Id.eq(id))
            .exec(&txn)
            .await?;

        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }

        let counts = Post::find_by_id(id)
            .select_only()
            .column(post::Column::Upvotes)
            .column(post::Column::Downvotes)
            .into_model::<VoteCounts>()
            .one(&txn)
            .await?
            .ok_or(AppError::NotFound)?;

        txn.commit().await?;
        Ok(counts)
    }

    pub async fn toggle_pin(&self, id: i32) -> AppResult<bool> {
        self.toggle(id, Flag::Pinned).await
    }

    pub async fn toggle_resolved(&self, id: i32) -> AppResult<bool> {
        self.toggle(id, Flag::Resolved).await
    }

    async fn toggle(&self, id: i32, flag: Flag) -> AppResult<bool> {
        let txn = self.db.begin().await?;

        let existing = Post::find_by_id(id)
            .one(&txn)
            .await?
            .ok_or(AppError::NotFound)?;

        let mut active: post::ActiveModel = existing.clone().into();
        let new_value = match flag {
            Flag::Pinned => {
                active.is_pinned = sea_orm::ActiveValue::Set(!existing.is_pinned);
                !existing.is_pinned
            }
            Flag::Resolved => {
                active.is_resolved = sea_orm::ActiveValue::Set(!existing.is_resolved);
                !existing.is_resolved
            }
        };
        active.update(&txn).await?;

        txn.commit().await?;
        Ok(new_value)
    }

    /// Hard delete. An unknown id is reported as `NotFound`.
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = Post::delete_by_id(id).exec(&self.db).await?;
        if result.rows_affected == 0 {
            return Err(AppError::NotFound);
        }
        tracing::debug!(post_id = id, "Post deleted");
        Ok(())
    }
}

fn board_order(select: Select<Post>) -> Select<Post> {
    select
        .order_by_desc(post::Column::IsPinned)
        .order_by_desc(post::Column::CreatedAt)
        .order_by_desc(post::Column::Id)
}

fn require_non_empty(field: &str, value: &str) -> AppResult<()> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("{field} is required")));
    }
    Ok(())
}

const LIKE_ESCAPE: char = '!';

/// `LOWER(column) LIKE LOWER(pattern)`: both sides are folded by the same
/// engine, whatever its notion of case.
fn lower_like(column: post::Column, pattern: &str) -> SimpleExpr {
    Expr::cust_with_exprs(
        format!("LOWER($1) LIKE LOWER($2) ESCAPE '{LIKE_ESCAPE}'"),
        [Expr::col(column).into(), Expr::val(pattern).into()],
    )
}

/// `%query%` with LIKE metacharacters escaped by [`LIKE_ESCAPE`].
fn like_pattern(query: &str) -> String {
    let mut pattern = String::with_capacity(query.len() + 2);
    pattern.push('%');
    for c in query.chars() {
        if matches!(c, '%' | '_' | LIKE_ESCAPE) {
            pattern.push(LIKE_ESCAPE);
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}
