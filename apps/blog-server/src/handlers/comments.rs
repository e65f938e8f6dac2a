//! Comment submission.

use actix_web::{HttpResponse, web};
use tera::Context;
use uuid::Uuid;

use blog_core::domain::{Comment, User};
use blog_core::forms::{CleanForm, CommentForm, FormErrors};

use super::{html, published_post};
use crate::middleware::auth::{Identity, OptionalIdentity};
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;
use crate::views::{comment_views, post_view};

/// The signed-in user, else the configured fallback author.
async fn comment_author(state: &AppState, identity: Option<Identity>) -> AppResult<User> {
    if let Some(identity) = identity {
        if let Some(user) = state.users.find_by_id(identity.user_id).await? {
            return Ok(user);
        }
        tracing::warn!(user_id = %identity.user_id, "Token user no longer exists");
    }

    let username = &state.settings.comment_author;
    state
        .users
        .find_by_username(username)
        .await?
        .ok_or_else(|| AppError::Internal(format!("Comment author {} does not exist", username)))
}

/// POST /{id}/comment
pub async fn post_comment(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    identity: OptionalIdentity,
    form: Option<web::Form<CommentForm>>,
) -> AppResult<HttpResponse> {
    let post = published_post(&state, path.into_inner()).await?;
    let submitted = form.map(web::Form::into_inner).unwrap_or_default();

    let (comment, form, errors) = match submitted.clone().cleaned() {
        Ok(form) => {
            let author = comment_author(&state, identity.0).await?;
            let comment = state
                .comments
                .save(Comment::new(post.id, author.id, form.body.clone()))
                .await?;
            tracing::info!(post_id = %post.id, comment_id = %comment.id, "Comment added");
            (Some(comment), form, FormErrors::new())
        }
        Err(errors) => (None, submitted, errors),
    };

    let comment = match comment {
        Some(comment) => comment_views(&state, vec![comment]).await?.pop(),
        None => None,
    };

    let mut context = Context::new();
    context.insert("post", &post_view(&state, post).await?);
    context.insert("comment", &comment);
    context.insert("form", &form);
    context.insert("errors", &errors);

    Ok(html(state.templates.render("blog/post/comment.html", &context)?))
}
