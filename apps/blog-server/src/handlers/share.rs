//! Share a post by email.

use actix_web::{HttpRequest, HttpResponse, web};
use tera::Context;
use uuid::Uuid;

use blog_core::forms::{CleanForm, EmailPostForm, FormErrors};

use super::{html, published_post};
use crate::middleware::error::AppResult;
use crate::state::AppState;
use crate::views::{PostView, absolute_uri, post_view};

fn render_share(
    state: &AppState,
    post: &PostView,
    form: &EmailPostForm,
    errors: &FormErrors,
    sent: bool,
) -> AppResult<HttpResponse> {
    let mut context = Context::new();
    context.insert("post", post);
    context.insert("form", form);
    context.insert("errors", errors);
    context.insert("sent", &sent);

    Ok(html(state.templates.render("blog/post/share.html", &context)?))
}

/// GET /{id}/share
pub async fn share_form(
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
) -> AppResult<HttpResponse> {
    let post = published_post(&state, path.into_inner()).await?;
    let view = post_view(&state, post).await?;

    render_share(&state, &view, &EmailPostForm::default(), &FormErrors::new(), false)
}

/// POST /{id}/share
///
/// A missing or malformed body is treated as an empty form.
pub async fn share_submit(
    req: HttpRequest,
    state: web::Data<AppState>,
    path: web::Path<Uuid>,
    form: Option<web::Form<EmailPostForm>>,
) -> AppResult<HttpResponse> {
    let post = published_post(&state, path.into_inner()).await?;
    let submitted = form.map(web::Form::into_inner).unwrap_or_default();

    let (form, errors, sent) = match submitted.clone().cleaned() {
        Ok(form) => {
            let post_url = absolute_uri(&req, &post.absolute_url());
            let message = form.share_message(&post.title, &post_url);
            let delivered = state.mailer.send(message).await?;
            tracing::info!(post_id = %post.id, delivered, "Post shared by email");
            (form, FormErrors::new(), delivered > 0)
        }
        Err(errors) => (submitted, errors, false),
    };

    let view = post_view(&state, post).await?;
    render_share(&state, &view, &form, &errors, sent)
}
