// SPDX-License-Identifier: Apache-2.0
//! Route handlers. Every mutating handler follows the same shape: load the
//! document, mutate the in-memory records, save the whole document back,
//! redirect with a flash notice. There is no locking; the last save wins.

use crate::cookies::{clear_cookie, cookie_value, set_cookie, SESSION_COOKIE};
use crate::flash::{clear_flash_cookie, take_flash, Flash};
use crate::http::render;
use crate::{AppError, AppState};
use axum::extract::{Path, State};
use axum::http::header::SET_COOKIE;
use axum::http::{HeaderMap, StatusCode};
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use quill_model::{sort_newest_first, Ad, Post};
use serde::Deserialize;
use serde_json::json;

pub(crate) fn redirect_with_flash(to: &str, flash: &Flash) -> Response {
    let mut response = Redirect::to(to).into_response();
    if let Some(value) = flash.to_set_cookie() {
        response.headers_mut().append(SET_COOKIE, value);
    }
    response
}

/// Renders a page, clearing the flash cookie when a notice was consumed.
fn page_response(html: String, consumed_flash: bool) -> Response {
    let mut response = Html(html).into_response();
    if consumed_flash {
        if let Some(value) = clear_flash_cookie() {
            response.headers_mut().append(SET_COOKIE, value);
        }
    }
    response
}

fn trimmed(field: Option<String>, fallback: &str) -> String {
    field.as_deref().unwrap_or(fallback).trim().to_string()
}

// ---- public routes ----

pub(crate) async fn index_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let mut posts: Vec<Post> = state
        .store
        .load_posts()?
        .records()
        .iter()
        .map(Post::from_record)
        .collect();
    sort_newest_first(&mut posts);
    let ads: Vec<Ad> = state
        .store
        .load_ads()?
        .records()
        .iter()
        .map(Ad::from_record)
        .collect();
    let settings = state.store.load_settings()?;

    let flash = take_flash(&headers);
    Ok(page_response(
        render::index_page(&settings, &posts, &ads, flash.as_ref()),
        flash.is_some(),
    ))
}

pub(crate) async fn post_view_handler(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
) -> Result<Response, AppError> {
    let posts = state.store.load_posts()?;
    let settings = state.store.load_settings()?;
    match posts.find(post_id) {
        Some(record) => {
            let post = Post::from_record(record);
            let ads: Vec<Ad> = state
                .store
                .load_ads()?
                .records()
                .iter()
                .map(Ad::from_record)
                .collect();
            Ok(Html(render::post_page(&settings, &post, &ads)).into_response())
        }
        None => Ok((
            StatusCode::NOT_FOUND,
            Html(render::not_found_page(&settings)),
        )
            .into_response()),
    }
}

// ---- login / logout ----

#[derive(Deserialize)]
pub(crate) struct LoginForm {
    password: Option<String>,
}

pub(crate) async fn login_form_handler(headers: HeaderMap) -> Response {
    let flash = take_flash(&headers);
    page_response(render::login_page(flash.as_ref()), flash.is_some())
}

pub(crate) async fn login_submit_handler(
    State(state): State<AppState>,
    Form(form): Form<LoginForm>,
) -> Result<Response, AppError> {
    let settings = state.store.load_settings()?;
    if form.password.as_deref() == Some(settings.password.as_str()) {
        let token = state.sessions.issue().await;
        let mut response = redirect_with_flash("/admin", &Flash::success("Logged in"));
        if let Some(value) = set_cookie(SESSION_COOKIE, &token) {
            response.headers_mut().append(SET_COOKIE, value);
        }
        Ok(response)
    } else {
        // Failed logins re-render the form directly instead of redirecting.
        Ok(page_response(
            render::login_page(Some(&Flash::error("Wrong password"))),
            false,
        ))
    }
}

pub(crate) async fn logout_handler(State(state): State<AppState>, headers: HeaderMap) -> Response {
    if let Some(token) = cookie_value(&headers, SESSION_COOKIE) {
        state.sessions.revoke(&token).await;
    }
    let mut response = redirect_with_flash("/login", &Flash::info("Logged out"));
    if let Some(value) = clear_cookie(SESSION_COOKIE) {
        response.headers_mut().append(SET_COOKIE, value);
    }
    response
}

// ---- admin: posts ----

pub(crate) async fn dashboard_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let mut posts: Vec<Post> = state
        .store
        .load_posts()?
        .records()
        .iter()
        .map(Post::from_record)
        .collect();
    sort_newest_first(&mut posts);
    let ads: Vec<Ad> = state
        .store
        .load_ads()?
        .records()
        .iter()
        .map(Ad::from_record)
        .collect();
    let settings = state.store.load_settings()?;

    let flash = take_flash(&headers);
    Ok(page_response(
        render::dashboard_page(&settings, &posts, &ads, flash.as_ref()),
        flash.is_some(),
    ))
}

#[derive(Deserialize)]
pub(crate) struct PostForm {
    title: Option<String>,
    content: Option<String>,
}

pub(crate) async fn new_post_form_handler(headers: HeaderMap) -> Response {
    let flash = take_flash(&headers);
    page_response(render::editor_page(None, flash.as_ref()), flash.is_some())
}

pub(crate) async fn new_post_submit_handler(
    State(state): State<AppState>,
    Form(form): Form<PostForm>,
) -> Result<Response, AppError> {
    let title = trimmed(form.title, "");
    let content = trimmed(form.content, "");
    let mut posts = state.store.load_posts()?;
    let id = posts.next_id();
    posts.push(json!({ "id": id, "title": title, "content": content }));
    state.store.save_posts(&posts)?;
    Ok(redirect_with_flash("/admin", &Flash::success("Post created")))
}

pub(crate) async fn edit_post_form_handler(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let posts = state.store.load_posts()?;
    match posts.find(post_id) {
        Some(record) => {
            let post = Post::from_record(record);
            let flash = take_flash(&headers);
            Ok(page_response(
                render::editor_page(Some(&post), flash.as_ref()),
                flash.is_some(),
            ))
        }
        None => Ok(redirect_with_flash(
            "/admin",
            &Flash::error("Post not found"),
        )),
    }
}

pub(crate) async fn edit_post_submit_handler(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
    Form(form): Form<PostForm>,
) -> Result<Response, AppError> {
    let mut posts = state.store.load_posts()?;
    let Some(record) = posts.find_mut(post_id) else {
        return Ok(redirect_with_flash(
            "/admin",
            &Flash::error("Post not found"),
        ));
    };

    // Absent form fields fall back to the stored values, not to empty.
    let current = Post::from_record(record);
    let title = trimmed(form.title, &current.title);
    let content = trimmed(form.content, &current.content);
    if let Some(obj) = record.as_object_mut() {
        obj.insert("title".to_string(), title.into());
        obj.insert("content".to_string(), content.into());
    }
    state.store.save_posts(&posts)?;
    Ok(redirect_with_flash("/admin", &Flash::success("Post updated")))
}

pub(crate) async fn delete_post_handler(
    State(state): State<AppState>,
    Path(post_id): Path<i64>,
) -> Result<Response, AppError> {
    let mut posts = state.store.load_posts()?;
    if posts.remove(post_id) {
        state.store.save_posts(&posts)?;
        Ok(redirect_with_flash("/admin", &Flash::success("Post deleted")))
    } else {
        Ok(redirect_with_flash(
            "/admin",
            &Flash::error("Post not found"),
        ))
    }
}

// ---- admin: ads ----

#[derive(Deserialize)]
pub(crate) struct AdForm {
    content: Option<String>,
}

pub(crate) async fn ads_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let ads: Vec<Ad> = state
        .store
        .load_ads()?
        .records()
        .iter()
        .map(Ad::from_record)
        .collect();
    let flash = take_flash(&headers);
    Ok(page_response(
        render::ads_page(&ads, flash.as_ref()),
        flash.is_some(),
    ))
}

pub(crate) async fn add_ad_handler(
    State(state): State<AppState>,
    Form(form): Form<AdForm>,
) -> Result<Response, AppError> {
    let content = trimmed(form.content, "");
    let mut ads = state.store.load_ads()?;
    let id = ads.next_id();
    ads.push(json!({ "id": id, "content": content }));
    state.store.save_ads(&ads)?;
    Ok(redirect_with_flash("/admin/ads", &Flash::success("Ad created")))
}

pub(crate) async fn delete_ad_handler(
    State(state): State<AppState>,
    Path(ad_id): Path<i64>,
) -> Result<Response, AppError> {
    let mut ads = state.store.load_ads()?;
    if ads.remove(ad_id) {
        state.store.save_ads(&ads)?;
        Ok(redirect_with_flash("/admin/ads", &Flash::success("Ad deleted")))
    } else {
        Ok(redirect_with_flash("/admin/ads", &Flash::error("Ad not found")))
    }
}

// ---- admin: settings ----

#[derive(Deserialize)]
pub(crate) struct SettingsForm {
    title: Option<String>,
    description: Option<String>,
    password: Option<String>,
}

pub(crate) async fn settings_form_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let settings = state.store.load_settings()?;
    let flash = take_flash(&headers);
    Ok(page_response(
        render::settings_page(&settings, flash.as_ref()),
        flash.is_some(),
    ))
}

pub(crate) async fn settings_submit_handler(
    State(state): State<AppState>,
    Form(form): Form<SettingsForm>,
) -> Result<Response, AppError> {
    let mut settings = state.store.load_settings()?;
    settings.title = trimmed(form.title, &settings.title);
    settings.description = trimmed(form.description, &settings.description);
    // An empty password field means "keep the current one".
    if let Some(password) = form.password {
        if !password.is_empty() {
            settings.password = password;
        }
    }
    state.store.save_settings(&settings)?;
    Ok(redirect_with_flash(
        "/admin",
        &Flash::success("Settings saved"),
    ))
}
