//! Member profile endpoints
//!
//! Each handler resolves to a view identifier plus display attributes, or a
//! redirect path. Ownership-gated handlers keep the historical asymmetry:
//! the form pages answer a failed check with the login view, while the edit
//! submission redirects back to the member's own page.

use axum::{
    extract::{Multipart, Path, Query, State},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::debug;

use crate::api::middleware::Session;
use crate::api::state::AppState;
use crate::api::types::{ApiError, View, redirect};
use crate::infrastructure::member::{
    OwnedFormOutcome, PasswordChangeOutcome, PasswordResetOutcome, PictureUpload,
    ProfileEditRequest, ProfileOutcome,
};

/// Path to the members listing, where unknown-member requests land
const MEMBERS_INDEX: &str = "/";

/// GET /{member}
pub async fn show_member(
    State(state): State<AppState>,
    Path(member): Path<String>,
    Session(session): Session,
) -> Result<Response, ApiError> {
    debug!(member = %member, "Showing member profile");

    let outcome = state.profiles.show_profile(&member, &session).await?;

    let page = match outcome {
        ProfileOutcome::Page(page) => page,
        ProfileOutcome::UnknownMember => return Ok(redirect(MEMBERS_INDEX)),
    };

    let mut view = View::new("members/showMember")
        .attr("member", &page.member)
        .attr("memberName", page.member.member_name())
        .attr("publishedGames", &page.published_games)
        .attr("unpublishedGames", &page.unpublished_games)
        .attr("isOwner", page.is_owner)
        .attr("commentViews", &page.comments);

    // The attribute is omitted entirely when no picture is set
    if let Some(picture) = &page.profile_picture {
        view = view.attr("profilePicture", picture);
    }

    Ok(view.into_response())
}

/// GET /
pub async fn list_members(State(state): State<AppState>) -> Result<Response, ApiError> {
    let members = state.profiles.list_members().await?;

    Ok(View::new("members/listMembers")
        .attr("members", &members)
        .into_response())
}

/// GET /{member}/edit
pub async fn edit_member(
    State(state): State<AppState>,
    Path(member): Path<String>,
    Session(session): Session,
) -> Result<Response, ApiError> {
    let outcome = state.profiles.begin_edit(&member, &session).await?;

    Ok(match outcome {
        OwnedFormOutcome::Form(record) => View::new("members/editMember")
            .attr("member", &*record)
            .into_response(),
        OwnedFormOutcome::LoginRequired => View::new("login").into_response(),
        OwnedFormOutcome::UnknownMember => redirect(MEMBERS_INDEX),
    })
}

/// POST /{member}/edit (multipart form)
pub async fn edit_member_submit(
    State(state): State<AppState>,
    Path(member): Path<String>,
    Session(session): Session,
    multipart: Multipart,
) -> Result<Response, ApiError> {
    let request = parse_edit_form(multipart).await?;

    let outcome = state.profiles.submit_edit(&member, &session, request).await?;
    debug!(member = %member, outcome = ?outcome, "Processed profile edit");

    // Back to the member's own page whatever happened
    Ok(redirect(&format!("/{}", member)))
}

/// GET /{member}/activate/{activation_id}
pub async fn activate_member(
    State(state): State<AppState>,
    Path((member, activation_id)): Path<(String, String)>,
) -> Result<Response, ApiError> {
    let outcome = state.profiles.activate(&member, &activation_id).await?;

    let view = match outcome.failure_message() {
        None => View::new("members/activation").attr("activationSuccess", true),
        Some(message) => View::new("members/activation")
            .attr("activationSuccess", false)
            .attr("activationMessage", message),
    };

    Ok(view.into_response())
}

#[derive(Debug, Deserialize)]
pub struct ResetPasswordParams {
    #[serde(rename = "activationId")]
    pub activation_id: String,
}

/// GET /{member}/resetPassword?activationId=...
pub async fn reset_password(
    State(state): State<AppState>,
    Path(member): Path<String>,
    Query(params): Query<ResetPasswordParams>,
) -> Result<Response, ApiError> {
    let outcome = state
        .profiles
        .reset_password(&member, &params.activation_id)
        .await?;

    let view = match &outcome {
        PasswordResetOutcome::Reset { password } => View::new("members/resetPassword")
            .attr("resetSuccess", true)
            .attr("password", password),
        _ => View::new("members/resetPassword")
            .attr("resetSuccess", false)
            .attr("resetMessage", outcome.failure_message()),
    };

    Ok(view.into_response())
}

/// GET /{member}/changePassword
pub async fn change_password(
    State(state): State<AppState>,
    Path(member): Path<String>,
    Session(session): Session,
) -> Result<Response, ApiError> {
    let outcome = state.profiles.begin_change_password(&member, &session).await?;

    Ok(match outcome {
        OwnedFormOutcome::Form(record) => View::new("members/changePassword")
            .attr("memberName", record.member_name())
            .into_response(),
        OwnedFormOutcome::LoginRequired => View::new("login").into_response(),
        OwnedFormOutcome::UnknownMember => redirect(MEMBERS_INDEX),
    })
}

#[derive(Debug, Deserialize)]
pub struct ChangePasswordForm {
    #[serde(rename = "oldPassword")]
    pub old_password: String,
    #[serde(rename = "newPassword1")]
    pub new_password1: String,
    #[serde(rename = "newPassword2")]
    pub new_password2: String,
}

/// POST /{member}/changePassword
pub async fn change_password_submit(
    State(state): State<AppState>,
    Path(member): Path<String>,
    Session(session): Session,
    axum::Form(form): axum::Form<ChangePasswordForm>,
) -> Result<Response, ApiError> {
    let outcome = state
        .profiles
        .submit_change_password(
            &member,
            &session,
            &form.old_password,
            &form.new_password1,
            &form.new_password2,
        )
        .await?;

    Ok(match &outcome {
        PasswordChangeOutcome::Changed => View::new("members/changePassword")
            .attr("memberName", &member)
            .attr("success", true)
            .into_response(),
        PasswordChangeOutcome::LoginRequired => View::new("login").into_response(),
        PasswordChangeOutcome::UnknownMember => redirect(MEMBERS_INDEX),
        PasswordChangeOutcome::WrongOldPassword | PasswordChangeOutcome::ConfirmationMismatch => {
            View::new("members/changePassword")
                .attr("memberName", &member)
                .attr("error", outcome.error_message())
                .into_response()
        }
    })
}

/// Pull the profile edit fields out of the multipart form. The picture part
/// is optional; an empty file part is carried through and skipped by the
/// service, matching the form posting an empty file input.
async fn parse_edit_form(mut multipart: Multipart) -> Result<ProfileEditRequest, ApiError> {
    let mut request = ProfileEditRequest::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ApiError::bad_request(format!("Failed to read multipart field: {}", e)))?
    {
        let Some(name) = field.name().map(|s| s.to_string()) else {
            continue;
        };

        match name.as_str() {
            "profilePicture" => {
                let file_name = field.file_name().unwrap_or("").to_string();
                let content_type = field.content_type().map(|s| s.to_string());
                let bytes = field.bytes().await.map_err(|e| {
                    ApiError::bad_request(format!("Failed to read profile picture: {}", e))
                })?;

                if !file_name.is_empty() {
                    request.picture = Some(PictureUpload {
                        file_name,
                        content_type,
                        bytes,
                    });
                }
            }
            "email" => request.email = read_text_field(field, "email").await?,
            "tag" => request.tag = read_text_field(field, "tag").await?,
            "description" => request.description = read_text_field(field, "description").await?,
            "includeInLocalDatabase" => {
                let value = read_text_field(field, "includeInLocalDatabase").await?;
                request.include_in_local_database = Some(parse_checkbox(&value));
            }
            _ => {}
        }
    }

    Ok(request)
}

async fn read_text_field(
    field: axum::extract::multipart::Field<'_>,
    name: &str,
) -> Result<String, ApiError> {
    field
        .text()
        .await
        .map_err(|e| ApiError::bad_request(format!("Failed to read field '{}': {}", name, e)))
}

fn parse_checkbox(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "true" | "on" | "1")
}
