//! Member profile service
//!
//! Orchestrates member lookup, game and comment listings, profile edits,
//! account activation and the password reset/change flows. Handlers map the
//! outcome enums returned here onto views and redirects.

use std::sync::Arc;

use bytes::Bytes;
use tracing::{info, warn};

use crate::domain::DomainError;
use crate::domain::comment::{CommentCategory, CommentRepository, CommentView};
use crate::domain::game::{Game, GameRepository};
use crate::domain::member::{Member, MemberName, MemberRepository};
use crate::domain::session::SessionContext;
use crate::domain::storage::ObjectStore;

use super::keys::{ACTIVATION_CODE_LENGTH, GENERATED_PASSWORD_LENGTH, random_key};
use super::password::PasswordHasher;

/// An uploaded profile picture
#[derive(Debug, Clone)]
pub struct PictureUpload {
    /// Original file name supplied by the client
    pub file_name: String,
    /// Declared content type, if any
    pub content_type: Option<String>,
    /// File content
    pub bytes: Bytes,
}

impl PictureUpload {
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Fields submitted by the profile edit form
#[derive(Debug, Clone, Default)]
pub struct ProfileEditRequest {
    pub email: String,
    pub tag: String,
    pub description: String,
    /// Checkbox; absent means false
    pub include_in_local_database: Option<bool>,
    pub picture: Option<PictureUpload>,
}

/// Everything the profile page renders
#[derive(Debug, Clone)]
pub struct ProfilePage {
    pub member: Member,
    /// Public URL of the profile picture, if one is set
    pub profile_picture: Option<String>,
    pub published_games: Vec<Game>,
    pub unpublished_games: Vec<Game>,
    /// Whether the requesting session owns this profile
    pub is_owner: bool,
    pub comments: Vec<CommentView>,
}

/// Outcome of a profile page request
#[derive(Debug)]
pub enum ProfileOutcome {
    Page(Box<ProfilePage>),
    /// Unknown member: callers redirect to the members listing
    UnknownMember,
}

/// Outcome of requesting an ownership-gated form (edit, change password)
#[derive(Debug)]
pub enum OwnedFormOutcome {
    Form(Box<Member>),
    /// Session does not own the profile: callers show the login page
    LoginRequired,
    /// Unknown member: callers redirect to the members listing
    UnknownMember,
}

/// Outcome of submitting the profile edit form. Callers redirect to the
/// member's own page in every case.
#[derive(Debug, PartialEq, Eq)]
pub enum EditSubmission {
    Applied,
    NotOwner,
    UnknownMember,
}

/// Outcome of an activation attempt
#[derive(Debug, PartialEq, Eq)]
pub enum ActivationOutcome {
    Activated,
    UnknownMember,
    AlreadyActivated,
    CodeMismatch,
}

impl ActivationOutcome {
    /// User-visible failure message, or None on success
    pub fn failure_message(&self) -> Option<&'static str> {
        match self {
            Self::Activated => None,
            Self::UnknownMember => Some("Invalid username."),
            Self::AlreadyActivated => Some("Your account was already activated."),
            Self::CodeMismatch => Some(
                "That activation code is not valid. Make sure you copy it correctly \
                 from the activation email!",
            ),
        }
    }
}

/// Outcome of a password reset attempt
#[derive(Debug, PartialEq, Eq)]
pub enum PasswordResetOutcome {
    /// The generated plaintext password, returned once for display and
    /// never stored
    Reset { password: String },
    UnknownMember,
    NotActivated,
    CodeMismatch,
}

impl PasswordResetOutcome {
    /// User-visible failure message, or None on success
    pub fn failure_message(&self) -> Option<&'static str> {
        match self {
            Self::Reset { .. } => None,
            Self::UnknownMember => Some("Invalid username."),
            Self::NotActivated => Some(
                "Please activate your account (by clicking the link in the activation \
                 email) before resetting your password.",
            ),
            Self::CodeMismatch => Some(
                "That reset code is not valid. Make sure you copy it correctly from \
                 the password reset email!",
            ),
        }
    }
}

/// Outcome of a password change attempt
#[derive(Debug, PartialEq, Eq)]
pub enum PasswordChangeOutcome {
    Changed,
    LoginRequired,
    UnknownMember,
    WrongOldPassword,
    ConfirmationMismatch,
}

impl PasswordChangeOutcome {
    /// User-visible error message for validation failures
    pub fn error_message(&self) -> Option<&'static str> {
        match self {
            Self::WrongOldPassword => Some("That doesn't seem to be your old password."),
            Self::ConfirmationMismatch => Some("Please make sure to enter your new password twice."),
            _ => None,
        }
    }
}

/// Service behind the member profile pages
#[derive(Debug)]
pub struct MemberProfileService {
    members: Arc<dyn MemberRepository>,
    games: Arc<dyn GameRepository>,
    comments: Arc<dyn CommentRepository>,
    store: Arc<dyn ObjectStore>,
    hasher: Arc<dyn PasswordHasher>,
    /// Base URL under which uploaded objects are publicly reachable
    public_base_url: String,
}

impl MemberProfileService {
    pub fn new(
        members: Arc<dyn MemberRepository>,
        games: Arc<dyn GameRepository>,
        comments: Arc<dyn CommentRepository>,
        store: Arc<dyn ObjectStore>,
        hasher: Arc<dyn PasswordHasher>,
        public_base_url: impl Into<String>,
    ) -> Self {
        Self {
            members,
            games,
            comments,
            store,
            hasher,
            public_base_url: public_base_url.into(),
        }
    }

    /// Build the profile page for a member
    pub async fn show_profile(
        &self,
        member: &str,
        session: &SessionContext,
    ) -> Result<ProfileOutcome, DomainError> {
        let Ok(name) = MemberName::new(member) else {
            return Ok(ProfileOutcome::UnknownMember);
        };

        let Some(record) = self.members.get(&name).await? else {
            return Ok(ProfileOutcome::UnknownMember);
        };

        let profile_picture = record
            .image_file()
            .map(|file| self.picture_url(&name, file));

        let published_games = self.games.published_for_member(&name).await?;
        let unpublished_games = self.games.unpublished_for_member(&name).await?;

        let raw_comments = self
            .comments
            .list_for_target(name.as_str(), CommentCategory::Account)
            .await?;

        let mut comments = Vec::with_capacity(raw_comments.len());
        for comment in raw_comments {
            let author = match MemberName::new(comment.commenting_member()) {
                Ok(author_name) => self.members.get(&author_name).await?,
                Err(_) => None,
            };
            comments.push(CommentView::new(comment, author, &self.public_base_url));
        }

        Ok(ProfileOutcome::Page(Box::new(ProfilePage {
            is_owner: session.is_member(&name),
            member: record,
            profile_picture,
            published_games,
            unpublished_games,
            comments,
        })))
    }

    /// List all members, unfiltered and unpaginated
    pub async fn list_members(&self) -> Result<Vec<Member>, DomainError> {
        self.members.list().await
    }

    /// Load the member for the ownership-gated edit form
    pub async fn begin_edit(
        &self,
        member: &str,
        session: &SessionContext,
    ) -> Result<OwnedFormOutcome, DomainError> {
        self.owned_form(member, session).await
    }

    /// Apply the profile edit form.
    ///
    /// A non-empty picture upload goes to the object store first; a storage
    /// failure is logged and the remaining field changes still apply. The
    /// caller redirects to the member's own page whatever the outcome.
    pub async fn submit_edit(
        &self,
        member: &str,
        session: &SessionContext,
        request: ProfileEditRequest,
    ) -> Result<EditSubmission, DomainError> {
        let Ok(name) = MemberName::new(member) else {
            return Ok(EditSubmission::NotOwner);
        };

        if !session.is_member(&name) {
            return Ok(EditSubmission::NotOwner);
        }

        let Some(mut record) = self.members.get(&name).await? else {
            return Ok(EditSubmission::UnknownMember);
        };

        // TODO delete the old picture from the store when it is replaced
        if let Some(picture) = request.picture
            && !picture.is_empty()
        {
            let key = format!("users/{}/{}", name, picture.file_name);
            let file_name = picture.file_name.clone();

            match self.upload_picture(&key, picture).await {
                Ok(()) => record.set_image_file(file_name),
                Err(e) => {
                    warn!(member = %name, key = %key, error = %e,
                        "Profile picture upload failed; applying remaining edits");
                }
            }
        }

        record.set_email(request.email);
        record.set_description(request.description);
        record.set_tag(request.tag);
        record.set_include_in_local_database(request.include_in_local_database.unwrap_or(false));

        self.members.update(&record).await?;

        Ok(EditSubmission::Applied)
    }

    /// Activate an account with the code from the activation email.
    /// Checks run in order; the first failing one wins.
    pub async fn activate(
        &self,
        member: &str,
        activation_code: &str,
    ) -> Result<ActivationOutcome, DomainError> {
        let Ok(name) = MemberName::new(member) else {
            return Ok(ActivationOutcome::UnknownMember);
        };

        let Some(mut record) = self.members.get(&name).await? else {
            return Ok(ActivationOutcome::UnknownMember);
        };

        if record.is_activated() {
            return Ok(ActivationOutcome::AlreadyActivated);
        }

        if activation_code != record.activation_code() {
            return Ok(ActivationOutcome::CodeMismatch);
        }

        record.activate();
        self.members.update(&record).await?;

        info!(member = %name, "Account activated");

        Ok(ActivationOutcome::Activated)
    }

    /// Reset a password given the out-of-band activation code. On success
    /// the activation code is rotated so the same code cannot be replayed,
    /// and the generated plaintext password is returned for one-time display.
    pub async fn reset_password(
        &self,
        member: &str,
        activation_code: &str,
    ) -> Result<PasswordResetOutcome, DomainError> {
        let Ok(name) = MemberName::new(member) else {
            return Ok(PasswordResetOutcome::UnknownMember);
        };

        let Some(mut record) = self.members.get(&name).await? else {
            return Ok(PasswordResetOutcome::UnknownMember);
        };

        if !record.is_activated() {
            return Ok(PasswordResetOutcome::NotActivated);
        }

        if activation_code != record.activation_code() {
            return Ok(PasswordResetOutcome::CodeMismatch);
        }

        let password = random_key(GENERATED_PASSWORD_LENGTH);
        let hash = self.hasher.hash(&password)?;

        record.set_password_hash(hash);
        record.rotate_activation_code(random_key(ACTIVATION_CODE_LENGTH));
        self.members.update(&record).await?;

        info!(member = %name, "Password reset");

        Ok(PasswordResetOutcome::Reset { password })
    }

    /// Load the member for the ownership-gated change-password form
    pub async fn begin_change_password(
        &self,
        member: &str,
        session: &SessionContext,
    ) -> Result<OwnedFormOutcome, DomainError> {
        self.owned_form(member, session).await
    }

    /// Change a password after verifying the old one against the stored
    /// hash. No minimum-length or complexity policy is enforced.
    pub async fn submit_change_password(
        &self,
        member: &str,
        session: &SessionContext,
        old_password: &str,
        new_password: &str,
        new_password_confirmation: &str,
    ) -> Result<PasswordChangeOutcome, DomainError> {
        let Ok(name) = MemberName::new(member) else {
            return Ok(PasswordChangeOutcome::LoginRequired);
        };

        if !session.is_member(&name) {
            return Ok(PasswordChangeOutcome::LoginRequired);
        }

        let Some(mut record) = self.members.get(&name).await? else {
            return Ok(PasswordChangeOutcome::UnknownMember);
        };

        if !self.hasher.verify(old_password, record.password_hash()) {
            return Ok(PasswordChangeOutcome::WrongOldPassword);
        }

        if new_password != new_password_confirmation {
            return Ok(PasswordChangeOutcome::ConfirmationMismatch);
        }

        let hash = self.hasher.hash(new_password)?;
        record.set_password_hash(hash);
        self.members.update(&record).await?;

        info!(member = %name, "Password changed");

        Ok(PasswordChangeOutcome::Changed)
    }

    async fn owned_form(
        &self,
        member: &str,
        session: &SessionContext,
    ) -> Result<OwnedFormOutcome, DomainError> {
        let Ok(name) = MemberName::new(member) else {
            return Ok(OwnedFormOutcome::LoginRequired);
        };

        if !session.is_member(&name) {
            return Ok(OwnedFormOutcome::LoginRequired);
        }

        match self.members.get(&name).await? {
            Some(record) => Ok(OwnedFormOutcome::Form(Box::new(record))),
            None => Ok(OwnedFormOutcome::UnknownMember),
        }
    }

    async fn upload_picture(&self, key: &str, picture: PictureUpload) -> Result<(), DomainError> {
        let content_type = picture.content_type.clone().or_else(|| {
            mime_guess::from_path(&picture.file_name)
                .first()
                .map(|mime| mime.to_string())
        });

        self.store
            .put(key, picture.bytes, content_type.as_deref())
            .await?;
        self.store.set_public_read(key).await?;

        Ok(())
    }

    fn picture_url(&self, member: &MemberName, file: &str) -> String {
        format!("{}/users/{}/{}", self.public_base_url, member, file)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::comment::Comment;
    use crate::infrastructure::comment::InMemoryCommentRepository;
    use crate::infrastructure::game::InMemoryGameRepository;
    use crate::infrastructure::member::{Argon2Hasher, InMemoryMemberRepository};
    use crate::infrastructure::storage::InMemoryObjectStore;

    const BASE_URL: &str = "https://cdn.example.com";

    struct Fixture {
        members: Arc<InMemoryMemberRepository>,
        games: Arc<InMemoryGameRepository>,
        comments: Arc<InMemoryCommentRepository>,
        store: Arc<InMemoryObjectStore>,
        hasher: Arc<Argon2Hasher>,
        service: MemberProfileService,
    }

    fn fixture() -> Fixture {
        let members = Arc::new(InMemoryMemberRepository::new());
        let games = Arc::new(InMemoryGameRepository::new());
        let comments = Arc::new(InMemoryCommentRepository::new());
        let store = Arc::new(InMemoryObjectStore::new());
        let hasher = Arc::new(Argon2Hasher::new());

        let service = MemberProfileService::new(
            members.clone(),
            games.clone(),
            comments.clone(),
            store.clone(),
            hasher.clone(),
            BASE_URL,
        );

        Fixture {
            members,
            games,
            comments,
            store,
            hasher,
            service,
        }
    }

    impl Fixture {
        async fn seed_member(&self, name: &str, password: &str, code: &str, activated: bool) {
            let hash = self.hasher.hash(password).unwrap();
            let mut member = Member::new(
                MemberName::new(name).unwrap(),
                format!("{}@example.com", name),
                hash,
                code,
            );
            if activated {
                member.activate();
            }
            self.members.create(member).await.unwrap();
        }

        async fn member(&self, name: &str) -> Member {
            self.members
                .get(&MemberName::new(name).unwrap())
                .await
                .unwrap()
                .unwrap()
        }

        fn session_for(&self, name: &str) -> SessionContext {
            SessionContext::authenticated(MemberName::new(name).unwrap())
        }

        fn edit_request(&self) -> ProfileEditRequest {
            ProfileEditRequest {
                email: "new@example.com".to_string(),
                tag: "New tag".to_string(),
                description: "New description".to_string(),
                include_in_local_database: None,
                picture: None,
            }
        }
    }

    // Profile page

    #[tokio::test]
    async fn test_show_profile_unknown_member() {
        let fx = fixture();
        let outcome = fx
            .service
            .show_profile("ghost", &SessionContext::anonymous())
            .await
            .unwrap();
        assert!(matches!(outcome, ProfileOutcome::UnknownMember));
    }

    #[tokio::test]
    async fn test_show_profile_invalid_name_is_unknown() {
        let fx = fixture();
        let outcome = fx
            .service
            .show_profile("no such member", &SessionContext::anonymous())
            .await
            .unwrap();
        assert!(matches!(outcome, ProfileOutcome::UnknownMember));
    }

    #[tokio::test]
    async fn test_show_profile_builds_page() {
        let fx = fixture();
        fx.seed_member("kevin", "secret", "ABC123", true).await;

        let kevin = MemberName::new("kevin").unwrap();
        fx.games
            .create(Game::new("pong", kevin.clone(), "Pong", true))
            .await
            .unwrap();
        fx.games
            .create(Game::new("wip", kevin.clone(), "WIP", false))
            .await
            .unwrap();
        fx.comments
            .create(Comment::new(
                "ada",
                "kevin",
                CommentCategory::Account,
                "hi kevin",
            ))
            .await
            .unwrap();
        fx.seed_member("ada", "pw", "CODE", true).await;

        let outcome = fx
            .service
            .show_profile("kevin", &fx.session_for("kevin"))
            .await
            .unwrap();

        let ProfileOutcome::Page(page) = outcome else {
            panic!("expected profile page");
        };

        assert!(page.is_owner);
        assert!(page.profile_picture.is_none());
        assert_eq!(page.published_games.len(), 1);
        assert_eq!(page.unpublished_games.len(), 1);
        assert_eq!(page.comments.len(), 1);
        assert_eq!(
            page.comments[0]
                .author
                .as_ref()
                .unwrap()
                .member_name()
                .as_str(),
            "ada"
        );
    }

    #[tokio::test]
    async fn test_show_profile_picture_url_convention() {
        let fx = fixture();
        fx.seed_member("kevin", "secret", "ABC123", true).await;

        let mut kevin = fx.member("kevin").await;
        kevin.set_image_file("avatar.png");
        fx.members.update(&kevin).await.unwrap();

        let outcome = fx
            .service
            .show_profile("kevin", &SessionContext::anonymous())
            .await
            .unwrap();

        let ProfileOutcome::Page(page) = outcome else {
            panic!("expected profile page");
        };

        assert!(!page.is_owner);
        assert_eq!(
            page.profile_picture.as_deref(),
            Some("https://cdn.example.com/users/kevin/avatar.png")
        );
    }

    #[tokio::test]
    async fn test_show_profile_comment_with_missing_author() {
        let fx = fixture();
        fx.seed_member("kevin", "secret", "ABC123", true).await;
        fx.comments
            .create(Comment::new(
                "deleted-user",
                "kevin",
                CommentCategory::Account,
                "old comment",
            ))
            .await
            .unwrap();

        let outcome = fx
            .service
            .show_profile("kevin", &SessionContext::anonymous())
            .await
            .unwrap();

        let ProfileOutcome::Page(page) = outcome else {
            panic!("expected profile page");
        };

        assert_eq!(page.comments.len(), 1);
        assert!(page.comments[0].author.is_none());
    }

    // Listing

    #[tokio::test]
    async fn test_list_members_unfiltered() {
        let fx = fixture();
        fx.seed_member("kevin", "a", "C1", true).await;
        fx.seed_member("ada", "b", "C2", false).await;

        let all = fx.service.list_members().await.unwrap();
        assert_eq!(all.len(), 2);
    }

    // Edit form

    #[tokio::test]
    async fn test_begin_edit_requires_ownership() {
        let fx = fixture();
        fx.seed_member("bob", "secret", "CODE", true).await;

        let outcome = fx
            .service
            .begin_edit("bob", &fx.session_for("alice"))
            .await
            .unwrap();
        assert!(matches!(outcome, OwnedFormOutcome::LoginRequired));

        let outcome = fx
            .service
            .begin_edit("bob", &SessionContext::anonymous())
            .await
            .unwrap();
        assert!(matches!(outcome, OwnedFormOutcome::LoginRequired));
    }

    #[tokio::test]
    async fn test_begin_edit_unknown_member() {
        let fx = fixture();
        let outcome = fx
            .service
            .begin_edit("ghost", &fx.session_for("ghost"))
            .await
            .unwrap();
        assert!(matches!(outcome, OwnedFormOutcome::UnknownMember));
    }

    #[tokio::test]
    async fn test_begin_edit_returns_member() {
        let fx = fixture();
        fx.seed_member("kevin", "secret", "CODE", true).await;

        let outcome = fx
            .service
            .begin_edit("kevin", &fx.session_for("kevin"))
            .await
            .unwrap();

        let OwnedFormOutcome::Form(member) = outcome else {
            panic!("expected edit form");
        };
        assert_eq!(member.member_name().as_str(), "kevin");
    }

    // Edit submission

    #[tokio::test]
    async fn test_submit_edit_rejects_non_owner() {
        let fx = fixture();
        fx.seed_member("bob", "secret", "CODE", true).await;

        let outcome = fx
            .service
            .submit_edit("bob", &fx.session_for("alice"), fx.edit_request())
            .await
            .unwrap();
        assert_eq!(outcome, EditSubmission::NotOwner);

        // Nothing changed
        let bob = fx.member("bob").await;
        assert_eq!(bob.email(), "bob@example.com");
    }

    #[tokio::test]
    async fn test_submit_edit_applies_fields() {
        let fx = fixture();
        fx.seed_member("kevin", "secret", "CODE", true).await;

        let mut request = fx.edit_request();
        request.include_in_local_database = Some(true);

        let outcome = fx
            .service
            .submit_edit("kevin", &fx.session_for("kevin"), request)
            .await
            .unwrap();
        assert_eq!(outcome, EditSubmission::Applied);

        let kevin = fx.member("kevin").await;
        assert_eq!(kevin.email(), "new@example.com");
        assert_eq!(kevin.tag(), "New tag");
        assert_eq!(kevin.description(), "New description");
        assert!(kevin.include_in_local_database());
        assert!(kevin.image_file().is_none());
    }

    #[tokio::test]
    async fn test_submit_edit_absent_flag_defaults_to_false() {
        let fx = fixture();
        fx.seed_member("kevin", "secret", "CODE", true).await;

        let mut kevin = fx.member("kevin").await;
        kevin.set_include_in_local_database(true);
        fx.members.update(&kevin).await.unwrap();

        fx.service
            .submit_edit("kevin", &fx.session_for("kevin"), fx.edit_request())
            .await
            .unwrap();

        assert!(!fx.member("kevin").await.include_in_local_database());
    }

    #[tokio::test]
    async fn test_submit_edit_uploads_picture() {
        let fx = fixture();
        fx.seed_member("kevin", "secret", "CODE", true).await;

        let mut request = fx.edit_request();
        request.picture = Some(PictureUpload {
            file_name: "avatar.png".to_string(),
            content_type: Some("image/png".to_string()),
            bytes: Bytes::from_static(b"png-bytes"),
        });

        fx.service
            .submit_edit("kevin", &fx.session_for("kevin"), request)
            .await
            .unwrap();

        let kevin = fx.member("kevin").await;
        assert_eq!(kevin.image_file(), Some("avatar.png"));
        assert_eq!(
            fx.store.get("users/kevin/avatar.png").await,
            Some(Bytes::from_static(b"png-bytes"))
        );
        assert!(fx.store.is_public("users/kevin/avatar.png").await);
    }

    #[tokio::test]
    async fn test_submit_edit_empty_picture_is_skipped() {
        let fx = fixture();
        fx.seed_member("kevin", "secret", "CODE", true).await;

        let mut request = fx.edit_request();
        request.picture = Some(PictureUpload {
            file_name: "empty.png".to_string(),
            content_type: None,
            bytes: Bytes::new(),
        });

        fx.service
            .submit_edit("kevin", &fx.session_for("kevin"), request)
            .await
            .unwrap();

        assert!(fx.member("kevin").await.image_file().is_none());
        assert!(fx.store.is_empty().await);
    }

    #[tokio::test]
    async fn test_submit_edit_continues_when_upload_fails() {
        let fx = fixture();
        fx.seed_member("kevin", "secret", "CODE", true).await;
        fx.store.set_should_fail(true).await;

        let mut request = fx.edit_request();
        request.picture = Some(PictureUpload {
            file_name: "avatar.png".to_string(),
            content_type: Some("image/png".to_string()),
            bytes: Bytes::from_static(b"png-bytes"),
        });

        let outcome = fx
            .service
            .submit_edit("kevin", &fx.session_for("kevin"), request)
            .await
            .unwrap();
        assert_eq!(outcome, EditSubmission::Applied);

        // Field edits landed, picture reference did not
        let kevin = fx.member("kevin").await;
        assert_eq!(kevin.email(), "new@example.com");
        assert_eq!(kevin.tag(), "New tag");
        assert!(kevin.image_file().is_none());
    }

    // Activation

    #[tokio::test]
    async fn test_activate_unknown_member() {
        let fx = fixture();
        let outcome = fx.service.activate("ghost", "ABC123").await.unwrap();
        assert_eq!(outcome, ActivationOutcome::UnknownMember);
        assert_eq!(outcome.failure_message(), Some("Invalid username."));
    }

    #[tokio::test]
    async fn test_activate_wrong_then_right_code() {
        let fx = fixture();
        fx.seed_member("carol", "secret", "ABC123", false).await;

        let outcome = fx.service.activate("carol", "WRONG").await.unwrap();
        assert_eq!(outcome, ActivationOutcome::CodeMismatch);
        assert!(!fx.member("carol").await.is_activated());

        let outcome = fx.service.activate("carol", "ABC123").await.unwrap();
        assert_eq!(outcome, ActivationOutcome::Activated);
        assert!(fx.member("carol").await.is_activated());
    }

    #[tokio::test]
    async fn test_activate_twice_fails_second_time() {
        let fx = fixture();
        fx.seed_member("carol", "secret", "ABC123", false).await;

        fx.service.activate("carol", "ABC123").await.unwrap();
        let outcome = fx.service.activate("carol", "ABC123").await.unwrap();

        assert_eq!(outcome, ActivationOutcome::AlreadyActivated);
        assert_eq!(
            outcome.failure_message(),
            Some("Your account was already activated.")
        );
        assert!(fx.member("carol").await.is_activated());
    }

    // Password reset

    #[tokio::test]
    async fn test_reset_password_unknown_member() {
        let fx = fixture();
        let outcome = fx.service.reset_password("ghost", "CODE").await.unwrap();
        assert_eq!(outcome, PasswordResetOutcome::UnknownMember);
    }

    #[tokio::test]
    async fn test_reset_password_requires_activation() {
        let fx = fixture();
        fx.seed_member("kevin", "secret", "CODE", false).await;

        let outcome = fx.service.reset_password("kevin", "CODE").await.unwrap();
        assert_eq!(outcome, PasswordResetOutcome::NotActivated);
    }

    #[tokio::test]
    async fn test_reset_password_code_mismatch() {
        let fx = fixture();
        fx.seed_member("kevin", "secret", "CODE", true).await;

        let outcome = fx.service.reset_password("kevin", "WRONG").await.unwrap();
        assert_eq!(outcome, PasswordResetOutcome::CodeMismatch);
    }

    #[tokio::test]
    async fn test_reset_password_generates_and_stores_hash() {
        let fx = fixture();
        fx.seed_member("kevin", "old-password", "CODE", true).await;

        let outcome = fx.service.reset_password("kevin", "CODE").await.unwrap();
        let PasswordResetOutcome::Reset { password } = outcome else {
            panic!("expected reset success");
        };

        assert_eq!(password.len(), GENERATED_PASSWORD_LENGTH);

        let kevin = fx.member("kevin").await;
        // Plaintext is never stored; the new password verifies, the old no longer does
        assert_ne!(kevin.password_hash(), password);
        assert!(fx.hasher.verify(&password, kevin.password_hash()));
        assert!(!fx.hasher.verify("old-password", kevin.password_hash()));
    }

    #[tokio::test]
    async fn test_reset_password_rotates_code() {
        let fx = fixture();
        fx.seed_member("kevin", "secret", "CODE", true).await;

        let first = fx.service.reset_password("kevin", "CODE").await.unwrap();
        assert!(matches!(first, PasswordResetOutcome::Reset { .. }));

        let kevin = fx.member("kevin").await;
        assert_ne!(kevin.activation_code(), "CODE");
        assert_eq!(kevin.activation_code().len(), ACTIVATION_CODE_LENGTH);

        // Replaying the original code fails
        let second = fx.service.reset_password("kevin", "CODE").await.unwrap();
        assert_eq!(second, PasswordResetOutcome::CodeMismatch);
    }

    #[tokio::test]
    async fn test_reset_password_keeps_activation_state() {
        let fx = fixture();
        fx.seed_member("kevin", "secret", "CODE", true).await;

        fx.service.reset_password("kevin", "CODE").await.unwrap();
        assert!(fx.member("kevin").await.is_activated());
    }

    // Password change

    #[tokio::test]
    async fn test_begin_change_password_requires_ownership() {
        let fx = fixture();
        fx.seed_member("bob", "secret", "CODE", true).await;

        let outcome = fx
            .service
            .begin_change_password("bob", &fx.session_for("alice"))
            .await
            .unwrap();
        assert!(matches!(outcome, OwnedFormOutcome::LoginRequired));
    }

    #[tokio::test]
    async fn test_change_password_rejects_wrong_old_password() {
        let fx = fixture();
        fx.seed_member("kevin", "right-old", "CODE", true).await;

        let outcome = fx
            .service
            .submit_change_password(
                "kevin",
                &fx.session_for("kevin"),
                "wrong-old",
                "new-pass",
                "new-pass",
            )
            .await
            .unwrap();

        assert_eq!(outcome, PasswordChangeOutcome::WrongOldPassword);
        assert_eq!(
            outcome.error_message(),
            Some("That doesn't seem to be your old password.")
        );

        // Old password still works
        let kevin = fx.member("kevin").await;
        assert!(fx.hasher.verify("right-old", kevin.password_hash()));
    }

    #[tokio::test]
    async fn test_change_password_rejects_confirmation_mismatch() {
        let fx = fixture();
        fx.seed_member("kevin", "right-old", "CODE", true).await;

        let outcome = fx
            .service
            .submit_change_password(
                "kevin",
                &fx.session_for("kevin"),
                "right-old",
                "new-pass",
                "different",
            )
            .await
            .unwrap();

        assert_eq!(outcome, PasswordChangeOutcome::ConfirmationMismatch);

        let kevin = fx.member("kevin").await;
        assert!(fx.hasher.verify("right-old", kevin.password_hash()));
    }

    #[tokio::test]
    async fn test_change_password_succeeds_when_both_checks_pass() {
        let fx = fixture();
        fx.seed_member("kevin", "right-old", "CODE", true).await;

        let outcome = fx
            .service
            .submit_change_password(
                "kevin",
                &fx.session_for("kevin"),
                "right-old",
                "new-pass",
                "new-pass",
            )
            .await
            .unwrap();

        assert_eq!(outcome, PasswordChangeOutcome::Changed);

        let kevin = fx.member("kevin").await;
        assert!(fx.hasher.verify("new-pass", kevin.password_hash()));
        assert!(!fx.hasher.verify("right-old", kevin.password_hash()));
    }

    #[tokio::test]
    async fn test_change_password_requires_ownership() {
        let fx = fixture();
        fx.seed_member("bob", "secret", "CODE", true).await;

        let outcome = fx
            .service
            .submit_change_password(
                "bob",
                &fx.session_for("alice"),
                "secret",
                "new-pass",
                "new-pass",
            )
            .await
            .unwrap();

        assert_eq!(outcome, PasswordChangeOutcome::LoginRequired);
    }
}
