//! User-facing strings for clubboard.
//!
//! Pages are rendered in one language chosen at startup from
//! `[locale] language`. Unknown codes fall back to [`DEFAULT_LOCALE`].

use crate::auth::{RegistrationError, ValidationError};
use crate::board::PostError;

/// Default locale.
pub const DEFAULT_LOCALE: &str = "ja";

/// A complete set of UI strings for one language.
#[derive(Debug)]
pub struct Messages {
    pub locale: &'static str,
    pub site_title: &'static str,
    pub login_title: &'static str,
    pub username_label: &'static str,
    pub password_label: &'static str,
    pub login_button: &'static str,
    pub login_failed: &'static str,
    pub too_many_attempts: &'static str,
    pub logout_link: &'static str,
    pub feed_title: &'static str,
    pub body_label: &'static str,
    pub club_label: &'static str,
    pub post_button: &'static str,
    pub mode_list: &'static str,
    pub mode_by_club: &'static str,
    pub all_clubs: &'static str,
    pub no_messages: &'static str,
    pub empty_body: &'static str,
    pub missing_club: &'static str,
    pub admin_link: &'static str,
    pub admin_title: &'static str,
    pub admins_only: &'static str,
    pub users_heading: &'static str,
    pub messages_heading: &'static str,
    pub register_link: &'static str,
    pub register_title: &'static str,
    pub pin_label: &'static str,
    pub register_button: &'static str,
    pub username_required: &'static str,
    pub pin_invalid: &'static str,
    pub username_taken: &'static str,
    pub col_id: &'static str,
    pub col_username: &'static str,
    pub col_admin: &'static str,
    pub col_created: &'static str,
    pub col_name: &'static str,
    pub col_body: &'static str,
    pub col_posted: &'static str,
    pub col_ip: &'static str,
    pub col_club: &'static str,
    pub yes: &'static str,
    pub no: &'static str,
}

/// Japanese strings.
pub static JA: Messages = Messages {
    locale: "ja",
    site_title: "部活掲示板",
    login_title: "ログイン",
    username_label: "ユーザー名",
    password_label: "パスワード",
    login_button: "ログイン",
    login_failed: "ユーザー名またはパスワードが違います",
    too_many_attempts: "ログイン試行が多すぎます。しばらくしてから再度お試しください。",
    logout_link: "ログアウト",
    feed_title: "掲示板",
    body_label: "本文",
    club_label: "部活",
    post_button: "投稿",
    mode_list: "新着順",
    mode_by_club: "部活別",
    all_clubs: "すべて",
    no_messages: "投稿はまだありません",
    empty_body: "本文を入力してください",
    missing_club: "部活を選択してください",
    admin_link: "管理画面",
    admin_title: "管理画面",
    admins_only: "管理者のみ",
    users_heading: "ユーザー一覧",
    messages_heading: "投稿一覧",
    register_link: "ユーザー登録",
    register_title: "ユーザー登録",
    pin_label: "パスワード（数字4桁）",
    register_button: "登録",
    username_required: "ユーザー名を入力してください",
    pin_invalid: "パスワードは数字4桁で入力してください",
    username_taken: "そのユーザー名は既に使われています",
    col_id: "ID",
    col_username: "ユーザー名",
    col_admin: "管理者",
    col_created: "作成日時",
    col_name: "名前",
    col_body: "本文",
    col_posted: "投稿日時",
    col_ip: "IP",
    col_club: "部活",
    yes: "はい",
    no: "いいえ",
};

/// English strings.
pub static EN: Messages = Messages {
    locale: "en",
    site_title: "Club Board",
    login_title: "Log in",
    username_label: "Username",
    password_label: "Password",
    login_button: "Log in",
    login_failed: "Incorrect username or password",
    too_many_attempts: "Too many login attempts. Please try again later.",
    logout_link: "Log out",
    feed_title: "Board",
    body_label: "Message",
    club_label: "Club",
    post_button: "Post",
    mode_list: "Newest first",
    mode_by_club: "By club",
    all_clubs: "All",
    no_messages: "No messages yet",
    empty_body: "Please enter a message",
    missing_club: "Please choose a club",
    admin_link: "Admin",
    admin_title: "Admin dashboard",
    admins_only: "Admins only",
    users_heading: "Users",
    messages_heading: "Messages",
    register_link: "Register a user",
    register_title: "Register a user",
    pin_label: "Password (4 digits)",
    register_button: "Register",
    username_required: "Please enter a username",
    pin_invalid: "The password must be exactly 4 digits",
    username_taken: "That username is already taken",
    col_id: "ID",
    col_username: "Username",
    col_admin: "Admin",
    col_created: "Created",
    col_name: "Name",
    col_body: "Message",
    col_posted: "Posted",
    col_ip: "IP",
    col_club: "Club",
    yes: "yes",
    no: "no",
};

impl Messages {
    /// Look up the strings for a language code.
    pub fn for_locale(locale: &str) -> &'static Messages {
        match locale.to_lowercase().as_str() {
            "en" => &EN,
            "ja" => &JA,
            other => {
                tracing::warn!(
                    locale = %other,
                    "Unknown locale, falling back to {}",
                    DEFAULT_LOCALE
                );
                &JA
            }
        }
    }

    /// Inline message for a rejected post.
    pub fn post_error(&self, err: &PostError) -> Option<&'static str> {
        match err {
            PostError::EmptyBody => Some(self.empty_body),
            PostError::MissingClub => Some(self.missing_club),
            PostError::Database(_) => None,
        }
    }

    /// Inline message for a rejected registration.
    ///
    /// Store and hashing failures have no inline message; they become 500s.
    pub fn registration_error(&self, err: &RegistrationError) -> Option<&'static str> {
        match err {
            RegistrationError::Validation(ValidationError::UsernameEmpty) => {
                Some(self.username_required)
            }
            RegistrationError::Validation(ValidationError::PinInvalid) => Some(self.pin_invalid),
            RegistrationError::UsernameTaken => Some(self.username_taken),
            RegistrationError::Password(_) | RegistrationError::Database(_) => None,
        }
    }

    /// Yes/no label for a flag.
    pub fn flag(&self, value: bool) -> &'static str {
        if value {
            self.yes
        } else {
            self.no
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BoardError;

    #[test]
    fn test_for_locale() {
        assert_eq!(Messages::for_locale("ja").locale, "ja");
        assert_eq!(Messages::for_locale("EN").locale, "en");
        assert_eq!(Messages::for_locale("fr").locale, DEFAULT_LOCALE);
    }

    #[test]
    fn test_login_failed_message() {
        assert_eq!(JA.login_failed, "ユーザー名またはパスワードが違います");
        assert_eq!(JA.admins_only, "管理者のみ");
    }

    #[test]
    fn test_post_error_messages() {
        assert_eq!(EN.post_error(&PostError::EmptyBody), Some(EN.empty_body));
        assert_eq!(EN.post_error(&PostError::MissingClub), Some(EN.missing_club));
        assert_eq!(
            EN.post_error(&PostError::Database(BoardError::Database("x".into()))),
            None
        );
    }

    #[test]
    fn test_registration_error_messages() {
        assert_eq!(
            JA.registration_error(&RegistrationError::UsernameTaken),
            Some(JA.username_taken)
        );
        assert_eq!(
            JA.registration_error(&RegistrationError::Validation(ValidationError::PinInvalid)),
            Some(JA.pin_invalid)
        );
        assert_eq!(
            JA.registration_error(&RegistrationError::Database(BoardError::Database(
                "locked".into()
            ))),
            None
        );
    }

    #[test]
    fn test_flag() {
        assert_eq!(EN.flag(true), "yes");
        assert_eq!(EN.flag(false), "no");
    }
}
