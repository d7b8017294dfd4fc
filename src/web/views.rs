//! Server-rendered HTML pages.
//!
//! Every interpolated value passes through [`escape_html`]; query string
//! values additionally pass through `urlencoding`.

use std::fmt::Write;

use axum::response::Html;

use crate::auth::RegistrationPolicy;
use crate::board::{FeedMode, FeedQuery, Message};
use crate::datetime::to_display;
use crate::db::User;
use crate::i18n::Messages;
use crate::web::middleware::SessionClaims;

/// Escape text for use in HTML content and attribute values.
pub fn escape_html(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(text: &Messages, title: &str, nav: &str, content: &str) -> Html<String> {
    Html(format!(
        "<!DOCTYPE html>\n\
         <html lang=\"{lang}\">\n\
         <head>\n\
         <meta charset=\"utf-8\">\n\
         <meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n\
         <title>{title} - {site}</title>\n\
         <link rel=\"stylesheet\" href=\"/static/style.css\">\n\
         </head>\n\
         <body>\n\
         <header><h1>{site}</h1>{nav}</header>\n\
         <main>\n{content}</main>\n\
         </body>\n\
         </html>\n",
        lang = text.locale,
        title = escape_html(title),
        site = escape_html(text.site_title),
        nav = nav,
        content = content,
    ))
}

fn error_block(error: Option<&str>) -> String {
    match error {
        Some(msg) => format!("<p class=\"error\">{}</p>\n", escape_html(msg)),
        None => String::new(),
    }
}

fn nav(text: &Messages, session: &SessionClaims, registration: RegistrationPolicy) -> String {
    let mut links = vec![format!("<a href=\"/\">{}</a>", escape_html(text.feed_title))];
    if session.is_admin {
        links.push(format!(
            "<a href=\"/admin\">{}</a>",
            escape_html(text.admin_link)
        ));
    }
    if session.is_admin || registration.is_public() {
        links.push(format!(
            "<a href=\"/register\">{}</a>",
            escape_html(text.register_link)
        ));
    }
    links.push(format!(
        "<a href=\"/logout\">{}</a>",
        escape_html(text.logout_link)
    ));
    format!(
        "<nav><span class=\"user\">{}</span> {}</nav>",
        escape_html(&session.username),
        links.join(" | ")
    )
}

/// Login page. `error` is shown above the form.
pub fn login_page(text: &Messages, error: Option<&str>) -> Html<String> {
    let content = format!(
        "<h2>{title}</h2>\n\
         {error}\
         <form method=\"post\" action=\"/login\">\n\
         <label>{user} <input type=\"text\" name=\"username\" required autofocus></label>\n\
         <label>{pass} <input type=\"password\" name=\"password\" required></label>\n\
         <button type=\"submit\">{button}</button>\n\
         </form>\n",
        title = escape_html(text.login_title),
        error = error_block(error),
        user = escape_html(text.username_label),
        pass = escape_html(text.password_label),
        button = escape_html(text.login_button),
    );
    layout(text, text.login_title, "", &content)
}

/// Registration page. Fields always render empty.
pub fn register_page(text: &Messages, error: Option<&str>) -> Html<String> {
    let content = format!(
        "<h2>{title}</h2>\n\
         {error}\
         <form method=\"post\" action=\"/register\">\n\
         <label>{user} <input type=\"text\" name=\"username\" required></label>\n\
         <label>{pin} <input type=\"password\" name=\"password\" inputmode=\"numeric\" \
         pattern=\"[0-9]{{4}}\" maxlength=\"4\" required></label>\n\
         <button type=\"submit\">{button}</button>\n\
         </form>\n",
        title = escape_html(text.register_title),
        error = error_block(error),
        user = escape_html(text.username_label),
        pin = escape_html(text.pin_label),
        button = escape_html(text.register_button),
    );
    layout(text, text.register_title, "", &content)
}

/// Data for the feed page.
pub struct FeedPage<'a> {
    pub text: &'a Messages,
    pub session: &'a SessionClaims,
    pub registration: RegistrationPolicy,
    pub query: &'a FeedQuery,
    pub messages: &'a [Message],
    pub clubs: &'a [String],
    pub error: Option<&'a str>,
    pub timezone: &'a str,
}

/// Feed link preserving the given mode and club filter.
pub fn feed_href(mode: FeedMode, club: Option<&str>) -> String {
    let mut params = Vec::new();
    if let Some(mode) = mode.as_param() {
        params.push(format!("mode={mode}"));
    }
    if let Some(club) = club {
        params.push(format!("club={}", urlencoding::encode(club)));
    }
    if params.is_empty() {
        "/".to_string()
    } else {
        format!("/?{}", params.join("&"))
    }
}

/// Feed page: post form, filters, and messages.
pub fn feed_page(page: &FeedPage<'_>) -> Html<String> {
    let text = page.text;
    let current_club = page.query.club.as_deref();
    let mut content = String::new();

    let _ = write!(
        content,
        "<h2>{title}</h2>\n{error}",
        title = escape_html(text.feed_title),
        error = error_block(page.error),
    );

    let mut options = String::new();
    for club in page.clubs {
        let _ = write!(options, "<option value=\"{}\">", escape_html(club));
    }
    let _ = write!(
        content,
        "<form method=\"post\" action=\"{action}\" class=\"post\">\n\
         <label>{body_label} <textarea name=\"body\" rows=\"3\"></textarea></label>\n\
         <label>{club_label} \
         <input type=\"text\" name=\"club\" list=\"clubs\" value=\"{club}\"></label>\n\
         <datalist id=\"clubs\">{options}</datalist>\n\
         <button type=\"submit\">{button}</button>\n\
         </form>\n",
        action = escape_html(&feed_href(page.query.mode, current_club)),
        body_label = escape_html(text.body_label),
        club_label = escape_html(text.club_label),
        club = escape_html(current_club.unwrap_or_default()),
        options = options,
        button = escape_html(text.post_button),
    );

    let (other_mode, other_label) = match page.query.mode {
        FeedMode::ByClub => (FeedMode::List, text.mode_list),
        FeedMode::List => (FeedMode::ByClub, text.mode_by_club),
    };
    let mut filters = vec![format!(
        "<a href=\"{}\">{}</a>",
        escape_html(&feed_href(other_mode, current_club)),
        escape_html(other_label)
    )];
    filters.push(format!(
        "<a href=\"{}\">{}</a>",
        escape_html(&feed_href(page.query.mode, None)),
        escape_html(text.all_clubs)
    ));
    for club in page.clubs {
        filters.push(format!(
            "<a href=\"{}\">{}</a>",
            escape_html(&feed_href(page.query.mode, Some(club))),
            escape_html(club)
        ));
    }
    let _ = writeln!(content, "<nav class=\"filters\">{}</nav>", filters.join(" | "));

    if page.messages.is_empty() {
        let _ = writeln!(content, "<p>{}</p>", escape_html(text.no_messages));
    } else {
        content.push_str("<ul class=\"messages\">\n");
        for message in page.messages {
            let _ = writeln!(
                content,
                "<li><span class=\"club\">[{club}]</span> <span class=\"name\">{name}</span> \
                 <time>{posted}</time><p>{body}</p></li>",
                club = escape_html(&message.club),
                name = escape_html(&message.name),
                posted = escape_html(&to_display(&message.posted, page.timezone)),
                body = escape_html(&message.body),
            );
        }
        content.push_str("</ul>\n");
    }

    layout(
        text,
        text.feed_title,
        &nav(text, page.session, page.registration),
        &content,
    )
}

/// Admin dashboard: every user and every message, newest first. Read-only.
pub fn admin_page(
    text: &Messages,
    session: &SessionClaims,
    registration: RegistrationPolicy,
    users: &[User],
    messages: &[Message],
    timezone: &str,
) -> Html<String> {
    let mut content = format!("<h2>{}</h2>\n", escape_html(text.admin_title));

    let _ = write!(
        content,
        "<h3>{heading}</h3>\n<table class=\"users\">\n\
         <tr><th>{id}</th><th>{username}</th><th>{admin}</th><th>{created}</th></tr>\n",
        heading = escape_html(text.users_heading),
        id = escape_html(text.col_id),
        username = escape_html(text.col_username),
        admin = escape_html(text.col_admin),
        created = escape_html(text.col_created),
    );
    for user in users {
        let _ = writeln!(
            content,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            user.id,
            escape_html(&user.username),
            escape_html(text.flag(user.is_admin)),
            escape_html(&to_display(&user.created, timezone)),
        );
    }
    content.push_str("</table>\n");

    let _ = write!(
        content,
        "<h3>{heading}</h3>\n<table class=\"messages\">\n\
         <tr><th>{id}</th><th>{name}</th><th>{club}</th><th>{body}</th><th>{posted}</th><th>{ip}</th></tr>\n",
        heading = escape_html(text.messages_heading),
        id = escape_html(text.col_id),
        name = escape_html(text.col_name),
        club = escape_html(text.col_club),
        body = escape_html(text.col_body),
        posted = escape_html(text.col_posted),
        ip = escape_html(text.col_ip),
    );
    for message in messages {
        let _ = writeln!(
            content,
            "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
            message.id,
            escape_html(&message.name),
            escape_html(&message.club),
            escape_html(&message.body),
            escape_html(&to_display(&message.posted, timezone)),
            escape_html(message.ip.as_deref().unwrap_or_default()),
        );
    }
    content.push_str("</table>\n");

    layout(
        text,
        text.admin_title,
        &nav(text, session, registration),
        &content,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::{EN, JA};

    fn claims(username: &str, is_admin: bool) -> SessionClaims {
        SessionClaims {
            sub: 1,
            username: username.to_string(),
            is_admin,
            iat: 0,
            exp: 0,
            jti: String::new(),
        }
    }

    fn message(id: i64, name: &str, body: &str, club: &str) -> Message {
        Message {
            id,
            name: name.to_string(),
            body: body.to_string(),
            club: club.to_string(),
            ip: Some("127.0.0.1".to_string()),
            posted: "2024-01-15 01:00:00".to_string(),
        }
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html("<script>alert('x') & \"y\"</script>"),
            "&lt;script&gt;alert(&#39;x&#39;) &amp; &quot;y&quot;&lt;/script&gt;"
        );
        assert_eq!(escape_html("部活"), "部活");
    }

    #[test]
    fn test_login_page_error() {
        let Html(body) = login_page(&JA, Some(JA.login_failed));
        assert!(body.contains(JA.login_failed));
        assert!(body.contains("action=\"/login\""));

        let Html(body) = login_page(&JA, None);
        assert!(!body.contains("class=\"error\""));
    }

    #[test]
    fn test_register_page_fields_empty() {
        let Html(body) = register_page(&EN, Some(EN.pin_invalid));
        assert!(body.contains(EN.pin_invalid));
        assert!(!body.contains("value="));
    }

    #[test]
    fn test_feed_href() {
        assert_eq!(feed_href(FeedMode::ByClub, None), "/");
        assert_eq!(feed_href(FeedMode::List, None), "/?mode=list");
        assert_eq!(
            feed_href(FeedMode::List, Some("go club")),
            "/?mode=list&club=go%20club"
        );
        assert_eq!(feed_href(FeedMode::ByClub, Some("chess")), "/?club=chess");
    }

    #[test]
    fn test_feed_page_escapes_and_shifts_time() {
        let session = claims("alice", false);
        let query = FeedQuery::default();
        let messages = vec![message(1, "alice", "<b>hi</b>", "chess")];
        let clubs = vec!["chess".to_string()];
        let page = FeedPage {
            text: &EN,
            session: &session,
            registration: RegistrationPolicy::AdminOnly,
            query: &query,
            messages: &messages,
            clubs: &clubs,
            error: None,
            timezone: "Asia/Tokyo",
        };

        let Html(body) = feed_page(&page);
        assert!(body.contains("&lt;b&gt;hi&lt;/b&gt;"));
        assert!(!body.contains("<b>hi</b>"));
        assert!(body.contains("2024-01-15 10:00:00"));
        assert!(!body.contains("href=\"/admin\""));
        assert!(!body.contains("href=\"/register\""));
    }

    #[test]
    fn test_feed_page_empty_with_error() {
        let session = claims("alice", true);
        let query = FeedQuery::default().with_mode(FeedMode::List);
        let page = FeedPage {
            text: &EN,
            session: &session,
            registration: RegistrationPolicy::AdminOnly,
            query: &query,
            messages: &[],
            clubs: &[],
            error: Some(EN.empty_body),
            timezone: "UTC",
        };

        let Html(body) = feed_page(&page);
        assert!(body.contains(EN.no_messages));
        assert!(body.contains(EN.empty_body));
        assert!(body.contains("href=\"/admin\""));
        assert!(body.contains(EN.mode_by_club));
    }

    #[test]
    fn test_admin_page_lists_everything() {
        let session = claims("teacher", true);
        let users = vec![User {
            id: 2,
            username: "bob".to_string(),
            password_hash: "secret-hash".to_string(),
            is_admin: false,
            created: "2024-01-15 00:00:00".to_string(),
        }];
        let messages = vec![message(5, "bob", "hey", "go")];

        let Html(body) = admin_page(
            &EN,
            &session,
            RegistrationPolicy::AdminOnly,
            &users,
            &messages,
            "Asia/Tokyo",
        );
        assert!(body.contains("bob"));
        assert!(body.contains("127.0.0.1"));
        assert!(body.contains("2024-01-15 09:00:00"));
        assert!(!body.contains("secret-hash"));
    }
}
