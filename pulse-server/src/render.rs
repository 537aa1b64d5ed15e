use axum::http::StatusCode;
use axum::response::Html;
use pulse_lib::error::StoreError;
use pulse_lib::feed::RenderablePost;
use pulse_lib::profile::{AvatarStyle, Profile};
use pulse_lib::quote::QUOTE_HINT;
use pulse_lib::session::Session;

const STYLE: &str = r#"
body { background-color: #000000; color: #e7e9ea; font-family: sans-serif; margin: 0; }
.layout { display: flex; gap: 24px; padding: 24px; }
.sidebar { width: 280px; flex-shrink: 0; }
.main { flex-grow: 1; max-width: 640px; }
h1.brand { color: #1d9bf0; }
.pfp-circle { width: 48px; height: 48px; border-radius: 50%; object-fit: cover; margin-right: 12px; }
.logo-square { width: 48px; height: 48px; border-radius: 8px; object-fit: contain; background: #16181c; margin-right: 12px; }
.content-card { border: 1px solid #2f3336; padding: 20px; border-radius: 16px; margin-bottom: 15px; background: #000000; }
.verified-badge { color: #FFD700; margin-left: 5px; font-weight: bold; }
.handle-text { color: #71767b; font-size: 14px; }
input, textarea, select, button { background: #16181c; color: #e7e9ea; border: 1px solid #2f3336; border-radius: 8px; padding: 8px; margin: 4px 0; width: 100%; box-sizing: border-box; }
button { cursor: pointer; }
.notice { color: #00ba7c; }
"#;

pub struct PageView<'a> {
    pub session: Option<&'a Session>,
    /// The signed-in user's own profile row, for the edit-form defaults.
    pub viewer: Option<&'a Profile>,
    pub notice: Option<String>,
    pub feed: &'a [RenderablePost],
    pub symbol: &'a str,
    pub price: Option<f64>,
}

fn escape(s: &str) -> String {
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

pub fn page(view: &PageView) -> String {
    let mut html = String::new();
    html.push_str("<!DOCTYPE html><html><head><title>Quantum X Global</title>");
    html.push_str(&format!("<style>{}</style></head><body>", STYLE));
    html.push_str("<div class=\"layout\"><div class=\"sidebar\">");
    html.push_str("<h1 class=\"brand\">&#x1F4B9; Quantum X</h1>");

    if let Some(notice) = &view.notice {
        html.push_str(&format!("<p class=\"notice\">{}</p>", escape(notice)));
    }

    match view.session {
        None => html.push_str(&enter_form()),
        Some(session) => html.push_str(&account_panel(session, view.viewer)),
    }

    html.push_str(&market_widget(view.symbol, view.price));
    html.push_str("</div><div class=\"main\"><h1>Global Pulse</h1>");

    if view.session.is_some() {
        html.push_str(&composer());
    }
    for entry in view.feed {
        html.push_str(&feed_card(entry));
    }

    html.push_str("</div></div></body></html>");
    html
}

fn enter_form() -> String {
    concat!(
        "<h3>Login / Register</h3>",
        "<form method=\"post\" action=\"/enter\">",
        "<input name=\"username\" placeholder=\"e.g. quantum_ceo\">",
        "<label><input type=\"radio\" name=\"account_type\" value=\"Individual\" checked> Individual</label>",
        "<label><input type=\"radio\" name=\"account_type\" value=\"Company\"> Company</label>",
        "<button type=\"submit\">Enter Network</button>",
        "</form>",
    )
    .to_string()
}

fn account_panel(session: &Session, viewer: Option<&Profile>) -> String {
    let pfp = viewer.map(|p| p.pfp.as_str()).unwrap_or("");
    let style = viewer.map(|p| p.style).unwrap_or(AvatarStyle::Circle);
    let (circle_checked, square_checked) = match style {
        AvatarStyle::Circle => (" checked", ""),
        AvatarStyle::Square => ("", " checked"),
    };
    format!(
        concat!(
            "<p>Logged in: <b>@{user}</b></p>",
            "<h3>&#x1F464; Edit Profile</h3>",
            "<form method=\"post\" action=\"/profile\">",
            "<input name=\"pfp\" value=\"{pfp}\" placeholder=\"Avatar URL\">",
            "<label><input type=\"radio\" name=\"style\" value=\"Circle\"{circle}> Circle</label>",
            "<label><input type=\"radio\" name=\"style\" value=\"Square\"{square}> Square</label>",
            "<button type=\"submit\">Update Identity</button>",
            "</form>",
            "<form method=\"post\" action=\"/logout\">",
            "<button type=\"submit\">Logout</button>",
            "</form>",
        ),
        user = escape(&session.username),
        pfp = escape(pfp),
        circle = circle_checked,
        square = square_checked,
    )
}

fn composer() -> String {
    concat!(
        "<div class=\"content-card\">",
        "<form method=\"post\" action=\"/post\">",
        "<textarea name=\"text\" placeholder=\"Broadcast to the network...\"></textarea>",
        "<button type=\"submit\">Post</button>",
        "</form></div>",
    )
    .to_string()
}

fn market_widget(symbol: &str, price: Option<f64>) -> String {
    let readout = match price {
        Some(price) => format!("<h2>{} ${:.2}</h2>", escape(symbol), price),
        None => format!("<p class=\"handle-text\">{}</p>", QUOTE_HINT),
    };
    format!(
        concat!(
            "<hr><h3>&#x1F4CA; Market Pulse</h3>",
            "<form method=\"get\" action=\"/\">",
            "<input name=\"symbol\" value=\"{symbol}\">",
            "<button type=\"submit\">Quote</button>",
            "</form>{readout}",
        ),
        symbol = escape(symbol),
        readout = readout,
    )
}

fn feed_card(entry: &RenderablePost) -> String {
    let img_class = match entry.style {
        AvatarStyle::Circle => "pfp-circle",
        AvatarStyle::Square => "logo-square",
    };
    let badge = if entry.verified {
        "<span class=\"verified-badge\">&#x2714;</span>"
    } else {
        ""
    };
    format!(
        concat!(
            "<div class=\"content-card\">",
            "<div style=\"display: flex; align-items: flex-start;\">",
            "<img src=\"{pfp}\" class=\"{img_class}\">",
            "<div><b>{name}</b>{badge} <span class=\"handle-text\">@{author}</span><br>",
            "<div style=\"margin-top:8px;\">{text}</div>",
            "</div></div></div>",
        ),
        pfp = escape(&entry.avatar_url),
        img_class = img_class,
        name = escape(&entry.display_name),
        badge = badge,
        author = escape(&entry.author),
        text = escape(&entry.text),
    )
}

/// The only fatal path: the datastore is unreachable or corrupt, so the
/// interaction halts with a visible message and nothing is retried.
pub fn connection_error(err: &StoreError) -> (StatusCode, Html<String>) {
    let body = format!(
        concat!(
            "<!DOCTYPE html><html><head><style>{}</style></head><body>",
            "<div class=\"layout\"><div class=\"main\">",
            "<h1>&#x26A0;&#xFE0F; Connection Error</h1>",
            "<p>Check the datastore configuration: {}</p>",
            "</div></div></body></html>",
        ),
        STYLE,
        escape(&err.to_string()),
    );
    (StatusCode::SERVICE_UNAVAILABLE, Html(body))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_in_user_text() {
        assert_eq!(
            escape("<script>\"hi\" & 'bye'</script>"),
            "&lt;script&gt;&quot;hi&quot; &amp; &#39;bye&#39;&lt;/script&gt;"
        );
    }

    #[test]
    fn feed_card_shows_the_badge_only_when_verified() {
        let mut entry = RenderablePost {
            author: "acme".to_string(),
            display_name: "Acme".to_string(),
            avatar_url: "x".to_string(),
            style: AvatarStyle::Square,
            verified: true,
            text: "hi".to_string(),
        };
        assert!(feed_card(&entry).contains("verified-badge"));
        assert!(feed_card(&entry).contains("logo-square"));

        entry.verified = false;
        entry.style = AvatarStyle::Circle;
        assert!(!feed_card(&entry).contains("verified-badge"));
        assert!(feed_card(&entry).contains("pfp-circle"));
    }

    #[test]
    fn signed_out_page_offers_the_enter_form() {
        let html = page(&PageView {
            session: None,
            viewer: None,
            notice: None,
            feed: &[],
            symbol: "BTC-USD",
            price: None,
        });
        assert!(html.contains("action=\"/enter\""));
        assert!(!html.contains("action=\"/post\""));
        assert!(html.contains(QUOTE_HINT));
    }

    #[test]
    fn signed_in_page_offers_composer_and_editor() {
        let session = Session::new("alice");
        let html = page(&PageView {
            session: Some(&session),
            viewer: None,
            notice: None,
            feed: &[],
            symbol: "BTC-USD",
            price: Some(64250.5),
        });
        assert!(html.contains("action=\"/post\""));
        assert!(html.contains("action=\"/profile\""));
        assert!(html.contains("@alice"));
        assert!(html.contains("$64250.50"));
    }
}
