use gloo_console::error;
use gloo_utils::document;
use trip_dispatch_lib::session::Session;
use wasm_bindgen::JsCast;
use web_sys::HtmlDocument;

fn html_document() -> Option<HtmlDocument> {
    document().dyn_into::<HtmlDocument>().ok()
}

/// Parses the session cookies once; pages receive the result explicitly
/// instead of reading cookies ad hoc.
pub fn load() -> Option<Session> {
    let cookies = html_document()?.cookie().ok()?;
    Session::from_cookies(&cookies)
}

pub fn store(session: &Session) {
    let Some(doc) = html_document() else {
        return;
    };

    for (name, value) in session.to_cookies() {
        if let Err(err) = doc.set_cookie(&format!("{name}={value}; path=/")) {
            error!(format!("Failed to set {name} cookie: {err:?}"));
        }
    }
}
