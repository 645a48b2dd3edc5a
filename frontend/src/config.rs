// Elements looked up by id or selector.
pub const NAVBAR_ID: &str = "navbar";
pub const MOBILE_TOGGLE_ID: &str = "mobile-toggle";
pub const NAV_LINKS_SELECTOR: &str = ".nav-links";
pub const CONTACT_FORM_ID: &str = "contact-form";
pub const SUBMIT_BUTTON_SELECTOR: &str = "button[type=\"submit\"]";
pub const HERO_SELECTOR: &str = ".hero";
pub const ANCHOR_SELECTOR: &str = "a[href^=\"#\"]";
pub const REVEAL_SELECTOR: &str = ".service-card, .testimonial-card, .about-content, \
    .about-image-wrapper, .contact-info, .contact-form-wrapper, .section-header";

// Class vocabulary toggled on the page.
pub const SCROLLED_CLASS: &str = "scrolled";
pub const ACTIVE_CLASS: &str = "active";
pub const ANIMATE_IN_CLASS: &str = "animate-in";
pub const NOTIFICATION_CLASS: &str = "notification";
pub const NOTIFICATION_CLOSE_CLASS: &str = "notification-close";

/// Vertical offset (px) past which the navbar switches to its compact style.
pub const NAVBAR_SCROLL_THRESHOLD: f64 = 50.0;

pub const REVEAL_STAGGER_SECS: f64 = 0.1;
pub const REVEAL_VISIBILITY_THRESHOLD: f64 = 0.1;
pub const REVEAL_ROOT_MARGIN: &str = "0px 0px -50px 0px";
pub const REVEAL_OFFSET_PX: u32 = 30;

pub const PARALLAX_FACTOR: f64 = 0.5;

/// Length of the toast slide transition; removal waits for it to finish.
pub const TOAST_TRANSITION_MS: u32 = 400;
pub const TOAST_DISPLAY_MS: u32 = 5_000;

/// Latency of the simulated transport used when no endpoint is configured.
pub const SIMULATED_SUBMIT_DELAY_MS: u32 = 1_500;

pub fn get_backend_url() -> &'static str {
    option_env!("BACKEND_URL").unwrap_or("")
}

/// Where contact requests are posted, if anywhere.
///
/// Relative endpoints are joined onto [`get_backend_url`]. An unset or empty
/// `CONTACT_ENDPOINT` means the form runs against the simulated transport.
pub fn contact_endpoint() -> Option<String> {
    resolve_endpoint(get_backend_url(), option_env!("CONTACT_ENDPOINT"))
}

fn resolve_endpoint(backend_url: &str, endpoint: Option<&str>) -> Option<String> {
    let endpoint = endpoint.map(str::trim).filter(|e| !e.is_empty())?;
    if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
        Some(endpoint.to_string())
    } else {
        Some(format!("{}{}", backend_url.trim_end_matches('/'), endpoint))
    }
}
