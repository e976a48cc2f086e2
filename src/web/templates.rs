use std::borrow::Cow;

use chrono::{Datelike, Utc};

use crate::{
    config::SiteConfig,
    session::{Notice, NoticeTone},
};

pub const NAV_ITEMS: &[(&str, &str)] = &[
    ("Home", "/"),
    ("About Us", "/about"),
    ("Admissions", "/admissions"),
    ("Academics", "/academics"),
    ("Faculty & Staff", "/faculty"),
    ("Facilities", "/facilities"),
    ("Gallery", "/gallery"),
    ("Events & Notices", "/events"),
    ("Parent Resources", "/parents"),
    ("Contact Us", "/contact"),
];

const SITE_BASE_STYLES: &str = r#"
        :root { color-scheme: light; }
        body { font-family: "Helvetica Neue", Arial, sans-serif; margin: 0; background: #f8fafc; color: #0f172a; }
        header.site-header { position: sticky; top: 0; z-index: 50; background: rgba(255, 255, 255, 0.96); border-bottom: 1px solid #e2e8f0; }
        .header-bar { display: flex; justify-content: space-between; align-items: center; flex-wrap: wrap; gap: 1rem; padding: 1rem 1.5rem; max-width: 1180px; margin: 0 auto; }
        .logo { display: inline-flex; align-items: center; gap: 0.75rem; background: none; border: none; padding: 0; cursor: pointer; color: #1e3a8a; text-align: left; }
        .logo-mark { display: inline-flex; width: 3rem; height: 3rem; border-radius: 999px; align-items: center; justify-content: center; background: linear-gradient(135deg, #1e3a8a, #2563eb); color: #ffffff; font-size: 1.4rem; }
        .logo-name { display: block; font-size: 1.2rem; font-weight: 700; }
        .logo-place { display: block; font-size: 0.8rem; color: #64748b; }
        nav.primary { display: flex; flex-wrap: wrap; gap: 0.25rem; }
        nav.primary a { padding: 0.5rem 0.75rem; border-radius: 8px; color: #334155; text-decoration: none; font-size: 0.92rem; font-weight: 500; }
        nav.primary a:hover { background: #f1f5f9; color: #0f172a; }
        nav.primary a.active { background: #dbeafe; color: #1e3a8a; }
        .header-actions { display: flex; gap: 0.75rem; align-items: center; }
        .cta { display: inline-flex; padding: 0.6rem 1.1rem; border-radius: 999px; background: #1e3a8a; color: #ffffff; font-weight: 600; text-decoration: none; }
        .admin-link { display: inline-flex; padding: 0.55rem 1rem; border-radius: 999px; background: #fef3c7; border: 1px solid #fcd34d; color: #78350f; font-weight: 600; text-decoration: none; }
        main { padding: 2rem 1.5rem; max-width: 1180px; margin: 0 auto; box-sizing: border-box; }
        section { margin-bottom: 2.5rem; }
        .panel { background: #ffffff; border-radius: 12px; border: 1px solid #e2e8f0; padding: 1.5rem; box-shadow: 0 18px 40px rgba(15, 23, 42, 0.08); }
        .panel h2 { margin-top: 0; }
        .grid { display: grid; gap: 1rem; grid-template-columns: repeat(auto-fill, minmax(220px, 1fr)); }
        .card { background: #ffffff; border-radius: 12px; border: 1px solid #e2e8f0; padding: 1.25rem; }
        .card h3 { margin-top: 0; font-size: 1.05rem; }
        label { display: block; margin: 0.9rem 0 0.4rem; font-weight: 600; color: #0f172a; }
        input, select, textarea { width: 100%; padding: 0.75rem; border-radius: 8px; border: 1px solid #cbd5f5; background: #f8fafc; color: #0f172a; box-sizing: border-box; font: inherit; }
        button { padding: 0.85rem 1.2rem; border: none; border-radius: 8px; background: #2563eb; color: #ffffff; font-weight: 600; cursor: pointer; }
        button:hover { background: #1d4ed8; }
        button.danger { background: #dc2626; padding: 0.45rem 0.8rem; }
        button.secondary { background: #e2e8f0; color: #0f172a; }
        table { width: 100%; border-collapse: collapse; background: #ffffff; border: 1px solid #e2e8f0; }
        th, td { padding: 0.65rem 0.85rem; border-bottom: 1px solid #e2e8f0; text-align: left; font-size: 0.92rem; vertical-align: top; }
        th { background: #f1f5f9; font-weight: 600; }
        .truncate { max-width: 18rem; overflow: hidden; text-overflow: ellipsis; white-space: nowrap; }
        .note { color: #475569; font-size: 0.95rem; line-height: 1.6; }
        .toasts { position: fixed; right: 1.25rem; bottom: 1.25rem; display: grid; gap: 0.6rem; z-index: 80; max-width: 22rem; }
        .toast { padding: 0.9rem 1.1rem; border-radius: 10px; background: #ffffff; border: 1px solid #e2e8f0; box-shadow: 0 12px 30px rgba(15, 23, 42, 0.12); }
        .toast.destructive { background: #fee2e2; border-color: #fecaca; color: #991b1b; }
        .toast strong { display: block; }
        .dialog-backdrop { position: fixed; inset: 0; background: rgba(15, 23, 42, 0.45); display: flex; align-items: center; justify-content: center; z-index: 90; }
        .dialog { background: #ffffff; border-radius: 14px; padding: 1.75rem; width: min(26rem, 90vw); box-shadow: 0 20px 60px rgba(15, 23, 42, 0.25); }
        .dialog h2 { margin-top: 0; }
        .dialog .actions { display: flex; gap: 0.75rem; margin-top: 1.25rem; }
        .dialog .actions form { margin: 0; }
        .app-footer { margin-top: 3rem; padding: 2rem 1.5rem; text-align: center; font-size: 0.85rem; color: #94a3b8; border-top: 1px solid #e2e8f0; }
        @media (max-width: 768px) {
            .header-bar { flex-direction: column; align-items: flex-start; }
            main { padding: 1.5rem 1rem; }
            th, td { padding: 0.5rem; }
        }
"#;

const LOGO_SCRIPT: &str = r#"<script>
(function () {
    var logo = document.getElementById('site-logo');
    if (!logo) { return; }
    logo.addEventListener('click', function () {
        fetch('/logo', { method: 'POST', credentials: 'same-origin' })
            .then(function (res) { return res.json(); })
            .then(function (data) {
                if (data.action !== 'none') { window.location.reload(); }
            })
            .catch(function () {});
    });
})();
</script>"#;

/// Everything the shared page chrome needs besides the page body.
pub struct PageLayout<'a> {
    pub site: &'a SiteConfig,
    pub meta_title: &'a str,
    pub active_path: &'a str,
    pub body_html: Cow<'a, str>,
    pub elevated: bool,
    pub prompt_open: bool,
    pub notices: Vec<Notice>,
}

pub fn render_page(layout: PageLayout<'_>) -> String {
    let PageLayout {
        site,
        meta_title,
        active_path,
        body_html,
        elevated,
        prompt_open,
        notices,
    } = layout;

    let school_name = escape_html(&site.school_name);
    let school_location = escape_html(&site.school_location);

    let nav_html = NAV_ITEMS
        .iter()
        .map(|(label, href)| {
            let class = if *href == active_path { " class=\"active\"" } else { "" };
            format!(
                r#"<a href="{href}"{class}>{label}</a>"#,
                label = escape_html(label)
            )
        })
        .collect::<Vec<_>>()
        .join("");

    let admin_link_html = if elevated {
        r#"<a class="admin-link" href="/admin">Admin Panel</a>"#
    } else {
        ""
    };

    let dialog_html = if prompt_open {
        render_credential_dialog(active_path)
    } else {
        String::new()
    };

    let toasts_html = render_notices(&notices);
    let footer = render_footer(site);

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <title>{meta_title} | {school_name}</title>
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <style>
{styles}
    </style>
</head>
<body>
    <header class="site-header">
        <div class="header-bar">
            <button type="button" id="site-logo" class="logo" aria-label="{school_name}">
                <span class="logo-mark">&#127891;</span>
                <span>
                    <span class="logo-name">{school_name}</span>
                    <span class="logo-place">School, {school_location}</span>
                </span>
            </button>
            <nav class="primary">{nav_html}</nav>
            <div class="header-actions">
                {admin_link_html}
                <a class="cta" href="/admissions">Apply Now</a>
            </div>
        </div>
    </header>
    <main>
{body_html}
    </main>
    {footer}
    {toasts_html}
    {dialog_html}
{script}
</body>
</html>"#,
        meta_title = escape_html(meta_title),
        styles = SITE_BASE_STYLES,
        script = LOGO_SCRIPT,
    )
}

fn render_credential_dialog(return_to: &str) -> String {
    let return_to = escape_html(return_to);
    format!(
        r#"<div class="dialog-backdrop">
        <div class="dialog" role="dialog" aria-modal="true">
            <h2>Admin Access</h2>
            <form method="post" action="/admin/unlock">
                <input type="hidden" name="redirect" value="{return_to}">
                <input type="password" name="password" placeholder="Enter admin password" autofocus>
                <div class="actions">
                    <button type="submit">Access Admin Panel</button>
                </div>
            </form>
            <form method="post" action="/admin/unlock/cancel">
                <input type="hidden" name="redirect" value="{return_to}">
                <div class="actions"><button type="submit" class="secondary">Close</button></div>
            </form>
        </div>
    </div>"#
    )
}

pub fn render_notices(notices: &[Notice]) -> String {
    if notices.is_empty() {
        return String::new();
    }

    let items = notices
        .iter()
        .map(|notice| {
            let class = match notice.tone {
                NoticeTone::Success => "toast",
                NoticeTone::Destructive => "toast destructive",
            };
            let description = notice
                .description
                .as_deref()
                .map(|text| format!("<span>{}</span>", escape_html(text)))
                .unwrap_or_default();
            format!(
                r#"<div class="{class}" role="status"><strong>{title}</strong>{description}</div>"#,
                title = escape_html(&notice.title),
            )
        })
        .collect::<Vec<_>>()
        .join("");

    format!(r#"<div class="toasts">{items}</div>"#)
}

pub fn render_footer(site: &SiteConfig) -> String {
    let current_year = Utc::now().year();
    format!(
        r#"<footer class="app-footer">© {year} {name}, {location}. All rights reserved.</footer>"#,
        year = current_year,
        name = escape_html(&site.school_name),
        location = escape_html(&site.school_location),
    )
}

pub fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
