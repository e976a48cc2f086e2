use std::borrow::Cow;

use axum::{
    extract::{Query, State},
    http::{StatusCode, Uri},
    response::Html,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;

use crate::{
    session::SiteSession,
    store::GalleryCategory,
    web::{
        AppState,
        forms::CLASS_OPTIONS,
        templates::{NAV_ITEMS, PageLayout, escape_html, render_page},
    },
};

struct ContentPage {
    path: &'static str,
    title: &'static str,
    intro: &'static str,
    sections: &'static [(&'static str, &'static str)],
}

const CONTENT_PAGES: &[ContentPage] = &[
    ContentPage {
        path: "/about",
        title: "About Us",
        intro: "A CBSE-pattern co-educational school nurturing curious, confident and caring learners from Nursery to Class 10.",
        sections: &[
            ("Our Vision", "To be a centre of excellence where every child discovers their potential and grows into a responsible global citizen."),
            ("Our Mission", "To provide holistic education that balances academic rigour with sports, arts and values, in a safe and joyful campus."),
            ("Principal's Message", "We believe education is a partnership between school, parents and students. Our doors are always open."),
        ],
    },
    ContentPage {
        path: "/academics",
        title: "Academics",
        intro: "A structured curriculum with activity-based learning in the early years and concept-driven teaching in the senior classes.",
        sections: &[
            ("Pre-Primary (Nursery - UKG)", "Play-way methods, phonics, number readiness and motor skill development."),
            ("Primary (Class 1 - 5)", "Strong foundations in languages, mathematics, environmental studies and computer literacy."),
            ("Middle & Secondary (Class 6 - 10)", "Science and mathematics labs, project work and board examination preparation."),
        ],
    },
    ContentPage {
        path: "/faculty",
        title: "Faculty & Staff",
        intro: "Qualified, caring teachers who receive regular training in modern pedagogy.",
        sections: &[
            ("Teaching Staff", "Subject specialists for every stage, with a healthy student-teacher ratio."),
            ("Support Staff", "Trained attendants, transport staff, a school nurse and a dedicated counsellor."),
        ],
    },
    ContentPage {
        path: "/facilities",
        title: "Facilities",
        intro: "A green campus designed for learning, play and creativity.",
        sections: &[
            ("Smart Boards", "Interactive digital learning"),
            ("Sports & Playground", "Physical fitness activities"),
            ("Swimming Pool", "Aquatic training facility"),
            ("Art & Craft", "Creative expression studio"),
            ("Theatre", "Performing arts venue"),
            ("Green Campus", "Eco-friendly environment"),
            ("Library", "Extensive book collection"),
            ("Computer Lab", "Modern IT infrastructure"),
        ],
    },
    ContentPage {
        path: "/events",
        title: "Events & Notices",
        intro: "Highlights from the school calendar and important announcements.",
        sections: &[
            ("Annual Day", "Cultural performances by students across all classes."),
            ("Sports Day", "Track and field events, house competitions and prize distribution."),
            ("Independence Day", "Flag hoisting ceremony followed by a cultural programme."),
            ("Admissions Open", "Registrations for the new academic session are open for Nursery to Class 9."),
        ],
    },
    ContentPage {
        path: "/parents",
        title: "Parent Resources",
        intro: "Everything parents need through the academic year.",
        sections: &[
            ("Academic Syllabus", "Complete syllabus for all classes from Nursery to Class 10"),
            ("Time Tables", "Class-wise daily schedule and examination timetables"),
            ("School Policies", "Important school policies and guidelines for parents"),
            ("Uniform Guidelines", "Complete uniform specifications for all seasons"),
            ("Summer Uniform (April - October)", "White shirt, grey trousers or skirt, school tie and black shoes."),
            ("Winter Uniform (November - March)", "Navy blazer and sweater over the summer uniform, with grey socks."),
        ],
    },
];

struct CatalogueItem {
    category: GalleryCategory,
    title: &'static str,
    description: &'static str,
}

const GALLERY_CATALOGUE: &[CatalogueItem] = &[
    CatalogueItem { category: GalleryCategory::Campus, title: "Main Building", description: "Our beautiful main school building" },
    CatalogueItem { category: GalleryCategory::Classroom, title: "Smart Classroom", description: "Interactive learning environment" },
    CatalogueItem { category: GalleryCategory::Sports, title: "Sports Day", description: "Annual sports competition" },
    CatalogueItem { category: GalleryCategory::Events, title: "Annual Day", description: "Cultural performances by students" },
    CatalogueItem { category: GalleryCategory::Campus, title: "Library", description: "Well-stocked library" },
    CatalogueItem { category: GalleryCategory::Sports, title: "Swimming Pool", description: "Olympic-size swimming pool" },
    CatalogueItem { category: GalleryCategory::Classroom, title: "Computer Lab", description: "Modern IT infrastructure" },
    CatalogueItem { category: GalleryCategory::Events, title: "Independence Day", description: "Flag hoisting ceremony" },
    CatalogueItem { category: GalleryCategory::Campus, title: "Playground", description: "Expansive play areas" },
    CatalogueItem { category: GalleryCategory::Classroom, title: "Science Lab", description: "Hands-on experiments" },
    CatalogueItem { category: GalleryCategory::Events, title: "Art Exhibition", description: "Student artwork display" },
    CatalogueItem { category: GalleryCategory::Sports, title: "Cricket Match", description: "Inter-school tournament" },
];

#[derive(Default, Deserialize)]
pub struct SubmittedQuery {
    pub submitted: Option<String>,
}

#[derive(Default, Deserialize)]
pub struct GalleryQuery {
    pub category: Option<String>,
}

/// Wraps a page body in the site chrome, draining the session's notices.
pub fn render_for_session(
    state: &AppState,
    session: &mut SiteSession,
    meta_title: &str,
    active_path: &str,
    body_html: String,
) -> Html<String> {
    Html(render_page(PageLayout {
        site: state.config(),
        meta_title,
        active_path,
        body_html: Cow::Owned(body_html),
        elevated: session.is_elevated(),
        prompt_open: session.prompt_open(),
        notices: session.take_notices(),
    }))
}

pub async fn home_page(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Html<String>) {
    let (jar, mut session) = state.visit(jar).await;
    let school = escape_html(&state.config().school_name);
    let location = escape_html(&state.config().school_location);

    let facilities = CONTENT_PAGES
        .iter()
        .find(|page| page.path == "/facilities")
        .map(|page| render_cards(page.sections))
        .unwrap_or_default();

    let quick_links = NAV_ITEMS
        .iter()
        .skip(1)
        .map(|(label, href)| format!(r#"<a class="card" href="{href}">{}</a>"#, escape_html(label)))
        .collect::<Vec<_>>()
        .join("");

    let body = format!(
        r#"<section class="panel">
            <h1>Welcome to {school}, {location}</h1>
            <p class="note">Nurturing young minds with values, knowledge and confidence. Admissions are open for the new academic session.</p>
            <p><a class="cta" href="/admissions">Apply Now</a></p>
        </section>
        <section>
            <h2>Our Facilities</h2>
            {facilities}
        </section>
        <section>
            <h2>Explore</h2>
            <div class="grid">{quick_links}</div>
        </section>"#
    );

    let html = render_for_session(&state, &mut session, "Home", "/", body);
    (jar, html)
}

/// Serves the text-only pages, chosen by request path. Also the router
/// fallback, so any other path renders the site's not-found page.
pub async fn content_page(
    State(state): State<AppState>,
    uri: Uri,
    jar: CookieJar,
) -> (StatusCode, CookieJar, Html<String>) {
    let (jar, mut session) = state.visit(jar).await;

    let (status, title, path, body) = match CONTENT_PAGES.iter().find(|page| page.path == uri.path()) {
        Some(page) => (
            StatusCode::OK,
            page.title,
            page.path,
            format!(
                r#"<section class="panel"><h1>{title}</h1><p class="note">{intro}</p></section>
                <section>{cards}</section>"#,
                title = escape_html(page.title),
                intro = escape_html(page.intro),
                cards = render_cards(page.sections),
            ),
        ),
        None => (
            StatusCode::NOT_FOUND,
            "Not Found",
            "",
            r#"<section class="panel"><h1>Page not found</h1><p><a href="/">Back to home</a></p></section>"#
                .to_string(),
        ),
    };

    let html = render_for_session(&state, &mut session, title, path, body);
    (status, jar, html)
}

pub async fn admissions_page(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(params): Query<SubmittedQuery>,
) -> (CookieJar, Html<String>) {
    let (jar, mut session) = state.visit(jar).await;

    let body = if params.submitted.is_some() {
        format!(
            r#"<section class="panel">
                <h1>Application Submitted Successfully!</h1>
                <p class="note">Thank you for your interest in {school}. Our admissions team will contact you within 2-3 business days.</p>
                <p><a class="cta" href="/admissions">Submit Another Application</a></p>
            </section>"#,
            school = escape_html(&state.config().school_name),
        )
    } else {
        let class_options = CLASS_OPTIONS
            .iter()
            .map(|class| format!(r#"<option value="{class}">{class}</option>"#))
            .collect::<Vec<_>>()
            .join("");

        format!(
            r#"<section class="panel">
                <h1>Admissions</h1>
                <p class="note">Fill in the enquiry form below. Fields marked * are required. Submit required documents at the school office after our team contacts you.</p>
                <form method="post" action="/admissions">
                    <label for="student_name">Student Name *</label>
                    <input id="student_name" name="student_name" required>
                    <label for="parent_name">Parent/Guardian Name *</label>
                    <input id="parent_name" name="parent_name" required>
                    <label for="email">Email *</label>
                    <input id="email" type="email" name="email" required>
                    <label for="phone">Phone *</label>
                    <input id="phone" type="tel" name="phone" required>
                    <label for="class_applying">Applying for Class *</label>
                    <select id="class_applying" name="class_applying" required>
                        <option value="">Select class</option>
                        {class_options}
                    </select>
                    <label for="date_of_birth">Date of Birth</label>
                    <input id="date_of_birth" type="date" name="date_of_birth">
                    <label for="previous_school">Previous School</label>
                    <input id="previous_school" name="previous_school">
                    <label for="address">Address</label>
                    <textarea id="address" name="address" rows="3"></textarea>
                    <p><button type="submit">Submit Application</button></p>
                </form>
            </section>"#
        )
    };

    let html = render_for_session(&state, &mut session, "Admissions", "/admissions", body);
    (jar, html)
}

pub async fn contact_page(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(params): Query<SubmittedQuery>,
) -> (CookieJar, Html<String>) {
    let (jar, mut session) = state.visit(jar).await;

    let body = if params.submitted.is_some() {
        r#"<section class="panel">
            <h1>Message Sent Successfully!</h1>
            <p class="note">Thank you for reaching out. We will get back to you shortly.</p>
            <p><a class="cta" href="/contact">Send Another Message</a></p>
        </section>"#
            .to_string()
    } else {
        r#"<section class="panel">
            <h1>Contact Us</h1>
            <p class="note">Office hours: Monday to Saturday, 8:00 AM - 2:00 PM.</p>
            <form method="post" action="/contact">
                <label for="name">Your Name *</label>
                <input id="name" name="name" required>
                <label for="email">Email *</label>
                <input id="email" type="email" name="email" required>
                <label for="phone">Phone</label>
                <input id="phone" type="tel" name="phone">
                <label for="subject">Subject</label>
                <input id="subject" name="subject">
                <label for="message">Message *</label>
                <textarea id="message" name="message" rows="5" required></textarea>
                <p><button type="submit">Send Message</button></p>
            </form>
        </section>"#
            .to_string()
    };

    let html = render_for_session(&state, &mut session, "Contact Us", "/contact", body);
    (jar, html)
}

pub async fn gallery_page(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(params): Query<GalleryQuery>,
) -> (CookieJar, Html<String>) {
    let (jar, mut session) = state.visit(jar).await;
    let selected = params.category.as_deref().and_then(GalleryCategory::parse);

    let filters = std::iter::once(("all", "All Photos", selected.is_none()))
        .chain(
            GalleryCategory::ALL
                .iter()
                .map(|category| (category.as_str(), category.label(), selected == Some(*category))),
        )
        .map(|(value, label, active)| {
            let class = if active { " class=\"active\"" } else { "" };
            format!(r#"<a href="/gallery?category={value}"{class}>{label}</a>"#)
        })
        .collect::<Vec<_>>()
        .join("");

    let mut cards = String::new();
    for item in GALLERY_CATALOGUE
        .iter()
        .filter(|item| selected.is_none_or(|category| item.category == category))
    {
        cards.push_str(&format!(
            r#"<div class="card"><h3>{title}</h3><p class="note">{description}</p><small>{category}</small></div>"#,
            title = escape_html(item.title),
            description = escape_html(item.description),
            category = item.category.label(),
        ));
    }
    for image in session
        .store()
        .gallery_images()
        .iter()
        .filter(|image| selected.is_none_or(|category| image.fields().category == category))
    {
        let fields = image.fields();
        cards.push_str(&format!(
            r#"<div class="card"><img src="{url}" alt="{title}" style="width:100%;border-radius:8px;"><h3>{title}</h3><p class="note">{description}</p><small>{category}</small></div>"#,
            url = escape_html(&fields.url),
            title = escape_html(&fields.title),
            description = escape_html(&fields.description),
            category = fields.category.label(),
        ));
    }

    if cards.is_empty() {
        cards.push_str(r#"<p class="note">No photos found in this category.</p>"#);
    }

    let body = format!(
        r#"<section class="panel"><h1>Gallery</h1><nav class="primary">{filters}</nav></section>
        <section class="grid">{cards}</section>"#
    );

    let html = render_for_session(&state, &mut session, "Gallery", "/gallery", body);
    (jar, html)
}

fn render_cards(sections: &[(&str, &str)]) -> String {
    let cards = sections
        .iter()
        .map(|(heading, text)| {
            format!(
                r#"<div class="card"><h3>{}</h3><p class="note">{}</p></div>"#,
                escape_html(heading),
                escape_html(text)
            )
        })
        .collect::<Vec<_>>()
        .join("");
    format!(r#"<div class="grid">{cards}</div>"#)
}
