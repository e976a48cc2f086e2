use axum::{
    extract::{Form, State},
    response::Redirect,
};
use axum_extra::extract::cookie::CookieJar;
use serde::Deserialize;
use tracing::{info, warn};

use crate::{
    session::Notice,
    store::{AdmissionFields, CollectionKind, ContactFields},
    web::AppState,
};

pub const CLASS_OPTIONS: &[&str] = &[
    "Nursery", "LKG", "UKG", "Class 1", "Class 2", "Class 3", "Class 4", "Class 5", "Class 6",
    "Class 7", "Class 8", "Class 9", "Class 10",
];

/// Raised when a submitted form lacks required values.
#[derive(Debug)]
pub struct ValidationError {
    missing: Vec<&'static str>,
}

impl ValidationError {
    pub fn missing(&self) -> &[&'static str] {
        &self.missing
    }
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "missing required fields: {}", self.missing.join(", "))
    }
}

impl std::error::Error for ValidationError {}

#[derive(Debug, Default, Deserialize)]
pub struct AdmissionForm {
    #[serde(default)]
    pub student_name: String,
    #[serde(default)]
    pub parent_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub class_applying: String,
    #[serde(default)]
    pub date_of_birth: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub previous_school: String,
}

impl AdmissionForm {
    pub fn into_fields(self) -> Result<AdmissionFields, ValidationError> {
        let fields = AdmissionFields {
            student_name: self.student_name.trim().to_string(),
            parent_name: self.parent_name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            class_applying: self.class_applying.trim().to_string(),
            date_of_birth: self.date_of_birth.trim().to_string(),
            address: self.address.trim().to_string(),
            previous_school: self.previous_school.trim().to_string(),
        };

        require(&[
            ("studentName", &fields.student_name),
            ("parentName", &fields.parent_name),
            ("email", &fields.email),
            ("phone", &fields.phone),
            ("classApplying", &fields.class_applying),
        ])?;

        Ok(fields)
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct ContactForm {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

impl ContactForm {
    pub fn into_fields(self) -> Result<ContactFields, ValidationError> {
        let fields = ContactFields {
            name: self.name.trim().to_string(),
            email: self.email.trim().to_string(),
            phone: self.phone.trim().to_string(),
            subject: self.subject.trim().to_string(),
            message: self.message.trim().to_string(),
        };

        require(&[
            ("name", &fields.name),
            ("email", &fields.email),
            ("message", &fields.message),
        ])?;

        Ok(fields)
    }
}

fn require(values: &[(&'static str, &String)]) -> Result<(), ValidationError> {
    let missing: Vec<&'static str> = values
        .iter()
        .filter(|(_, value)| value.is_empty())
        .map(|(name, _)| *name)
        .collect();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(ValidationError { missing })
    }
}

pub async fn submit_admission(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<AdmissionForm>,
) -> (CookieJar, Redirect) {
    let (jar, mut session) = state.session(jar).await;

    match form.into_fields() {
        Ok(fields) => {
            let record = session.store_mut().add_admission(fields);
            info!(collection = CollectionKind::Admissions.as_str(), id = %record.id(), "submission accepted");
            session.push_notice(
                Notice::success("Application Submitted!")
                    .with_description("We will contact you shortly regarding your admission inquiry."),
            );
            (jar, Redirect::to("/admissions?submitted=1"))
        }
        Err(err) => {
            warn!(collection = CollectionKind::Admissions.as_str(), %err, "submission rejected");
            session.push_notice(Notice::destructive("Please fill all required fields"));
            (jar, Redirect::to("/admissions"))
        }
    }
}

pub async fn submit_contact(
    State(state): State<AppState>,
    jar: CookieJar,
    Form(form): Form<ContactForm>,
) -> (CookieJar, Redirect) {
    let (jar, mut session) = state.session(jar).await;

    match form.into_fields() {
        Ok(fields) => {
            let record = session.store_mut().add_contact(fields);
            info!(collection = CollectionKind::Contacts.as_str(), id = %record.id(), "submission accepted");
            session.push_notice(
                Notice::success("Message Sent!").with_description("We will get back to you shortly."),
            );
            (jar, Redirect::to("/contact?submitted=1"))
        }
        Err(err) => {
            warn!(collection = CollectionKind::Contacts.as_str(), %err, "submission rejected");
            session.push_notice(Notice::destructive("Please fill all required fields"));
            (jar, Redirect::to("/contact"))
        }
    }
}
