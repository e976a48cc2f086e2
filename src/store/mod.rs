//! In-memory submission store for a single site session.
//!
//! Holds the three record collections (admission applications, contact
//! messages and uploaded gallery images). Records are only ever created by the
//! `add_*` operations, which stamp a fresh identifier and submission time.

pub mod csv;

use std::borrow::Cow;

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Serialize, Serializer};
use tokio::sync::broadcast;
use uuid::Uuid;

pub use csv::{CsvColumns, export_csv};

const EVENT_CAPACITY: usize = 64;

/// A stored record together with the metadata assigned at creation.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Submitted<T> {
    #[serde(flatten)]
    fields: T,
    id: Uuid,
    #[serde(serialize_with = "serialize_iso")]
    submitted_at: DateTime<Utc>,
}

impl<T> Submitted<T> {
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn submitted_at(&self) -> DateTime<Utc> {
        self.submitted_at
    }

    pub fn fields(&self) -> &T {
        &self.fields
    }

    /// ISO-8601 rendering with millisecond precision, e.g. `2025-01-31T09:15:00.000Z`.
    pub fn submitted_at_iso(&self) -> String {
        iso_timestamp(self.submitted_at)
    }
}

pub type AdmissionApplication = Submitted<AdmissionFields>;
pub type ContactMessage = Submitted<ContactFields>;
pub type GalleryImage = Submitted<GalleryImageFields>;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdmissionFields {
    pub student_name: String,
    pub parent_name: String,
    pub email: String,
    pub phone: String,
    pub class_applying: String,
    pub date_of_birth: String,
    pub address: String,
    pub previous_school: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContactFields {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub subject: String,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GalleryImageFields {
    pub title: String,
    pub description: String,
    pub category: GalleryCategory,
    pub url: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum GalleryCategory {
    Campus,
    Classroom,
    Sports,
    Events,
}

impl GalleryCategory {
    pub const ALL: [GalleryCategory; 4] = [
        GalleryCategory::Campus,
        GalleryCategory::Classroom,
        GalleryCategory::Sports,
        GalleryCategory::Events,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GalleryCategory::Campus => "campus",
            GalleryCategory::Classroom => "classroom",
            GalleryCategory::Sports => "sports",
            GalleryCategory::Events => "events",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            GalleryCategory::Campus => "Campus",
            GalleryCategory::Classroom => "Classrooms",
            GalleryCategory::Sports => "Sports",
            GalleryCategory::Events => "Events",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "campus" => Some(GalleryCategory::Campus),
            "classroom" => Some(GalleryCategory::Classroom),
            "sports" => Some(GalleryCategory::Sports),
            "events" => Some(GalleryCategory::Events),
            _ => None,
        }
    }
}

/// Names one of the store's collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
    Admissions,
    Contacts,
    Gallery,
}

impl CollectionKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            CollectionKind::Admissions => "admissions",
            CollectionKind::Contacts => "contacts",
            CollectionKind::Gallery => "gallery",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "admissions" => Some(CollectionKind::Admissions),
            "contacts" => Some(CollectionKind::Contacts),
            "gallery" => Some(CollectionKind::Gallery),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Change {
    Added(Uuid),
    Removed(Uuid),
}

/// Published to subscribers after every effective mutation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StoreEvent {
    pub collection: CollectionKind,
    pub change: Change,
}

/// Any record the store holds, for views that handle all kinds at once.
#[derive(Debug, Clone)]
pub enum Record {
    Admission(AdmissionApplication),
    Contact(ContactMessage),
    Gallery(GalleryImage),
}

impl Record {
    pub fn kind(&self) -> CollectionKind {
        match self {
            Record::Admission(_) => CollectionKind::Admissions,
            Record::Contact(_) => CollectionKind::Contacts,
            Record::Gallery(_) => CollectionKind::Gallery,
        }
    }

    pub fn id(&self) -> Uuid {
        match self {
            Record::Admission(record) => record.id(),
            Record::Contact(record) => record.id(),
            Record::Gallery(record) => record.id(),
        }
    }

    pub fn title(&self) -> Cow<'_, str> {
        match self {
            Record::Admission(record) => {
                Cow::Owned(format!("Admission: {}", record.fields().student_name))
            }
            Record::Contact(record) => Cow::Owned(format!("Message from {}", record.fields().name)),
            Record::Gallery(record) => Cow::Borrowed(record.fields().title.as_str()),
        }
    }

    /// Labelled rows for a details view, metadata last.
    pub fn detail_rows(&self) -> Vec<(&'static str, String)> {
        let (mut rows, submitted_at) = match self {
            Record::Admission(record) => {
                let f = record.fields();
                (
                    vec![
                        ("Student Name", f.student_name.clone()),
                        ("Parent Name", f.parent_name.clone()),
                        ("Email", f.email.clone()),
                        ("Phone", f.phone.clone()),
                        ("Class Applying", f.class_applying.clone()),
                        ("Date of Birth", f.date_of_birth.clone()),
                        ("Address", f.address.clone()),
                        ("Previous School", f.previous_school.clone()),
                    ],
                    record.submitted_at_iso(),
                )
            }
            Record::Contact(record) => {
                let f = record.fields();
                (
                    vec![
                        ("Name", f.name.clone()),
                        ("Email", f.email.clone()),
                        ("Phone", f.phone.clone()),
                        ("Subject", f.subject.clone()),
                        ("Message", f.message.clone()),
                    ],
                    record.submitted_at_iso(),
                )
            }
            Record::Gallery(record) => {
                let f = record.fields();
                (
                    vec![
                        ("Title", f.title.clone()),
                        ("Description", f.description.clone()),
                        ("Category", f.category.label().to_string()),
                    ],
                    record.submitted_at_iso(),
                )
            }
        };
        rows.push(("Identifier", self.id().to_string()));
        rows.push(("Submitted", submitted_at));
        rows
    }
}

#[derive(Debug)]
pub struct SubmissionStore {
    admissions: Vec<AdmissionApplication>,
    contacts: Vec<ContactMessage>,
    gallery: Vec<GalleryImage>,
    events: broadcast::Sender<StoreEvent>,
}

impl Default for SubmissionStore {
    fn default() -> Self {
        Self::new()
    }
}

impl SubmissionStore {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            admissions: Vec::new(),
            contacts: Vec::new(),
            gallery: Vec::new(),
            events,
        }
    }

    /// Receives a [`StoreEvent`] for every add and every delete that removed a record.
    pub fn subscribe(&self) -> broadcast::Receiver<StoreEvent> {
        self.events.subscribe()
    }

    pub fn add_admission(&mut self, fields: AdmissionFields) -> AdmissionApplication {
        let record = stamp(fields, &self.admissions);
        self.admissions.push(record.clone());
        self.notify(CollectionKind::Admissions, Change::Added(record.id));
        record
    }

    pub fn add_contact(&mut self, fields: ContactFields) -> ContactMessage {
        let record = stamp(fields, &self.contacts);
        self.contacts.push(record.clone());
        self.notify(CollectionKind::Contacts, Change::Added(record.id));
        record
    }

    pub fn add_gallery_image(&mut self, fields: GalleryImageFields) -> GalleryImage {
        let record = stamp(fields, &self.gallery);
        self.gallery.push(record.clone());
        self.notify(CollectionKind::Gallery, Change::Added(record.id));
        record
    }

    /// Returns whether a record was removed. Unknown ids are ignored.
    pub fn delete_admission(&mut self, id: Uuid) -> bool {
        let removed = remove_by_id(&mut self.admissions, id);
        if removed {
            self.notify(CollectionKind::Admissions, Change::Removed(id));
        }
        removed
    }

    pub fn delete_contact(&mut self, id: Uuid) -> bool {
        let removed = remove_by_id(&mut self.contacts, id);
        if removed {
            self.notify(CollectionKind::Contacts, Change::Removed(id));
        }
        removed
    }

    pub fn delete_gallery_image(&mut self, id: Uuid) -> bool {
        let removed = remove_by_id(&mut self.gallery, id);
        if removed {
            self.notify(CollectionKind::Gallery, Change::Removed(id));
        }
        removed
    }

    pub fn delete(&mut self, kind: CollectionKind, id: Uuid) -> bool {
        match kind {
            CollectionKind::Admissions => self.delete_admission(id),
            CollectionKind::Contacts => self.delete_contact(id),
            CollectionKind::Gallery => self.delete_gallery_image(id),
        }
    }

    pub fn admissions(&self) -> Vec<AdmissionApplication> {
        self.admissions.clone()
    }

    pub fn contacts(&self) -> Vec<ContactMessage> {
        self.contacts.clone()
    }

    pub fn gallery_images(&self) -> Vec<GalleryImage> {
        self.gallery.clone()
    }

    pub fn len(&self, kind: CollectionKind) -> usize {
        match kind {
            CollectionKind::Admissions => self.admissions.len(),
            CollectionKind::Contacts => self.contacts.len(),
            CollectionKind::Gallery => self.gallery.len(),
        }
    }

    pub fn find(&self, kind: CollectionKind, id: Uuid) -> Option<Record> {
        match kind {
            CollectionKind::Admissions => self
                .admissions
                .iter()
                .find(|record| record.id == id)
                .cloned()
                .map(Record::Admission),
            CollectionKind::Contacts => self
                .contacts
                .iter()
                .find(|record| record.id == id)
                .cloned()
                .map(Record::Contact),
            CollectionKind::Gallery => self
                .gallery
                .iter()
                .find(|record| record.id == id)
                .cloned()
                .map(Record::Gallery),
        }
    }

    /// Serializes one collection as a JSON array, in insertion order.
    pub fn collection_json(&self, kind: CollectionKind) -> serde_json::Result<serde_json::Value> {
        match kind {
            CollectionKind::Admissions => serde_json::to_value(&self.admissions),
            CollectionKind::Contacts => serde_json::to_value(&self.contacts),
            CollectionKind::Gallery => serde_json::to_value(&self.gallery),
        }
    }

    /// CSV for one collection, or `None` when it is empty.
    pub fn collection_csv(&self, kind: CollectionKind) -> Option<String> {
        match kind {
            CollectionKind::Admissions => export_csv(&self.admissions),
            CollectionKind::Contacts => export_csv(&self.contacts),
            CollectionKind::Gallery => export_csv(&self.gallery),
        }
    }

    fn notify(&self, collection: CollectionKind, change: Change) {
        // No receivers is fine.
        let _ = self.events.send(StoreEvent { collection, change });
    }
}

pub fn iso_timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Millis, true)
}

fn serialize_iso<S: Serializer>(value: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(&iso_timestamp(*value))
}

fn stamp<T>(fields: T, existing: &[Submitted<T>]) -> Submitted<T> {
    Submitted {
        fields,
        id: fresh_id(existing),
        submitted_at: Utc::now(),
    }
}

fn fresh_id<T>(existing: &[Submitted<T>]) -> Uuid {
    loop {
        let candidate = Uuid::new_v4();
        if existing.iter().all(|record| record.id != candidate) {
            return candidate;
        }
    }
}

fn remove_by_id<T>(records: &mut Vec<Submitted<T>>, id: Uuid) -> bool {
    match records.iter().position(|record| record.id == id) {
        Some(index) => {
            records.remove(index);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;

    fn admission(student: &str) -> AdmissionFields {
        AdmissionFields {
            student_name: student.into(),
            parent_name: "Parent".into(),
            email: "family@example.com".into(),
            phone: "9876543210".into(),
            class_applying: "Class 3".into(),
            ..Default::default()
        }
    }

    #[test]
    fn added_records_get_distinct_ids_and_stable_timestamps() {
        let mut store = SubmissionStore::new();
        for idx in 0..50 {
            store.add_admission(admission(&format!("Student {idx}")));
        }

        let listed = store.admissions();
        let ids: HashSet<Uuid> = listed.iter().map(|r| r.id()).collect();
        assert_eq!(ids.len(), 50);

        let first = &listed[0];
        let again = store
            .find(CollectionKind::Admissions, first.id())
            .expect("record present");
        let Record::Admission(again) = again else {
            panic!("wrong record kind");
        };
        assert_eq!(again.submitted_at(), first.submitted_at());
    }

    #[test]
    fn delete_twice_removes_at_most_one_record() {
        let mut store = SubmissionStore::new();
        let keep = store.add_contact(ContactFields {
            name: "Keep".into(),
            ..Default::default()
        });
        let gone = store.add_contact(ContactFields {
            name: "Gone".into(),
            ..Default::default()
        });

        assert!(store.delete_contact(gone.id()));
        assert!(!store.delete_contact(gone.id()));
        assert!(!store.delete_contact(Uuid::new_v4()));

        let remaining = store.contacts();
        assert_eq!(remaining.len(), 1);
        assert_eq!(remaining[0].id(), keep.id());
    }

    #[test]
    fn listing_preserves_insertion_order_across_deletes() {
        let mut store = SubmissionStore::new();
        let a = store.add_admission(admission("A"));
        let b = store.add_admission(admission("B"));
        let c = store.add_admission(admission("C"));
        let d = store.add_admission(admission("D"));

        store.delete_admission(b.id());
        let e = store.add_admission(admission("E"));

        let order: Vec<Uuid> = store.admissions().iter().map(|r| r.id()).collect();
        assert_eq!(order, vec![a.id(), c.id(), d.id(), e.id()]);
    }

    #[test]
    fn snapshots_are_detached_from_the_store() {
        let mut store = SubmissionStore::new();
        store.add_gallery_image(GalleryImageFields {
            title: "Sports Day".into(),
            description: String::new(),
            category: GalleryCategory::Sports,
            url: "data:image/png;base64,AAAA".into(),
        });

        let mut snapshot = store.gallery_images();
        snapshot.clear();

        assert_eq!(store.gallery_images().len(), 1);
        assert_eq!(store.len(CollectionKind::Gallery), 1);
    }

    #[test]
    fn subscribers_see_adds_and_effective_deletes() {
        let mut store = SubmissionStore::new();
        let mut rx = store.subscribe();

        let record = store.add_admission(admission("Asha Rao"));
        store.delete_admission(Uuid::new_v4());
        store.delete_admission(record.id());

        assert_eq!(
            rx.try_recv().ok(),
            Some(StoreEvent {
                collection: CollectionKind::Admissions,
                change: Change::Added(record.id()),
            })
        );
        assert_eq!(
            rx.try_recv().ok(),
            Some(StoreEvent {
                collection: CollectionKind::Admissions,
                change: Change::Removed(record.id()),
            })
        );
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn json_uses_camel_case_fields() {
        let mut store = SubmissionStore::new();
        store.add_admission(admission("Asha Rao"));

        let value = store
            .collection_json(CollectionKind::Admissions)
            .expect("serializable");
        let first = &value[0];
        assert_eq!(first["studentName"], "Asha Rao");
        assert!(first["id"].is_string());
    }

    #[test]
    fn json_timestamp_matches_millisecond_rendering() {
        let mut store = SubmissionStore::new();
        let record = store.add_admission(admission("Asha Rao"));

        let value = store
            .collection_json(CollectionKind::Admissions)
            .expect("serializable");
        let rendered = value[0]["submittedAt"].as_str().expect("string timestamp");
        assert_eq!(rendered, record.submitted_at_iso());
        assert_eq!(rendered.len(), "2025-01-31T09:15:00.000Z".len());
        assert!(rendered.ends_with('Z'));
    }

    #[test]
    fn detail_rows_cover_every_kind() {
        let mut store = SubmissionStore::new();
        let contact = store.add_contact(ContactFields {
            name: "Meera".into(),
            email: "meera@example.com".into(),
            message: "Bus routes?".into(),
            ..Default::default()
        });

        let record = store
            .find(CollectionKind::Contacts, contact.id())
            .expect("present");
        assert_eq!(record.kind(), CollectionKind::Contacts);
        assert_eq!(record.title(), "Message from Meera");
        let rows = record.detail_rows();
        assert_eq!(rows[0], ("Name", "Meera".to_string()));
        assert_eq!(rows.last().map(|row| row.0), Some("Submitted"));
    }

    #[test]
    fn category_parsing_accepts_known_values_only() {
        for category in GalleryCategory::ALL {
            assert_eq!(GalleryCategory::parse(category.as_str()), Some(category));
        }
        assert_eq!(GalleryCategory::parse("library"), None);
        assert_eq!(CollectionKind::parse("gallery"), Some(CollectionKind::Gallery));
        assert_eq!(CollectionKind::parse("users"), None);
    }
}
