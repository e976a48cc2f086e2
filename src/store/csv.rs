use super::{
    AdmissionFields, ContactFields, GalleryImageFields, Submitted, iso_timestamp,
};

/// Named column values of a record, in export order.
pub trait CsvColumns {
    fn csv_columns(&self) -> Vec<(&'static str, String)>;
}

impl CsvColumns for AdmissionFields {
    fn csv_columns(&self) -> Vec<(&'static str, String)> {
        vec![
            ("studentName", self.student_name.clone()),
            ("parentName", self.parent_name.clone()),
            ("email", self.email.clone()),
            ("phone", self.phone.clone()),
            ("classApplying", self.class_applying.clone()),
            ("dateOfBirth", self.date_of_birth.clone()),
            ("address", self.address.clone()),
            ("previousSchool", self.previous_school.clone()),
        ]
    }
}

impl CsvColumns for ContactFields {
    fn csv_columns(&self) -> Vec<(&'static str, String)> {
        vec![
            ("name", self.name.clone()),
            ("email", self.email.clone()),
            ("phone", self.phone.clone()),
            ("subject", self.subject.clone()),
            ("message", self.message.clone()),
        ]
    }
}

impl CsvColumns for GalleryImageFields {
    fn csv_columns(&self) -> Vec<(&'static str, String)> {
        vec![
            ("title", self.title.clone()),
            ("description", self.description.clone()),
            ("category", self.category.as_str().to_string()),
            ("url", self.url.clone()),
        ]
    }
}

impl<T: CsvColumns> CsvColumns for Submitted<T> {
    fn csv_columns(&self) -> Vec<(&'static str, String)> {
        let mut columns = self.fields.csv_columns();
        columns.push(("id", self.id.to_string()));
        columns.push(("submittedAt", iso_timestamp(self.submitted_at)));
        columns
    }
}

/// Renders records as CSV: a header of field names taken from the first
/// record, then one fully quoted row per record. Returns `None` for an empty
/// slice so callers can hide the export instead of offering a header-only file.
pub fn export_csv<R: CsvColumns>(records: &[R]) -> Option<String> {
    let first = records.first()?;

    let header = first
        .csv_columns()
        .into_iter()
        .map(|(name, _)| name)
        .collect::<Vec<_>>()
        .join(",");

    let mut lines = Vec::with_capacity(records.len() + 1);
    lines.push(header);
    for record in records {
        let row = record
            .csv_columns()
            .into_iter()
            .map(|(_, value)| quote(&value))
            .collect::<Vec<_>>()
            .join(",");
        lines.push(row);
    }

    Some(lines.join("\n"))
}

fn quote(value: &str) -> String {
    format!("\"{}\"", value.replace('"', "\"\""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{ContactFields, SubmissionStore};

    #[test]
    fn empty_collection_has_no_export() {
        let records: Vec<Submitted<ContactFields>> = Vec::new();
        assert!(export_csv(&records).is_none());
    }

    #[test]
    fn admissions_export_header_then_rows_in_order() {
        let mut store = SubmissionStore::new();
        store.add_admission(AdmissionFields {
            student_name: "Asha Rao".into(),
            parent_name: "R. Rao".into(),
            ..Default::default()
        });
        store.add_admission(AdmissionFields {
            student_name: "Vik Shah".into(),
            parent_name: "S. Shah".into(),
            ..Default::default()
        });

        let csv = export_csv(&store.admissions()).expect("non-empty");
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "studentName,parentName,email,phone,classApplying,dateOfBirth,address,previousSchool,id,submittedAt"
        );
        assert!(lines[1].starts_with("\"Asha Rao\",\"R. Rao\","));
        assert!(lines[2].starts_with("\"Vik Shah\",\"S. Shah\","));
    }

    #[test]
    fn embedded_quotes_are_doubled_and_commas_stay_inside_quotes() {
        let mut store = SubmissionStore::new();
        store.add_contact(ContactFields {
            name: "Dev \"DJ\" Joshi".into(),
            email: "dj@example.com".into(),
            message: "Fees, transport, uniforms".into(),
            ..Default::default()
        });

        let csv = export_csv(&store.contacts()).expect("non-empty");
        let row = csv.lines().nth(1).expect("data row");
        assert!(row.starts_with("\"Dev \"\"DJ\"\" Joshi\",\"dj@example.com\",\"\",\"\",\"Fees, transport, uniforms\","));
    }
}
