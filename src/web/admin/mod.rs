mod auth;
mod dashboard;
mod gallery;
mod records;

pub use dashboard::dashboard;
pub use gallery::upload_gallery_image;
pub use records::{delete_record, export_collection, list_records_json, record_details};
