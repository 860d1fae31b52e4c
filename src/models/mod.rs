pub mod announcement;
pub mod payload;
pub mod timestamp;
pub mod uri_string;
