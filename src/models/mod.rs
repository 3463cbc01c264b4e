pub mod audit_log;
pub mod course;
pub mod enrollment;
pub mod exam;
pub mod exam_attempt;
