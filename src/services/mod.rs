pub mod attempt_service;
pub mod audit_service;
pub mod certificate_service;
pub mod enrollment_service;
pub mod exam_bank;
pub mod scoring_service;
