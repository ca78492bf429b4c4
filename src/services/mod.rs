pub(crate) mod assignment_grading;
pub(crate) mod certificate;
pub(crate) mod completion;
pub(crate) mod dashboard;
pub(crate) mod progress_summary;
pub(crate) mod quiz_grading;
