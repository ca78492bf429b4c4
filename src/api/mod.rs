pub(crate) mod admin;
pub(crate) mod assignment;
pub(crate) mod certificate;
pub(crate) mod course;
pub(crate) mod dashboard;
pub(crate) mod enrollment;
pub(crate) mod errors;
pub(crate) mod extract;
pub(crate) mod guards;
pub(crate) mod handlers;
pub(crate) mod lecture;
pub(crate) mod progress;
pub(crate) mod quiz;
pub(crate) mod router;
pub(crate) mod validation;
pub(crate) mod watch_time;
