pub mod accounts;
pub mod cascade;
pub mod classes;
pub mod enrollments;

pub use accounts::AccountService;
pub use cascade::SeriesCutoff;
pub use classes::ClassSeriesService;
pub use enrollments::EnrollmentService;
