pub mod defaults;
pub mod service;

pub use defaults::builtin_case_defaults;
pub use service::IntakeService;
