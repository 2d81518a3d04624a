//! Terminal and CI presentation

pub mod ci;
pub mod output;

pub use ci::{github_actions_annotation, is_github_actions, AnnotationLevel};
pub use output::{
    failure_json, render_cleanup_warning, render_config_warnings, render_failure, success_json,
    SUCCESS_LINE,
};
