pub mod formatter;

pub use formatter::{
    assignments_json, format_assignments, format_assignments_tsv, format_interested, format_score,
    format_task_order, format_task_order_tsv, should_use_colors, task_order_json,
};
