pub mod context;
pub mod file;
pub mod plan;

pub use context::build_context;
pub use plan::{
    execute_plan, plan_render, write_atomic, GeneratedProject, GenerationPlan, PlannedFile,
};
