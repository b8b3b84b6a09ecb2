// Root shell: re-exports for workspace crates used by bins and tests.
pub use cursor_core as cursor;
pub use data_runtime as data;
pub use ecs_core as ecs;
pub mod harness;
