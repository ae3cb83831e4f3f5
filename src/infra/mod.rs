//! Everything that shells out: process execution, docker, tool checks and
//! stack bootstrap.

pub mod bootstrap;
pub mod docker;
pub mod prerequisites;
pub mod process;

pub use prerequisites::check_prerequisites;
pub use process::{CommandOutput, CommandRunner, CommandSpec, SystemCommandRunner, run_checked};
