// Application layer: wires the calculator, history and config behind the CLI commands.

pub mod runner;

pub use runner::{App, Rendered};
