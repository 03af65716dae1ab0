pub mod config;
pub mod driver;
pub mod generators;
pub mod logging;
pub mod maze;
pub mod prng;
pub mod progress;
pub mod render;
pub mod solvers;
