// Composition root of the membership admin client.
//
// Responsibilities
// - Read config from environment.
// - Install logging.
// - Instantiate the HTTP gateway and hand it to the command being run.

pub mod cli;
pub mod config;
pub mod telemetry;
