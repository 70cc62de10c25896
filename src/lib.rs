// Library root
// -----------
// The binary (`main.rs`) wires these modules together; keeping them in a
// library lets the resolver run against stub APIs in tests.
//
// Module responsibilities:
// - `args`: turns the command line into per-flag occurrence lists.
// - `config`: config directory and endpoint, resolved once at start-up.
// - `key_store`: reads and writes the persisted API key.
// - `api`: blocking HTTP client for the shorten/expand endpoint.
// - `resolver`: decides which key to use and which call to make.
// - `error`: error type and the one-line messages shown to the user.
// - `ui`: spinner shown while a request is in flight.
pub mod api;
pub mod args;
pub mod config;
pub mod error;
pub mod key_store;
pub mod resolver;
pub mod ui;
