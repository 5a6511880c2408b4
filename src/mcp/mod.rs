// Model Context Protocol surface: envelopes, tool catalog and dispatch.
pub mod handler;
pub mod protocol;
pub mod registry;
pub mod tools;
