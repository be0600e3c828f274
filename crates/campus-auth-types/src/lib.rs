//! Session-token types: JWT issue/validate and bearer-header parsing.

pub mod bearer;
pub mod token;
