//! Identity store: user records and their family affiliation. No routes of
//! its own; consumed by auth and the membership service.

pub mod repo;
