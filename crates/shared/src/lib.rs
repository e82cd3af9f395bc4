//! Process bootstrap shared by Time Traveler binaries

pub mod bootstrap;
