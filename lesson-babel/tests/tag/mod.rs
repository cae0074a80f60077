//! Tag format tests
//!
//! The editor stores documents as tag markup; reading what we write must
//! give back the same tree.

mod round_trip;
